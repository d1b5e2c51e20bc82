//! Pass-scoped node arena.
//!
//! One [`Ast`] holds every node of a compilation unit together with the
//! flat child-list storage, scope records, the name interner, provenance
//! edges and the synthetic-name counter. Nothing is freed individually:
//! dropping the `Ast` tears the whole unit down.

use std::fmt;

use crate::provenance::ProvenanceTable;
use crate::scope::{Scope, ScopeKind};
use crate::{AllocError, Interner, Name, Node, NodeId, NodeKind, NodeRange, NodeTag, ScopeId, Slot, Span};

/// Arena of nodes for one compilation unit.
pub struct Ast {
    pub(crate) nodes: Vec<Node>,
    pub(crate) lists: Vec<NodeId>,
    pub(crate) scopes: Vec<Scope>,
    pub(crate) interner: Interner,
    pub(crate) provenance: ProvenanceTable,
    gensym_counter: u32,
    node_limit: Option<usize>,
    cleaned_up: bool,
}

impl Ast {
    pub fn new() -> Self {
        Ast {
            nodes: Vec::new(),
            lists: Vec::new(),
            scopes: Vec::new(),
            interner: Interner::new(),
            provenance: ProvenanceTable::default(),
            gensym_counter: 0,
            node_limit: None,
            cleaned_up: false,
        }
    }

    /// Arena that refuses to grow past `limit` nodes.
    pub fn with_node_limit(limit: usize) -> Self {
        Ast {
            node_limit: Some(limit),
            ..Self::new()
        }
    }

    /// Allocate a node.
    ///
    /// Every direct child gets its parent set to the new node, and a
    /// scope-bearing kind gets a fresh empty scope.
    ///
    /// # Errors
    /// Fails when the node limit is reached or the arena cannot grow.
    pub fn alloc(&mut self, kind: NodeKind, span: Span) -> Result<NodeId, AllocError> {
        if let Some(limit) = self.node_limit {
            if self.nodes.len() >= limit {
                return Err(AllocError::NodeLimit { limit });
            }
        }
        let id = next_index(self.nodes.len(), "node").map(NodeId::new)?;
        self.nodes
            .try_reserve(1)
            .map_err(|_| AllocError::OutOfMemory { what: "nodes" })?;
        // Everything fallible happens before the node becomes visible.
        let scope = match ScopeKind::for_tag(kind.tag()) {
            Some(scope_kind) => Some(self.alloc_scope(scope_kind, id)?),
            None => None,
        };
        let mut node = Node::new(kind, span);
        node.scope = scope;
        self.nodes.push(node);
        self.adopt_children(id);
        Ok(id)
    }

    /// Store a child list.
    ///
    /// # Errors
    /// Fails when the list is longer than `u16::MAX` or storage cannot grow.
    pub fn alloc_list(&mut self, ids: &[NodeId]) -> Result<NodeRange, AllocError> {
        if ids.is_empty() {
            return Ok(NodeRange::EMPTY);
        }
        let len = u16::try_from(ids.len()).map_err(|_| AllocError::ListTooLong {
            len: ids.len(),
            max: u16::MAX as usize,
        })?;
        let start = next_index(self.lists.len(), "list")?;
        self.lists
            .try_reserve(ids.len())
            .map_err(|_| AllocError::OutOfMemory { what: "child lists" })?;
        self.lists.extend_from_slice(ids);
        Ok(NodeRange::new(start, len))
    }

    pub(crate) fn alloc_scope(&mut self, kind: ScopeKind, node: NodeId) -> Result<ScopeId, AllocError> {
        let id = next_index(self.scopes.len(), "scope").map(ScopeId::new)?;
        self.scopes
            .try_reserve(1)
            .map_err(|_| AllocError::OutOfMemory { what: "scopes" })?;
        self.scopes.push(Scope::new(kind, node));
        Ok(id)
    }

    #[inline]
    pub fn list(&self, range: NodeRange) -> &[NodeId] {
        let start = range.start as usize;
        &self.lists[start..start + range.len()]
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    #[inline]
    pub fn kind(&self, id: NodeId) -> NodeKind {
        *self.nodes[id.index()].kind()
    }

    #[inline]
    pub fn tag(&self, id: NodeId) -> NodeTag {
        self.nodes[id.index()].tag()
    }

    #[inline]
    pub fn span(&self, id: NodeId) -> Span {
        self.nodes[id.index()].span()
    }

    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.index()].parent()
    }

    /// Replace a node's payload with one of the same kind and adopt the new
    /// children.
    ///
    /// # Panics
    /// Panics if `kind` has a different tag.
    pub fn set_kind(&mut self, id: NodeId, kind: NodeKind) {
        self.nodes[id.index()].replace_kind(kind);
        self.adopt_children(id);
    }

    pub(crate) fn set_parent(&mut self, child: NodeId, parent: NodeId) {
        self.nodes[child.index()].parent = parent;
    }

    /// Point every direct child's parent at `id`.
    fn adopt_children(&mut self, id: NodeId) {
        for slot in self.nodes[id.index()].kind().slots() {
            match slot {
                Slot::One(child, _) | Slot::Opt(Some(child), _) => {
                    if child.is_valid() {
                        self.set_parent(child, id);
                    }
                }
                Slot::List(range, _) => {
                    let start = range.start as usize;
                    for i in start..start + range.len() {
                        let child = self.lists[i];
                        self.set_parent(child, id);
                    }
                }
                Slot::Opt(None, _) => {}
            }
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Every allocated node id, in allocation order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(|i| NodeId::new(i as u32))
    }

    pub fn intern(&mut self, s: &str) -> Result<Name, AllocError> {
        self.interner.intern(s)
    }

    pub fn name_str(&self, name: Name) -> &str {
        self.interner.lookup(name)
    }

    pub fn interner(&self) -> &Interner {
        &self.interner
    }

    /// Fresh name `prefix$N`, unique within this arena.
    pub fn gensym(&mut self, prefix: &str) -> Result<Name, AllocError> {
        let n = self.gensym_counter;
        self.gensym_counter = n.checked_add(1).ok_or(AllocError::IndexOverflow {
            what: "synthetic name",
            index: n as usize + 1,
        })?;
        self.interner.intern(&format!("{prefix}${n}"))
    }

    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.index()]
    }

    pub fn scope_mut(&mut self, id: ScopeId) -> &mut Scope {
        &mut self.scopes[id.index()]
    }

    /// Drop binder and checker attachments ahead of teardown.
    ///
    /// Variables, both type slots, boxing flags and scope references are
    /// reset on every node and scope records are cleared. Node memory stays
    /// allocated until the arena is dropped.
    pub fn clean_up(&mut self) {
        for node in &mut self.nodes {
            node.clean_up();
        }
        self.scopes.clear();
        self.cleaned_up = true;
        tracing::debug!(nodes = self.nodes.len(), "ast cleaned up");
    }

    pub fn is_cleaned_up(&self) -> bool {
        self.cleaned_up
    }
}

/// Next 32-bit index into a storage vector. `u32::MAX` is reserved.
fn next_index(len: usize, what: &'static str) -> Result<u32, AllocError> {
    match u32::try_from(len) {
        Ok(index) if index != u32::MAX => Ok(index),
        _ => Err(AllocError::IndexOverflow { what, index: len }),
    }
}

impl Default for Ast {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Ast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ast")
            .field("nodes", &self.nodes.len())
            .field("lists", &self.lists.len())
            .field("scopes", &self.scopes.len())
            .field("interner", &self.interner)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
