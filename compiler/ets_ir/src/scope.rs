//! Scope records owned by scope-bearing nodes.
//!
//! The arena creates one empty record per scope-bearing node. Filling in
//! bindings is the binder's job.

use rustc_hash::FxHashMap;

use crate::{Name, NodeId, NodeTag, ScopeId, VariableId};

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ScopeKind {
    Module,
    Block,
    Loop,
    Function,
    Class,
}

impl ScopeKind {
    /// Scope kind a node tag owns, `None` for kinds without a scope.
    pub fn for_tag(tag: NodeTag) -> Option<ScopeKind> {
        match tag {
            NodeTag::Program => Some(ScopeKind::Module),
            NodeTag::BlockStatement => Some(ScopeKind::Block),
            NodeTag::ForUpdateStatement => Some(ScopeKind::Loop),
            NodeTag::ScriptFunction => Some(ScopeKind::Function),
            NodeTag::ClassDefinition => Some(ScopeKind::Class),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Scope {
    pub kind: ScopeKind,
    /// Node that owns this scope.
    pub node: NodeId,
    pub parent: Option<ScopeId>,
    bindings: FxHashMap<Name, VariableId>,
}

impl Scope {
    pub(crate) fn new(kind: ScopeKind, node: NodeId) -> Self {
        Scope {
            kind,
            node,
            parent: None,
            bindings: FxHashMap::default(),
        }
    }

    /// Bind `name`, returning the variable it shadowed in this scope.
    pub fn bind(&mut self, name: Name, variable: VariableId) -> Option<VariableId> {
        self.bindings.insert(name, variable)
    }

    pub fn lookup(&self, name: Name) -> Option<VariableId> {
        self.bindings.get(&name).copied()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
