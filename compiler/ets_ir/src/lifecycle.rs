//! Construct, copy and clone.
//!
//! `construct` and `copy_to` are the generic building blocks: a default shell
//! of the right kind, then every field copied over from a source of the same
//! kind. `clone_node` uses them for composite kinds and replaces each copied
//! child id with a clone of that child, so the result never shares an owned
//! child with the source. Leaves skip the shell and are allocated directly
//! with the source payload.

use smallvec::SmallVec;

use crate::{ensure_sufficient_stack, AllocError, Ast, NodeId, NodeKind, NodeTag, SlotMut, Span};

impl Ast {
    /// Allocate a minimally valid default node of kind `tag`.
    ///
    /// Required children are left as [`NodeId::INVALID`] until filled.
    pub fn construct(&mut self, tag: NodeTag) -> Result<NodeId, AllocError> {
        self.alloc(NodeKind::construct(tag), Span::DUMMY)
    }

    /// Copy every field of `src` onto `dst` except parent, scope and
    /// provenance.
    ///
    /// The payload is copied as-is: `dst` refers to the same children as
    /// `src` until the caller replaces them, and those children keep `src`
    /// as their parent.
    ///
    /// # Panics
    /// Panics if `src` and `dst` are of different kinds.
    pub fn copy_to(&mut self, src: NodeId, dst: NodeId) {
        let (src_tag, dst_tag) = (self.tag(src), self.tag(dst));
        assert!(
            src_tag == dst_tag,
            "copy_to kind mismatch: cannot copy {src_tag} onto {dst_tag}"
        );
        let source = self.node(src).clone();
        self.node_mut(dst).copy_fields_from(&source);
    }

    /// Deep copy of the subtree rooted at `id`, attached to `parent`.
    ///
    /// The clone has the same span and attachments as the source, its own
    /// copy of every owned child, and a fresh scope wherever the source kind
    /// owns one. No provenance edge is recorded.
    ///
    /// # Errors
    /// Fails if the arena cannot hold the copy.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn clone_node(&mut self, id: NodeId, parent: Option<NodeId>) -> Result<NodeId, AllocError> {
        let clone = self.clone_subtree(id)?;
        self.set_parent(clone, parent.unwrap_or(NodeId::INVALID));
        Ok(clone)
    }

    fn clone_subtree(&mut self, id: NodeId) -> Result<NodeId, AllocError> {
        ensure_sufficient_stack(|| {
            let kind = self.kind(id);
            if kind.is_leaf() {
                let copy = self.alloc(kind, self.span(id))?;
                self.copy_to(id, copy);
                return Ok(copy);
            }

            let copy = self.construct(kind.tag())?;
            self.copy_to(id, copy);

            let mut cloned = kind;
            for slot in cloned.slots_mut() {
                match slot {
                    SlotMut::One(child, _) => {
                        if child.is_valid() {
                            *child = self.clone_subtree(*child)?;
                        }
                    }
                    SlotMut::Opt(child, _) => {
                        if let Some(old) = *child {
                            *child = Some(self.clone_subtree(old)?);
                        }
                    }
                    SlotMut::List(range, _) => {
                        let old: SmallVec<[NodeId; 8]> = self.list(*range).iter().copied().collect();
                        let mut new = SmallVec::<[NodeId; 8]>::with_capacity(old.len());
                        for child in old {
                            new.push(self.clone_subtree(child)?);
                        }
                        *range = self.alloc_list(&new)?;
                    }
                }
            }
            self.set_kind(copy, cloned);
            Ok(copy)
        })
    }

    /// Structural equality of two subtrees: same kinds, payload data, spans
    /// and modifiers, with children compared recursively instead of by id.
    pub fn deep_eq(&self, a: NodeId, b: NodeId) -> bool {
        ensure_sufficient_stack(|| {
            let (left, right) = (self.node(a), self.node(b));
            if left.tag() != right.tag()
                || left.span() != right.span()
                || left.modifiers != right.modifiers
                || !same_payload_data(left.kind(), right.kind())
            {
                return false;
            }
            let (ca, cb) = (self.children(a), self.children(b));
            ca.len() == cb.len() && ca.iter().zip(&cb).all(|(&x, &y)| self.deep_eq(x, y))
        })
    }
}

/// Payloads agree on everything but child ids.
fn same_payload_data(a: &NodeKind, b: &NodeKind) -> bool {
    let (mut a, mut b) = (*a, *b);
    blank_children(&mut a);
    blank_children(&mut b);
    a == b
}

fn blank_children(kind: &mut NodeKind) {
    for slot in kind.slots_mut() {
        match slot {
            SlotMut::One(child, _) => *child = NodeId::INVALID,
            SlotMut::Opt(child, _) => {
                if child.is_some() {
                    *child = Some(NodeId::INVALID);
                }
            }
            SlotMut::List(range, _) => range.start = 0,
        }
    }
}
