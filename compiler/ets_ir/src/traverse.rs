//! Read-only traversal.
//!
//! Children are always visited in the order their kind declares its slots,
//! which is the order the parser produced them.

use smallvec::SmallVec;

use crate::{ensure_sufficient_stack, Ast, NodeId, Slot};

impl Ast {
    /// Direct children of `id` in declared order.
    pub fn children(&self, id: NodeId) -> SmallVec<[NodeId; 4]> {
        let mut out = SmallVec::new();
        for slot in self.node(id).kind().slots() {
            match slot {
                Slot::One(child, _) | Slot::Opt(Some(child), _) => {
                    if child.is_valid() {
                        out.push(child);
                    }
                }
                Slot::List(range, _) => out.extend_from_slice(self.list(range)),
                Slot::Opt(None, _) => {}
            }
        }
        out
    }

    /// Call `f` once per direct child. No-op on leaves.
    pub fn iterate(&self, id: NodeId, mut f: impl FnMut(NodeId)) {
        for child in self.children(id) {
            f(child);
        }
    }

    /// Call `f` on every descendant of `id`, parents before children.
    pub fn iterate_recursively(&self, id: NodeId, mut f: impl FnMut(NodeId)) {
        self.walk_preorder(id, &mut f);
    }

    fn walk_preorder(&self, id: NodeId, f: &mut dyn FnMut(NodeId)) {
        ensure_sufficient_stack(|| {
            for child in self.children(id) {
                f(child);
                self.walk_preorder(child, f);
            }
        });
    }

    /// Call `f` on every descendant of `id`, children before parents.
    pub fn iterate_recursively_postorder(&self, id: NodeId, mut f: impl FnMut(NodeId)) {
        self.walk_postorder(id, &mut f);
    }

    fn walk_postorder(&self, id: NodeId, f: &mut dyn FnMut(NodeId)) {
        ensure_sufficient_stack(|| {
            for child in self.children(id) {
                self.walk_postorder(child, f);
                f(child);
            }
        });
    }

    /// First descendant of `id`, in pre-order, matching `pred`.
    pub fn find_child(&self, id: NodeId, mut pred: impl FnMut(NodeId) -> bool) -> Option<NodeId> {
        self.search(id, &mut pred)
    }

    /// Any descendant of `id` matches `pred`.
    pub fn is_any_child(&self, id: NodeId, mut pred: impl FnMut(NodeId) -> bool) -> bool {
        self.search(id, &mut pred).is_some()
    }

    /// Depth-first search shared by `find_child` and `is_any_child`.
    fn search(&self, id: NodeId, pred: &mut dyn FnMut(NodeId) -> bool) -> Option<NodeId> {
        ensure_sufficient_stack(|| {
            for child in self.children(id) {
                if pred(child) {
                    return Some(child);
                }
                if let Some(found) = self.search(child, pred) {
                    return Some(found);
                }
            }
            None
        })
    }

    /// Number of nodes in the subtree rooted at `id`, including `id`.
    pub fn subtree_size(&self, id: NodeId) -> usize {
        let mut count = 1;
        self.iterate_recursively(id, |_| count += 1);
        count
    }
}

#[cfg(test)]
mod tests;
