//! Rewriting owned children.
//!
//! A rewriter is called with each owned child and answers with the node that
//! should take its place. Returning the same id leaves the slot untouched
//! and records nothing. Returning a different node replaces the child,
//! reparents the replacement and records a provenance edge tagged with the
//! pass name.
//!
//! # Arity
//!
//! A rewriter may expand one child into several ([`Rewrite::Many`]) only
//! where the slot holds statements:
//!
//! - in a statement list the replacements are spliced in place. The replaced
//!   statement's provenance edge points at a detached synthetic
//!   `BlockStatement` grouping the replacements;
//! - in a single statement slot that grouping block takes the child's place.
//!
//! Expanding an expression, type or other child is a bug in the pass and
//! panics.

use smallvec::SmallVec;

use crate::{
    ensure_sufficient_stack, AllocError, Ast, AstNodeFlags, NodeId, NodeKind, Span, SlotClass,
    SlotMut,
};

/// What a rewriter puts in place of a child.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Rewrite {
    Node(NodeId),
    Many(SmallVec<[NodeId; 2]>),
}

impl Rewrite {
    pub fn many(ids: impl IntoIterator<Item = NodeId>) -> Self {
        Rewrite::Many(ids.into_iter().collect())
    }

    /// A one-element expansion is a plain replacement.
    fn normalize(self) -> Self {
        match self {
            Rewrite::Many(ids) if ids.len() == 1 => Rewrite::Node(ids[0]),
            other => other,
        }
    }
}

impl From<NodeId> for Rewrite {
    fn from(id: NodeId) -> Self {
        Rewrite::Node(id)
    }
}

type Rewriter<'a> = dyn FnMut(&mut Ast, NodeId) -> Result<Rewrite, AllocError> + 'a;

impl Ast {
    /// Run `rewriter` on each owned child of `id` and apply its answers.
    ///
    /// # Errors
    /// Propagates allocation failures from the rewriter or from storing
    /// rewritten lists.
    ///
    /// # Panics
    /// Panics if the rewriter expands a child that is not a statement.
    pub fn transform_children(
        &mut self,
        id: NodeId,
        mut rewriter: impl FnMut(&mut Ast, NodeId) -> Result<Rewrite, AllocError>,
        pass: &str,
    ) -> Result<(), AllocError> {
        self.transform_children_dyn(id, &mut rewriter, pass)
    }

    fn transform_children_dyn(
        &mut self,
        id: NodeId,
        rewriter: &mut Rewriter<'_>,
        pass: &str,
    ) -> Result<(), AllocError> {
        let mut kind = self.kind(id);
        let mut changed = false;

        for slot in kind.slots_mut() {
            match slot {
                SlotMut::One(child, class) => {
                    if child.is_valid() {
                        let new = self.rewrite_single(id, *child, class, rewriter, pass)?;
                        changed |= new != *child;
                        *child = new;
                    }
                }
                SlotMut::Opt(child, class) => {
                    if let Some(old) = *child {
                        let new = self.rewrite_single(id, old, class, rewriter, pass)?;
                        changed |= new != old;
                        *child = Some(new);
                    }
                }
                SlotMut::List(range, class) => {
                    if let Some(new_range) = self.rewrite_list(id, *range, class, rewriter, pass)? {
                        *range = new_range;
                        changed = true;
                    }
                }
            }
        }

        if changed {
            self.node_mut(id).replace_kind(kind);
        }
        Ok(())
    }

    fn rewrite_single(
        &mut self,
        parent: NodeId,
        old: NodeId,
        class: SlotClass,
        rewriter: &mut Rewriter<'_>,
        pass: &str,
    ) -> Result<NodeId, AllocError> {
        let new = match rewriter(self, old)?.normalize() {
            Rewrite::Node(new) => new,
            Rewrite::Many(ids) => {
                assert_statement_slot(self, parent, class, ids.len());
                self.group_statements(&ids, self.span(old))?
            }
        };
        if new != old {
            self.record_transformation(old, new, pass)?;
            self.set_parent(new, parent);
        }
        Ok(new)
    }

    /// Rewrite a list slot. `None` when every element stayed the same.
    fn rewrite_list(
        &mut self,
        parent: NodeId,
        range: crate::NodeRange,
        class: SlotClass,
        rewriter: &mut Rewriter<'_>,
        pass: &str,
    ) -> Result<Option<crate::NodeRange>, AllocError> {
        let old_ids: SmallVec<[NodeId; 8]> = self.list(range).iter().copied().collect();
        let mut new_ids: SmallVec<[NodeId; 8]> = SmallVec::with_capacity(old_ids.len());
        let mut changed = false;

        for old in old_ids {
            match rewriter(self, old)?.normalize() {
                Rewrite::Node(new) => {
                    if new != old {
                        self.record_transformation(old, new, pass)?;
                        self.set_parent(new, parent);
                        changed = true;
                    }
                    new_ids.push(new);
                }
                Rewrite::Many(ids) => {
                    assert_statement_slot(self, parent, class, ids.len());
                    let group = self.group_statements(&ids, self.span(old))?;
                    self.set_parent(group, NodeId::INVALID);
                    self.record_transformation(old, group, pass)?;
                    for &new in &ids {
                        self.set_parent(new, parent);
                    }
                    new_ids.extend_from_slice(&ids);
                    changed = true;
                }
            }
        }

        if changed {
            self.alloc_list(&new_ids).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Synthetic block holding the statements one statement expanded into.
    fn group_statements(&mut self, ids: &[NodeId], span: Span) -> Result<NodeId, AllocError> {
        let statements = self.alloc_list(ids)?;
        let group = self.alloc(NodeKind::BlockStatement { statements }, span)?;
        self.node_mut(group).flags |= AstNodeFlags::SYNTHETIC;
        tracing::trace!(?group, len = ids.len(), "grouped expanded statements");
        Ok(group)
    }

    /// Rewrite the children of `id`, then descend into the (possibly new)
    /// children and do the same. `id` itself is never replaced.
    #[tracing::instrument(level = "debug", skip_all, fields(pass = %pass, root = ?id))]
    pub fn transform_children_recursively_preorder(
        &mut self,
        id: NodeId,
        mut rewriter: impl FnMut(&mut Ast, NodeId) -> Result<Rewrite, AllocError>,
        pass: &str,
    ) -> Result<(), AllocError> {
        self.preorder_dyn(id, &mut rewriter, pass)
    }

    fn preorder_dyn(
        &mut self,
        id: NodeId,
        rewriter: &mut Rewriter<'_>,
        pass: &str,
    ) -> Result<(), AllocError> {
        ensure_sufficient_stack(|| {
            self.transform_children_dyn(id, rewriter, pass)?;
            for child in self.children(id) {
                self.preorder_dyn(child, rewriter, pass)?;
            }
            Ok(())
        })
    }

    /// Rewrite the whole subtree below `id` bottom-up: every node's children
    /// are rewritten before the node itself is offered to its parent.
    #[tracing::instrument(level = "debug", skip_all, fields(pass = %pass, root = ?id))]
    pub fn transform_children_recursively_postorder(
        &mut self,
        id: NodeId,
        mut rewriter: impl FnMut(&mut Ast, NodeId) -> Result<Rewrite, AllocError>,
        pass: &str,
    ) -> Result<(), AllocError> {
        self.postorder_dyn(id, &mut rewriter, pass)
    }

    fn postorder_dyn(
        &mut self,
        id: NodeId,
        rewriter: &mut Rewriter<'_>,
        pass: &str,
    ) -> Result<(), AllocError> {
        ensure_sufficient_stack(|| {
            for child in self.children(id) {
                self.postorder_dyn(child, rewriter, pass)?;
            }
            self.transform_children_dyn(id, rewriter, pass)
        })
    }

    /// `pre` on the way down, `post` on the way back up.
    #[tracing::instrument(level = "debug", skip_all, fields(pass = %pass, root = ?id))]
    pub fn transform_children_recursively(
        &mut self,
        id: NodeId,
        mut pre: impl FnMut(&mut Ast, NodeId) -> Result<Rewrite, AllocError>,
        mut post: impl FnMut(&mut Ast, NodeId) -> Result<Rewrite, AllocError>,
        pass: &str,
    ) -> Result<(), AllocError> {
        self.combined_dyn(id, &mut pre, &mut post, pass)
    }

    fn combined_dyn(
        &mut self,
        id: NodeId,
        pre: &mut Rewriter<'_>,
        post: &mut Rewriter<'_>,
        pass: &str,
    ) -> Result<(), AllocError> {
        ensure_sufficient_stack(|| {
            self.transform_children_dyn(id, pre, pass)?;
            for child in self.children(id) {
                self.combined_dyn(child, pre, post, pass)?;
            }
            self.transform_children_dyn(id, post, pass)
        })
    }
}

fn assert_statement_slot(ast: &Ast, parent: NodeId, class: SlotClass, len: usize) {
    assert!(
        class == SlotClass::Statement,
        "cannot expand a {class:?} child of {} into {len} nodes",
        ast.tag(parent)
    );
}
