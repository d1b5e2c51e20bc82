//! Tree invariant checker.
//!
//! Run between passes (see the driver's `verify_each_pass`) to catch a
//! rewrite that left the tree inconsistent, before a later phase trips over
//! it.

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::{ensure_sufficient_stack, Ast, NodeId, NodeTag, Slot};

/// One broken tree invariant.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum Violation {
    #[error("{child:?} is owned by {owner:?} but its parent link is {found:?}")]
    ParentMismatch {
        child: NodeId,
        owner: NodeId,
        found: Option<NodeId>,
    },
    #[error("{node:?} has an invalid span")]
    InvalidSpan { node: NodeId },
    #[error("{tag} node {node:?} owns no scope")]
    MissingScope { node: NodeId, tag: NodeTag },
    #[error("{tag} node {node:?} owns a scope but is not scope-bearing")]
    UnexpectedScope { node: NodeId, tag: NodeTag },
    #[error("{child:?} is owned by both {first:?} and {second:?}")]
    SharedChild {
        child: NodeId,
        first: NodeId,
        second: NodeId,
    },
    #[error("{tag} node {node:?} is missing required child in slot {slot}")]
    MissingChild {
        node: NodeId,
        tag: NodeTag,
        slot: usize,
    },
    #[error("provenance edges of pass `{pass}` form a cycle through {node:?}")]
    ProvenanceCycle { node: NodeId, pass: String },
}

struct Verifier<'a> {
    ast: &'a Ast,
    owners: FxHashMap<NodeId, NodeId>,
    violations: Vec<Violation>,
}

impl Verifier<'_> {
    fn node(&mut self, id: NodeId) {
        let ast = self.ast;
        ensure_sufficient_stack(|| {
            let node = ast.node(id);
            let tag = node.tag();

            if !node.span().is_valid() {
                self.violations.push(Violation::InvalidSpan { node: id });
            }
            if !ast.is_cleaned_up() {
                match (tag.is_scope_bearing(), node.scope().is_some()) {
                    (true, false) => self.violations.push(Violation::MissingScope { node: id, tag }),
                    (false, true) => self
                        .violations
                        .push(Violation::UnexpectedScope { node: id, tag }),
                    _ => {}
                }
            }

            for (slot_index, slot) in node.kind().slots().into_iter().enumerate() {
                match slot {
                    Slot::One(child, _) if !child.is_valid() => {
                        self.violations.push(Violation::MissingChild {
                            node: id,
                            tag,
                            slot: slot_index,
                        });
                    }
                    Slot::One(child, _) | Slot::Opt(Some(child), _) => self.child(id, child),
                    Slot::List(range, _) => {
                        for &child in ast.list(range) {
                            self.child(id, child);
                        }
                    }
                    Slot::Opt(None, _) => {}
                }
            }
        });
    }

    fn child(&mut self, owner: NodeId, child: NodeId) {
        if let Some(&first) = self.owners.get(&child) {
            self.violations.push(Violation::SharedChild {
                child,
                first,
                second: owner,
            });
            return;
        }
        self.owners.insert(child, owner);

        let found = self.ast.parent(child);
        if found != Some(owner) {
            self.violations.push(Violation::ParentMismatch {
                child,
                owner,
                found,
            });
        }
        self.node(child);
    }
}

impl Ast {
    /// Check the tree below `root` and every provenance chain.
    ///
    /// Checks parent links, span validity, scope ownership (skipped after
    /// [`clean_up`](Ast::clean_up)), single ownership of every child,
    /// presence of required children and provenance acyclicity.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn verify(&self, root: NodeId) -> Vec<Violation> {
        let mut verifier = Verifier {
            ast: self,
            owners: FxHashMap::default(),
            violations: Vec::new(),
        };
        verifier.node(root);

        let mut violations = verifier.violations;
        for edge in self.provenance_edges() {
            if self.has_provenance_cycle(edge.from, edge.pass) {
                violations.push(Violation::ProvenanceCycle {
                    node: edge.from,
                    pass: self.name_str(edge.pass).to_owned(),
                });
            }
        }
        if !violations.is_empty() {
            tracing::debug!(count = violations.len(), "tree violations");
        }
        violations
    }
}

#[cfg(test)]
mod tests;
