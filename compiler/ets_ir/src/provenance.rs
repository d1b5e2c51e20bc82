//! Provenance edges between replaced and replacing nodes.
//!
//! Each edge is tagged with the name of the pass that made the replacement.
//! Per pass, a node has at most one successor, and following successors
//! never leads back to where it started.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::{AllocError, Ast, Name, NodeId};

/// `from` was replaced by `to` during `pass`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ProvenanceEdge {
    pub pass: Name,
    pub from: NodeId,
    pub to: NodeId,
}

#[derive(Default, Debug)]
pub(crate) struct ProvenanceTable {
    edges: FxHashMap<NodeId, SmallVec<[(Name, NodeId); 1]>>,
    count: usize,
}

impl ProvenanceTable {
    fn successor(&self, from: NodeId, pass: Name) -> Option<NodeId> {
        self.edges
            .get(&from)?
            .iter()
            .find(|(p, _)| *p == pass)
            .map(|&(_, to)| to)
    }

    fn insert(&mut self, from: NodeId, pass: Name, to: NodeId) {
        let entry = self.edges.entry(from).or_default();
        if let Some(existing) = entry.iter_mut().find(|(p, _)| *p == pass) {
            existing.1 = to;
        } else {
            entry.push((pass, to));
            self.count += 1;
        }
    }

    /// Successor chain from `start` under `pass` reaches `target`.
    fn reaches(&self, start: NodeId, pass: Name, target: NodeId) -> bool {
        let mut current = start;
        // At most `count` hops in an acyclic table.
        for _ in 0..=self.count {
            if current == target {
                return true;
            }
            match self.successor(current, pass) {
                Some(next) => current = next,
                None => return false,
            }
        }
        true
    }
}

impl Ast {
    /// Record that `from` was replaced by `to` during `pass`.
    ///
    /// Sets `to`'s original-node link if it has none yet. Recording a node
    /// as its own replacement is a no-op.
    ///
    /// # Errors
    /// Fails when the pass name cannot be interned.
    ///
    /// # Panics
    /// Panics if the edge would close a cycle under `pass`.
    pub fn record_transformation(
        &mut self,
        from: NodeId,
        to: NodeId,
        pass: &str,
    ) -> Result<(), AllocError> {
        if from == to {
            return Ok(());
        }
        let pass_name = self.interner.intern(pass)?;
        assert!(
            !self.provenance.reaches(to, pass_name, from),
            "provenance cycle under pass `{pass}`: {from:?} -> {to:?}"
        );
        self.provenance.insert(from, pass_name, to);

        let target = self.node_mut(to);
        if !target.original.is_valid() {
            target.original = from;
        }
        tracing::trace!(?from, ?to, pass, "recorded transformation");
        Ok(())
    }

    /// Node that replaced `from` during `pass`.
    pub fn transformed_node(&self, from: NodeId, pass: &str) -> Option<NodeId> {
        let pass = self.interner.get(pass)?;
        self.provenance.successor(from, pass)
    }

    /// Every recorded replacement of `from`, across passes.
    pub fn transformations(&self, from: NodeId) -> impl Iterator<Item = ProvenanceEdge> + '_ {
        self.provenance
            .edges
            .get(&from)
            .into_iter()
            .flatten()
            .map(move |&(pass, to)| ProvenanceEdge { pass, from, to })
    }

    /// Every recorded edge, in no particular order.
    pub fn provenance_edges(&self) -> impl Iterator<Item = ProvenanceEdge> + '_ {
        self.provenance.edges.iter().flat_map(|(&from, succ)| {
            succ.iter()
                .map(move |&(pass, to)| ProvenanceEdge { pass, from, to })
        })
    }

    pub fn provenance_len(&self) -> usize {
        self.provenance.count
    }

    /// Node this one replaced, if any.
    pub fn original_node(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).original()
    }

    /// Follow successors of `from` under `pass` to the last replacement.
    pub fn latest_transformation(&self, from: NodeId, pass: &str) -> NodeId {
        let Some(pass) = self.interner.get(pass) else {
            return from;
        };
        let mut current = from;
        while let Some(next) = self.provenance.successor(current, pass) {
            current = next;
        }
        current
    }

    /// `start` reaches itself again following edges tagged `pass`.
    pub(crate) fn has_provenance_cycle(&self, start: NodeId, pass: Name) -> bool {
        match self.provenance.successor(start, pass) {
            Some(next) => self.provenance.reaches(next, pass, start),
            None => false,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::{Ast, NodeKind, Span};

    #[test]
    fn records_edge_and_original() {
        let mut ast = Ast::new();
        let a = ast.alloc(NodeKind::NullLiteral, Span::DUMMY).unwrap();
        let b = ast.alloc(NodeKind::UndefinedLiteral, Span::DUMMY).unwrap();
        ast.record_transformation(a, b, "lower").unwrap();

        assert_eq!(ast.transformed_node(a, "lower"), Some(b));
        assert_eq!(ast.transformed_node(a, "other"), None);
        assert_eq!(ast.original_node(b), Some(a));
        assert_eq!(ast.provenance_len(), 1);
    }

    #[test]
    fn self_edge_is_ignored() {
        let mut ast = Ast::new();
        let a = ast.alloc(NodeKind::NullLiteral, Span::DUMMY).unwrap();
        ast.record_transformation(a, a, "lower").unwrap();
        assert_eq!(ast.provenance_len(), 0);
        assert_eq!(ast.original_node(a), None);
    }

    #[test]
    fn chains_follow_to_latest() {
        let mut ast = Ast::new();
        let ids: Vec<_> = (0..3)
            .map(|_| ast.alloc(NodeKind::NullLiteral, Span::DUMMY).unwrap())
            .collect();
        ast.record_transformation(ids[0], ids[1], "p").unwrap();
        ast.record_transformation(ids[1], ids[2], "p").unwrap();
        assert_eq!(ast.latest_transformation(ids[0], "p"), ids[2]);
        assert_eq!(ast.transformations(ids[0]).count(), 1);
    }

    #[test]
    fn same_pair_under_two_passes() {
        let mut ast = Ast::new();
        let a = ast.alloc(NodeKind::NullLiteral, Span::DUMMY).unwrap();
        let b = ast.alloc(NodeKind::NullLiteral, Span::DUMMY).unwrap();
        ast.record_transformation(a, b, "first").unwrap();
        ast.record_transformation(b, a, "second").unwrap();
        assert_eq!(ast.provenance_len(), 2);
    }

    #[test]
    #[should_panic(expected = "provenance cycle")]
    fn cycle_under_one_pass_panics() {
        let mut ast = Ast::new();
        let a = ast.alloc(NodeKind::NullLiteral, Span::DUMMY).unwrap();
        let b = ast.alloc(NodeKind::NullLiteral, Span::DUMMY).unwrap();
        ast.record_transformation(a, b, "p").unwrap();
        ast.record_transformation(b, a, "p").unwrap();
    }
}
