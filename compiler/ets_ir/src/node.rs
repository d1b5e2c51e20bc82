//! The node record stored in the arena.

use crate::{
    AstNodeFlags, BoxingUnboxingFlags, ModifierFlags, NodeId, NodeKind, NodeTag, ScopeId, Span,
    TypeRef, VariableId,
};

/// One AST node.
///
/// `kind` carries the owned children. Everything else is either plain data
/// (span, flags) or a weak attachment set by a later phase: `parent` by
/// allocation and rewriting, `variable` and `scope` by the binder,
/// `ts_type`/`ets_type`/`boxing` by the two checkers.
#[derive(Clone, Debug)]
pub struct Node {
    kind: NodeKind,
    span: Span,
    pub modifiers: ModifierFlags,
    pub flags: AstNodeFlags,
    pub(crate) parent: NodeId,
    pub variable: Option<VariableId>,
    pub(crate) scope: Option<ScopeId>,
    pub ts_type: Option<TypeRef>,
    pub ets_type: Option<TypeRef>,
    pub boxing: BoxingUnboxingFlags,
    pub(crate) original: NodeId,
}

impl Node {
    pub(crate) fn new(kind: NodeKind, span: Span) -> Self {
        Node {
            kind,
            span,
            modifiers: ModifierFlags::empty(),
            flags: AstNodeFlags::empty(),
            parent: NodeId::INVALID,
            variable: None,
            scope: None,
            ts_type: None,
            ets_type: None,
            boxing: BoxingUnboxingFlags::empty(),
            original: NodeId::INVALID,
        }
    }

    #[inline]
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    #[inline]
    pub fn tag(&self) -> NodeTag {
        self.kind.tag()
    }

    #[inline]
    pub fn span(&self) -> Span {
        self.span
    }

    pub fn set_span(&mut self, span: Span) {
        debug_assert!(span.is_valid(), "invalid span {span:?}");
        self.span = span;
    }

    /// Owning parent, if attached.
    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent.is_valid().then_some(self.parent)
    }

    /// Scope owned by this node. Only scope-bearing kinds have one.
    #[inline]
    pub fn scope(&self) -> Option<ScopeId> {
        self.scope
    }

    #[cfg(test)]
    pub(crate) fn set_span_unchecked(&mut self, span: Span) {
        self.span = span;
    }

    /// Node this one replaced, if it was produced by a rewrite.
    #[inline]
    pub fn original(&self) -> Option<NodeId> {
        self.original.is_valid().then_some(self.original)
    }

    pub fn is_exported(&self) -> bool {
        self.modifiers.is_exported()
    }

    pub fn is_synthetic(&self) -> bool {
        self.flags.contains(AstNodeFlags::SYNTHETIC)
    }

    /// Replace the payload with one of the same kind.
    ///
    /// # Panics
    /// Panics if `kind` has a different tag.
    pub(crate) fn replace_kind(&mut self, kind: NodeKind) {
        assert_eq!(
            self.kind.tag(),
            kind.tag(),
            "node kind cannot change from {} to {}",
            self.kind.tag(),
            kind.tag()
        );
        self.kind = kind;
    }

    /// Copy every field except parent, scope and provenance from `src`.
    pub(crate) fn copy_fields_from(&mut self, src: &Node) {
        self.replace_kind(src.kind);
        self.span = src.span;
        self.modifiers = src.modifiers;
        self.flags = src.flags;
        self.variable = src.variable;
        self.ts_type = src.ts_type;
        self.ets_type = src.ets_type;
        self.boxing = src.boxing;
    }

    /// Drop every attachment made by binding and checking.
    pub(crate) fn clean_up(&mut self) {
        self.variable = None;
        self.scope = None;
        self.ts_type = None;
        self.ets_type = None;
        self.boxing = BoxingUnboxingFlags::empty();
    }
}
