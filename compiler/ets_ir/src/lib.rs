//! ETS IR - shared AST layer for the dual-dialect frontend
//!
//! Every phase of the frontend works on the trees defined here: the binder
//! attaches scopes and variables, the TS and ETS checkers attach types and
//! coercion flags, lowerings rewrite owned children, and the two code
//! generators walk the result.
//!
//! - Spans and interned names
//! - `NodeId`-indexed nodes in a pass-scoped arena ([`Ast`])
//! - Child slots with a fixed declared order per kind ([`NodeKind`])
//! - Traversal, rewriting and provenance tracking
//! - Construct / copy / clone lifecycle
//! - Double dispatch into two checkers and two code generators
//!
//! # Design
//!
//! - **Flat storage**: children are `NodeId(u32)` indices, variable-arity
//!   children live in the arena's flat list storage as `NodeRange`s.
//! - **Weak links**: parent back-references, binder variables and
//!   provenance edges are plain indices and never own anything.
//! - **Bulk teardown**: nodes are never freed individually. Dropping the
//!   [`Ast`] releases the whole pass.

/// Compile-time assertion that a type has a specific size.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod arena;
mod build;
pub mod dispatch;
mod error;
mod flags;
mod ids;
mod interner;
mod kinds;
mod lifecycle;
mod node;
mod provenance;
mod scope;
mod span;
mod stack;
mod token;
pub mod transform;
mod traverse;
pub mod verify;
pub mod visitor;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use arena::Ast;
pub use dispatch::{
    BranchEmitter, Dialect, EtsAnalyzer, EtsGen, PandaGen, TsAnalyzer, VerifiedType,
};
pub use error::AllocError;
pub use flags::{AstNodeFlags, BoxingUnboxingFlags, ModifierFlags};
pub use ids::{NodeId, NodeRange, ScopeId, TypeRef, VariableId};
pub use interner::{Interner, Name};
pub use kinds::{
    MethodKind, NodeCategory, NodeKind, NodeTag, PrimitiveType, Slot, SlotClass, SlotMut,
    VariableKind,
};
pub use node::Node;
pub use provenance::ProvenanceEdge;
pub use scope::{Scope, ScopeKind};
pub use span::{Span, SpanError};
pub use stack::ensure_sufficient_stack;
pub use token::TokenType;
pub use transform::Rewrite;
pub use verify::Violation;
pub use visitor::Visitor;
