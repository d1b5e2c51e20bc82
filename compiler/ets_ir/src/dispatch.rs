//! Entry points into the two checkers and the two code generators.
//!
//! Every node can be checked by either checker and compiled by either
//! backend. The (operation, dialect) matrix is a match on the node kind:
//! a few kinds are handled here directly, everything else is handed to the
//! collaborator's own dispatcher.
//!
//! | kind             | check (TS / ETS)      | compile (TS / ETS)        |
//! |------------------|-----------------------|---------------------------|
//! | broken           | checker's error type  | panic                     |
//! | `IfStatement`    | delegated             | labels + branch, here     |
//! | `WhileStatement` | delegated             | labels + branch, here     |
//! | everything else  | delegated             | delegated                 |
//!
//! Results are attached to the slot belonging to that variant only
//! (`ts_type` or `ets_type`), so checking the same tree under both checkers
//! never mixes their bookkeeping.

use std::fmt;

use crate::{Ast, BoxingUnboxingFlags, NodeId, NodeKind, TypeRef};

/// Input dialect and backend pairing a unit is processed with.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum Dialect {
    /// TypeScript-flavoured input, Panda bytecode via the dynamic backend.
    #[default]
    Ts,
    /// ArkTS static input, ETS backend.
    Ets,
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Dialect::Ts => "ts",
            Dialect::Ets => "ets",
        })
    }
}

/// Checker for the TS dialect.
pub trait TsAnalyzer {
    /// Check a node this layer does not answer itself.
    fn check(&mut self, ast: &mut Ast, id: NodeId) -> TypeRef;

    /// Type given to error placeholders.
    fn error_type(&self) -> TypeRef;
}

/// Checker for the ETS dialect.
pub trait EtsAnalyzer {
    /// Check a node this layer does not answer itself.
    fn check(&mut self, ast: &mut Ast, id: NodeId) -> TypeRef;

    /// Type given to error placeholders.
    fn error_type(&self) -> TypeRef;

    /// Boxing or unboxing the checked node needs at its use site.
    fn coercion(&self, _ast: &Ast, _id: NodeId) -> BoxingUnboxingFlags {
        BoxingUnboxingFlags::empty()
    }
}

/// Result of an ETS check: the node together with the type it was given.
///
/// Lets callers cross-check that the type really came from that node.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct VerifiedType {
    pub node: NodeId,
    pub ty: TypeRef,
}

/// Label and branch primitives shared by both backends.
pub trait BranchEmitter {
    type Label: Copy;

    fn new_label(&mut self) -> Self::Label;

    /// Bind `label` to the current position.
    fn set_label(&mut self, label: Self::Label);

    /// Evaluate `test` and jump to `target` when it is false.
    fn branch_if_false(&mut self, ast: &Ast, test: NodeId, target: Self::Label);

    fn jump(&mut self, target: Self::Label);
}

/// Dynamic (TS) bytecode generator.
pub trait PandaGen: BranchEmitter {
    fn compile(&mut self, ast: &Ast, id: NodeId);
}

/// Static (ETS) bytecode generator.
pub trait EtsGen: BranchEmitter {
    fn compile(&mut self, ast: &Ast, id: NodeId);
}

impl Ast {
    /// Check `id` with the TS checker and attach the result to `ts_type`.
    pub fn check_ts<C: TsAnalyzer + ?Sized>(&mut self, id: NodeId, checker: &mut C) -> TypeRef {
        let ty = if self.tag(id).is_broken() {
            checker.error_type()
        } else {
            checker.check(self, id)
        };
        self.node_mut(id).ts_type = Some(ty);
        ty
    }

    /// Check `id` with the ETS checker and attach the result to `ets_type`
    /// along with any coercion flags.
    pub fn check_ets<C: EtsAnalyzer + ?Sized>(&mut self, id: NodeId, checker: &mut C) -> VerifiedType {
        let ty = if self.tag(id).is_broken() {
            checker.error_type()
        } else {
            checker.check(self, id)
        };
        let boxing = checker.coercion(self, id);
        let node = self.node_mut(id);
        node.ets_type = Some(ty);
        node.boxing |= boxing;
        VerifiedType { node: id, ty }
    }

    /// Emit `id` with the TS backend.
    ///
    /// # Panics
    /// Panics on error placeholders.
    pub fn compile_ts<G: PandaGen + ?Sized>(&self, id: NodeId, gen: &mut G) {
        self.compile_with(id, gen, &|gen: &mut G, ast: &Ast, id| gen.compile(ast, id));
    }

    /// Emit `id` with the ETS backend.
    ///
    /// # Panics
    /// Panics on error placeholders.
    pub fn compile_ets<G: EtsGen + ?Sized>(&self, id: NodeId, gen: &mut G) {
        self.compile_with(id, gen, &|gen: &mut G, ast: &Ast, id| gen.compile(ast, id));
    }

    fn compile_with<G: BranchEmitter + ?Sized>(
        &self,
        id: NodeId,
        gen: &mut G,
        delegate: &dyn Fn(&mut G, &Ast, NodeId),
    ) {
        let tag = self.tag(id);
        assert!(!tag.is_broken(), "cannot compile error placeholder {tag} at {id:?}");

        match self.kind(id) {
            NodeKind::IfStatement {
                test,
                consequent,
                alternate,
            } => {
                let end = gen.new_label();
                if let Some(alternate) = alternate {
                    let otherwise = gen.new_label();
                    gen.branch_if_false(self, test, otherwise);
                    self.compile_with(consequent, gen, delegate);
                    gen.jump(end);
                    gen.set_label(otherwise);
                    self.compile_with(alternate, gen, delegate);
                } else {
                    gen.branch_if_false(self, test, end);
                    self.compile_with(consequent, gen, delegate);
                }
                gen.set_label(end);
            }
            NodeKind::WhileStatement { test, body } => {
                let start = gen.new_label();
                let end = gen.new_label();
                gen.set_label(start);
                gen.branch_if_false(self, test, end);
                self.compile_with(body, gen, delegate);
                gen.jump(start);
                gen.set_label(end);
            }
            _ => delegate(gen, self, id),
        }
    }
}
