//! Recording doubles for the external checkers and code generators.
//!
//! Available to this crate's tests and, with the `testing` feature, to
//! downstream crates. The doubles do no real analysis: each checker gives
//! every node kind a fixed type from its own numbering, and the code
//! generator writes one line per emitted operation.

use rustc_hash::FxHashMap;

use crate::dispatch::{BranchEmitter, EtsAnalyzer, EtsGen, PandaGen, TsAnalyzer};
use crate::{Ast, BoxingUnboxingFlags, NodeId, NodeTag, TypeRef};

/// Type the TS double gives to `tag`.
pub fn ts_type_of(tag: NodeTag) -> TypeRef {
    TypeRef::new(RecordingTsChecker::BASE + tag as u32)
}

/// Type the ETS double gives to `tag`.
pub fn ets_type_of(tag: NodeTag) -> TypeRef {
    TypeRef::new(RecordingEtsChecker::BASE + tag as u32)
}

/// TS checker double. Checks children first, then answers with
/// [`ts_type_of`] for the node's kind.
#[derive(Debug, Default)]
pub struct RecordingTsChecker {
    /// Nodes handed to `check`, in call order.
    pub checked: Vec<NodeId>,
    pub diagnostics: Vec<String>,
}

impl RecordingTsChecker {
    pub const BASE: u32 = 100;
    pub const ERROR: TypeRef = TypeRef::new(1);
}

impl TsAnalyzer for RecordingTsChecker {
    fn check(&mut self, ast: &mut Ast, id: NodeId) -> TypeRef {
        self.checked.push(id);
        for child in ast.children(id) {
            if ast.check_ts(child, self) == Self::ERROR {
                self.diagnostics
                    .push(format!("{} at {}", ast.tag(child), ast.span(child)));
            }
        }
        ts_type_of(ast.tag(id))
    }

    fn error_type(&self) -> TypeRef {
        Self::ERROR
    }
}

/// ETS checker double. Like [`RecordingTsChecker`] with its own type
/// numbering, plus configurable coercions.
#[derive(Debug, Default)]
pub struct RecordingEtsChecker {
    pub checked: Vec<NodeId>,
    pub diagnostics: Vec<String>,
    /// Coercion flags to report per node.
    pub coercions: FxHashMap<NodeId, BoxingUnboxingFlags>,
}

impl RecordingEtsChecker {
    pub const BASE: u32 = 1000;
    pub const ERROR: TypeRef = TypeRef::new(2);
}

impl EtsAnalyzer for RecordingEtsChecker {
    fn check(&mut self, ast: &mut Ast, id: NodeId) -> TypeRef {
        self.checked.push(id);
        for child in ast.children(id) {
            let verified = ast.check_ets(child, self);
            assert_eq!(verified.node, child);
            if verified.ty == Self::ERROR {
                self.diagnostics
                    .push(format!("{} at {}", ast.tag(child), ast.span(child)));
            }
        }
        ets_type_of(ast.tag(id))
    }

    fn error_type(&self) -> TypeRef {
        Self::ERROR
    }

    fn coercion(&self, _ast: &Ast, id: NodeId) -> BoxingUnboxingFlags {
        self.coercions.get(&id).copied().unwrap_or_default()
    }
}

/// Code generator double for both backends.
///
/// Delegated nodes are written as `<backend> <Kind>`. Programs, blocks and
/// expression statements recurse into their children through the IR entry
/// point, so nested `if`/`while` statements reach the label primitives.
#[derive(Debug, Default)]
pub struct RecordingGen {
    pub ops: Vec<String>,
    next_label: u32,
}

impl RecordingGen {
    fn delegated(&mut self, backend: &str, ast: &Ast, id: NodeId) -> bool {
        let tag = ast.tag(id);
        self.ops.push(format!("{backend} {tag}"));
        matches!(
            tag,
            NodeTag::Program | NodeTag::BlockStatement | NodeTag::ExpressionStatement
        )
    }
}

impl BranchEmitter for RecordingGen {
    type Label = u32;

    fn new_label(&mut self) -> u32 {
        let label = self.next_label;
        self.next_label += 1;
        label
    }

    fn set_label(&mut self, label: u32) {
        self.ops.push(format!("L{label}:"));
    }

    fn branch_if_false(&mut self, ast: &Ast, test: NodeId, target: u32) {
        self.ops.push(format!("jfalse {} L{target}", ast.tag(test)));
    }

    fn jump(&mut self, target: u32) {
        self.ops.push(format!("jmp L{target}"));
    }
}

impl PandaGen for RecordingGen {
    fn compile(&mut self, ast: &Ast, id: NodeId) {
        if self.delegated("pa", ast, id) {
            for child in ast.children(id) {
                ast.compile_ts(child, self);
            }
        }
    }
}

impl EtsGen for RecordingGen {
    fn compile(&mut self, ast: &Ast, id: NodeId) {
        if self.delegated("ets", ast, id) {
            for child in ast.children(id) {
                ast.compile_ets(child, self);
            }
        }
    }
}
