#![allow(clippy::unwrap_used)]

use pretty_assertions::assert_eq;

use ets_dump::{DeclgenMode, TypeNames};
use ets_ir::testing::{ets_type_of, RecordingEtsChecker, RecordingGen, RecordingTsChecker};
use ets_ir::{
    AllocError, Ast, Dialect, NodeId, NodeKind, NodeTag, PrimitiveType, Rewrite, Span, TokenType,
    VariableKind, Violation,
};

use crate::lower::{ExpandDeclarations, OpAssignmentLowering};
use crate::{CompilationUnit, Driver, DriverConfig, DriverError, Pass};

const D: Span = Span::DUMMY;

/// `let a = 1, b = 2; a += b;`
fn sample(ast: &mut Ast) -> Result<NodeId, AllocError> {
    let a = ast.identifier("a", D)?;
    let one = ast.number(1.0, D)?;
    let b = ast.identifier("b", D)?;
    let two = ast.number(2.0, D)?;
    let decl = ast.variable_declaration(VariableKind::Let, &[(a, Some(one)), (b, Some(two))], D)?;
    let target = ast.identifier("a", D)?;
    let value = ast.identifier("b", D)?;
    let compound = ast.assignment(TokenType::PlusEqual, target, value)?;
    let stmt = ast.expression_statement(compound)?;
    ast.program(&[decl, stmt], D)
}

fn unit(driver: &Driver, dialect: Dialect) -> CompilationUnit {
    let mut ast = driver.new_ast();
    let root = sample(&mut ast).unwrap();
    CompilationUnit::new("sample", dialect, ast, root)
}

#[test]
fn standard_lowerings_run_in_order() {
    let config = DriverConfig::default().with_verify_each_pass(true);
    let mut driver = Driver::with_standard_lowerings(config);
    assert_eq!(
        driver.pass_names().collect::<Vec<_>>(),
        vec![ExpandDeclarations::NAME, OpAssignmentLowering::NAME]
    );

    let mut unit = unit(&driver, Dialect::Ets);
    driver.lower(&mut unit).unwrap();

    assert_eq!(
        ets_dump::dump_source(&unit.ast, unit.root),
        "let a = 1;\nlet b = 2;\na = a + b;"
    );
    let mut passes: Vec<&str> = unit
        .ast
        .provenance_edges()
        .map(|edge| unit.ast.name_str(edge.pass))
        .collect();
    passes.sort_unstable();
    assert_eq!(
        passes,
        vec![ExpandDeclarations::NAME, OpAssignmentLowering::NAME]
    );
}

/// Rewrites the second expression statement to reuse the first one's
/// expression, leaving one node with two owners.
struct AliasingPass;

impl Pass for AliasingPass {
    fn name(&self) -> &'static str {
        "aliasing"
    }

    fn run(&mut self, ast: &mut Ast, root: NodeId) -> Result<(), AllocError> {
        let statements = ast.children(root);
        let shared = ast.children(statements[0])[0];
        ast.transform_children(statements[1], |_, _| Ok(Rewrite::Node(shared)), "aliasing")
    }
}

#[test]
fn broken_tree_is_reported_against_its_pass() {
    let mut driver = Driver::new(DriverConfig::default().with_verify_each_pass(true));
    driver.add_pass(AliasingPass);

    let mut ast = driver.new_ast();
    let x = ast.identifier("x", D).unwrap();
    let first = ast.expression_statement(x).unwrap();
    let y = ast.identifier("y", D).unwrap();
    let second = ast.expression_statement(y).unwrap();
    let root = ast.program(&[first, second], D).unwrap();
    let mut unit = CompilationUnit::new("alias", Dialect::Ts, ast, root);

    let err = driver.lower(&mut unit).unwrap_err();
    let DriverError::InvalidTree { pass, violations } = &err else {
        panic!("unexpected error {err}");
    };
    assert_eq!(*pass, "aliasing");
    assert!(violations.contains(&Violation::ParentMismatch {
        child: x,
        owner: first,
        found: Some(second),
    }));
    assert!(err.to_string().starts_with("pass `aliasing` left an invalid tree"));
}

#[test]
fn verification_can_be_switched_off() {
    let mut driver = Driver::new(DriverConfig::default().with_verify_each_pass(false));
    driver.add_pass(AliasingPass);
    let mut ast = driver.new_ast();
    let x = ast.identifier("x", D).unwrap();
    let first = ast.expression_statement(x).unwrap();
    let y = ast.identifier("y", D).unwrap();
    let second = ast.expression_statement(y).unwrap();
    let root = ast.program(&[first, second], D).unwrap();
    let mut unit = CompilationUnit::new("alias", Dialect::Ts, ast, root);

    assert_eq!(driver.lower(&mut unit), Ok(()));
}

#[test]
fn allocation_failure_aborts_the_unit() {
    let config = DriverConfig::default();
    let probe = Driver::new(config);
    let mut ast = probe.new_ast();
    sample(&mut ast).unwrap();
    // Room for the tree and not one node more.
    let limit = ast.len();

    let mut driver = Driver::new(config.with_node_limit(limit));
    driver.add_pass(OpAssignmentLowering);
    let mut unit = unit(&driver, Dialect::Ts);

    let err = driver.lower(&mut unit).unwrap_err();
    assert_eq!(
        err,
        DriverError::Alloc {
            pass: OpAssignmentLowering::NAME,
            source: AllocError::NodeLimit { limit },
        }
    );
}

#[test]
fn units_go_to_their_own_dialect() {
    let driver = Driver::new(DriverConfig::default());

    let mut ets = unit(&driver, Dialect::Ets);
    let mut checker = RecordingEtsChecker::default();
    let ty = ets.check_ets(&mut checker).unwrap();
    assert_eq!(ty, ets_type_of(NodeTag::Program));
    assert!(checker.diagnostics.is_empty());

    let err = ets.check_ts(&mut RecordingTsChecker::default()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "unit `sample` is ets but was handed to the ts pipeline"
    );

    let mut gen = RecordingGen::default();
    assert!(ets.compile_ts(&mut gen).is_err());
    assert!(gen.ops.is_empty());
    ets.compile_ets(&mut gen).unwrap();
    assert_eq!(gen.ops[0], "ets Program");
}

#[test]
fn clean_up_drops_checker_results() {
    let driver = Driver::new(DriverConfig::default());
    let mut ts = unit(&driver, Dialect::Ts);
    ts.check_ts(&mut RecordingTsChecker::default()).unwrap();
    assert!(ts.ast.node(ts.root).ts_type.is_some());

    ts.clean_up();
    assert!(ts.ast.is_cleaned_up());
    assert_eq!(ts.ast.node(ts.root).ts_type, None);
    assert_eq!(ts.ast.verify(ts.root), vec![]);
}

#[test]
fn dumps_follow_config() {
    let driver = Driver::new(
        DriverConfig::default()
            .with_dump_loc(false)
            .with_declgen(DeclgenMode::Isolated),
    );
    let mut ast = driver.new_ast();
    let int = ast.primitive_type(PrimitiveType::Int, D).unwrap();
    let param = ast.parameter("n", Some(int), D).unwrap();
    let n = ast.identifier("n", D).unwrap();
    let ret = ast.return_statement(Some(n), D).unwrap();
    let body = ast.block(&[ret], D).unwrap();
    let function = ast
        .function_declaration("id", &[param], None, Some(body), D)
        .unwrap();
    ast.export(function);
    let root = ast.program(&[function], D).unwrap();
    let unit = CompilationUnit::new("decl", Dialect::Ets, ast, root).with_source("");

    let json = driver.dump_ast(&unit);
    assert!(!json.contains("\"loc\""));
    assert!(json.starts_with("{\n  \"type\": \"Program\""));

    // Identifier returns are not literals.
    assert_eq!(
        driver.dump_declarations(&unit, None),
        "export declare function id(n: int): Object;"
    );

    let types = |ast: &Ast, id: NodeId| match ast.kind(id) {
        NodeKind::ScriptFunction { .. } => Some("int".to_owned()),
        _ => None,
    };
    let driver = Driver::new(driver.config().with_declgen(DeclgenMode::Declarations));
    assert_eq!(
        driver.dump_declarations(&unit, Some(&types as &dyn TypeNames)),
        "export declare function id(n: int): int;"
    );
}
