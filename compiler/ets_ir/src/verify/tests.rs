#![allow(clippy::unwrap_used)]

use pretty_assertions::assert_eq;

use super::Violation;
use crate::{Ast, NodeId, NodeKind, NodeTag, Span, TokenType};

fn small_program(ast: &mut Ast) -> (NodeId, NodeId) {
    let x = ast.identifier("x", Span::new(0, 1)).unwrap();
    let one = ast.number(1.0, Span::new(4, 5)).unwrap();
    let assign = ast.assignment(TokenType::Substitution, x, one).unwrap();
    let stmt = ast.expression_statement(assign).unwrap();
    let program = ast.program(&[stmt], Span::new(0, 6)).unwrap();
    (program, assign)
}

#[test]
fn well_formed_tree_has_no_violations() {
    let mut ast = Ast::new();
    let (program, _) = small_program(&mut ast);
    assert_eq!(ast.verify(program), vec![]);
}

#[test]
fn detects_wrong_parent() {
    let mut ast = Ast::new();
    let (program, assign) = small_program(&mut ast);
    let x = ast.children(assign)[0];
    ast.set_parent(x, program);

    assert_eq!(
        ast.verify(program),
        vec![Violation::ParentMismatch {
            child: x,
            owner: assign,
            found: Some(program),
        }]
    );
}

#[test]
fn detects_shared_child() {
    let mut ast = Ast::new();
    let shared = ast.number(1.0, Span::DUMMY).unwrap();
    let sum = ast.binary(TokenType::Plus, shared, shared).unwrap();

    assert_eq!(
        ast.verify(sum),
        vec![Violation::SharedChild {
            child: shared,
            first: sum,
            second: sum,
        }]
    );
}

#[test]
fn detects_missing_required_child() {
    let mut ast = Ast::new();
    let shell = ast.construct(NodeTag::WhileStatement).unwrap();

    let violations = ast.verify(shell);
    assert_eq!(
        violations,
        vec![
            Violation::MissingChild {
                node: shell,
                tag: NodeTag::WhileStatement,
                slot: 0,
            },
            Violation::MissingChild {
                node: shell,
                tag: NodeTag::WhileStatement,
                slot: 1,
            },
        ]
    );
    assert_eq!(
        violations[0].to_string(),
        format!("WhileStatement node {shell:?} is missing required child in slot 0")
    );
}

#[test]
fn detects_scope_mismatch_and_skips_after_clean_up() {
    let mut ast = Ast::new();
    let block = ast.block(&[], Span::DUMMY).unwrap();
    ast.node_mut(block).scope = None;
    assert_eq!(
        ast.verify(block),
        vec![Violation::MissingScope {
            node: block,
            tag: NodeTag::BlockStatement,
        }]
    );

    ast.clean_up();
    assert_eq!(ast.verify(block), vec![]);
}

#[test]
fn detects_invalid_span() {
    let mut ast = Ast::new();
    let node = ast.alloc(NodeKind::NullLiteral, Span::DUMMY).unwrap();
    ast.node_mut(node).set_span_unchecked(Span { start: 5, end: 2 });
    assert_eq!(ast.verify(node), vec![Violation::InvalidSpan { node }]);
}
