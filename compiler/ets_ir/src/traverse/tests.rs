#![allow(clippy::unwrap_used)]

use pretty_assertions::assert_eq;
use proptest::prelude::*;

use crate::{Ast, NodeId, NodeTag, Span, TokenType};

/// `if (a < b) { a; } else b;`
fn if_else(ast: &mut Ast) -> (NodeId, [NodeId; 3]) {
    let a = ast.identifier("a", Span::new(4, 5)).unwrap();
    let b = ast.identifier("b", Span::new(8, 9)).unwrap();
    let test = ast.binary(TokenType::LessThan, a, b).unwrap();
    let a2 = ast.identifier("a", Span::new(13, 14)).unwrap();
    let stmt = ast.expression_statement(a2).unwrap();
    let consequent = ast.block(&[stmt], Span::new(11, 17)).unwrap();
    let b2 = ast.identifier("b", Span::new(23, 24)).unwrap();
    let alternate = ast.expression_statement(b2).unwrap();
    let node = ast
        .if_statement(test, consequent, Some(alternate), Span::new(0, 25))
        .unwrap();
    (node, [test, consequent, alternate])
}

#[test]
fn iterate_visits_declared_children_in_order() {
    let mut ast = Ast::new();
    let (node, children) = if_else(&mut ast);

    let mut seen = Vec::new();
    ast.iterate(node, |child| seen.push(child));
    assert_eq!(seen, children.to_vec());
}

#[test]
fn iterate_skips_absent_optional() {
    let mut ast = Ast::new();
    let test = ast.boolean(true, Span::DUMMY).unwrap();
    let consequent = ast.block(&[], Span::DUMMY).unwrap();
    let node = ast.if_statement(test, consequent, None, Span::DUMMY).unwrap();

    let mut seen = Vec::new();
    ast.iterate(node, |child| seen.push(child));
    assert_eq!(seen, vec![test, consequent]);
}

#[test]
fn iterate_on_leaf_is_noop() {
    let mut ast = Ast::new();
    let leaf = ast.number(3.0, Span::DUMMY).unwrap();
    let mut calls = 0;
    ast.iterate(leaf, |_| calls += 1);
    assert_eq!(calls, 0);
}

#[test]
fn recursive_orders() {
    let mut ast = Ast::new();
    let (node, _) = if_else(&mut ast);

    let mut pre = Vec::new();
    ast.iterate_recursively(node, |id| pre.push(ast.tag(id)));
    assert_eq!(
        pre,
        vec![
            NodeTag::BinaryExpression,
            NodeTag::Identifier,
            NodeTag::Identifier,
            NodeTag::BlockStatement,
            NodeTag::ExpressionStatement,
            NodeTag::Identifier,
            NodeTag::ExpressionStatement,
            NodeTag::Identifier,
        ]
    );

    let mut post = Vec::new();
    ast.iterate_recursively_postorder(node, |id| post.push(ast.tag(id)));
    assert_eq!(
        post,
        vec![
            NodeTag::Identifier,
            NodeTag::Identifier,
            NodeTag::BinaryExpression,
            NodeTag::Identifier,
            NodeTag::ExpressionStatement,
            NodeTag::BlockStatement,
            NodeTag::Identifier,
            NodeTag::ExpressionStatement,
        ]
    );
}

#[test]
fn find_child_stops_at_first_match() {
    let mut ast = Ast::new();
    let (node, [test, ..]) = if_else(&mut ast);

    let mut calls = 0;
    let found = ast.find_child(node, |id| {
        calls += 1;
        ast.tag(id) == NodeTag::Identifier
    });
    assert_eq!(found, Some(ast.children(test)[0]));
    assert_eq!(calls, 2);
}

#[test]
fn search_excludes_the_node_itself() {
    let mut ast = Ast::new();
    let (node, _) = if_else(&mut ast);
    assert!(!ast.is_any_child(node, |id| ast.tag(id) == NodeTag::IfStatement));
    assert!(ast.is_any_child(node, |id| ast.tag(id) == NodeTag::BlockStatement));
    assert_eq!(ast.subtree_size(node), 9);
}

proptest! {
    #[test]
    fn iterate_matches_statement_list(widths in prop::collection::vec(0usize..4, 0..12)) {
        let mut ast = Ast::new();
        let mut statements = Vec::new();
        for (i, width) in widths.iter().enumerate() {
            let callee = ast.identifier("f", Span::DUMMY).unwrap();
            let args: Vec<_> = (0..*width)
                .map(|n| ast.number(n as f64, Span::DUMMY).unwrap())
                .collect();
            let call = ast.call(callee, &args, Span::new(0, i as u32)).unwrap();
            statements.push(ast.expression_statement(call).unwrap());
        }
        let block = ast.block(&statements, Span::DUMMY).unwrap();

        let mut seen = Vec::new();
        ast.iterate(block, |child| seen.push(child));
        prop_assert_eq!(&seen, &statements);

        let expected: usize = 1 + widths.iter().map(|w| 3 + w).sum::<usize>();
        prop_assert_eq!(ast.subtree_size(block), expected);
    }
}
