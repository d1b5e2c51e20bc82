#![allow(clippy::unwrap_used)]

use pretty_assertions::assert_eq;

use super::*;
use crate::{AstNodeFlags, BoxingUnboxingFlags, TypeRef, VariableId};

#[test]
fn alloc_sets_parents_of_direct_children() {
    let mut ast = Ast::new();
    let left = ast.alloc(NodeKind::number(1.0), Span::new(0, 1)).unwrap();
    let right = ast.alloc(NodeKind::number(2.0), Span::new(4, 5)).unwrap();
    let binary = ast
        .alloc(
            NodeKind::BinaryExpression {
                operator: crate::TokenType::Plus,
                left,
                right,
            },
            Span::new(0, 5),
        )
        .unwrap();

    assert_eq!(ast.parent(left), Some(binary));
    assert_eq!(ast.parent(right), Some(binary));
    assert_eq!(ast.parent(binary), None);
}

#[test]
fn alloc_sets_parents_of_list_children() {
    let mut ast = Ast::new();
    let a = ast.alloc(NodeKind::EmptyStatement, Span::DUMMY).unwrap();
    let b = ast.alloc(NodeKind::EmptyStatement, Span::DUMMY).unwrap();
    let statements = ast.alloc_list(&[a, b]).unwrap();
    let block = ast
        .alloc(NodeKind::BlockStatement { statements }, Span::DUMMY)
        .unwrap();

    assert_eq!(ast.list(statements), &[a, b]);
    assert_eq!(ast.parent(a), Some(block));
    assert_eq!(ast.parent(b), Some(block));
}

#[test]
fn scope_iff_scope_bearing() {
    let mut ast = Ast::new();
    let block = ast
        .alloc(NodeKind::construct(NodeTag::BlockStatement), Span::DUMMY)
        .unwrap();
    let literal = ast.alloc(NodeKind::NullLiteral, Span::DUMMY).unwrap();

    let scope = ast.node(block).scope().unwrap();
    assert_eq!(ast.scope(scope).kind, ScopeKind::Block);
    assert_eq!(ast.scope(scope).node, block);
    assert_eq!(ast.node(literal).scope(), None);
}

#[test]
fn node_limit_is_reported() {
    let mut ast = Ast::with_node_limit(2);
    ast.alloc(NodeKind::NullLiteral, Span::DUMMY).unwrap();
    ast.alloc(NodeKind::NullLiteral, Span::DUMMY).unwrap();
    let err = ast.alloc(NodeKind::NullLiteral, Span::DUMMY).unwrap_err();
    assert_eq!(err, AllocError::NodeLimit { limit: 2 });
    assert_eq!(err.to_string(), "node limit of 2 reached");
}

#[test]
fn failed_scope_bearing_alloc_leaves_no_trace() {
    let mut ast = Ast::with_node_limit(2);
    let a = ast.alloc(NodeKind::EmptyStatement, Span::DUMMY).unwrap();
    let b = ast.alloc(NodeKind::EmptyStatement, Span::DUMMY).unwrap();
    let statements = ast.alloc_list(&[a, b]).unwrap();

    let err = ast
        .alloc(NodeKind::BlockStatement { statements }, Span::DUMMY)
        .unwrap_err();
    assert_eq!(err, AllocError::NodeLimit { limit: 2 });
    assert_eq!(ast.len(), 2);
    assert!(ast.scopes.is_empty());
    assert_eq!(ast.parent(a), None);
    assert_eq!(ast.parent(b), None);
}

#[test]
fn every_scope_belongs_to_a_live_node() {
    let mut ast = Ast::new();
    let inner = ast.block(&[], Span::DUMMY).unwrap();
    let literal = ast.alloc(NodeKind::NullLiteral, Span::DUMMY).unwrap();
    let stmt = ast.expression_statement(literal).unwrap();
    let outer = ast.block(&[inner, stmt], Span::DUMMY).unwrap();

    assert_eq!(ast.scopes.len(), 2);
    for block in [inner, outer] {
        let scope = ast.node(block).scope().unwrap();
        assert_eq!(ast.scope(scope).node, block);
    }
}

#[test]
fn gensym_counter_overflow_is_reported() {
    let mut ast = Ast::new();
    ast.gensym_counter = u32::MAX;
    assert_eq!(
        ast.gensym("tmp"),
        Err(AllocError::IndexOverflow {
            what: "synthetic name",
            index: u32::MAX as usize + 1,
        })
    );
}

#[test]
fn overlong_list_is_reported() {
    let mut ast = Ast::new();
    let id = ast.alloc(NodeKind::NullLiteral, Span::DUMMY).unwrap();
    let ids = vec![id; usize::from(u16::MAX) + 1];
    assert_eq!(
        ast.alloc_list(&ids),
        Err(AllocError::ListTooLong {
            len: ids.len(),
            max: usize::from(u16::MAX),
        })
    );
}

#[test]
fn empty_list_takes_no_storage() {
    let mut ast = Ast::new();
    assert_eq!(ast.alloc_list(&[]).unwrap(), NodeRange::EMPTY);
    assert!(ast.list(NodeRange::EMPTY).is_empty());
}

#[test]
fn gensym_is_per_arena() {
    let mut first = Ast::new();
    let mut second = Ast::new();
    let a0 = first.gensym("tmp").unwrap();
    let a1 = first.gensym("tmp").unwrap();
    let b0 = second.gensym("tmp").unwrap();

    assert_eq!(first.name_str(a0), "tmp$0");
    assert_eq!(first.name_str(a1), "tmp$1");
    assert_eq!(second.name_str(b0), "tmp$0");
}

#[test]
#[should_panic(expected = "node kind cannot change")]
fn set_kind_rejects_other_tag() {
    let mut ast = Ast::new();
    let id = ast.alloc(NodeKind::NullLiteral, Span::DUMMY).unwrap();
    ast.set_kind(id, NodeKind::UndefinedLiteral);
}

#[test]
fn clean_up_drops_attachments() {
    let mut ast = Ast::new();
    let block = ast
        .alloc(NodeKind::construct(NodeTag::BlockStatement), Span::DUMMY)
        .unwrap();
    let node = ast.node_mut(block);
    node.variable = Some(VariableId::new(3));
    node.ts_type = Some(TypeRef::new(1));
    node.ets_type = Some(TypeRef::new(2));
    node.boxing = BoxingUnboxingFlags::BOX_TO_INT;
    node.flags = AstNodeFlags::SYNTHETIC;

    ast.clean_up();

    let node = ast.node(block);
    assert!(ast.is_cleaned_up());
    assert_eq!(node.variable, None);
    assert_eq!(node.ts_type, None);
    assert_eq!(node.ets_type, None);
    assert_eq!(node.scope(), None);
    assert!(node.boxing.is_empty());
    // Plain data survives.
    assert_eq!(node.flags, AstNodeFlags::SYNTHETIC);
    assert_eq!(ast.len(), 1);
}
