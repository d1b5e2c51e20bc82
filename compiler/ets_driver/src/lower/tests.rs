#![allow(clippy::unwrap_used)]

use pretty_assertions::assert_eq;

use ets_dump::dump_source;
use ets_ir::{AllocError, Ast, NodeKind, NodeTag, Span, TokenType, VariableKind};

use super::{ExpandDeclarations, OpAssignmentLowering};
use crate::Pass;

const D: Span = Span::DUMMY;

#[test]
fn compound_assignment_becomes_plain_assignment() -> Result<(), AllocError> {
    let mut ast = Ast::new();
    let x = ast.identifier("x", Span::new(0, 1))?;
    let one = ast.number(1.0, Span::new(5, 6))?;
    let compound = ast.assignment(TokenType::PlusEqual, x, one)?;
    let stmt = ast.expression_statement(compound)?;
    let program = ast.program(&[stmt], Span::new(0, 7))?;

    OpAssignmentLowering.run(&mut ast, program)?;

    assert_eq!(dump_source(&ast, program), "x = x + 1;");
    assert_eq!(ast.verify(program), vec![]);

    let lowered = ast
        .transformed_node(compound, OpAssignmentLowering::NAME)
        .unwrap();
    assert_eq!(ast.children(stmt).as_slice(), &[lowered]);
    assert_eq!(ast.node(lowered).original(), Some(compound));
    assert_eq!(ast.span(lowered), ast.span(compound));
    assert!(ast.node(lowered).is_synthetic());

    // The target keeps its id; the read is a separate copy.
    let NodeKind::AssignmentExpression { left, right, .. } = ast.kind(lowered) else {
        panic!("expected an assignment");
    };
    assert_eq!(left, x);
    let NodeKind::BinaryExpression { left: read, .. } = ast.kind(right) else {
        panic!("expected a binary expression");
    };
    assert_ne!(read, x);
    assert!(ast.deep_eq(read, x));
    assert_eq!(ast.parent(read), Some(right));
    Ok(())
}

#[test]
fn nested_compound_assignments_expand_inside_out() -> Result<(), AllocError> {
    let mut ast = Ast::new();
    let a = ast.identifier("a", D)?;
    let b = ast.identifier("b", D)?;
    let one = ast.number(1.0, D)?;
    let inner = ast.assignment(TokenType::MinusEqual, b, one)?;
    let outer = ast.assignment(TokenType::MultiplyEqual, a, inner)?;
    let stmt = ast.expression_statement(outer)?;
    let program = ast.program(&[stmt], D)?;

    OpAssignmentLowering.run(&mut ast, program)?;

    assert_eq!(dump_source(&ast, program), "a = a * (b = b - 1);");
    assert_eq!(ast.verify(program), vec![]);
    Ok(())
}

#[test]
fn plain_assignment_is_untouched() -> Result<(), AllocError> {
    let mut ast = Ast::new();
    let x = ast.identifier("x", D)?;
    let one = ast.number(1.0, D)?;
    let assign = ast.assignment(TokenType::Substitution, x, one)?;
    let stmt = ast.expression_statement(assign)?;
    let program = ast.program(&[stmt], D)?;
    let nodes = ast.len();

    OpAssignmentLowering.run(&mut ast, program)?;

    assert_eq!(ast.len(), nodes);
    assert_eq!(ast.provenance_len(), 0);
    Ok(())
}

#[test]
fn multi_declarator_statement_is_split() -> Result<(), AllocError> {
    let mut ast = Ast::new();
    let a = ast.identifier("a", D)?;
    let one = ast.number(1.0, D)?;
    let b = ast.identifier("b", D)?;
    let decl = ast.variable_declaration(VariableKind::Const, &[(a, Some(one)), (b, None)], D)?;
    ast.export(decl);
    let x = ast.identifier("x", D)?;
    let tail = ast.expression_statement(x)?;
    let program = ast.program(&[decl, tail], D)?;

    ExpandDeclarations.run(&mut ast, program)?;

    assert_eq!(
        dump_source(&ast, program),
        "export const a = 1;\nexport const b;\nx;"
    );
    assert_eq!(ast.verify(program), vec![]);

    let group = ast.transformed_node(decl, ExpandDeclarations::NAME).unwrap();
    assert_eq!(ast.tag(group), NodeTag::BlockStatement);
    assert!(ast.node(group).is_synthetic());
    assert_eq!(ast.parent(group), None);

    let statements = ast.children(program);
    assert_eq!(statements.len(), 3);
    assert_eq!(&ast.children(group)[..], &statements[..2]);
    for &stmt in &statements[..2] {
        assert_eq!(ast.parent(stmt), Some(program));
    }
    Ok(())
}

#[test]
fn for_initializer_is_not_split() -> Result<(), AllocError> {
    let mut ast = Ast::new();
    let i = ast.identifier("i", D)?;
    let zero = ast.number(0.0, D)?;
    let j = ast.identifier("j", D)?;
    let init = ast.variable_declaration(VariableKind::Let, &[(i, Some(zero)), (j, None)], D)?;
    let body = ast.block(&[], D)?;
    let for_stmt = ast.alloc(
        NodeKind::ForUpdateStatement {
            init: Some(init),
            test: None,
            update: None,
            body,
        },
        D,
    )?;
    let program = ast.program(&[for_stmt], D)?;

    ExpandDeclarations.run(&mut ast, program)?;

    assert_eq!(dump_source(&ast, program), "for (let i = 0, j;;) {}");
    assert_eq!(ast.provenance_len(), 0);
    Ok(())
}

#[test]
fn nested_blocks_are_split_too() -> Result<(), AllocError> {
    let mut ast = Ast::new();
    let a = ast.identifier("a", D)?;
    let b = ast.identifier("b", D)?;
    let decl = ast.variable_declaration(VariableKind::Let, &[(a, None), (b, None)], D)?;
    let block = ast.block(&[decl], D)?;
    let body = ast.function_declaration("f", &[], None, Some(block), D)?;
    let program = ast.program(&[body], D)?;

    ExpandDeclarations.run(&mut ast, program)?;

    assert_eq!(
        dump_source(&ast, program),
        "function f() {\n  let a;\n  let b;\n}"
    );
    assert_eq!(ast.verify(program), vec![]);
    Ok(())
}
