use pretty_assertions::assert_eq;

use super::*;

const ALL_TAGS: [NodeTag; 41] = [
    NodeTag::Program,
    NodeTag::BlockStatement,
    NodeTag::EmptyStatement,
    NodeTag::ExpressionStatement,
    NodeTag::IfStatement,
    NodeTag::WhileStatement,
    NodeTag::ForUpdateStatement,
    NodeTag::ReturnStatement,
    NodeTag::BreakStatement,
    NodeTag::ThrowStatement,
    NodeTag::VariableDeclaration,
    NodeTag::FunctionDeclaration,
    NodeTag::ClassDeclaration,
    NodeTag::TSTypeAliasDeclaration,
    NodeTag::BrokenStatement,
    NodeTag::VariableDeclarator,
    NodeTag::ScriptFunction,
    NodeTag::ClassDefinition,
    NodeTag::ClassProperty,
    NodeTag::MethodDefinition,
    NodeTag::Identifier,
    NodeTag::NumberLiteral,
    NodeTag::StringLiteral,
    NodeTag::BooleanLiteral,
    NodeTag::CharLiteral,
    NodeTag::NullLiteral,
    NodeTag::UndefinedLiteral,
    NodeTag::ThisExpression,
    NodeTag::BinaryExpression,
    NodeTag::UnaryExpression,
    NodeTag::AssignmentExpression,
    NodeTag::CallExpression,
    NodeTag::MemberExpression,
    NodeTag::ArrayExpression,
    NodeTag::FunctionExpression,
    NodeTag::ETSParameterExpression,
    NodeTag::BrokenExpression,
    NodeTag::ETSPrimitiveType,
    NodeTag::ETSTypeReference,
    NodeTag::TSArrayType,
    NodeTag::TSUnionType,
];

#[test]
fn construct_preserves_tag() {
    for tag in ALL_TAGS {
        assert_eq!(NodeKind::construct(tag).tag(), tag, "{tag}");
    }
}

#[test]
fn names_are_distinct() {
    let mut names: Vec<_> = ALL_TAGS.iter().map(|tag| tag.name()).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), ALL_TAGS.len());
}

#[test]
fn scope_bearing_kinds() {
    let bearing: Vec<_> = ALL_TAGS
        .into_iter()
        .filter(|tag| tag.is_scope_bearing())
        .collect();
    assert_eq!(
        bearing,
        vec![
            NodeTag::Program,
            NodeTag::BlockStatement,
            NodeTag::ForUpdateStatement,
            NodeTag::ScriptFunction,
            NodeTag::ClassDefinition,
        ]
    );
}

#[test]
fn categories() {
    assert_eq!(NodeTag::IfStatement.category(), NodeCategory::Statement);
    assert_eq!(NodeTag::ScriptFunction.category(), NodeCategory::DeclarationPart);
    assert_eq!(NodeTag::CallExpression.category(), NodeCategory::Expression);
    assert_eq!(NodeTag::TSUnionType.category(), NodeCategory::Type);
    assert!(NodeTag::BrokenExpression.is_broken());
    assert!(!NodeTag::NullLiteral.is_broken());
}

#[test]
fn if_statement_slot_order() {
    let kind = NodeKind::IfStatement {
        test: NodeId::new(1),
        consequent: NodeId::new(2),
        alternate: None,
    };
    assert_eq!(
        kind.slots().into_vec(),
        vec![
            Slot::One(NodeId::new(1), SlotClass::Expression),
            Slot::One(NodeId::new(2), SlotClass::Statement),
            Slot::Opt(None, SlotClass::Statement),
        ]
    );
}

#[test]
fn slots_mut_writes_through() {
    let mut kind = NodeKind::BinaryExpression {
        operator: TokenType::Plus,
        left: NodeId::new(1),
        right: NodeId::new(2),
    };
    for slot in kind.slots_mut() {
        if let SlotMut::One(id, _) = slot {
            *id = NodeId::new(id.raw() + 10);
        }
    }
    assert_eq!(
        kind,
        NodeKind::BinaryExpression {
            operator: TokenType::Plus,
            left: NodeId::new(11),
            right: NodeId::new(12),
        }
    );
}

#[test]
fn leaves_have_no_slots() {
    assert!(NodeKind::number(1.5).is_leaf());
    assert!(NodeKind::construct(NodeTag::BrokenStatement).is_leaf());
    assert!(!NodeKind::construct(NodeTag::Identifier).is_leaf());
}
