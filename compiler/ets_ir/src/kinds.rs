//! Node kinds and their owned child slots.
//!
//! `NodeKind` is the per-kind payload of a node. All children are indices,
//! never boxes, so the payload is `Copy`: passes copy it out of the arena,
//! edit it, and write it back.
//!
//! Each kind declares its owned children as an ordered list of slots
//! ([`NodeKind::slots_mut`]). That one table drives iteration, rewriting,
//! cloning and verification, so the declared order is the order every
//! traversal sees.

use std::fmt;

use smallvec::SmallVec;

use crate::token::TokenType;
use crate::{Name, NodeId, NodeRange};

/// Discriminator over all node shapes.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum NodeTag {
    // Statements
    Program,
    BlockStatement,
    EmptyStatement,
    ExpressionStatement,
    IfStatement,
    WhileStatement,
    ForUpdateStatement,
    ReturnStatement,
    BreakStatement,
    ThrowStatement,
    VariableDeclaration,
    FunctionDeclaration,
    ClassDeclaration,
    TSTypeAliasDeclaration,
    BrokenStatement,

    // Declaration parts
    VariableDeclarator,
    ScriptFunction,
    ClassDefinition,
    ClassProperty,
    MethodDefinition,

    // Expressions
    Identifier,
    NumberLiteral,
    StringLiteral,
    BooleanLiteral,
    CharLiteral,
    NullLiteral,
    UndefinedLiteral,
    ThisExpression,
    BinaryExpression,
    UnaryExpression,
    AssignmentExpression,
    CallExpression,
    MemberExpression,
    ArrayExpression,
    FunctionExpression,
    ETSParameterExpression,
    BrokenExpression,

    // Types
    ETSPrimitiveType,
    ETSTypeReference,
    TSArrayType,
    TSUnionType,
}

/// Coarse grouping used by visitors and the verifier.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum NodeCategory {
    Statement,
    DeclarationPart,
    Expression,
    Type,
}

impl NodeTag {
    /// Display name used by the structured dump (`"type"` key).
    pub const fn name(self) -> &'static str {
        match self {
            Self::Program => "Program",
            Self::BlockStatement => "BlockStatement",
            Self::EmptyStatement => "EmptyStatement",
            Self::ExpressionStatement => "ExpressionStatement",
            Self::IfStatement => "IfStatement",
            Self::WhileStatement => "WhileStatement",
            Self::ForUpdateStatement => "ForUpdateStatement",
            Self::ReturnStatement => "ReturnStatement",
            Self::BreakStatement => "BreakStatement",
            Self::ThrowStatement => "ThrowStatement",
            Self::VariableDeclaration => "VariableDeclaration",
            Self::FunctionDeclaration => "FunctionDeclaration",
            Self::ClassDeclaration => "ClassDeclaration",
            Self::TSTypeAliasDeclaration => "TSTypeAliasDeclaration",
            Self::BrokenStatement => "BrokenStatement",
            Self::VariableDeclarator => "VariableDeclarator",
            Self::ScriptFunction => "ScriptFunction",
            Self::ClassDefinition => "ClassDefinition",
            Self::ClassProperty => "ClassProperty",
            Self::MethodDefinition => "MethodDefinition",
            Self::Identifier => "Identifier",
            Self::NumberLiteral => "NumberLiteral",
            Self::StringLiteral => "StringLiteral",
            Self::BooleanLiteral => "BooleanLiteral",
            Self::CharLiteral => "CharLiteral",
            Self::NullLiteral => "NullLiteral",
            Self::UndefinedLiteral => "UndefinedLiteral",
            Self::ThisExpression => "ThisExpression",
            Self::BinaryExpression => "BinaryExpression",
            Self::UnaryExpression => "UnaryExpression",
            Self::AssignmentExpression => "AssignmentExpression",
            Self::CallExpression => "CallExpression",
            Self::MemberExpression => "MemberExpression",
            Self::ArrayExpression => "ArrayExpression",
            Self::FunctionExpression => "FunctionExpression",
            Self::ETSParameterExpression => "ETSParameterExpression",
            Self::BrokenExpression => "BrokenExpression",
            Self::ETSPrimitiveType => "ETSPrimitiveType",
            Self::ETSTypeReference => "ETSTypeReference",
            Self::TSArrayType => "TSArrayType",
            Self::TSUnionType => "TSUnionType",
        }
    }

    pub const fn category(self) -> NodeCategory {
        match self {
            Self::Program
            | Self::BlockStatement
            | Self::EmptyStatement
            | Self::ExpressionStatement
            | Self::IfStatement
            | Self::WhileStatement
            | Self::ForUpdateStatement
            | Self::ReturnStatement
            | Self::BreakStatement
            | Self::ThrowStatement
            | Self::VariableDeclaration
            | Self::FunctionDeclaration
            | Self::ClassDeclaration
            | Self::TSTypeAliasDeclaration
            | Self::BrokenStatement => NodeCategory::Statement,
            Self::VariableDeclarator
            | Self::ScriptFunction
            | Self::ClassDefinition
            | Self::ClassProperty
            | Self::MethodDefinition => NodeCategory::DeclarationPart,
            Self::ETSPrimitiveType
            | Self::ETSTypeReference
            | Self::TSArrayType
            | Self::TSUnionType => NodeCategory::Type,
            _ => NodeCategory::Expression,
        }
    }

    /// Kinds that own a lexical scope.
    pub const fn is_scope_bearing(self) -> bool {
        matches!(
            self,
            Self::Program
                | Self::BlockStatement
                | Self::ForUpdateStatement
                | Self::ScriptFunction
                | Self::ClassDefinition
        )
    }

    /// Error placeholders standing in for failed sub-trees.
    pub const fn is_broken(self) -> bool {
        matches!(self, Self::BrokenStatement | Self::BrokenExpression)
    }

    /// Top-level declaration that can carry `export`.
    pub const fn is_declaration(self) -> bool {
        matches!(
            self,
            Self::VariableDeclaration
                | Self::FunctionDeclaration
                | Self::ClassDeclaration
                | Self::TSTypeAliasDeclaration
        )
    }
}

impl fmt::Display for NodeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// `let` / `const` / `var`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VariableKind {
    #[default]
    Let,
    Const,
    Var,
}

impl VariableKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Let => "let",
            Self::Const => "const",
            Self::Var => "var",
        }
    }
}

/// Role of a class method.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MethodKind {
    Constructor,
    #[default]
    Method,
    Get,
    Set,
}

impl MethodKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Constructor => "constructor",
            Self::Method => "method",
            Self::Get => "get",
            Self::Set => "set",
        }
    }
}

/// ETS primitive type keywords.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PrimitiveType {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    #[default]
    Void,
}

impl PrimitiveType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Byte => "byte",
            Self::Char => "char",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::Void => "void",
        }
    }
}

/// Node payload: shape-specific fields and owned children.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum NodeKind {
    /// Root of a compilation unit.
    Program { statements: NodeRange },
    BlockStatement { statements: NodeRange },
    EmptyStatement,
    ExpressionStatement { expression: NodeId },
    IfStatement {
        test: NodeId,
        consequent: NodeId,
        alternate: Option<NodeId>,
    },
    WhileStatement { test: NodeId, body: NodeId },
    /// `for (init; test; update) body`
    ForUpdateStatement {
        init: Option<NodeId>,
        test: Option<NodeId>,
        update: Option<NodeId>,
        body: NodeId,
    },
    ReturnStatement { argument: Option<NodeId> },
    BreakStatement { label: Option<Name> },
    ThrowStatement { argument: NodeId },
    VariableDeclaration {
        kind: VariableKind,
        declarators: NodeRange,
    },
    FunctionDeclaration { function: NodeId },
    ClassDeclaration { definition: NodeId },
    TSTypeAliasDeclaration { id: NodeId, type_annotation: NodeId },
    /// Placeholder for a statement the parser could not recover.
    BrokenStatement,

    VariableDeclarator { id: NodeId, init: Option<NodeId> },
    /// Function body and signature shared by declarations, expressions and
    /// methods. `body` is `None` for ambient declarations.
    ScriptFunction {
        id: Option<NodeId>,
        params: NodeRange,
        return_type: Option<NodeId>,
        body: Option<NodeId>,
    },
    ClassDefinition {
        ident: Option<NodeId>,
        super_class: Option<NodeId>,
        body: NodeRange,
    },
    ClassProperty {
        key: NodeId,
        type_annotation: Option<NodeId>,
        value: Option<NodeId>,
    },
    MethodDefinition {
        method_kind: MethodKind,
        key: NodeId,
        value: NodeId,
    },

    Identifier {
        name: Name,
        type_annotation: Option<NodeId>,
    },
    /// Number literal (stored as bits for Hash).
    NumberLiteral { bits: u64 },
    StringLiteral { value: Name },
    BooleanLiteral { value: bool },
    CharLiteral { value: char },
    NullLiteral,
    UndefinedLiteral,
    ThisExpression,
    BinaryExpression {
        operator: TokenType,
        left: NodeId,
        right: NodeId,
    },
    UnaryExpression { operator: TokenType, argument: NodeId },
    AssignmentExpression {
        operator: TokenType,
        left: NodeId,
        right: NodeId,
    },
    CallExpression {
        callee: NodeId,
        arguments: NodeRange,
        optional: bool,
    },
    MemberExpression {
        object: NodeId,
        property: NodeId,
        computed: bool,
        optional: bool,
    },
    ArrayExpression { elements: NodeRange },
    FunctionExpression { function: NodeId },
    /// ETS parameter: identifier (carrying the annotation) plus default.
    ETSParameterExpression {
        ident: NodeId,
        initializer: Option<NodeId>,
        rest: bool,
    },
    /// Placeholder for an expression the parser could not recover.
    BrokenExpression,

    ETSPrimitiveType { primitive: PrimitiveType },
    ETSTypeReference { name: Name },
    TSArrayType { element: NodeId },
    TSUnionType { types: NodeRange },
}

/// What a child slot may hold. Drives the rewrite arity policy.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum SlotClass {
    Statement,
    Expression,
    Type,
    Other,
}

/// Read-only view of one child slot.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Slot {
    One(NodeId, SlotClass),
    Opt(Option<NodeId>, SlotClass),
    List(NodeRange, SlotClass),
}

/// Mutable view of one child slot of a payload.
#[derive(Debug)]
pub enum SlotMut<'a> {
    One(&'a mut NodeId, SlotClass),
    Opt(&'a mut Option<NodeId>, SlotClass),
    List(&'a mut NodeRange, SlotClass),
}

impl SlotMut<'_> {
    pub fn get(&self) -> Slot {
        match self {
            SlotMut::One(id, class) => Slot::One(**id, *class),
            SlotMut::Opt(id, class) => Slot::Opt(**id, *class),
            SlotMut::List(range, class) => Slot::List(**range, *class),
        }
    }
}

impl NodeKind {
    pub const fn tag(&self) -> NodeTag {
        match self {
            Self::Program { .. } => NodeTag::Program,
            Self::BlockStatement { .. } => NodeTag::BlockStatement,
            Self::EmptyStatement => NodeTag::EmptyStatement,
            Self::ExpressionStatement { .. } => NodeTag::ExpressionStatement,
            Self::IfStatement { .. } => NodeTag::IfStatement,
            Self::WhileStatement { .. } => NodeTag::WhileStatement,
            Self::ForUpdateStatement { .. } => NodeTag::ForUpdateStatement,
            Self::ReturnStatement { .. } => NodeTag::ReturnStatement,
            Self::BreakStatement { .. } => NodeTag::BreakStatement,
            Self::ThrowStatement { .. } => NodeTag::ThrowStatement,
            Self::VariableDeclaration { .. } => NodeTag::VariableDeclaration,
            Self::FunctionDeclaration { .. } => NodeTag::FunctionDeclaration,
            Self::ClassDeclaration { .. } => NodeTag::ClassDeclaration,
            Self::TSTypeAliasDeclaration { .. } => NodeTag::TSTypeAliasDeclaration,
            Self::BrokenStatement => NodeTag::BrokenStatement,
            Self::VariableDeclarator { .. } => NodeTag::VariableDeclarator,
            Self::ScriptFunction { .. } => NodeTag::ScriptFunction,
            Self::ClassDefinition { .. } => NodeTag::ClassDefinition,
            Self::ClassProperty { .. } => NodeTag::ClassProperty,
            Self::MethodDefinition { .. } => NodeTag::MethodDefinition,
            Self::Identifier { .. } => NodeTag::Identifier,
            Self::NumberLiteral { .. } => NodeTag::NumberLiteral,
            Self::StringLiteral { .. } => NodeTag::StringLiteral,
            Self::BooleanLiteral { .. } => NodeTag::BooleanLiteral,
            Self::CharLiteral { .. } => NodeTag::CharLiteral,
            Self::NullLiteral => NodeTag::NullLiteral,
            Self::UndefinedLiteral => NodeTag::UndefinedLiteral,
            Self::ThisExpression => NodeTag::ThisExpression,
            Self::BinaryExpression { .. } => NodeTag::BinaryExpression,
            Self::UnaryExpression { .. } => NodeTag::UnaryExpression,
            Self::AssignmentExpression { .. } => NodeTag::AssignmentExpression,
            Self::CallExpression { .. } => NodeTag::CallExpression,
            Self::MemberExpression { .. } => NodeTag::MemberExpression,
            Self::ArrayExpression { .. } => NodeTag::ArrayExpression,
            Self::FunctionExpression { .. } => NodeTag::FunctionExpression,
            Self::ETSParameterExpression { .. } => NodeTag::ETSParameterExpression,
            Self::BrokenExpression => NodeTag::BrokenExpression,
            Self::ETSPrimitiveType { .. } => NodeTag::ETSPrimitiveType,
            Self::ETSTypeReference { .. } => NodeTag::ETSTypeReference,
            Self::TSArrayType { .. } => NodeTag::TSArrayType,
            Self::TSUnionType { .. } => NodeTag::TSUnionType,
        }
    }

    /// Minimally valid default payload for a kind.
    ///
    /// Required children are [`NodeId::INVALID`]: the result is a shell that
    /// only becomes a well-formed node once filled (e.g. by `copy_to`).
    pub const fn construct(tag: NodeTag) -> NodeKind {
        const NONE: NodeId = NodeId::INVALID;
        const EMPTY: NodeRange = NodeRange::EMPTY;
        match tag {
            NodeTag::Program => Self::Program { statements: EMPTY },
            NodeTag::BlockStatement => Self::BlockStatement { statements: EMPTY },
            NodeTag::EmptyStatement => Self::EmptyStatement,
            NodeTag::ExpressionStatement => Self::ExpressionStatement { expression: NONE },
            NodeTag::IfStatement => Self::IfStatement {
                test: NONE,
                consequent: NONE,
                alternate: None,
            },
            NodeTag::WhileStatement => Self::WhileStatement {
                test: NONE,
                body: NONE,
            },
            NodeTag::ForUpdateStatement => Self::ForUpdateStatement {
                init: None,
                test: None,
                update: None,
                body: NONE,
            },
            NodeTag::ReturnStatement => Self::ReturnStatement { argument: None },
            NodeTag::BreakStatement => Self::BreakStatement { label: None },
            NodeTag::ThrowStatement => Self::ThrowStatement { argument: NONE },
            NodeTag::VariableDeclaration => Self::VariableDeclaration {
                kind: VariableKind::Let,
                declarators: EMPTY,
            },
            NodeTag::FunctionDeclaration => Self::FunctionDeclaration { function: NONE },
            NodeTag::ClassDeclaration => Self::ClassDeclaration { definition: NONE },
            NodeTag::TSTypeAliasDeclaration => Self::TSTypeAliasDeclaration {
                id: NONE,
                type_annotation: NONE,
            },
            NodeTag::BrokenStatement => Self::BrokenStatement,
            NodeTag::VariableDeclarator => Self::VariableDeclarator {
                id: NONE,
                init: None,
            },
            NodeTag::ScriptFunction => Self::ScriptFunction {
                id: None,
                params: EMPTY,
                return_type: None,
                body: None,
            },
            NodeTag::ClassDefinition => Self::ClassDefinition {
                ident: None,
                super_class: None,
                body: EMPTY,
            },
            NodeTag::ClassProperty => Self::ClassProperty {
                key: NONE,
                type_annotation: None,
                value: None,
            },
            NodeTag::MethodDefinition => Self::MethodDefinition {
                method_kind: MethodKind::Method,
                key: NONE,
                value: NONE,
            },
            NodeTag::Identifier => Self::Identifier {
                name: Name::EMPTY,
                type_annotation: None,
            },
            NodeTag::NumberLiteral => Self::NumberLiteral { bits: 0 },
            NodeTag::StringLiteral => Self::StringLiteral { value: Name::EMPTY },
            NodeTag::BooleanLiteral => Self::BooleanLiteral { value: false },
            NodeTag::CharLiteral => Self::CharLiteral { value: '\0' },
            NodeTag::NullLiteral => Self::NullLiteral,
            NodeTag::UndefinedLiteral => Self::UndefinedLiteral,
            NodeTag::ThisExpression => Self::ThisExpression,
            NodeTag::BinaryExpression => Self::BinaryExpression {
                operator: TokenType::Plus,
                left: NONE,
                right: NONE,
            },
            NodeTag::UnaryExpression => Self::UnaryExpression {
                operator: TokenType::Minus,
                argument: NONE,
            },
            NodeTag::AssignmentExpression => Self::AssignmentExpression {
                operator: TokenType::Substitution,
                left: NONE,
                right: NONE,
            },
            NodeTag::CallExpression => Self::CallExpression {
                callee: NONE,
                arguments: EMPTY,
                optional: false,
            },
            NodeTag::MemberExpression => Self::MemberExpression {
                object: NONE,
                property: NONE,
                computed: false,
                optional: false,
            },
            NodeTag::ArrayExpression => Self::ArrayExpression { elements: EMPTY },
            NodeTag::FunctionExpression => Self::FunctionExpression { function: NONE },
            NodeTag::ETSParameterExpression => Self::ETSParameterExpression {
                ident: NONE,
                initializer: None,
                rest: false,
            },
            NodeTag::BrokenExpression => Self::BrokenExpression,
            NodeTag::ETSPrimitiveType => Self::ETSPrimitiveType {
                primitive: PrimitiveType::Void,
            },
            NodeTag::ETSTypeReference => Self::ETSTypeReference { name: Name::EMPTY },
            NodeTag::TSArrayType => Self::TSArrayType { element: NONE },
            NodeTag::TSUnionType => Self::TSUnionType { types: EMPTY },
        }
    }

    /// Number literal payload.
    pub fn number(value: f64) -> NodeKind {
        NodeKind::NumberLiteral {
            bits: value.to_bits(),
        }
    }

    /// Owned child slots in declared order.
    pub fn slots_mut(&mut self) -> SmallVec<[SlotMut<'_>; 4]> {
        use SlotClass::{Expression, Other, Statement, Type};
        use SlotMut::{List, One, Opt};

        let mut slots = SmallVec::new();
        match self {
            Self::Program { statements } | Self::BlockStatement { statements } => {
                slots.push(List(statements, Statement));
            }
            Self::ExpressionStatement { expression } => slots.push(One(expression, Expression)),
            Self::IfStatement {
                test,
                consequent,
                alternate,
            } => {
                slots.push(One(test, Expression));
                slots.push(One(consequent, Statement));
                slots.push(Opt(alternate, Statement));
            }
            Self::WhileStatement { test, body } => {
                slots.push(One(test, Expression));
                slots.push(One(body, Statement));
            }
            Self::ForUpdateStatement {
                init,
                test,
                update,
                body,
            } => {
                slots.push(Opt(init, Other));
                slots.push(Opt(test, Expression));
                slots.push(Opt(update, Expression));
                slots.push(One(body, Statement));
            }
            Self::ReturnStatement { argument } => slots.push(Opt(argument, Expression)),
            Self::ThrowStatement { argument } => slots.push(One(argument, Expression)),
            Self::VariableDeclaration { declarators, .. } => slots.push(List(declarators, Other)),
            Self::FunctionDeclaration { function } | Self::FunctionExpression { function } => {
                slots.push(One(function, Other));
            }
            Self::ClassDeclaration { definition } => slots.push(One(definition, Other)),
            Self::TSTypeAliasDeclaration {
                id,
                type_annotation,
            } => {
                slots.push(One(id, Expression));
                slots.push(One(type_annotation, Type));
            }
            Self::VariableDeclarator { id, init } => {
                slots.push(One(id, Expression));
                slots.push(Opt(init, Expression));
            }
            Self::ScriptFunction {
                id,
                params,
                return_type,
                body,
            } => {
                slots.push(Opt(id, Expression));
                slots.push(List(params, Other));
                slots.push(Opt(return_type, Type));
                slots.push(Opt(body, Statement));
            }
            Self::ClassDefinition {
                ident,
                super_class,
                body,
            } => {
                slots.push(Opt(ident, Expression));
                slots.push(Opt(super_class, Expression));
                slots.push(List(body, Other));
            }
            Self::ClassProperty {
                key,
                type_annotation,
                value,
            } => {
                slots.push(One(key, Expression));
                slots.push(Opt(type_annotation, Type));
                slots.push(Opt(value, Expression));
            }
            Self::MethodDefinition { key, value, .. } => {
                slots.push(One(key, Expression));
                slots.push(One(value, Expression));
            }
            Self::Identifier {
                type_annotation, ..
            } => slots.push(Opt(type_annotation, Type)),
            Self::BinaryExpression { left, right, .. }
            | Self::AssignmentExpression { left, right, .. } => {
                slots.push(One(left, Expression));
                slots.push(One(right, Expression));
            }
            Self::UnaryExpression { argument, .. } => slots.push(One(argument, Expression)),
            Self::CallExpression {
                callee, arguments, ..
            } => {
                slots.push(One(callee, Expression));
                slots.push(List(arguments, Expression));
            }
            Self::MemberExpression {
                object, property, ..
            } => {
                slots.push(One(object, Expression));
                slots.push(One(property, Expression));
            }
            Self::ArrayExpression { elements } => slots.push(List(elements, Expression)),
            Self::ETSParameterExpression {
                ident, initializer, ..
            } => {
                slots.push(One(ident, Expression));
                slots.push(Opt(initializer, Expression));
            }
            Self::TSArrayType { element } => slots.push(One(element, Type)),
            Self::TSUnionType { types } => slots.push(List(types, Type)),
            Self::EmptyStatement
            | Self::BreakStatement { .. }
            | Self::BrokenStatement
            | Self::NumberLiteral { .. }
            | Self::StringLiteral { .. }
            | Self::BooleanLiteral { .. }
            | Self::CharLiteral { .. }
            | Self::NullLiteral
            | Self::UndefinedLiteral
            | Self::ThisExpression
            | Self::BrokenExpression
            | Self::ETSPrimitiveType { .. }
            | Self::ETSTypeReference { .. } => {}
        }
        slots
    }

    /// Owned child slots in declared order, by value.
    pub fn slots(&self) -> SmallVec<[Slot; 4]> {
        let mut copy = *self;
        let slots = copy.slots_mut().iter().map(SlotMut::get).collect();
        slots
    }

    /// Kind has no child slots at all.
    pub fn is_leaf(&self) -> bool {
        self.slots().is_empty()
    }
}

#[cfg(test)]
mod tests;
