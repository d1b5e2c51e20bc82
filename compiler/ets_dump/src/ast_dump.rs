//! Structured AST dump.
//!
//! Every node renders as an object whose first key is `"type"`, followed by
//! the properties its kind declares ([`node_properties`]) and a `"loc"`
//! entry. Two wrappers decide how an absent value shows up:
//!
//! - [`PropValue::optional`]: the key is left out entirely ("does not apply")
//! - [`PropValue::nullish`]: the key is kept with an explicit `null`
//!   ("applies, but empty")
//!
//! Tooling relies on that distinction, so the choice is made per property
//! below and never collapsed.

use ets_ir::{
    ensure_sufficient_stack, Ast, ModifierFlags, NodeId, NodeKind, NodeRange, Span, TokenType,
};

use crate::{format_number, write_quoted, LineIndex};

/// Named constants a property can hold.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Constant {
    Null,
    /// Rendered as the bare word `undefined`.
    Undefined,
    EmptyArray,
}

/// Value of one dumped property.
#[derive(Clone, Debug, PartialEq)]
pub enum PropValue {
    Str(String),
    Token(TokenType),
    Bool(bool),
    Char(char),
    Number(f64),
    Node(NodeId),
    Props(Vec<Property>),
    Nodes(Vec<NodeId>),
    Constant(Constant),
    /// Property is skipped.
    Ignore,
}

impl PropValue {
    /// Absent values drop the property.
    pub fn optional<T: Into<PropValue>>(value: Option<T>) -> PropValue {
        value.map_or(PropValue::Ignore, Into::into)
    }

    /// Absent values render as `null`.
    pub fn nullish<T: Into<PropValue>>(value: Option<T>) -> PropValue {
        value.map_or(PropValue::Constant(Constant::Null), Into::into)
    }

    /// Empty lists render as the `[]` constant.
    pub fn nodes(ids: Vec<NodeId>) -> PropValue {
        if ids.is_empty() {
            PropValue::Constant(Constant::EmptyArray)
        } else {
            PropValue::Nodes(ids)
        }
    }

    /// `true` renders, `false` drops the property.
    pub fn flag(set: bool) -> PropValue {
        if set {
            PropValue::Bool(true)
        } else {
            PropValue::Ignore
        }
    }

    pub fn is_ignored(&self) -> bool {
        matches!(self, PropValue::Ignore)
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        PropValue::Str(value.to_owned())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        PropValue::Str(value)
    }
}

impl From<TokenType> for PropValue {
    fn from(value: TokenType) -> Self {
        PropValue::Token(value)
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        PropValue::Bool(value)
    }
}

impl From<char> for PropValue {
    fn from(value: char) -> Self {
        PropValue::Char(value)
    }
}

impl From<f64> for PropValue {
    fn from(value: f64) -> Self {
        PropValue::Number(value)
    }
}

impl From<NodeId> for PropValue {
    fn from(value: NodeId) -> Self {
        PropValue::Node(value)
    }
}

impl From<Vec<NodeId>> for PropValue {
    fn from(value: Vec<NodeId>) -> Self {
        PropValue::Nodes(value)
    }
}

impl From<Vec<Property>> for PropValue {
    fn from(value: Vec<Property>) -> Self {
        PropValue::Props(value)
    }
}

impl From<Constant> for PropValue {
    fn from(value: Constant) -> Self {
        PropValue::Constant(value)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Property {
    pub key: &'static str,
    pub value: PropValue,
}

impl Property {
    pub fn new(key: &'static str, value: impl Into<PropValue>) -> Self {
        Property {
            key,
            value: value.into(),
        }
    }
}

/// Structured dump settings.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct DumpConfig {
    /// Emit a `"loc"` entry on every node.
    pub include_loc: bool,
    /// Spaces per nesting level.
    pub indent_width: usize,
}

impl Default for DumpConfig {
    fn default() -> Self {
        DumpConfig {
            include_loc: true,
            indent_width: 2,
        }
    }
}

impl DumpConfig {
    pub fn without_loc() -> Self {
        DumpConfig {
            include_loc: false,
            ..Default::default()
        }
    }

    pub fn with_indent_width(indent_width: usize) -> Self {
        DumpConfig {
            indent_width,
            ..Default::default()
        }
    }
}

/// Structured dumper over one [`Ast`].
pub struct AstDumper<'a> {
    ast: &'a Ast,
    source: Option<(&'a str, LineIndex)>,
    config: DumpConfig,
    out: String,
    depth: usize,
}

impl<'a> AstDumper<'a> {
    /// Dumper reporting byte offsets in `loc`.
    pub fn new(ast: &'a Ast) -> Self {
        AstDumper {
            ast,
            source: None,
            config: DumpConfig::default(),
            out: String::new(),
            depth: 0,
        }
    }

    /// Dumper reporting 1-based line/column positions in `loc`.
    pub fn with_source(ast: &'a Ast, source: &'a str) -> Self {
        AstDumper {
            source: Some((source, LineIndex::build(source))),
            ..Self::new(ast)
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: DumpConfig) -> Self {
        self.config = config;
        self
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub fn dump(mut self, root: NodeId) -> String {
        self.node(root);
        self.out
    }

    fn node(&mut self, id: NodeId) {
        ensure_sufficient_stack(|| {
            let mut props = Vec::with_capacity(8);
            props.push(Property::new("type", self.ast.tag(id).name()));
            props.extend(node_properties(self.ast, id));
            if self.config.include_loc {
                props.push(Property::new("loc", self.loc(self.ast.span(id))));
            }
            self.props(&props);
        });
    }

    fn loc(&self, span: Span) -> Vec<Property> {
        match &self.source {
            Some((source, index)) => {
                let position = |offset| {
                    let (line, column) = index.line_col(source, offset);
                    vec![
                        Property::new("line", f64::from(line)),
                        Property::new("column", f64::from(column)),
                    ]
                };
                vec![
                    Property::new("start", position(span.start)),
                    Property::new("end", position(span.end)),
                ]
            }
            None => vec![
                Property::new("start", f64::from(span.start)),
                Property::new("end", f64::from(span.end)),
            ],
        }
    }

    fn props(&mut self, props: &[Property]) {
        let live: Vec<&Property> = props.iter().filter(|p| !p.value.is_ignored()).collect();
        if live.is_empty() {
            self.out.push_str("{}");
            return;
        }
        self.out.push('{');
        self.depth += 1;
        for (i, prop) in live.iter().enumerate() {
            self.newline();
            write_quoted(&mut self.out, prop.key);
            self.out.push_str(": ");
            self.value(&prop.value);
            if i + 1 < live.len() {
                self.out.push(',');
            }
        }
        self.depth -= 1;
        self.newline();
        self.out.push('}');
    }

    fn value(&mut self, value: &PropValue) {
        match value {
            PropValue::Str(s) => write_quoted(&mut self.out, s),
            PropValue::Token(token) => write_quoted(&mut self.out, token.as_str()),
            PropValue::Bool(b) => self.out.push_str(if *b { "true" } else { "false" }),
            PropValue::Char(c) => write_quoted(&mut self.out, c.encode_utf8(&mut [0; 4])),
            PropValue::Number(n) => self.out.push_str(&format_number(*n)),
            PropValue::Node(id) => self.node(*id),
            PropValue::Props(props) => self.props(props),
            PropValue::Nodes(ids) => self.nodes(ids),
            PropValue::Constant(Constant::Null) => self.out.push_str("null"),
            PropValue::Constant(Constant::Undefined) => self.out.push_str("undefined"),
            PropValue::Constant(Constant::EmptyArray) => self.out.push_str("[]"),
            // Filtered out by `props`.
            PropValue::Ignore => {}
        }
    }

    fn nodes(&mut self, ids: &[NodeId]) {
        if ids.is_empty() {
            self.out.push_str("[]");
            return;
        }
        self.out.push('[');
        self.depth += 1;
        for (i, &id) in ids.iter().enumerate() {
            self.newline();
            self.node(id);
            if i + 1 < ids.len() {
                self.out.push(',');
            }
        }
        self.depth -= 1;
        self.newline();
        self.out.push(']');
    }

    fn newline(&mut self) {
        self.out.push('\n');
        let width = self.depth * self.config.indent_width;
        self.out.extend(std::iter::repeat(' ').take(width));
    }
}

fn accessibility(modifiers: ModifierFlags) -> PropValue {
    PropValue::optional(modifiers.access_keyword())
}

/// Properties a node kind declares, in output order, excluding `type` and
/// `loc`.
pub fn node_properties(ast: &Ast, id: NodeId) -> Vec<Property> {
    use Property as P;
    use PropValue as V;

    let node = ast.node(id);
    let modifiers = node.modifiers;
    let list = |range: NodeRange| V::nodes(ast.list(range).to_vec());
    let decorators = || P::new("decorators", Constant::EmptyArray);

    match *node.kind() {
        NodeKind::Program { statements } | NodeKind::BlockStatement { statements } => {
            vec![P::new("statements", list(statements))]
        }
        NodeKind::EmptyStatement
        | NodeKind::BrokenStatement
        | NodeKind::BrokenExpression
        | NodeKind::ThisExpression
        | NodeKind::ETSPrimitiveType { .. } => vec![],
        NodeKind::ExpressionStatement { expression } => vec![P::new("expression", expression)],
        NodeKind::IfStatement {
            test,
            consequent,
            alternate,
        } => vec![
            P::new("test", test),
            P::new("consequent", consequent),
            P::new("alternate", V::optional(alternate)),
        ],
        NodeKind::WhileStatement { test, body } => {
            vec![P::new("test", test), P::new("body", body)]
        }
        NodeKind::ForUpdateStatement {
            init,
            test,
            update,
            body,
        } => vec![
            P::new("init", V::nullish(init)),
            P::new("test", V::nullish(test)),
            P::new("update", V::nullish(update)),
            P::new("body", body),
        ],
        NodeKind::ReturnStatement { argument } => vec![P::new("argument", V::nullish(argument))],
        NodeKind::BreakStatement { label } => vec![P::new(
            "label",
            V::nullish(label.map(|name| ast.name_str(name))),
        )],
        NodeKind::ThrowStatement { argument } => vec![P::new("argument", argument)],
        NodeKind::VariableDeclaration { kind, declarators } => vec![
            P::new("declarations", list(declarators)),
            P::new("kind", kind.as_str()),
            decorators(),
            P::new("declare", modifiers.contains(ModifierFlags::DECLARE)),
        ],
        NodeKind::VariableDeclarator { id, init } => {
            vec![P::new("id", id), P::new("init", V::nullish(init))]
        }
        NodeKind::FunctionDeclaration { function } => {
            vec![decorators(), P::new("function", function)]
        }
        NodeKind::ClassDeclaration { definition } => {
            vec![P::new("definition", definition), decorators()]
        }
        NodeKind::TSTypeAliasDeclaration {
            id,
            type_annotation,
        } => vec![
            decorators(),
            P::new("id", id),
            P::new("typeAnnotation", type_annotation),
            P::new("declare", V::flag(modifiers.contains(ModifierFlags::DECLARE))),
        ],
        NodeKind::ScriptFunction {
            id,
            params,
            return_type,
            body,
        } => vec![
            P::new("id", V::nullish(id)),
            P::new("generator", false),
            P::new("async", modifiers.contains(ModifierFlags::ASYNC)),
            P::new("expression", false),
            P::new("params", list(params)),
            P::new("returnType", V::optional(return_type)),
            P::new("body", V::nullish(body)),
            P::new("declare", V::flag(modifiers.contains(ModifierFlags::DECLARE))),
        ],
        NodeKind::ClassDefinition {
            ident,
            super_class,
            body,
        } => vec![
            P::new("id", V::nullish(ident)),
            P::new("superClass", V::nullish(super_class)),
            P::new("body", list(body)),
        ],
        NodeKind::ClassProperty {
            key,
            type_annotation,
            value,
        } => vec![
            P::new("key", key),
            P::new("value", V::optional(value)),
            P::new("accessibility", accessibility(modifiers)),
            P::new("static", modifiers.contains(ModifierFlags::STATIC)),
            P::new("readonly", modifiers.contains(ModifierFlags::READONLY)),
            P::new("declare", modifiers.contains(ModifierFlags::DECLARE)),
            P::new("optional", modifiers.contains(ModifierFlags::OPTIONAL)),
            P::new("computed", false),
            P::new("typeAnnotation", V::optional(type_annotation)),
            P::new("definite", V::flag(modifiers.contains(ModifierFlags::DEFINITE))),
            decorators(),
        ],
        NodeKind::MethodDefinition {
            method_kind,
            key,
            value,
        } => vec![
            P::new("key", key),
            P::new("kind", method_kind.as_str()),
            P::new("accessibility", accessibility(modifiers)),
            P::new("static", modifiers.contains(ModifierFlags::STATIC)),
            P::new("optional", modifiers.contains(ModifierFlags::OPTIONAL)),
            P::new("computed", false),
            P::new("value", value),
            P::new("overloads", Constant::EmptyArray),
            decorators(),
        ],
        NodeKind::Identifier {
            name,
            type_annotation,
        } => vec![
            P::new("name", ast.name_str(name)),
            P::new("typeAnnotation", V::optional(type_annotation)),
            P::new("optional", V::flag(modifiers.contains(ModifierFlags::OPTIONAL))),
            decorators(),
        ],
        NodeKind::NumberLiteral { bits } => vec![P::new("value", f64::from_bits(bits))],
        NodeKind::StringLiteral { value } => vec![P::new("value", ast.name_str(value))],
        NodeKind::BooleanLiteral { value } => vec![P::new("value", value)],
        NodeKind::CharLiteral { value } => vec![P::new("value", value)],
        NodeKind::NullLiteral => vec![P::new("value", Constant::Null)],
        NodeKind::UndefinedLiteral => vec![P::new("value", Constant::Undefined)],
        NodeKind::BinaryExpression {
            operator,
            left,
            right,
        }
        | NodeKind::AssignmentExpression {
            operator,
            left,
            right,
        } => vec![
            P::new("operator", operator),
            P::new("left", left),
            P::new("right", right),
        ],
        NodeKind::UnaryExpression { operator, argument } => vec![
            P::new("operator", operator),
            P::new("prefix", true),
            P::new("argument", argument),
        ],
        NodeKind::CallExpression {
            callee,
            arguments,
            optional,
        } => vec![
            P::new("callee", callee),
            P::new("arguments", list(arguments)),
            P::new("optional", optional),
        ],
        NodeKind::MemberExpression {
            object,
            property,
            computed,
            optional,
        } => vec![
            P::new("object", object),
            P::new("property", property),
            P::new("computed", computed),
            P::new("optional", optional),
        ],
        NodeKind::ArrayExpression { elements } => vec![P::new("elements", list(elements))],
        NodeKind::FunctionExpression { function } => vec![P::new("function", function)],
        NodeKind::ETSParameterExpression {
            ident,
            initializer,
            rest,
        } => vec![
            P::new("name", ident),
            P::new("initializer", V::optional(initializer)),
            P::new("rest", V::flag(rest)),
        ],
        NodeKind::ETSTypeReference { name } => vec![P::new("name", ast.name_str(name))],
        NodeKind::TSArrayType { element } => vec![P::new("elementType", element)],
        NodeKind::TSUnionType { types } => vec![P::new("types", list(types))],
    }
}
