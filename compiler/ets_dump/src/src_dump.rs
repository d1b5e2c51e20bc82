//! Source dumper.
//!
//! Re-renders a subtree as source text. With [`DeclgenMode::Off`] every node
//! is printed in full. The declgen modes render only the exported surface of
//! a program, without bodies or private members, as a declaration file.
//!
//! Rendering is two-phase. The main walk writes text and may leave holes
//! (e.g. a return type only a checker knows) together with deferred tasks
//! that fill them. [`SrcDumper::finish`] drains the task queue once, in
//! enqueue order, then splices the holes into the output.
//!
//! Declgen keeps a registry of unexported top-level names. When the
//! exported surface references one of them, the name is promoted: removed
//! from the registry and scheduled for emission as a plain `declare`. An
//! emitted-set guards against printing a declaration twice.

use std::collections::VecDeque;

use rustc_hash::{FxHashMap, FxHashSet};

use ets_ir::{
    ensure_sufficient_stack, Ast, MethodKind, ModifierFlags, Name, NodeId, NodeKind, NodeRange,
    NodeTag, TokenType,
};

use crate::{format_number, write_quoted};

/// Which flavour of output the dumper produces.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum DeclgenMode {
    /// Full source.
    #[default]
    Off,
    /// Declaration file. Missing types are resolved after the walk through
    /// [`TypeNames`].
    Declarations,
    /// Declaration file without checker results. Missing types are inferred
    /// from literal initializers and returns.
    Isolated,
}

impl DeclgenMode {
    pub fn is_declgen(self) -> bool {
        !matches!(self, DeclgenMode::Off)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SrcDumpConfig {
    pub mode: DeclgenMode,
    /// Spaces per indent level.
    pub indent_width: usize,
}

impl Default for SrcDumpConfig {
    fn default() -> Self {
        SrcDumpConfig {
            mode: DeclgenMode::Off,
            indent_width: 2,
        }
    }
}

impl SrcDumpConfig {
    pub fn declgen(mode: DeclgenMode) -> Self {
        SrcDumpConfig {
            mode,
            ..Default::default()
        }
    }
}

/// Type names known only after checking.
pub trait TypeNames {
    /// Source spelling of the type of `id`, if known.
    fn type_name(&self, ast: &Ast, id: NodeId) -> Option<String>;
}

impl<F> TypeNames for F
where
    F: Fn(&Ast, NodeId) -> Option<String>,
{
    fn type_name(&self, ast: &Ast, id: NodeId) -> Option<String> {
        self(ast, id)
    }
}

type Task<'a> = Box<dyn FnOnce(&mut SrcDumper<'a>) + 'a>;

/// Spelling used when no type can be resolved or inferred.
const FALLBACK_TYPE: &str = "Object";

/// Local binding given to an anonymous default export.
const DEFAULT_BINDING: &str = "_default";

/// Source dumper over one [`Ast`].
pub struct SrcDumper<'a> {
    ast: &'a Ast,
    config: SrcDumpConfig,
    out: String,
    indent: String,
    /// Output positions waiting for text, in increasing position order.
    holes: Vec<(usize, Option<String>)>,
    deferred: VecDeque<Task<'a>>,
    drained: bool,
    /// Unexported top-level names, mapped to their declaration.
    pending: FxHashMap<Name, NodeId>,
    emitted: FxHashSet<NodeId>,
    types: Option<&'a dyn TypeNames>,
}

impl<'a> SrcDumper<'a> {
    pub fn new(ast: &'a Ast) -> Self {
        SrcDumper {
            ast,
            config: SrcDumpConfig::default(),
            out: String::new(),
            indent: String::new(),
            holes: Vec::new(),
            deferred: VecDeque::new(),
            drained: false,
            pending: FxHashMap::default(),
            emitted: FxHashSet::default(),
            types: None,
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: SrcDumpConfig) -> Self {
        self.config = config;
        self
    }

    /// Resolver for types missing from the source.
    #[must_use]
    pub fn with_types(mut self, types: &'a dyn TypeNames) -> Self {
        self.types = Some(types);
        self
    }

    /// Render the subtree at `root`.
    #[tracing::instrument(level = "debug", skip(self), fields(mode = ?self.config.mode))]
    pub fn dump(&mut self, root: NodeId) {
        if !self.config.mode.is_declgen() {
            self.node(root);
            return;
        }
        match self.ast.kind(root) {
            NodeKind::Program { statements } => self.declgen_program(statements),
            _ => {
                self.emitted.insert(root);
                self.declaration(root, self.ast.node(root).is_exported());
            }
        }
    }

    /// Schedule `task` for the post-walk drain.
    ///
    /// # Panics
    /// Panics if the queue was already drained.
    pub fn enqueue(&mut self, task: impl FnOnce(&mut SrcDumper<'a>) + 'a) {
        assert!(!self.drained, "deferred task enqueued after the drain");
        self.deferred.push_back(Box::new(task));
    }

    /// Run every deferred task, including ones enqueued while draining.
    /// Only the first call does anything.
    pub fn run_deferred(&mut self) {
        if self.drained {
            return;
        }
        let mut ran = 0usize;
        while let Some(task) = self.deferred.pop_front() {
            task(self);
            ran += 1;
        }
        self.drained = true;
        tracing::trace!(ran, "deferred queue drained");
    }

    /// `name` is an unexported declaration not yet pulled into the output.
    pub fn is_pending(&self, name: &str) -> bool {
        self.ast
            .interner()
            .get(name)
            .is_some_and(|name| self.pending.contains_key(&name))
    }

    /// Drain the deferred queue and return the text.
    pub fn finish(mut self) -> String {
        self.run_deferred();
        let mut out = self.out;
        for (position, text) in self.holes.into_iter().rev() {
            out.insert_str(position, text.as_deref().unwrap_or(FALLBACK_TYPE));
        }
        out
    }

    fn push(&mut self, s: &str) {
        self.out.push_str(s);
    }

    fn newline(&mut self) {
        self.out.push('\n');
        self.out.push_str(&self.indent);
    }

    fn incr_indent(&mut self) {
        let width = self.config.indent_width;
        self.indent.extend(std::iter::repeat(' ').take(width));
    }

    fn decr_indent(&mut self) {
        let len = self.indent.len().saturating_sub(self.config.indent_width);
        self.indent.truncate(len);
    }

    /// Start a top-level line.
    fn line_start(&mut self) {
        if !self.out.is_empty() {
            self.newline();
        }
    }

    fn reserve_hole(&mut self) -> usize {
        self.holes.push((self.out.len(), None));
        self.holes.len() - 1
    }

    fn name(&self, name: Name) -> &'a str {
        let ast = self.ast;
        ast.name_str(name)
    }

    /// Name of an identifier node.
    fn ident_name(&self, id: NodeId) -> Option<Name> {
        match self.ast.kind(id) {
            NodeKind::Identifier { name, .. } => Some(name),
            _ => None,
        }
    }

    fn comma_list(&mut self, range: NodeRange) {
        let ast = self.ast;
        for (i, &id) in ast.list(range).iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            self.node(id);
        }
    }

    fn node(&mut self, id: NodeId) {
        ensure_sufficient_stack(|| self.node_inner(id));
    }

    fn node_inner(&mut self, id: NodeId) {
        match self.ast.kind(id) {
            NodeKind::Program { statements } => {
                let ast = self.ast;
                for (i, &stmt) in ast.list(statements).iter().enumerate() {
                    if i > 0 {
                        self.newline();
                    }
                    self.node(stmt);
                }
            }
            NodeKind::BlockStatement { statements } => self.block(statements),
            NodeKind::EmptyStatement => self.push(";"),
            NodeKind::ExpressionStatement { expression } => {
                self.node(expression);
                self.push(";");
            }
            NodeKind::IfStatement {
                test,
                consequent,
                alternate,
            } => {
                self.push("if (");
                self.node(test);
                self.push(") ");
                self.node(consequent);
                if let Some(alternate) = alternate {
                    self.push(" else ");
                    self.node(alternate);
                }
            }
            NodeKind::WhileStatement { test, body } => {
                self.push("while (");
                self.node(test);
                self.push(") ");
                self.node(body);
            }
            NodeKind::ForUpdateStatement {
                init,
                test,
                update,
                body,
            } => {
                self.push("for (");
                match init {
                    Some(init) if self.ast.tag(init) == NodeTag::VariableDeclaration => {
                        self.variable_declaration(init);
                    }
                    Some(init) => self.node(init),
                    None => {}
                }
                self.push(";");
                if let Some(test) = test {
                    self.push(" ");
                    self.node(test);
                }
                self.push(";");
                if let Some(update) = update {
                    self.push(" ");
                    self.node(update);
                }
                self.push(") ");
                self.node(body);
            }
            NodeKind::ReturnStatement { argument } => {
                self.push("return");
                if let Some(argument) = argument {
                    self.push(" ");
                    self.node(argument);
                }
                self.push(";");
            }
            NodeKind::BreakStatement { label } => {
                self.push("break");
                if let Some(label) = label {
                    self.push(" ");
                    self.push(self.name(label));
                }
                self.push(";");
            }
            NodeKind::ThrowStatement { argument } => {
                self.push("throw ");
                self.node(argument);
                self.push(";");
            }
            NodeKind::VariableDeclaration { .. } => {
                self.modifier_prefix(id);
                self.variable_declaration(id);
                self.push(";");
            }
            NodeKind::FunctionDeclaration { function } => {
                self.modifier_prefix(id);
                self.push("function ");
                self.node(function);
            }
            NodeKind::ClassDeclaration { definition } => {
                self.modifier_prefix(id);
                self.node(definition);
            }
            NodeKind::TSTypeAliasDeclaration {
                id: alias,
                type_annotation,
            } => {
                self.modifier_prefix(id);
                self.push("type ");
                self.node(alias);
                self.push(" = ");
                self.node(type_annotation);
                self.push(";");
            }
            NodeKind::BrokenStatement | NodeKind::BrokenExpression => self.push("/* broken */"),

            NodeKind::VariableDeclarator { id: binding, init } => {
                self.node(binding);
                if let Some(init) = init {
                    self.push(" = ");
                    self.node(init);
                }
            }
            NodeKind::ScriptFunction { id: name, body, .. } => {
                if let Some(name) = name {
                    self.node(name);
                }
                self.signature_tail(id, true);
                match body {
                    Some(body) => {
                        self.push(" ");
                        self.node(body);
                    }
                    None => self.push(";"),
                }
            }
            NodeKind::ClassDefinition {
                ident,
                super_class,
                body,
            } => {
                self.push("class");
                if let Some(ident) = ident {
                    self.push(" ");
                    self.node(ident);
                }
                if let Some(super_class) = super_class {
                    self.push(" extends ");
                    self.node(super_class);
                }
                self.push(" ");
                let ast = self.ast;
                self.members(ast.list(body));
            }
            NodeKind::ClassProperty {
                key,
                type_annotation,
                value,
            } => {
                self.member_modifiers(id);
                self.node(key);
                self.property_marks(id);
                if let Some(annotation) = type_annotation {
                    self.push(": ");
                    self.node(annotation);
                }
                if let Some(value) = value {
                    self.push(" = ");
                    self.node(value);
                }
                self.push(";");
            }
            NodeKind::MethodDefinition {
                method_kind,
                key,
                value,
            } => {
                self.member_modifiers(id);
                self.accessor_keyword(method_kind);
                self.node(key);
                match self.ast.kind(value) {
                    NodeKind::FunctionExpression { function } => {
                        // The key already names the method.
                        self.signature_tail(function, method_kind != MethodKind::Constructor);
                        match self.function_body(function) {
                            Some(body) => {
                                self.push(" ");
                                self.node(body);
                            }
                            None => self.push(";"),
                        }
                    }
                    _ => self.node(value),
                }
            }

            NodeKind::Identifier {
                name,
                type_annotation,
            } => {
                self.push(self.name(name));
                if let Some(annotation) = type_annotation {
                    self.push(": ");
                    self.node(annotation);
                }
            }
            NodeKind::NumberLiteral { bits } => self.push(&format_number(f64::from_bits(bits))),
            NodeKind::StringLiteral { value } => {
                let value = self.name(value);
                write_quoted(&mut self.out, value);
            }
            NodeKind::BooleanLiteral { value } => self.push(if value { "true" } else { "false" }),
            NodeKind::CharLiteral { value } => {
                self.push("c'");
                self.out.extend(value.escape_default());
                self.push("'");
            }
            NodeKind::NullLiteral => self.push("null"),
            NodeKind::UndefinedLiteral => self.push("undefined"),
            NodeKind::ThisExpression => self.push("this"),
            NodeKind::BinaryExpression {
                operator,
                left,
                right,
            } => {
                let precedence = operator.precedence();
                self.operand(left, precedence);
                self.push(" ");
                self.push(operator.as_str());
                self.push(" ");
                self.operand(right, precedence + 1);
            }
            NodeKind::UnaryExpression { operator, argument } => {
                self.push(operator.as_str());
                if operator == TokenType::Typeof {
                    self.push(" ");
                }
                self.operand(argument, UNARY_PRECEDENCE);
            }
            NodeKind::AssignmentExpression {
                operator,
                left,
                right,
            } => {
                self.node(left);
                self.push(" ");
                self.push(operator.as_str());
                self.push(" ");
                self.node(right);
            }
            NodeKind::CallExpression {
                callee,
                arguments,
                optional,
            } => {
                self.operand(callee, PRIMARY_PRECEDENCE);
                self.push(if optional { "?.(" } else { "(" });
                self.comma_list(arguments);
                self.push(")");
            }
            NodeKind::MemberExpression {
                object,
                property,
                computed,
                optional,
            } => {
                self.operand(object, PRIMARY_PRECEDENCE);
                match (computed, optional) {
                    (true, true) => self.push("?.["),
                    (true, false) => self.push("["),
                    (false, true) => self.push("?."),
                    (false, false) => self.push("."),
                }
                self.node(property);
                if computed {
                    self.push("]");
                }
            }
            NodeKind::ArrayExpression { elements } => {
                self.push("[");
                self.comma_list(elements);
                self.push("]");
            }
            NodeKind::FunctionExpression { function } => {
                let named = matches!(
                    self.ast.kind(function),
                    NodeKind::ScriptFunction { id: Some(_), .. }
                );
                self.push(if named { "function " } else { "function" });
                self.node(function);
            }
            NodeKind::ETSParameterExpression {
                ident,
                initializer,
                rest,
            } => {
                if rest {
                    self.push("...");
                }
                self.node(ident);
                if let Some(initializer) = initializer {
                    self.push(" = ");
                    self.node(initializer);
                }
            }

            NodeKind::ETSPrimitiveType { primitive } => self.push(primitive.as_str()),
            NodeKind::ETSTypeReference { name } => {
                self.push(self.name(name));
                self.promote(name);
            }
            NodeKind::TSArrayType { element } => {
                let wrap = self.ast.tag(element) == NodeTag::TSUnionType;
                if wrap {
                    self.push("(");
                }
                self.node(element);
                if wrap {
                    self.push(")");
                }
                self.push("[]");
            }
            NodeKind::TSUnionType { types } => {
                let ast = self.ast;
                for (i, &ty) in ast.list(types).iter().enumerate() {
                    if i > 0 {
                        self.push(" | ");
                    }
                    self.node(ty);
                }
            }
        }
    }

    fn block(&mut self, statements: NodeRange) {
        if statements.is_empty() {
            self.push("{}");
            return;
        }
        self.push("{");
        self.incr_indent();
        let ast = self.ast;
        for &stmt in ast.list(statements) {
            self.newline();
            self.node(stmt);
        }
        self.decr_indent();
        self.newline();
        self.push("}");
    }

    fn members(&mut self, members: &[NodeId]) {
        let declgen = self.config.mode.is_declgen();
        let members: Vec<NodeId> = members
            .iter()
            .copied()
            .filter(|&m| !(declgen && self.ast.node(m).modifiers.contains(ModifierFlags::PRIVATE)))
            .collect();
        if members.is_empty() {
            self.push("{}");
            return;
        }
        self.push("{");
        self.incr_indent();
        for member in members {
            self.newline();
            if declgen {
                self.declgen_member(member);
            } else {
                self.node(member);
            }
        }
        self.decr_indent();
        self.newline();
        self.push("}");
    }

    /// Wrap `id` in parentheses if it binds looser than `min`.
    fn operand(&mut self, id: NodeId, min: u8) {
        let wrap = expression_precedence(self.ast.kind(id)) < min;
        if wrap {
            self.push("(");
        }
        self.node(id);
        if wrap {
            self.push(")");
        }
    }

    /// `kind a = 1, b` without the trailing semicolon.
    fn variable_declaration(&mut self, id: NodeId) {
        if let NodeKind::VariableDeclaration { kind, declarators } = self.ast.kind(id) {
            self.push(kind.as_str());
            self.push(" ");
            self.comma_list(declarators);
        }
    }

    fn modifier_prefix(&mut self, id: NodeId) {
        let modifiers = self.ast.node(id).modifiers;
        if modifiers.contains(ModifierFlags::DEFAULT_EXPORT) {
            self.push("export default ");
        } else if modifiers.is_exported() {
            self.push("export ");
        }
        if modifiers.contains(ModifierFlags::DECLARE) {
            self.push("declare ");
        }
    }

    fn member_modifiers(&mut self, id: NodeId) {
        let modifiers = self.ast.node(id).modifiers;
        if let Some(access) = modifiers.access_keyword() {
            self.push(access);
            self.push(" ");
        }
        for (flag, keyword) in [
            (ModifierFlags::STATIC, "static "),
            (ModifierFlags::ABSTRACT, "abstract "),
            (ModifierFlags::OVERRIDE, "override "),
            (ModifierFlags::ASYNC, "async "),
            (ModifierFlags::READONLY, "readonly "),
        ] {
            if modifiers.contains(flag) {
                self.push(keyword);
            }
        }
    }

    fn property_marks(&mut self, id: NodeId) {
        let modifiers = self.ast.node(id).modifiers;
        if modifiers.contains(ModifierFlags::OPTIONAL) {
            self.push("?");
        } else if modifiers.contains(ModifierFlags::DEFINITE) {
            self.push("!");
        }
    }

    fn accessor_keyword(&mut self, method_kind: MethodKind) {
        match method_kind {
            MethodKind::Get => self.push("get "),
            MethodKind::Set => self.push("set "),
            MethodKind::Method | MethodKind::Constructor => {}
        }
    }

    fn function_body(&self, function: NodeId) -> Option<NodeId> {
        match self.ast.kind(function) {
            NodeKind::ScriptFunction { body, .. } => body,
            _ => None,
        }
    }

    /// `(params): R` of a function, without its name or body.
    fn signature_tail(&mut self, function: NodeId, with_return: bool) {
        let NodeKind::ScriptFunction {
            params,
            return_type,
            ..
        } = self.ast.kind(function)
        else {
            return;
        };
        self.push("(");
        let ast = self.ast;
        for (i, &param) in ast.list(params).iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            if self.config.mode.is_declgen() {
                self.declgen_parameter(param);
            } else {
                self.node(param);
            }
        }
        self.push(")");
        if !with_return {
            return;
        }
        if self.config.mode.is_declgen() {
            self.push(": ");
            self.type_or_hole(return_type, function, Inference::Return(function));
        } else if let Some(return_type) = return_type {
            self.push(": ");
            self.node(return_type);
        }
    }

    // Declgen

    fn declgen_program(&mut self, statements: NodeRange) {
        let ast = self.ast;
        let statements = ast.list(statements);
        for &stmt in statements {
            if !ast.node(stmt).is_exported() {
                for name in self.declared_names(stmt) {
                    self.pending.insert(name, stmt);
                }
            }
        }
        tracing::debug!(pending = self.pending.len(), "registered unexported declarations");
        for &stmt in statements {
            if ast.node(stmt).is_exported() && ast.tag(stmt).is_declaration() {
                self.emitted.insert(stmt);
                self.line_start();
                self.declaration(stmt, true);
            }
        }
    }

    /// Names a top-level declaration binds.
    fn declared_names(&self, stmt: NodeId) -> Vec<Name> {
        let ast = self.ast;
        let binding = match ast.kind(stmt) {
            NodeKind::FunctionDeclaration { function } => match ast.kind(function) {
                NodeKind::ScriptFunction { id, .. } => id,
                _ => None,
            },
            NodeKind::ClassDeclaration { definition } => match ast.kind(definition) {
                NodeKind::ClassDefinition { ident, .. } => ident,
                _ => None,
            },
            NodeKind::TSTypeAliasDeclaration { id, .. } => Some(id),
            NodeKind::VariableDeclaration { declarators, .. } => {
                return ast
                    .list(declarators)
                    .iter()
                    .filter_map(|&declarator| match ast.kind(declarator) {
                        NodeKind::VariableDeclarator { id, .. } => self.ident_name(id),
                        _ => None,
                    })
                    .collect();
            }
            _ => None,
        };
        binding.and_then(|id| self.ident_name(id)).into_iter().collect()
    }

    /// Pull a pending declaration into the output.
    fn promote(&mut self, name: Name) {
        let Some(decl) = self.pending.remove(&name) else {
            return;
        };
        // Other names bound by the same declaration go with it.
        self.pending.retain(|_, other| *other != decl);
        tracing::debug!(name = self.name(name), ?decl, "promoting unexported declaration");
        self.enqueue(move |dumper| {
            if dumper.emitted.insert(decl) {
                dumper.line_start();
                dumper.declaration(decl, false);
            }
        });
    }

    /// Ambient form of a top-level declaration.
    ///
    /// `declare` cannot follow `export default`, so a default export is
    /// written as a local ambient declaration plus `export default <name>;`.
    fn declaration(&mut self, stmt: NodeId, exported: bool) {
        let default = exported
            && self
                .ast
                .node(stmt)
                .modifiers
                .contains(ModifierFlags::DEFAULT_EXPORT);
        if exported && !default {
            self.push("export ");
        }
        let mut local = None;
        match self.ast.kind(stmt) {
            NodeKind::FunctionDeclaration { function } => {
                self.push("declare function ");
                let id = match self.ast.kind(function) {
                    NodeKind::ScriptFunction { id, .. } => id,
                    _ => None,
                };
                local = Some(self.binding_or_default(id));
                self.signature_tail(function, true);
                self.push(";");
            }
            NodeKind::ClassDeclaration { definition } => {
                let NodeKind::ClassDefinition {
                    ident,
                    super_class,
                    body,
                } = self.ast.kind(definition)
                else {
                    return;
                };
                self.push("declare class ");
                local = Some(self.binding_or_default(ident));
                if let Some(super_class) = super_class {
                    self.push(" extends ");
                    self.node(super_class);
                    if let Some(name) = self.ident_name(super_class) {
                        self.promote(name);
                    }
                }
                self.push(" ");
                let ast = self.ast;
                self.members(ast.list(body));
            }
            NodeKind::VariableDeclaration { kind, declarators } => {
                self.push("declare ");
                self.push(kind.as_str());
                self.push(" ");
                let ast = self.ast;
                for (i, &declarator) in ast.list(declarators).iter().enumerate() {
                    if i > 0 {
                        self.push(", ");
                    }
                    self.declgen_binding(declarator);
                }
                self.push(";");
            }
            NodeKind::TSTypeAliasDeclaration {
                id,
                type_annotation,
            } => {
                self.push("type ");
                self.node(id);
                self.push(" = ");
                self.node(type_annotation);
                self.push(";");
                local = self.ident_name(id).map(|name| self.name(name));
            }
            _ => {}
        }
        if default {
            if let Some(local) = local {
                self.newline();
                self.push("export default ");
                self.push(local);
                self.push(";");
            }
        }
    }

    /// Write the bound name of a declaration, or the stand-in used for an
    /// anonymous default export, and return what was written.
    fn binding_or_default(&mut self, ident: Option<NodeId>) -> &'a str {
        let local = match ident.and_then(|id| self.ident_name(id)) {
            Some(name) => self.name(name),
            None => DEFAULT_BINDING,
        };
        self.push(local);
        local
    }

    fn declgen_binding(&mut self, declarator: NodeId) {
        let NodeKind::VariableDeclarator { id, init } = self.ast.kind(declarator) else {
            return;
        };
        let NodeKind::Identifier {
            name,
            type_annotation,
        } = self.ast.kind(id)
        else {
            return;
        };
        self.push(self.name(name));
        self.push(": ");
        self.type_or_hole(type_annotation, declarator, Inference::Value(init));
    }

    fn declgen_parameter(&mut self, param: NodeId) {
        let NodeKind::ETSParameterExpression {
            ident,
            initializer,
            rest,
        } = self.ast.kind(param)
        else {
            self.node(param);
            return;
        };
        let NodeKind::Identifier {
            name,
            type_annotation,
        } = self.ast.kind(ident)
        else {
            return;
        };
        if rest {
            self.push("...");
        }
        self.push(self.name(name));
        if initializer.is_some() {
            self.push("?");
        }
        self.push(": ");
        self.type_or_hole(type_annotation, param, Inference::Value(initializer));
    }

    fn declgen_member(&mut self, member: NodeId) {
        match self.ast.kind(member) {
            NodeKind::ClassProperty {
                key,
                type_annotation,
                value,
            } => {
                self.member_modifiers(member);
                self.node(key);
                self.property_marks(member);
                self.push(": ");
                self.type_or_hole(type_annotation, member, Inference::Value(value));
                self.push(";");
            }
            NodeKind::MethodDefinition {
                method_kind,
                key,
                value,
            } => {
                self.member_modifiers(member);
                self.accessor_keyword(method_kind);
                self.node(key);
                if let NodeKind::FunctionExpression { function } = self.ast.kind(value) {
                    let with_return =
                        !matches!(method_kind, MethodKind::Constructor | MethodKind::Set);
                    self.signature_tail(function, with_return);
                }
                self.push(";");
            }
            _ => self.node(member),
        }
    }

    /// Promote every pending name a resolved type spelling mentions.
    fn promote_referenced(&mut self, text: &str) {
        let ast = self.ast;
        for word in text.split(|c: char| !(c.is_alphanumeric() || c == '_' || c == '$')) {
            if let Some(name) = ast.interner().get(word) {
                self.promote(name);
            }
        }
    }

    /// Write `annotation`, or a type for `subject` found some other way.
    fn type_or_hole(&mut self, annotation: Option<NodeId>, subject: NodeId, inference: Inference) {
        if let Some(annotation) = annotation {
            self.node(annotation);
            return;
        }
        match self.config.mode {
            DeclgenMode::Declarations => {
                let hole = self.reserve_hole();
                self.enqueue(move |dumper| {
                    let ast = dumper.ast;
                    let resolved = dumper.types.and_then(|types| types.type_name(ast, subject));
                    let text = match resolved {
                        Some(text) => {
                            dumper.promote_referenced(&text);
                            text
                        }
                        None => inference.infer(ast),
                    };
                    dumper.holes[hole].1 = Some(text);
                });
            }
            DeclgenMode::Isolated | DeclgenMode::Off => {
                let text = inference.infer(self.ast);
                self.push(&text);
            }
        }
    }
}

const UNARY_PRECEDENCE: u8 = 15;
const PRIMARY_PRECEDENCE: u8 = 16;

fn expression_precedence(kind: NodeKind) -> u8 {
    match kind {
        NodeKind::AssignmentExpression { .. } => 0,
        NodeKind::BinaryExpression { operator, .. } => operator.precedence(),
        NodeKind::UnaryExpression { .. } => UNARY_PRECEDENCE,
        _ => PRIMARY_PRECEDENCE,
    }
}

/// Syntactic type inference used when no annotation or checker result is
/// available.
#[derive(Copy, Clone, Debug)]
enum Inference {
    /// Return type of a function, from its literal `return` arguments.
    Return(NodeId),
    /// Type of a binding, from its literal initializer.
    Value(Option<NodeId>),
}

impl Inference {
    fn infer(self, ast: &Ast) -> String {
        match self {
            Inference::Value(init) => init
                .and_then(|init| literal_type(ast, init))
                .unwrap_or(FALLBACK_TYPE)
                .to_owned(),
            Inference::Return(function) => {
                let mut returns = Vec::new();
                if let NodeKind::ScriptFunction {
                    body: Some(body), ..
                } = ast.kind(function)
                {
                    collect_returns(ast, body, &mut returns);
                }
                let mut types: Vec<&str> = Vec::new();
                let mut bare = false;
                for argument in returns {
                    match argument {
                        None => bare = true,
                        Some(argument) => {
                            let ty = literal_type(ast, argument).unwrap_or(FALLBACK_TYPE);
                            if !types.contains(&ty) {
                                types.push(ty);
                            }
                        }
                    }
                }
                if types.is_empty() {
                    return "void".to_owned();
                }
                if bare && !types.contains(&"undefined") {
                    types.push("undefined");
                }
                types.join(" | ")
            }
        }
    }
}

fn literal_type(ast: &Ast, id: NodeId) -> Option<&'static str> {
    match ast.tag(id) {
        NodeTag::NumberLiteral => Some("number"),
        NodeTag::StringLiteral => Some("string"),
        NodeTag::BooleanLiteral => Some("boolean"),
        NodeTag::CharLiteral => Some("char"),
        NodeTag::NullLiteral => Some("null"),
        NodeTag::UndefinedLiteral => Some("undefined"),
        _ => None,
    }
}

/// Arguments of the `return`s belonging to one function body. Nested
/// functions and classes are not entered.
fn collect_returns(ast: &Ast, id: NodeId, out: &mut Vec<Option<NodeId>>) {
    match ast.kind(id) {
        NodeKind::ReturnStatement { argument } => out.push(argument),
        NodeKind::FunctionExpression { .. }
        | NodeKind::ScriptFunction { .. }
        | NodeKind::ClassDefinition { .. } => {}
        _ => {
            for child in ast.children(id) {
                ensure_sufficient_stack(|| collect_returns(ast, child, out));
            }
        }
    }
}
