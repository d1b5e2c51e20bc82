//! Node builders.
//!
//! Thin wrappers over [`Ast::alloc`] for the shapes passes and tests build
//! most often. Builders that wrap existing nodes derive their span from the
//! children where there is no better source position.

use crate::{
    AllocError, Ast, MethodKind, ModifierFlags, NodeId, NodeKind, PrimitiveType, Span, TokenType,
    VariableKind,
};

type Built = Result<NodeId, AllocError>;

impl Ast {
    fn cover(&self, first: NodeId, last: NodeId) -> Span {
        self.span(first).merge(self.span(last))
    }

    pub fn identifier(&mut self, name: &str, span: Span) -> Built {
        let name = self.intern(name)?;
        self.alloc(
            NodeKind::Identifier {
                name,
                type_annotation: None,
            },
            span,
        )
    }

    /// Identifier carrying a type annotation (`x: T`).
    pub fn typed_identifier(&mut self, name: &str, annotation: NodeId, span: Span) -> Built {
        let name = self.intern(name)?;
        self.alloc(
            NodeKind::Identifier {
                name,
                type_annotation: Some(annotation),
            },
            span,
        )
    }

    pub fn number(&mut self, value: f64, span: Span) -> Built {
        self.alloc(NodeKind::number(value), span)
    }

    pub fn string_literal(&mut self, value: &str, span: Span) -> Built {
        let value = self.intern(value)?;
        self.alloc(NodeKind::StringLiteral { value }, span)
    }

    pub fn boolean(&mut self, value: bool, span: Span) -> Built {
        self.alloc(NodeKind::BooleanLiteral { value }, span)
    }

    pub fn type_reference(&mut self, name: &str, span: Span) -> Built {
        let name = self.intern(name)?;
        self.alloc(NodeKind::ETSTypeReference { name }, span)
    }

    pub fn primitive_type(&mut self, primitive: PrimitiveType, span: Span) -> Built {
        self.alloc(NodeKind::ETSPrimitiveType { primitive }, span)
    }

    pub fn union_type(&mut self, types: &[NodeId], span: Span) -> Built {
        let types = self.alloc_list(types)?;
        self.alloc(NodeKind::TSUnionType { types }, span)
    }

    pub fn binary(&mut self, operator: TokenType, left: NodeId, right: NodeId) -> Built {
        let span = self.cover(left, right);
        self.alloc(
            NodeKind::BinaryExpression {
                operator,
                left,
                right,
            },
            span,
        )
    }

    pub fn assignment(&mut self, operator: TokenType, left: NodeId, right: NodeId) -> Built {
        debug_assert!(operator.is_assignment(), "{operator:?} is not an assignment");
        let span = self.cover(left, right);
        self.alloc(
            NodeKind::AssignmentExpression {
                operator,
                left,
                right,
            },
            span,
        )
    }

    pub fn call(&mut self, callee: NodeId, arguments: &[NodeId], span: Span) -> Built {
        let arguments = self.alloc_list(arguments)?;
        self.alloc(
            NodeKind::CallExpression {
                callee,
                arguments,
                optional: false,
            },
            span,
        )
    }

    /// `object.property`
    pub fn member(&mut self, object: NodeId, property: NodeId) -> Built {
        let span = self.cover(object, property);
        self.alloc(
            NodeKind::MemberExpression {
                object,
                property,
                computed: false,
                optional: false,
            },
            span,
        )
    }

    pub fn expression_statement(&mut self, expression: NodeId) -> Built {
        let span = self.span(expression);
        self.alloc(NodeKind::ExpressionStatement { expression }, span)
    }

    pub fn block(&mut self, statements: &[NodeId], span: Span) -> Built {
        let statements = self.alloc_list(statements)?;
        self.alloc(NodeKind::BlockStatement { statements }, span)
    }

    pub fn program(&mut self, statements: &[NodeId], span: Span) -> Built {
        let statements = self.alloc_list(statements)?;
        self.alloc(NodeKind::Program { statements }, span)
    }

    pub fn if_statement(
        &mut self,
        test: NodeId,
        consequent: NodeId,
        alternate: Option<NodeId>,
        span: Span,
    ) -> Built {
        self.alloc(
            NodeKind::IfStatement {
                test,
                consequent,
                alternate,
            },
            span,
        )
    }

    pub fn while_statement(&mut self, test: NodeId, body: NodeId, span: Span) -> Built {
        self.alloc(NodeKind::WhileStatement { test, body }, span)
    }

    pub fn return_statement(&mut self, argument: Option<NodeId>, span: Span) -> Built {
        self.alloc(NodeKind::ReturnStatement { argument }, span)
    }

    /// `let a = init, b;` from `(id, init)` pairs.
    pub fn variable_declaration(
        &mut self,
        kind: VariableKind,
        declarators: &[(NodeId, Option<NodeId>)],
        span: Span,
    ) -> Built {
        let mut ids = Vec::with_capacity(declarators.len());
        for &(id, init) in declarators {
            let span = init.map_or(self.span(id), |init| self.cover(id, init));
            ids.push(self.alloc(NodeKind::VariableDeclarator { id, init }, span)?);
        }
        let declarators = self.alloc_list(&ids)?;
        self.alloc(NodeKind::VariableDeclaration { kind, declarators }, span)
    }

    /// Parameter `name: annotation`.
    pub fn parameter(&mut self, name: &str, annotation: Option<NodeId>, span: Span) -> Built {
        let name = self.intern(name)?;
        let ident = self.alloc(
            NodeKind::Identifier {
                name,
                type_annotation: annotation,
            },
            span,
        )?;
        self.alloc(
            NodeKind::ETSParameterExpression {
                ident,
                initializer: None,
                rest: false,
            },
            span,
        )
    }

    /// Bare `ScriptFunction`. `body` is `None` for ambient signatures.
    pub fn script_function(
        &mut self,
        id: Option<NodeId>,
        params: &[NodeId],
        return_type: Option<NodeId>,
        body: Option<NodeId>,
        span: Span,
    ) -> Built {
        let params = self.alloc_list(params)?;
        self.alloc(
            NodeKind::ScriptFunction {
                id,
                params,
                return_type,
                body,
            },
            span,
        )
    }

    /// `function name(params): return_type body`
    pub fn function_declaration(
        &mut self,
        name: &str,
        params: &[NodeId],
        return_type: Option<NodeId>,
        body: Option<NodeId>,
        span: Span,
    ) -> Built {
        let id = self.identifier(name, span)?;
        let function = self.script_function(Some(id), params, return_type, body, span)?;
        self.alloc(NodeKind::FunctionDeclaration { function }, span)
    }

    /// `class name extends super_class { members }`
    pub fn class_declaration(
        &mut self,
        name: &str,
        super_class: Option<NodeId>,
        members: &[NodeId],
        span: Span,
    ) -> Built {
        let ident = self.identifier(name, span)?;
        let body = self.alloc_list(members)?;
        let definition = self.alloc(
            NodeKind::ClassDefinition {
                ident: Some(ident),
                super_class,
                body,
            },
            span,
        )?;
        self.alloc(NodeKind::ClassDeclaration { definition }, span)
    }

    pub fn class_property(
        &mut self,
        name: &str,
        type_annotation: Option<NodeId>,
        value: Option<NodeId>,
        modifiers: ModifierFlags,
        span: Span,
    ) -> Built {
        let key = self.identifier(name, span)?;
        let property = self.alloc(
            NodeKind::ClassProperty {
                key,
                type_annotation,
                value,
            },
            span,
        )?;
        self.node_mut(property).modifiers = modifiers;
        Ok(property)
    }

    /// Class method wrapping `function` (a `ScriptFunction`).
    pub fn method(
        &mut self,
        method_kind: MethodKind,
        name: &str,
        function: NodeId,
        modifiers: ModifierFlags,
    ) -> Built {
        let span = self.span(function);
        let key = self.identifier(name, span)?;
        let value = self.alloc(NodeKind::FunctionExpression { function }, span)?;
        let method = self.alloc(
            NodeKind::MethodDefinition {
                method_kind,
                key,
                value,
            },
            span,
        )?;
        self.node_mut(method).modifiers = modifiers;
        Ok(method)
    }

    /// `type name = annotation`
    pub fn type_alias(&mut self, name: &str, annotation: NodeId, span: Span) -> Built {
        let id = self.identifier(name, span)?;
        self.alloc(
            NodeKind::TSTypeAliasDeclaration {
                id,
                type_annotation: annotation,
            },
            span,
        )
    }

    /// Mark a top-level declaration `export`.
    pub fn export(&mut self, declaration: NodeId) -> NodeId {
        self.node_mut(declaration).modifiers |= ModifierFlags::EXPORT;
        declaration
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::{Ast, NodeTag, Span, TokenType};

    #[test]
    fn binary_span_covers_operands() -> Result<(), crate::AllocError> {
        let mut ast = Ast::new();
        let left = ast.number(1.0, Span::new(0, 1))?;
        let right = ast.number(2.0, Span::new(4, 5))?;
        let sum = ast.binary(TokenType::Plus, left, right)?;
        assert_eq!(ast.span(sum), Span::new(0, 5));
        Ok(())
    }

    #[test]
    fn function_declaration_shape() -> Result<(), crate::AllocError> {
        let mut ast = Ast::new();
        let body = ast.block(&[], Span::DUMMY)?;
        let decl = ast.function_declaration("f", &[], None, Some(body), Span::DUMMY)?;
        let function = ast.children(decl)[0];
        assert_eq!(ast.tag(function), NodeTag::ScriptFunction);
        assert_eq!(ast.parent(body), Some(function));
        assert!(ast.node(function).scope().is_some());
        Ok(())
    }
}
