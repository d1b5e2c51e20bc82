//! AST Visitor Pattern
//!
//! Read-only traversal with per-category hooks on top of
//! [`Ast::iterate`](crate::Ast::iterate).
//!
//! # Design
//!
//! The visitor can mutate its own state during traversal, but the AST
//! remains immutable. Default implementations call [`walk`], which visits
//! the children in declared order. Override `visit_*` methods to add custom
//! behavior for a category, and call [`walk`] to keep descending.
//!
//! # Example
//!
//! ```text
//! struct CountLiterals {
//!     count: usize,
//! }
//!
//! impl<'ast> Visitor<'ast> for CountLiterals {
//!     fn visit_expression(&mut self, id: NodeId, ast: &'ast Ast) {
//!         if matches!(ast.kind(id), NodeKind::NumberLiteral { .. }) {
//!             self.count += 1;
//!         }
//!         walk(self, id, ast);
//!     }
//! }
//! ```

use crate::{ensure_sufficient_stack, Ast, NodeCategory, NodeId};

/// AST Visitor trait.
pub trait Visitor<'ast> {
    /// Visit any node. Dispatches on the node's category.
    fn visit_node(&mut self, id: NodeId, ast: &'ast Ast) {
        match ast.tag(id).category() {
            NodeCategory::Statement => self.visit_statement(id, ast),
            NodeCategory::Expression => self.visit_expression(id, ast),
            NodeCategory::Type => self.visit_type(id, ast),
            NodeCategory::DeclarationPart => self.visit_declaration_part(id, ast),
        }
    }

    fn visit_statement(&mut self, id: NodeId, ast: &'ast Ast) {
        walk(self, id, ast);
    }

    fn visit_expression(&mut self, id: NodeId, ast: &'ast Ast) {
        walk(self, id, ast);
    }

    fn visit_type(&mut self, id: NodeId, ast: &'ast Ast) {
        walk(self, id, ast);
    }

    /// Function bodies, class definitions, members and declarators.
    fn visit_declaration_part(&mut self, id: NodeId, ast: &'ast Ast) {
        walk(self, id, ast);
    }
}

/// Visit every direct child of `id`.
pub fn walk<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, id: NodeId, ast: &'ast Ast) {
    ensure_sufficient_stack(|| {
        for child in ast.children(id) {
            visitor.visit_node(child, ast);
        }
    });
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{NodeKind, Span, TokenType};

    #[derive(Default)]
    struct Categories {
        seen: Vec<NodeCategory>,
    }

    impl<'ast> Visitor<'ast> for Categories {
        fn visit_statement(&mut self, id: NodeId, ast: &'ast Ast) {
            self.seen.push(NodeCategory::Statement);
            walk(self, id, ast);
        }

        fn visit_expression(&mut self, id: NodeId, ast: &'ast Ast) {
            self.seen.push(NodeCategory::Expression);
            walk(self, id, ast);
        }
    }

    #[test]
    fn dispatches_by_category() {
        let mut ast = Ast::new();
        let left = ast.alloc(NodeKind::number(1.0), Span::DUMMY).unwrap();
        let right = ast.alloc(NodeKind::number(2.0), Span::DUMMY).unwrap();
        let expression = ast
            .alloc(
                NodeKind::BinaryExpression {
                    operator: TokenType::Plus,
                    left,
                    right,
                },
                Span::DUMMY,
            )
            .unwrap();
        let statement = ast
            .alloc(NodeKind::ExpressionStatement { expression }, Span::DUMMY)
            .unwrap();

        let mut visitor = Categories::default();
        visitor.visit_node(statement, &ast);
        assert_eq!(
            visitor.seen,
            vec![
                NodeCategory::Statement,
                NodeCategory::Expression,
                NodeCategory::Expression,
                NodeCategory::Expression,
            ]
        );
    }
}
