//! Built-in lowerings.
//!
//! Both are plain rewriters over [`Ast`] driven by the IR's recursive
//! transforms, so every replacement is reparented and leaves a provenance
//! edge tagged with the pass name.

use ets_ir::{
    AllocError, Ast, AstNodeFlags, NodeId, NodeKind, NodeTag, Rewrite, TokenType,
};

use crate::Pass;

/// `a op= b` becomes `a = a op b`. Runs bottom-up so nested compound
/// assignments on the right are expanded first.
#[derive(Copy, Clone, Debug, Default)]
pub struct OpAssignmentLowering;

impl OpAssignmentLowering {
    pub const NAME: &'static str = "op-assignment";
}

impl Pass for OpAssignmentLowering {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn run(&mut self, ast: &mut Ast, root: NodeId) -> Result<(), AllocError> {
        ast.transform_children_recursively_postorder(root, expand_compound_assignment, Self::NAME)
    }
}

/// Rewriter behind [`OpAssignmentLowering`].
pub fn expand_compound_assignment(ast: &mut Ast, id: NodeId) -> Result<Rewrite, AllocError> {
    let NodeKind::AssignmentExpression {
        operator,
        left,
        right,
    } = ast.kind(id)
    else {
        return Ok(id.into());
    };
    let Some(operator) = operator.compound_operator() else {
        return Ok(id.into());
    };

    // The target is read as well as written, so the read gets its own copy.
    let read = ast.clone_node(left, None)?;
    let span = ast.span(read).merge(ast.span(right));
    let value = ast.alloc(
        NodeKind::BinaryExpression {
            operator,
            left: read,
            right,
        },
        span,
    )?;
    let span = ast.span(id);
    let assignment = ast.alloc(
        NodeKind::AssignmentExpression {
            operator: TokenType::Substitution,
            left,
            right: value,
        },
        span,
    )?;
    for synthetic in [value, assignment] {
        ast.node_mut(synthetic).flags |= AstNodeFlags::SYNTHETIC;
    }
    tracing::trace!(?id, ?assignment, "expanded compound assignment");
    Ok(assignment.into())
}

/// `let a = 1, b = 2;` becomes `let a = 1; let b = 2;` wherever the
/// declaration sits in a statement list. `for` initializers are left alone.
#[derive(Copy, Clone, Debug, Default)]
pub struct ExpandDeclarations;

impl ExpandDeclarations {
    pub const NAME: &'static str = "expand-declarations";
}

impl Pass for ExpandDeclarations {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn run(&mut self, ast: &mut Ast, root: NodeId) -> Result<(), AllocError> {
        ast.transform_children_recursively_preorder(root, split_declaration, Self::NAME)
    }
}

/// Rewriter behind [`ExpandDeclarations`].
pub fn split_declaration(ast: &mut Ast, id: NodeId) -> Result<Rewrite, AllocError> {
    let NodeKind::VariableDeclaration { kind, declarators } = ast.kind(id) else {
        return Ok(id.into());
    };
    let in_list = ast
        .parent(id)
        .is_some_and(|owner| matches!(ast.tag(owner), NodeTag::Program | NodeTag::BlockStatement));
    if declarators.len() < 2 || !in_list {
        return Ok(id.into());
    }

    let modifiers = ast.node(id).modifiers;
    let declarators = ast.list(declarators).to_vec();
    let mut split = Vec::with_capacity(declarators.len());
    for declarator in declarators {
        let list = ast.alloc_list(&[declarator])?;
        let span = ast.span(declarator);
        let decl = ast.alloc(
            NodeKind::VariableDeclaration {
                kind,
                declarators: list,
            },
            span,
        )?;
        let node = ast.node_mut(decl);
        node.modifiers = modifiers;
        node.flags |= AstNodeFlags::SYNTHETIC;
        split.push(decl);
    }
    tracing::trace!(?id, count = split.len(), "split declaration");
    Ok(Rewrite::many(split))
}

#[cfg(test)]
mod tests;
