//! # Statement Transformation

use crate::ast::{Node, NodeKind};
use crate::cst::{ParseNode, Rule};
use crate::error::TransformError;

use super::{child_of, lists, missing, Transformer};

impl Transformer {
    pub(super) fn block(&mut self, node: &ParseNode) -> Result<NodeKind, TransformError> {
        Ok(NodeKind::Block {
            statements: self.visit_all(node.children_by_rule(Rule::Statement))?,
        })
    }

    pub(super) fn expression_statement(
        &mut self,
        node: &ParseNode,
    ) -> Result<NodeKind, TransformError> {
        Ok(NodeKind::ExpressionStatement {
            expression: self.boxed(child_of(node, Rule::Expression)?)?,
        })
    }

    pub(super) fn if_statement(&mut self, node: &ParseNode) -> Result<NodeKind, TransformError> {
        let condition = self.boxed(child_of(node, Rule::Expression)?)?;
        let true_body = node
            .nth_child(Rule::Statement, 0)
            .ok_or_else(|| missing(node, "then branch"))?;
        Ok(NodeKind::IfStatement {
            condition,
            true_body: self.boxed(true_body)?,
            false_body: self.boxed_opt(node.nth_child(Rule::Statement, 1))?,
        })
    }

    pub(super) fn while_statement(&mut self, node: &ParseNode) -> Result<NodeKind, TransformError> {
        Ok(NodeKind::WhileStatement {
            condition: self.boxed(child_of(node, Rule::Expression)?)?,
            body: self.boxed(child_of(node, Rule::Statement)?)?,
        })
    }

    pub(super) fn do_while_statement(
        &mut self,
        node: &ParseNode,
    ) -> Result<NodeKind, TransformError> {
        Ok(NodeKind::DoWhileStatement {
            condition: self.boxed(child_of(node, Rule::Expression)?)?,
            body: self.boxed(child_of(node, Rule::Statement)?)?,
        })
    }

    /// `for (init; condition; loop) body`, each header part optional.
    ///
    /// The condition is the expression before the header's second `;`, the
    /// loop expression the one after it.
    pub(super) fn for_statement(&mut self, node: &ParseNode) -> Result<NodeKind, TransformError> {
        let separator = (3..node.children.len())
            .find(|&i| node.child_token(i) == Some(";"))
            .ok_or_else(|| missing(node, "`;` after the loop condition"))?;
        let (head, tail) = node.children.split_at(separator);
        let is_expression = |c: &&ParseNode| c.is_rule(Rule::Expression);

        let init_expression = self.boxed_opt(node.find_child(Rule::SimpleStatement))?;
        let condition_expression =
            self.boxed_opt(head.iter().skip(2).find(is_expression))?;
        let loop_expression = match tail.iter().find(is_expression) {
            Some(expression) => Some(Box::new(Node::new(
                NodeKind::ExpressionStatement {
                    expression: self.boxed(expression)?,
                },
                expression.span(),
            ))),
            None => None,
        };

        Ok(NodeKind::ForStatement {
            init_expression,
            condition_expression,
            loop_expression,
            body: self.boxed(child_of(node, Rule::Statement)?)?,
        })
    }

    pub(super) fn return_statement(&mut self, node: &ParseNode) -> Result<NodeKind, TransformError> {
        Ok(NodeKind::ReturnStatement {
            expression: self.boxed_opt(node.find_child(Rule::Expression))?,
        })
    }

    /// `emit Event(args);`
    pub(super) fn emit_statement(&mut self, node: &ParseNode) -> Result<NodeKind, TransformError> {
        let call = node
            .children
            .iter()
            .find(|c| !c.is_terminal())
            .ok_or_else(|| missing(node, "event call"))?;
        Ok(NodeKind::EmitStatement {
            event_call: self.boxed(call)?,
        })
    }

    /// `T x = e;`, `var (a, , c) = e;` or `(T a, , T c) = e;`
    pub(super) fn variable_declaration_statement(
        &mut self,
        node: &ParseNode,
    ) -> Result<NodeKind, TransformError> {
        let variables = if let Some(declaration) = node.find_child(Rule::VariableDeclaration) {
            vec![Some(self.visit(declaration)?)]
        } else if let Some(list) = node.find_child(Rule::IdentifierList) {
            lists::identifier_list(list)
        } else if let Some(list) = node.find_child(Rule::VariableDeclarationList) {
            self.variable_declaration_list(list)?
        } else {
            return Err(missing(node, "declared variables"));
        };

        Ok(NodeKind::VariableDeclarationStatement {
            variables,
            initial_value: self.boxed_opt(node.find_child(Rule::Expression))?,
        })
    }

    /// `assembly "evmasm" { ... }`
    pub(super) fn inline_assembly_statement(
        &mut self,
        node: &ParseNode,
    ) -> Result<NodeKind, TransformError> {
        let language = node
            .find_token(crate::cst::TokenKind::StringLiteral)
            .map(|token| super::strip_quotes(&token.text()).to_string());
        Ok(NodeKind::InlineAssemblyStatement {
            language,
            body: self.boxed(child_of(node, Rule::AssemblyBlock)?)?,
        })
    }
}
