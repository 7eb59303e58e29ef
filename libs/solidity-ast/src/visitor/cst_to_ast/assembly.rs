//! # Inline Assembly Transformation
//!
//! The assembly sub-language has its own small grammar. Literals, `case`
//! arms and `for` loops each allow a closed set of shapes; anything else
//! aborts the pass.

use crate::ast::{Node, NodeKind};
use crate::cst::{ParseNode, Rule, TokenKind};
use crate::error::TransformError;

use super::{child_at, child_of, missing, strip_quotes, unrecognized, Transformer};

/// `"text"`, `42`, `0x2a` or `hex"2a"`.
pub(super) fn assembly_literal(node: &ParseNode) -> Result<NodeKind, TransformError> {
    let token = node
        .children
        .iter()
        .find(|c| c.is_terminal())
        .ok_or_else(|| missing(node, "literal token"))?;

    match token.token_kind() {
        Some(TokenKind::StringLiteral) => Ok(NodeKind::StringLiteral {
            value: strip_quotes(&node.text()).to_string(),
        }),
        Some(TokenKind::DecimalNumber) => Ok(NodeKind::DecimalNumber { value: node.text() }),
        Some(TokenKind::HexNumber) => Ok(NodeKind::HexNumber { value: node.text() }),
        Some(TokenKind::HexLiteral) => Ok(NodeKind::HexLiteral { value: node.text() }),
        other => Err(unrecognized(
            node,
            format!("literal of kind {other:?}"),
        )),
    }
}

impl Transformer {
    pub(super) fn assembly_block(&mut self, node: &ParseNode) -> Result<NodeKind, TransformError> {
        Ok(NodeKind::AssemblyBlock {
            operations: self.visit_all(node.children_by_rule(Rule::AssemblyItem))?,
        })
    }

    pub(super) fn assembly_item(&mut self, node: &ParseNode) -> Result<NodeKind, TransformError> {
        if let Some(token) = node.find_token(TokenKind::HexLiteral) {
            return Ok(NodeKind::HexLiteral {
                value: token.text(),
            });
        }
        if let Some(token) = node.find_token(TokenKind::StringLiteral) {
            return Ok(NodeKind::StringLiteral {
                value: strip_quotes(&token.text()).to_string(),
            });
        }
        match node.child_token(0) {
            Some("break") => Ok(NodeKind::Break),
            Some("continue") => Ok(NodeKind::Continue),
            _ => self.pass_through(node),
        }
    }

    /// `add(x, 1)`, or a bare identifier used as a value.
    pub(super) fn assembly_call(&mut self, node: &ParseNode) -> Result<NodeKind, TransformError> {
        Ok(NodeKind::AssemblyCall {
            function_name: child_at(node, 0, "function name")?.text(),
            arguments: self.visit_all(node.children_by_rule(Rule::AssemblyExpression))?,
        })
    }

    pub(super) fn assembly_switch(&mut self, node: &ParseNode) -> Result<NodeKind, TransformError> {
        Ok(NodeKind::AssemblySwitch {
            expression: self.boxed(child_of(node, Rule::AssemblyExpression)?)?,
            cases: self.visit_all(node.children_by_rule(Rule::AssemblyCase))?,
        })
    }

    /// `case <literal> { .. }` or `default { .. }`.
    pub(super) fn assembly_case(&mut self, node: &ParseNode) -> Result<NodeKind, TransformError> {
        let (value, default) = match node.child_token(0) {
            Some("case") => (Some(self.boxed(child_of(node, Rule::AssemblyLiteral)?)?), false),
            Some("default") => (None, true),
            other => {
                return Err(unrecognized(
                    node,
                    format!("expected `case` or `default`, found {other:?}"),
                ))
            }
        };
        Ok(NodeKind::AssemblyCase {
            value,
            block: self.boxed(child_of(node, Rule::AssemblyBlock)?)?,
            default,
        })
    }

    /// `let x, y := f()`; the value is optional.
    pub(super) fn assembly_local_definition(
        &mut self,
        node: &ParseNode,
    ) -> Result<NodeKind, TransformError> {
        Ok(NodeKind::AssemblyLocalDefinition {
            names: self.assembly_names(child_of(node, Rule::AssemblyIdentifierOrList)?)?,
            expression: self.boxed_opt(node.find_child(Rule::AssemblyExpression))?,
        })
    }

    /// `x := e` or `(x, y) := e`.
    pub(super) fn assembly_assignment(
        &mut self,
        node: &ParseNode,
    ) -> Result<NodeKind, TransformError> {
        Ok(NodeKind::AssemblyAssignment {
            names: self.assembly_names(child_of(node, Rule::AssemblyIdentifierOrList)?)?,
            expression: self.boxed(child_of(node, Rule::AssemblyExpression)?)?,
        })
    }

    fn assembly_names(&mut self, names: &ParseNode) -> Result<Vec<Node>, TransformError> {
        if let Some(identifier) = names.find_child(Rule::Identifier) {
            return Ok(vec![self.visit(identifier)?]);
        }
        let list = child_of(names, Rule::AssemblyIdentifierList)?;
        self.visit_all(list.children_by_rule(Rule::Identifier))
    }

    /// `function f(a, b) -> r { .. }`
    pub(super) fn assembly_function_definition(
        &mut self,
        node: &ParseNode,
    ) -> Result<NodeKind, TransformError> {
        let arguments = match node.find_child(Rule::AssemblyIdentifierList) {
            Some(list) => self.visit_all(list.children_by_rule(Rule::Identifier))?,
            None => Vec::new(),
        };
        let return_arguments = match node
            .find_child(Rule::AssemblyFunctionReturns)
            .and_then(|returns| returns.find_child(Rule::AssemblyIdentifierList))
        {
            Some(list) => self.visit_all(list.children_by_rule(Rule::Identifier))?,
            None => Vec::new(),
        };

        Ok(NodeKind::AssemblyFunctionDefinition {
            name: child_of(node, Rule::Identifier)?.text(),
            arguments,
            return_arguments,
            body: self.boxed(child_of(node, Rule::AssemblyBlock)?)?,
        })
    }

    /// `for { init } cond { post } { body }`
    pub(super) fn assembly_for(&mut self, node: &ParseNode) -> Result<NodeKind, TransformError> {
        let [_, pre, condition, post, body] = node.children.as_slice() else {
            return Err(unrecognized(
                node,
                format!("expected 5 children, found {}", node.children.len()),
            ));
        };
        Ok(NodeKind::AssemblyFor {
            pre: self.boxed(pre)?,
            condition: self.boxed(condition)?,
            post: self.boxed(post)?,
            body: self.boxed(body)?,
        })
    }

    /// `if cond { .. }`
    pub(super) fn assembly_if(&mut self, node: &ParseNode) -> Result<NodeKind, TransformError> {
        Ok(NodeKind::AssemblyIf {
            condition: self.boxed(child_of(node, Rule::AssemblyExpression)?)?,
            body: self.boxed(child_of(node, Rule::AssemblyBlock)?)?,
        })
    }
}
