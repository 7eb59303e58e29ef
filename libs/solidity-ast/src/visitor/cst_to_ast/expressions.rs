//! # Expression Transformation
//!
//! The grammar folds every operator form into one `expression` rule, so the
//! form is recovered from the child count and the tokens at fixed positions:
//!
//! ```text
//! 1 child   X                  pass through
//! 2 children new T | op X | X op
//! 3 children ( X ) | X , Y | X . m | X op Y
//! 4 children X ( args ) | X [ i ]
//! 5 children X ? Y : Z
//! ```
//!
//! Any other shape is fatal.

use crate::ast::NodeKind;
use crate::cst::{ParseNode, Rule, TokenKind};
use crate::error::TransformError;

use super::lists::comma_slots;
use super::{child_at, child_of, strip_quotes, Transformer};

// =============================================================================
// OPERATOR SETS
// =============================================================================

/// Operators accepted in front of an operand.
pub const PREFIX_OPERATORS: &[&str] = &["+", "-", "++", "--", "!", "~", "after", "delete"];

/// Operators accepted after an operand.
pub const POSTFIX_OPERATORS: &[&str] = &["++", "--"];

/// Infix operators: arithmetic, shift, boolean, bitwise, relational,
/// equality, assignment and compound assignment.
pub const BINARY_OPERATORS: &[&str] = &[
    "+", "-", "*", "/", "**", "%", "<<", ">>", "&&", "||", "&", "|", "^", "<", ">", "<=", ">=",
    "==", "!=", "=", "|=", "^=", "&=", "<<=", ">>=", "+=", "-=", "*=", "/=", "%=",
];

fn token_in(node: &ParseNode, set: &[&str]) -> bool {
    node.token_text().is_some_and(|text| set.contains(&text))
}

fn is_token(node: &ParseNode, text: &str) -> bool {
    node.token_text() == Some(text)
}

// =============================================================================
// EXPRESSIONS
// =============================================================================

impl Transformer {
    pub(super) fn expression(&mut self, node: &ParseNode) -> Result<NodeKind, TransformError> {
        let unrecognized = || TransformError::UnrecognizedExpression {
            span: node.span(),
            arity: node.children.len(),
        };

        match node.children.as_slice() {
            [inner] => Ok(self.visit(inner)?.kind),

            [keyword, type_name] if is_token(keyword, "new") => Ok(NodeKind::NewExpression {
                type_name: self.boxed(type_name)?,
            }),
            [op, operand] if token_in(op, PREFIX_OPERATORS) => Ok(NodeKind::UnaryOperation {
                operator: op.text(),
                sub_expression: self.boxed(operand)?,
                is_prefix: true,
            }),
            [operand, op] if token_in(op, POSTFIX_OPERATORS) => Ok(NodeKind::UnaryOperation {
                operator: op.text(),
                sub_expression: self.boxed(operand)?,
                is_prefix: false,
            }),

            [open, inner, close] if is_token(open, "(") && is_token(close, ")") => {
                Ok(NodeKind::TupleExpression {
                    components: vec![Some(self.visit(inner)?)],
                    is_array: false,
                })
            }
            [left, comma, right] if is_token(comma, ",") => Ok(NodeKind::TupleExpression {
                components: vec![Some(self.visit(left)?), Some(self.visit(right)?)],
                is_array: false,
            }),
            [base, dot, member] if is_token(dot, ".") => Ok(NodeKind::MemberAccess {
                expression: self.boxed(base)?,
                member_name: member.text(),
            }),
            [left, op, right] if token_in(op, BINARY_OPERATORS) => {
                Ok(NodeKind::BinaryOperation {
                    operator: op.text(),
                    left: self.boxed(left)?,
                    right: self.boxed(right)?,
                })
            }

            [callee, open, arguments, close] if is_token(open, "(") && is_token(close, ")") => {
                self.function_call(callee, arguments)
            }
            [base, open, index, close] if is_token(open, "[") && is_token(close, "]") => {
                Ok(NodeKind::IndexAccess {
                    base: self.boxed(base)?,
                    index: self.boxed(index)?,
                })
            }

            [condition, question, when_true, colon, when_false]
                if is_token(question, "?") && is_token(colon, ":") =>
            {
                Ok(NodeKind::Conditional {
                    condition: self.boxed(condition)?,
                    true_expression: self.boxed(when_true)?,
                    false_expression: self.boxed(when_false)?,
                })
            }

            _ => Err(unrecognized()),
        }
    }

    /// `functionCall` as used by `emit`: same layout as the call form of
    /// `expression`.
    pub(super) fn function_call_rule(&mut self, node: &ParseNode) -> Result<NodeKind, TransformError> {
        match node.children.as_slice() {
            [callee, open, arguments, close] if is_token(open, "(") && is_token(close, ")") => {
                self.function_call(callee, arguments)
            }
            _ => Err(super::unrecognized(node, "expected `callee ( arguments )`")),
        }
    }

    fn function_call(
        &mut self,
        callee: &ParseNode,
        arguments: &ParseNode,
    ) -> Result<NodeKind, TransformError> {
        let expression = self.boxed(callee)?;
        let mut args = Vec::new();
        let mut names = Vec::new();

        if let Some(list) = arguments.find_child(Rule::ExpressionList) {
            args = self.visit_all(list.children_by_rule(Rule::Expression))?;
        } else if let Some(list) = arguments.find_child(Rule::NameValueList) {
            for pair in list.children_by_rule(Rule::NameValue) {
                let value = child_of(pair, Rule::Expression)?;
                args.push(self.visit(value)?);
                names.push(child_of(pair, Rule::Identifier)?.text());
            }
        } else if arguments.is_rule(Rule::ExpressionList) {
            args = self.visit_all(arguments.children_by_rule(Rule::Expression))?;
        }

        Ok(NodeKind::FunctionCall {
            expression,
            arguments: args,
            names,
        })
    }

    pub(super) fn primary_expression(
        &mut self,
        node: &ParseNode,
    ) -> Result<NodeKind, TransformError> {
        if let Some(token) = node.find_token(TokenKind::BooleanLiteral) {
            return Ok(NodeKind::BooleanLiteral {
                value: is_token(token, "true"),
            });
        }
        if let Some(token) = node.find_token(TokenKind::HexLiteral) {
            return Ok(NodeKind::HexLiteral {
                value: token.text(),
            });
        }
        if node.find_token(TokenKind::StringLiteral).is_some() {
            return Ok(NodeKind::StringLiteral {
                value: strip_quotes(&node.text()).to_string(),
            });
        }
        self.pass_through(node)
    }

    /// `(a, , c)` and `[a, b]` literals; omitted positions become `None`.
    pub(super) fn tuple_expression(&mut self, node: &ParseNode) -> Result<NodeKind, TransformError> {
        let open = child_at(node, 0, "opening bracket")?;
        let inner = match node.children.len() {
            0..=2 => &[][..],
            len => &node.children[1..len - 1],
        };

        let components = comma_slots(inner)
            .into_iter()
            .map(|slot| self.visit_opt(slot))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(NodeKind::TupleExpression {
            components,
            is_array: is_token(open, "["),
        })
    }

    pub(super) fn elementary_type_name_expression(
        &mut self,
        node: &ParseNode,
    ) -> Result<NodeKind, TransformError> {
        Ok(NodeKind::ElementaryTypeNameExpression {
            type_name: self.boxed(child_of(node, Rule::ElementaryTypeName)?)?,
        })
    }
}

/// `1`, `0xff`, `2 ether`.
pub(super) fn number_literal(node: &ParseNode) -> Result<NodeKind, TransformError> {
    Ok(NodeKind::NumberLiteral {
        number: child_at(node, 0, "number")?.text(),
        subdenomination: match node.children.as_slice() {
            [_, unit] => Some(unit.text()),
            _ => None,
        },
    })
}

// =============================================================================
// TESTS
// =============================================================================
