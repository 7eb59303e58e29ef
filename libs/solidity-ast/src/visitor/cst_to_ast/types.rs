//! # Type Name Transformation

use crate::ast::NodeKind;
use crate::cst::{ParseNode, Rule};
use crate::error::TransformError;

use super::{child_of, modifiers, Transformer};

impl Transformer {
    /// `T`, `T[n]` or `T[]`.
    pub(super) fn type_name(&mut self, node: &ParseNode) -> Result<NodeKind, TransformError> {
        let is = |n: &ParseNode, text: &str| n.token_text() == Some(text);

        match node.children.as_slice() {
            [base, open, length, close] if is(open, "[") && is(close, "]") => {
                Ok(NodeKind::ArrayTypeName {
                    base_type_name: self.boxed(base)?,
                    length: Some(self.boxed(length)?),
                })
            }
            [base, open, close] if is(open, "[") && is(close, "]") => {
                Ok(NodeKind::ArrayTypeName {
                    base_type_name: self.boxed(base)?,
                    length: None,
                })
            }
            _ => self.pass_through(node),
        }
    }

    /// `mapping(K => V)`
    pub(super) fn mapping(&mut self, node: &ParseNode) -> Result<NodeKind, TransformError> {
        Ok(NodeKind::Mapping {
            key_type: self.boxed(child_of(node, Rule::ElementaryTypeName)?)?,
            value_type: self.boxed(child_of(node, Rule::TypeName)?)?,
        })
    }

    /// `function (params) internal view returns (types)`
    pub(super) fn function_type_name(
        &mut self,
        node: &ParseNode,
    ) -> Result<NodeKind, TransformError> {
        let parameters = child_of(node, Rule::TypeNameList)?;
        let parameter_types = self.visit_all(parameters.children_by_rule(Rule::UnnamedParameter))?;
        let return_types = match node.nth_child(Rule::TypeNameList, 1) {
            Some(returns) => self.visit_all(returns.children_by_rule(Rule::UnnamedParameter))?,
            None => Vec::new(),
        };

        Ok(NodeKind::FunctionTypeName {
            parameter_types,
            return_types,
            visibility: modifiers::function_type_visibility(node),
            state_mutability: modifiers::state_mutability(node),
        })
    }
}
