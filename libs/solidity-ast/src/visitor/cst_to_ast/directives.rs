//! # Directive Transformation
//!
//! `pragma` and `import` directives.

use crate::ast::{Node, NodeKind};
use crate::cst::{ParseNode, Rule, TokenKind};
use crate::error::TransformError;

use super::{child_of, missing, strip_quotes, Transformer};

impl Transformer {
    /// `pragma solidity ^0.8.0;`, `pragma experimental X;` or any other
    /// pragma, kept as raw text.
    pub(super) fn pragma_directive(&mut self, node: &ParseNode) -> Result<NodeKind, TransformError> {
        let name = child_of(node, Rule::PragmaName)?.text();
        let value = child_of(node, Rule::PragmaValue)?;

        match name.as_str() {
            "solidity" => {
                let (start_version, end_version) = match value.find_child(Rule::Version) {
                    Some(version) => self.version_range(version)?,
                    None => (None, None),
                };
                Ok(NodeKind::PragmaStatement {
                    start_version,
                    end_version,
                })
            }
            "experimental" => Ok(NodeKind::ExperimentalPragmaStatement {
                feature: self.boxed(child_of(value, Rule::Expression)?)?,
            }),
            _ => Ok(NodeKind::PragmaDirective {
                name,
                value: value.text(),
            }),
        }
    }

    /// Endpoints of a version range, in declaration order.
    fn version_range(
        &mut self,
        version: &ParseNode,
    ) -> Result<(Option<Box<Node>>, Option<Box<Node>>), TransformError> {
        let mut constraints = version.children_by_rule(Rule::VersionConstraint);
        let start = self.boxed_opt(constraints.next())?;
        let end = self.boxed_opt(constraints.next())?;
        Ok((start, end))
    }

    /// `^0.8.0`, `>=0.4.22`, or a bare `0.8.0`.
    pub(super) fn version_constraint(&mut self, node: &ParseNode) -> Result<NodeKind, TransformError> {
        let literal = node
            .children
            .iter()
            .rev()
            .find(|c| c.is_terminal())
            .ok_or_else(|| missing(node, "version literal"))?;

        Ok(NodeKind::VersionLiteral {
            operator: node.find_child(Rule::VersionOperator).map(ParseNode::text),
            version: literal.text(),
        })
    }

    /// The three import forms:
    ///
    /// ```text
    /// import "path" (as alias)?;
    /// import (* | unit) (as alias)? from "path";
    /// import { symbol (as alias)?, ... } from "path";
    /// ```
    pub(super) fn import_directive(&mut self, node: &ParseNode) -> Result<NodeKind, TransformError> {
        let path = node
            .find_token(TokenKind::StringLiteral)
            .ok_or_else(|| missing(node, "import path"))?;
        let symbols = self.visit_all(node.children_by_rule(Rule::ImportDeclaration))?;

        let alias = if symbols.is_empty() {
            import_alias(node)
        } else {
            None
        };

        Ok(NodeKind::ImportStatement {
            from: strip_quotes(&path.text()).to_string(),
            alias,
            symbols,
        })
    }

    /// One `{name as alias}` entry.
    pub(super) fn import_declaration(&mut self, node: &ParseNode) -> Result<NodeKind, TransformError> {
        let name = node
            .nth_child(Rule::Identifier, 0)
            .ok_or_else(|| missing(node, "imported name"))?;
        Ok(NodeKind::Symbol {
            name: name.text(),
            alias: node.nth_child(Rule::Identifier, 1).map(ParseNode::text),
        })
    }
}

/// Identifier after `as`, or the unit name in `import unit from "path"`.
fn import_alias(node: &ParseNode) -> Option<String> {
    if let Some(position) = node.position_of_token("as") {
        return node.child(position + 1).map(ParseNode::text);
    }
    if node.has_keyword("from") {
        return node.find_child(Rule::Identifier).map(ParseNode::text);
    }
    None
}
