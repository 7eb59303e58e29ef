//! # Declaration Transformation
//!
//! Contracts and their members, parameters and variable declarations.
//!
//! Entering a contract, interface or library records its name in the pass
//! context; a function with that name is flagged as a constructor.

use crate::ast::{Node, NodeKind};
use crate::cst::{ParseNode, Rule};
use crate::error::TransformError;

use super::{child_of, modifiers, type_literal, unrecognized, Transformer};

impl Transformer {
    // =========================================================================
    // CONTRACTS
    // =========================================================================

    pub(super) fn contract_definition(
        &mut self,
        node: &ParseNode,
    ) -> Result<NodeKind, TransformError> {
        let name = child_of(node, Rule::Identifier)?.text();
        self.context.enter_contract(name.as_str());

        let is = self.visit_all(node.children_by_rule(Rule::InheritanceSpecifier))?;
        let body = self.visit_all(node.children_by_rule(Rule::ContractPart))?;

        match node.child_token(0) {
            Some("contract") => Ok(NodeKind::ContractStatement { name, is, body }),
            Some("interface") => Ok(NodeKind::InterfaceStatement { name, is, body }),
            Some("library") => Ok(NodeKind::LibraryStatement { name, is, body }),
            other => Err(unrecognized(
                node,
                format!("unknown definition keyword {other:?}"),
            )),
        }
    }

    /// `Base(arg, ...)` in an `is` list.
    pub(super) fn inheritance_specifier(
        &mut self,
        node: &ParseNode,
    ) -> Result<NodeKind, TransformError> {
        let base_name = self.boxed(child_of(node, Rule::UserDefinedTypeName)?)?;
        let arguments = node.find_child(Rule::ExpressionList).unwrap_or(node);
        Ok(NodeKind::InheritanceSpecifier {
            base_name,
            arguments: self.visit_all(arguments.children_by_rule(Rule::Expression))?,
        })
    }

    pub(super) fn state_variable_declaration(
        &mut self,
        node: &ParseNode,
    ) -> Result<NodeKind, TransformError> {
        let type_name = self.boxed(child_of(node, Rule::TypeName)?)?;
        let identifier = child_of(node, Rule::Identifier)?;
        let literal = Node::new(
            NodeKind::Type {
                literal: type_literal(&type_name),
            },
            identifier.span(),
        );

        Ok(NodeKind::StateVariableDeclaration {
            literal: Box::new(literal),
            type_name,
            name: identifier.text(),
            visibility: modifiers::state_variable_visibility(node),
            is_constant: node.has_keyword("constant"),
            value: self.boxed_opt(node.find_child(Rule::Expression))?,
        })
    }

    /// `using L for T;` or `using L for *;`
    pub(super) fn using_for_declaration(
        &mut self,
        node: &ParseNode,
    ) -> Result<NodeKind, TransformError> {
        Ok(NodeKind::UsingForDeclaration {
            library_name: child_of(node, Rule::Identifier)?.text(),
            type_name: self.boxed_opt(node.find_child(Rule::TypeName))?,
        })
    }

    pub(super) fn struct_definition(&mut self, node: &ParseNode) -> Result<NodeKind, TransformError> {
        let members = node.children.iter().filter(|c| {
            c.is_rule(Rule::StructVariableDeclaration) || c.is_rule(Rule::VariableDeclaration)
        });
        Ok(NodeKind::StructDeclaration {
            name: child_of(node, Rule::Identifier)?.text(),
            body: self.visit_all(members)?,
        })
    }

    pub(super) fn enum_definition(&mut self, node: &ParseNode) -> Result<NodeKind, TransformError> {
        Ok(NodeKind::EnumDefinition {
            name: child_of(node, Rule::Identifier)?.text(),
            members: self.visit_all(node.children_by_rule(Rule::EnumValue))?,
        })
    }

    pub(super) fn enum_value(&mut self, node: &ParseNode) -> Result<NodeKind, TransformError> {
        Ok(NodeKind::EnumValue {
            name: child_of(node, Rule::Identifier)?.text(),
        })
    }

    pub(super) fn event_definition(&mut self, node: &ParseNode) -> Result<NodeKind, TransformError> {
        Ok(NodeKind::EventDefinition {
            name: child_of(node, Rule::Identifier)?.text(),
            parameters: self.boxed(child_of(node, Rule::IndexedParameterList)?)?,
            is_anonymous: node.has_keyword("anonymous"),
        })
    }

    // =========================================================================
    // FUNCTIONS AND MODIFIERS
    // =========================================================================

    pub(super) fn function_definition(
        &mut self,
        node: &ParseNode,
    ) -> Result<NodeKind, TransformError> {
        let name = node
            .find_child(Rule::Identifier)
            .map(ParseNode::text)
            .unwrap_or_default();
        let params = self.boxed(child_of(node, Rule::ParameterList)?)?;

        let (modifiers, visibility, state_mutability) = match node.find_child(Rule::ModifierList) {
            Some(list) => (
                self.visit_all(list.children_by_rule(Rule::ModifierInvocation))?,
                modifiers::function_visibility(list),
                modifiers::state_mutability(list),
            ),
            None => (Vec::new(), Default::default(), None),
        };

        let return_parameters = self.boxed_opt(node.find_child(Rule::ReturnParameters))?;
        let body = self.boxed_opt(node.find_child(Rule::Block))?;

        Ok(NodeKind::FunctionDeclaration {
            is_constructor: self.context.is_constructor_name(&name),
            name,
            params,
            return_parameters,
            body,
            visibility,
            modifiers,
            state_mutability,
        })
    }

    /// `onlyOwner` or `onlyRole(ADMIN)` on a function.
    pub(super) fn modifier_invocation(
        &mut self,
        node: &ParseNode,
    ) -> Result<NodeKind, TransformError> {
        let arguments = match node.find_child(Rule::ExpressionList) {
            Some(list) => self.visit_all(list.children_by_rule(Rule::Expression))?,
            None => Vec::new(),
        };
        Ok(NodeKind::ModifierInvocation {
            name: child_of(node, Rule::Identifier)?.text(),
            arguments,
        })
    }

    pub(super) fn modifier_definition(
        &mut self,
        node: &ParseNode,
    ) -> Result<NodeKind, TransformError> {
        Ok(NodeKind::ModifierDefinition {
            name: child_of(node, Rule::Identifier)?.text(),
            parameters: self.boxed_opt(node.find_child(Rule::ParameterList))?,
            body: self.boxed(child_of(node, Rule::Block)?)?,
        })
    }

    // =========================================================================
    // PARAMETERS AND VARIABLES
    // =========================================================================

    pub(super) fn parameter_list(&mut self, node: &ParseNode) -> Result<NodeKind, TransformError> {
        Ok(NodeKind::ParameterList {
            parameters: self.visit_all(node.children_by_rule(Rule::Parameter))?,
        })
    }

    pub(super) fn parameter(&mut self, node: &ParseNode) -> Result<NodeKind, TransformError> {
        Ok(NodeKind::Parameter {
            type_name: self.boxed(child_of(node, Rule::TypeName)?)?,
            name: node.find_child(Rule::Identifier).map(ParseNode::text),
            storage_location: modifiers::storage_location(node),
            is_state_var: false,
            is_indexed: false,
        })
    }

    /// Event parameters.
    pub(super) fn indexed_parameter_list(
        &mut self,
        node: &ParseNode,
    ) -> Result<NodeKind, TransformError> {
        Ok(NodeKind::ParameterList {
            parameters: self.visit_all(node.children_by_rule(Rule::IndexedParameter))?,
        })
    }

    pub(super) fn indexed_parameter(&mut self, node: &ParseNode) -> Result<NodeKind, TransformError> {
        Ok(NodeKind::VariableDeclaration {
            type_name: Some(self.boxed(child_of(node, Rule::TypeName)?)?),
            name: node.find_child(Rule::Identifier).map(ParseNode::text),
            storage_location: modifiers::storage_location(node),
            is_state_var: false,
            is_indexed: node.has_keyword("indexed"),
        })
    }

    /// Function type parameters, which carry no name.
    pub(super) fn unnamed_parameter(&mut self, node: &ParseNode) -> Result<NodeKind, TransformError> {
        Ok(NodeKind::VariableDeclaration {
            type_name: Some(self.boxed(child_of(node, Rule::TypeName)?)?),
            name: None,
            storage_location: modifiers::storage_location(node),
            is_state_var: false,
            is_indexed: false,
        })
    }

    /// `uint256 memory x`, as in struct members and local declarations.
    pub(super) fn variable_declaration(
        &mut self,
        node: &ParseNode,
    ) -> Result<NodeKind, TransformError> {
        let type_name = self.boxed(child_of(node, Rule::TypeName)?)?;
        let identifier = child_of(node, Rule::Identifier)?;
        let literal = Node::new(
            NodeKind::Type {
                literal: type_literal(&type_name),
            },
            identifier.span(),
        );

        Ok(NodeKind::DeclarativeExpression {
            name: identifier.text(),
            type_name,
            literal: Box::new(literal),
            storage_location: modifiers::storage_location(node),
            is_state_var: false,
            is_indexed: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Visibility;
    use crate::cst::TreeBuilder;

    fn ident(b: &mut TreeBuilder, name: &str) -> ParseNode {
        ParseNode::with_children("identifier", vec![b.tok(name)])
    }

    fn elementary(b: &mut TreeBuilder, name: &str) -> ParseNode {
        let e = ParseNode::with_children("elementaryTypeName", vec![b.tok(name)]);
        ParseNode::with_children("typeName", vec![e])
    }

    fn empty_params(b: &mut TreeBuilder) -> ParseNode {
        ParseNode::with_children("parameterList", vec![b.tok("("), b.tok(")")])
    }

    #[test]
    fn test_state_variable() {
        let mut b = TreeBuilder::new();
        let ty = elementary(&mut b, "uint256");
        let public = b.tok("public");
        let constant = b.tok("constant");
        let name = ident(&mut b, "CAP");
        let name_span = name.span();
        let eq = b.tok("=");
        let n = ParseNode::with_children("numberLiteral", vec![b.tok("100")]);
        let p = ParseNode::with_children("primaryExpression", vec![n]);
        let value = ParseNode::with_children("expression", vec![p]);
        let semi = b.tok(";");
        let node = ParseNode::with_children(
            "stateVariableDeclaration",
            vec![ty, public, constant, name, eq, value, semi],
        );

        let out = Transformer::default().visit(&node).unwrap();
        let NodeKind::StateVariableDeclaration {
            literal,
            name,
            visibility,
            is_constant,
            value,
            ..
        } = out.kind
        else {
            panic!("expected state variable");
        };
        assert_eq!(name, "CAP");
        assert_eq!(visibility, Some(Visibility::Public));
        assert!(is_constant);
        assert!(value.is_some());
        assert_eq!(literal.span, name_span);
        assert_eq!(
            literal.kind,
            NodeKind::Type {
                literal: Some("uint256".into())
            }
        );
    }

    #[test]
    fn test_user_defined_type_literal() {
        let mut b = TreeBuilder::new();
        let user = ParseNode::with_children("userDefinedTypeName", vec![ident(&mut b, "IERC20")]);
        let ty = ParseNode::with_children("typeName", vec![user]);
        let name = ident(&mut b, "token");
        let node = ParseNode::with_children("variableDeclaration", vec![ty, name]);

        let out = Transformer::default().visit(&node).unwrap();
        let NodeKind::DeclarativeExpression { literal, .. } = out.kind else {
            panic!("expected declarative expression");
        };
        assert_eq!(
            literal.kind,
            NodeKind::Type {
                literal: Some("IERC20".into())
            }
        );
    }

    #[test]
    fn test_using_for_star() {
        let mut b = TreeBuilder::new();
        let node = ParseNode::with_children(
            "usingForDeclaration",
            vec![
                b.tok("using"),
                ident(&mut b, "SafeMath"),
                b.tok("for"),
                b.tok("*"),
                b.tok(";"),
            ],
        );
        let out = Transformer::default().visit(&node).unwrap();
        assert_eq!(
            out.kind,
            NodeKind::UsingForDeclaration {
                library_name: "SafeMath".into(),
                type_name: None
            }
        );
    }

    #[test]
    fn test_anonymous_event_with_indexed_parameter() {
        let mut b = TreeBuilder::new();
        let kw = b.tok("event");
        let name = ident(&mut b, "Transfer");
        let open = b.tok("(");
        let ty = elementary(&mut b, "address");
        let indexed = b.tok("indexed");
        let from = ident(&mut b, "from");
        let param = ParseNode::with_children("indexedParameter", vec![ty, indexed, from]);
        let close = b.tok(")");
        let params = ParseNode::with_children("indexedParameterList", vec![open, param, close]);
        let anon = b.tok("anonymous");
        let semi = b.tok(";");
        let node = ParseNode::with_children("eventDefinition", vec![kw, name, params, anon, semi]);

        let out = Transformer::default().visit(&node).unwrap();
        let NodeKind::EventDefinition {
            parameters,
            is_anonymous,
            ..
        } = out.kind
        else {
            panic!("expected event");
        };
        assert!(is_anonymous);
        let NodeKind::ParameterList { parameters } = parameters.kind else {
            panic!("expected parameter list");
        };
        assert!(matches!(
            &parameters[0].kind,
            NodeKind::VariableDeclaration { is_indexed: true, name: Some(n), .. } if n == "from"
        ));
    }

    #[test]
    fn test_function_without_name_is_not_constructor() {
        let mut b = TreeBuilder::new();
        let kw = b.tok("function");
        let params = empty_params(&mut b);
        let mods = ParseNode::with_children("modifierList", vec![b.tok("payable")]);
        let semi = b.tok(";");
        let node = ParseNode::with_children("functionDefinition", vec![kw, params, mods, semi]);

        let out = Transformer::default().visit(&node).unwrap();
        let NodeKind::FunctionDeclaration {
            name,
            is_constructor,
            body,
            visibility,
            ..
        } = out.kind
        else {
            panic!("expected function");
        };
        assert_eq!(name, "");
        assert!(!is_constructor);
        assert!(body.is_none());
        assert_eq!(visibility, Visibility::Default);
    }

    #[test]
    fn test_modifier_invocation_arguments() {
        let mut b = TreeBuilder::new();
        let name = ident(&mut b, "onlyRole");
        let open = b.tok("(");
        let arg = ParseNode::with_children(
            "expression",
            vec![ParseNode::with_children(
                "primaryExpression",
                vec![ident(&mut b, "ADMIN")],
            )],
        );
        let list = ParseNode::with_children("expressionList", vec![arg]);
        let close = b.tok(")");
        let node = ParseNode::with_children("modifierInvocation", vec![name, open, list, close]);

        let out = Transformer::default().visit(&node).unwrap();
        let NodeKind::ModifierInvocation { name, arguments } = out.kind else {
            panic!("expected modifier invocation");
        };
        assert_eq!(name, "onlyRole");
        assert_eq!(arguments.len(), 1);
    }

    #[test]
    fn test_return_parameters_become_parameter_list() {
        let mut b = TreeBuilder::new();
        let kw = b.tok("function");
        let name = ident(&mut b, "ok");
        let params = empty_params(&mut b);
        let returns_kw = b.tok("returns");
        let open = b.tok("(");
        let ty = elementary(&mut b, "bool");
        let param = ParseNode::with_children("parameter", vec![ty]);
        let close = b.tok(")");
        let list = ParseNode::with_children("parameterList", vec![open, param, close]);
        let returns = ParseNode::with_children("returnParameters", vec![returns_kw, list]);
        let returns_span = returns.span();
        let semi = b.tok(";");
        let node = ParseNode::with_children("functionDefinition", vec![kw, name, params, returns, semi]);

        let out = Transformer::default().visit(&node).unwrap();
        let NodeKind::FunctionDeclaration {
            return_parameters: Some(returns),
            ..
        } = out.kind
        else {
            panic!("expected function with return parameters");
        };
        assert_eq!(returns.span, returns_span);
        let NodeKind::ParameterList { parameters } = returns.kind else {
            panic!("expected parameter list, got {}", returns.type_name());
        };
        assert_eq!(parameters.len(), 1);
        let NodeKind::Parameter { type_name, name, .. } = &parameters[0].kind else {
            panic!("expected parameter");
        };
        assert!(name.is_none());
        assert_eq!(
            type_name.kind,
            NodeKind::ElementaryTypeName {
                name: "bool".into()
            }
        );
    }

    #[test]
    fn test_struct_members() {
        let mut b = TreeBuilder::new();
        let kw = b.tok("struct");
        let name = ident(&mut b, "Point");
        let open = b.tok("{");
        let mut children = vec![kw, name, open];
        for field in ["x", "y"] {
            let ty = elementary(&mut b, "int256");
            let id = ident(&mut b, field);
            children.push(ParseNode::with_children("variableDeclaration", vec![ty, id]));
            children.push(b.tok(";"));
        }
        children.push(b.tok("}"));
        let node = ParseNode::with_children("structDefinition", children);

        let out = Transformer::default().visit(&node).unwrap();
        let NodeKind::StructDeclaration { name, body } = out.kind else {
            panic!("expected struct");
        };
        assert_eq!(name, "Point");
        let fields: Vec<_> = body
            .iter()
            .map(|member| match &member.kind {
                NodeKind::DeclarativeExpression { name, .. } => name.as_str(),
                other => panic!("unexpected member {other:?}"),
            })
            .collect();
        assert_eq!(fields, vec!["x", "y"]);
    }

    #[test]
    fn test_enum_values_in_order() {
        let mut b = TreeBuilder::new();
        let kw = b.tok("enum");
        let name = ident(&mut b, "State");
        let open = b.tok("{");
        let mut children = vec![kw, name, open];
        for (i, value) in ["Open", "Closed"].into_iter().enumerate() {
            if i > 0 {
                children.push(b.tok(","));
            }
            children.push(ParseNode::with_children("enumValue", vec![ident(&mut b, value)]));
        }
        children.push(b.tok("}"));
        let node = ParseNode::with_children("enumDefinition", children);

        let out = Transformer::default().visit(&node).unwrap();
        let NodeKind::EnumDefinition { name, members } = out.kind else {
            panic!("expected enum");
        };
        assert_eq!(name, "State");
        assert_eq!(
            members.into_iter().map(|m| m.kind).collect::<Vec<_>>(),
            vec![
                NodeKind::EnumValue {
                    name: "Open".into()
                },
                NodeKind::EnumValue {
                    name: "Closed".into()
                },
            ]
        );
    }

    #[test]
    fn test_inheritance_with_arguments() {
        let mut b = TreeBuilder::new();
        let kw = b.tok("contract");
        let name = ident(&mut b, "Token");
        let is_kw = b.tok("is");
        let base = ParseNode::with_children("userDefinedTypeName", vec![ident(&mut b, "ERC20")]);
        let open = b.tok("(");
        let arg = ParseNode::with_children(
            "expression",
            vec![ParseNode::with_children(
                "primaryExpression",
                vec![ident(&mut b, "SYMBOL")],
            )],
        );
        let args = ParseNode::with_children("expressionList", vec![arg]);
        let close = b.tok(")");
        let spec = ParseNode::with_children("inheritanceSpecifier", vec![base, open, args, close]);
        let body_open = b.tok("{");
        let body_close = b.tok("}");
        let node = ParseNode::with_children(
            "contractDefinition",
            vec![kw, name, is_kw, spec, body_open, body_close],
        );

        let mut transformer = Transformer::default();
        let out = transformer.visit(&node).unwrap();
        assert_eq!(transformer.context().current_contract(), Some("Token"));

        let NodeKind::ContractStatement { is, .. } = out.kind else {
            panic!("expected contract");
        };
        assert_eq!(is.len(), 1);
        let NodeKind::InheritanceSpecifier {
            base_name,
            arguments,
        } = &is[0].kind
        else {
            panic!("expected inheritance specifier");
        };
        assert_eq!(
            base_name.kind,
            NodeKind::UserDefinedTypeName {
                name_path: "ERC20".into()
            }
        );
        assert_eq!(
            arguments[0].kind,
            NodeKind::Identifier {
                name: "SYMBOL".into()
            }
        );
    }

    #[test]
    fn test_modifier_definition_with_and_without_parameters() {
        let mut b = TreeBuilder::new();
        let kw = b.tok("modifier");
        let name = ident(&mut b, "onlyOwner");
        let body = ParseNode::with_children("block", vec![b.tok("{"), b.tok("}")]);
        let bare = ParseNode::with_children("modifierDefinition", vec![kw, name, body]);

        let kw = b.tok("modifier");
        let name = ident(&mut b, "costs");
        let params = empty_params(&mut b);
        let body = ParseNode::with_children("block", vec![b.tok("{"), b.tok("}")]);
        let with_params =
            ParseNode::with_children("modifierDefinition", vec![kw, name, params, body]);

        let mut t = Transformer::default();
        assert!(matches!(
            t.visit(&bare).unwrap().kind,
            NodeKind::ModifierDefinition { ref name, parameters: None, ref body }
                if name == "onlyOwner" && body.type_name() == "Block"
        ));
        assert!(matches!(
            t.visit(&with_params).unwrap().kind,
            NodeKind::ModifierDefinition { parameters: Some(ref p), .. }
                if p.type_name() == "ParameterList"
        ));
    }

    #[test]
    fn test_unknown_definition_keyword_is_fatal() {
        let mut b = TreeBuilder::new();
        let node = ParseNode::with_children(
            "contractDefinition",
            vec![b.tok("abstract"), ident(&mut b, "A"), b.tok("{"), b.tok("}")],
        );
        let err = Transformer::default().visit(&node).unwrap_err();
        assert!(matches!(
            err,
            TransformError::UnrecognizedShape {
                rule: "contractDefinition",
                ..
            }
        ));
    }
}
