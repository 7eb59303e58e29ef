//! # Parse Tree to AST Transformation
//!
//! The [`Transformer`] walks a [`ParseNode`] tree depth first. Each node's
//! rule selects one transformation, which asks the walker for the children it
//! needs and returns a [`NodeKind`]; the walker then stamps the result with
//! the span of the node it came from.
//!
//! Rules without a transformation of their own produce a
//! [`NodeKind::Generic`] node. Known rules with a shape their transformation
//! does not recognize abort the pass.
//!
//! ## Example
//!
//! ```rust
//! use solidity_ast::cst::{ParseNode, TreeBuilder};
//! use solidity_ast::visitor::cst_to_ast::Transformer;
//! use solidity_ast::NodeKind;
//!
//! let mut b = TreeBuilder::new();
//! let ident = ParseNode::with_children("identifier", vec![b.tok("owner")]);
//! let node = Transformer::default().visit(&ident).unwrap();
//! assert_eq!(node.kind, NodeKind::Identifier { name: "owner".into() });
//! ```

mod assembly;
mod declarations;
mod directives;
mod expressions;
pub mod lists;
pub mod modifiers;
mod statements;
mod types;

pub use expressions::{BINARY_OPERATORS, POSTFIX_OPERATORS, PREFIX_OPERATORS};

use config::constants::{TransformConfig, STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};
use tracing::{debug, trace};

use crate::ast::{Node, NodeKind};
use crate::context::TransformContext;
use crate::cst::{ParseNode, Rule};
use crate::error::TransformError;

// =============================================================================
// TRANSFORMER
// =============================================================================

/// Walker state for one transformation pass.
#[derive(Debug, Default)]
pub struct Transformer {
    context: TransformContext,
    config: TransformConfig,
    depth: usize,
}

impl Transformer {
    /// Creates a walker with a fresh context.
    pub fn new(config: TransformConfig) -> Self {
        Self {
            context: TransformContext::new(),
            config,
            depth: 0,
        }
    }

    /// Per-pass context.
    pub fn context(&self) -> &TransformContext {
        &self.context
    }

    /// Transforms one node, stamping the result with the node's span.
    ///
    /// # Errors
    ///
    /// Fails when the node, or any node below it, has a shape its rule does
    /// not allow, or when nesting exceeds the configured depth.
    pub fn visit(&mut self, node: &ParseNode) -> Result<Node, TransformError> {
        if self.depth >= self.config.max_depth {
            return Err(TransformError::DepthLimitExceeded {
                limit: self.config.max_depth,
                span: node.span(),
            });
        }

        self.depth += 1;
        let result = stacker::maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || {
            self.dispatch(node)
        });
        self.depth -= 1;

        Ok(Node::new(result?, node.span()))
    }

    /// Transforms an optional grammar slot.
    pub fn visit_opt(&mut self, node: Option<&ParseNode>) -> Result<Option<Node>, TransformError> {
        node.map(|n| self.visit(n)).transpose()
    }

    /// Transforms a sequence of nodes, preserving order.
    pub fn visit_all<'a, I>(&mut self, nodes: I) -> Result<Vec<Node>, TransformError>
    where
        I: IntoIterator<Item = &'a ParseNode>,
    {
        nodes.into_iter().map(|n| self.visit(n)).collect()
    }

    pub(crate) fn boxed(&mut self, node: &ParseNode) -> Result<Box<Node>, TransformError> {
        self.visit(node).map(Box::new)
    }

    pub(crate) fn boxed_opt(
        &mut self,
        node: Option<&ParseNode>,
    ) -> Result<Option<Box<Node>>, TransformError> {
        Ok(self.visit_opt(node)?.map(Box::new))
    }

    /// Transforms a node and keeps only its variant, for rules that take
    /// over their child's meaning and span.
    pub(crate) fn pass_through(&mut self, node: &ParseNode) -> Result<NodeKind, TransformError> {
        let inner = child_at(node, 0, "inner node")?;
        Ok(self.visit(inner)?.kind)
    }

    fn dispatch(&mut self, node: &ParseNode) -> Result<NodeKind, TransformError> {
        let Some(rule) = node.kind() else {
            return Ok(fallback(node));
        };
        trace!(
            rule = rule.name(),
            start = node.start_index,
            end = node.end_index,
            "visiting rule"
        );

        match rule {
            // Directives
            Rule::SourceUnit => self.source_unit(node),
            Rule::PragmaDirective => self.pragma_directive(node),
            Rule::VersionConstraint => self.version_constraint(node),
            Rule::ImportDirective => self.import_directive(node),
            Rule::ImportDeclaration => self.import_declaration(node),

            // Declarations
            Rule::ContractDefinition => self.contract_definition(node),
            Rule::InheritanceSpecifier => self.inheritance_specifier(node),
            Rule::ContractPart | Rule::StructVariableDeclaration => self.pass_through(node),
            Rule::ReturnParameters => Ok(self.visit(child_of(node, Rule::ParameterList)?)?.kind),
            Rule::StateVariableDeclaration => self.state_variable_declaration(node),
            Rule::UsingForDeclaration => self.using_for_declaration(node),
            Rule::StructDefinition => self.struct_definition(node),
            Rule::ModifierDefinition => self.modifier_definition(node),
            Rule::ModifierInvocation => self.modifier_invocation(node),
            Rule::FunctionDefinition => self.function_definition(node),
            Rule::EventDefinition => self.event_definition(node),
            Rule::EnumDefinition => self.enum_definition(node),
            Rule::EnumValue => self.enum_value(node),
            Rule::ParameterList => self.parameter_list(node),
            Rule::Parameter => self.parameter(node),
            Rule::IndexedParameterList => self.indexed_parameter_list(node),
            Rule::IndexedParameter => self.indexed_parameter(node),
            Rule::UnnamedParameter => self.unnamed_parameter(node),
            Rule::VariableDeclaration => self.variable_declaration(node),

            // Types
            Rule::TypeName => self.type_name(node),
            Rule::ElementaryTypeName => Ok(NodeKind::ElementaryTypeName { name: node.text() }),
            Rule::UserDefinedTypeName => Ok(NodeKind::UserDefinedTypeName {
                name_path: node.text(),
            }),
            Rule::Mapping => self.mapping(node),
            Rule::FunctionTypeName => self.function_type_name(node),

            // Statements
            Rule::Block => self.block(node),
            Rule::Statement | Rule::SimpleStatement => self.pass_through(node),
            Rule::ExpressionStatement => self.expression_statement(node),
            Rule::IfStatement => self.if_statement(node),
            Rule::WhileStatement => self.while_statement(node),
            Rule::DoWhileStatement => self.do_while_statement(node),
            Rule::ForStatement => self.for_statement(node),
            Rule::ReturnStatement => self.return_statement(node),
            Rule::ContinueStatement => Ok(NodeKind::ContinueStatement),
            Rule::BreakStatement => Ok(NodeKind::BreakStatement),
            Rule::ThrowStatement => Ok(NodeKind::ThrowStatement),
            Rule::EmitStatement => self.emit_statement(node),
            Rule::VariableDeclarationStatement => self.variable_declaration_statement(node),
            Rule::InlineAssemblyStatement => self.inline_assembly_statement(node),

            // Expressions
            Rule::Expression => self.expression(node),
            Rule::FunctionCall => self.function_call_rule(node),
            Rule::PrimaryExpression => self.primary_expression(node),
            Rule::TupleExpression => self.tuple_expression(node),
            Rule::ElementaryTypeNameExpression => self.elementary_type_name_expression(node),
            Rule::NumberLiteral => expressions::number_literal(node),
            Rule::Identifier => Ok(NodeKind::Identifier { name: node.text() }),

            // Inline assembly
            Rule::AssemblyBlock => self.assembly_block(node),
            Rule::AssemblyItem => self.assembly_item(node),
            Rule::AssemblyExpression => self.pass_through(node),
            Rule::AssemblyCall => self.assembly_call(node),
            Rule::AssemblyLiteral => assembly::assembly_literal(node),
            Rule::AssemblySwitch => self.assembly_switch(node),
            Rule::AssemblyCase => self.assembly_case(node),
            Rule::AssemblyLocalDefinition => self.assembly_local_definition(node),
            Rule::AssemblyAssignment => self.assembly_assignment(node),
            Rule::AssemblyStackAssignment => Ok(NodeKind::AssemblyStackAssignment {
                name: child_of(node, Rule::Identifier)?.text(),
            }),
            Rule::LabelDefinition => Ok(NodeKind::LabelDefinition {
                name: child_at(node, 0, "label")?.text(),
            }),
            Rule::AssemblyFunctionDefinition => self.assembly_function_definition(node),
            Rule::AssemblyFor => self.assembly_for(node),
            Rule::AssemblyIf => self.assembly_if(node),

            // Auxiliary rules, consumed by their parents
            Rule::PragmaName
            | Rule::PragmaValue
            | Rule::Version
            | Rule::VersionOperator
            | Rule::ModifierList
            | Rule::TypeNameList
            | Rule::StorageLocation
            | Rule::StateMutability
            | Rule::VariableDeclarationList
            | Rule::IdentifierList
            | Rule::ExpressionList
            | Rule::NameValueList
            | Rule::NameValue
            | Rule::FunctionCallArguments
            | Rule::AssemblyIdentifierOrList
            | Rule::AssemblyIdentifierList
            | Rule::AssemblyFunctionReturns
            | Rule::SubAssembly => Ok(fallback(node)),
        }
    }

    fn source_unit(&mut self, node: &ParseNode) -> Result<NodeKind, TransformError> {
        let mut items = node.children.as_slice();
        if self.config.strip_eof {
            if let Some((last, rest)) = items.split_last() {
                if last.is_eof() {
                    items = rest;
                }
            }
        }
        Ok(NodeKind::Program {
            body: self.visit_all(items)?,
        })
    }
}

// =============================================================================
// HELPERS
// =============================================================================

/// Node for a terminal or for a rule with no transformation of its own.
fn fallback(node: &ParseNode) -> NodeKind {
    match &node.rule {
        None => NodeKind::Terminal {
            text: node.text.clone().unwrap_or_default(),
        },
        Some(rule) => {
            debug!(
                rule = %rule,
                start = node.start_index,
                end = node.end_index,
                "no transformation for rule, emitting generic node"
            );
            NodeKind::Generic { rule: rule.clone() }
        }
    }
}

/// Name used in error reports for the rule `node` applies.
pub(crate) fn rule_name(node: &ParseNode) -> &'static str {
    node.kind().map(Rule::name).unwrap_or("token")
}

pub(crate) fn missing(node: &ParseNode, expected: &'static str) -> TransformError {
    TransformError::MissingChild {
        rule: rule_name(node),
        expected,
        span: node.span(),
    }
}

pub(crate) fn unrecognized(node: &ParseNode, detail: impl Into<String>) -> TransformError {
    TransformError::UnrecognizedShape {
        rule: rule_name(node),
        span: node.span(),
        detail: detail.into(),
    }
}

/// First child applying `wanted`, which the production guarantees.
pub(crate) fn child_of(node: &ParseNode, wanted: Rule) -> Result<&ParseNode, TransformError> {
    node.find_child(wanted).ok_or_else(|| missing(node, wanted.name()))
}

/// Child at `index`, which the production guarantees.
pub(crate) fn child_at<'n>(
    node: &'n ParseNode,
    index: usize,
    expected: &'static str,
) -> Result<&'n ParseNode, TransformError> {
    node.child(index).ok_or_else(|| missing(node, expected))
}

/// Removes the surrounding quote characters of a string token.
pub(crate) fn strip_quotes(text: &str) -> &str {
    if text.len() < 2 {
        return text;
    }
    text.get(1..text.len() - 1).unwrap_or(text)
}

/// Flattened type spelling for a declaration's `Type` node.
pub(crate) fn type_literal(type_name: &Node) -> Option<String> {
    match &type_name.kind {
        NodeKind::ElementaryTypeName { name } => Some(name.clone()),
        NodeKind::UserDefinedTypeName { name_path } => Some(name_path.clone()),
        _ => None,
    }
}

// =============================================================================
// TESTS
// =============================================================================
