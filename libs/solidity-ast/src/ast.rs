//! # Solidity AST
//!
//! Typed abstract syntax tree produced from the parse tree. Every node pairs a
//! [`NodeKind`] with the [`Span`] of the parse node it was built from.
//!
//! ## Serialized Layout
//!
//! Nodes serialize as flat objects tagged by `type`, with camelCase field
//! names and the span as `start`/`end`:
//!
//! ```text
//! {"type": "BinaryOperation", "operator": "+", "left": {..}, "right": {..}, "start": 0, "end": 5}
//! ```
//!
//! Optional slots serialize as `null`; tuple and declaration lists with
//! omitted elements carry `null` in the omitted positions.

use serde::{Deserialize, Serialize};

use crate::span::Span;

// =============================================================================
// NODE
// =============================================================================

/// An AST node: a variant plus its source span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    #[serde(flatten)]
    pub kind: NodeKind,
    #[serde(flatten)]
    pub span: Span,
}

impl Node {
    /// Creates a node.
    pub fn new(kind: NodeKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Name of the variant as it appears in the serialized `type` field.
    pub fn type_name(&self) -> &'static str {
        self.kind.type_name()
    }

    /// Direct child nodes in field order; omitted slots are skipped.
    ///
    /// # Example
    ///
    /// ```rust
    /// use solidity_ast::{Node, NodeKind, Span};
    ///
    /// let leaf = |n: &str, s| Node::new(NodeKind::Identifier { name: n.into() }, Span::new(s, s + 1));
    /// let add = Node::new(
    ///     NodeKind::BinaryOperation {
    ///         operator: "+".into(),
    ///         left: Box::new(leaf("a", 0)),
    ///         right: Box::new(leaf("b", 4)),
    ///     },
    ///     Span::new(0, 5),
    /// );
    /// assert_eq!(add.children().len(), 2);
    /// ```
    pub fn children(&self) -> Vec<&Node> {
        use NodeKind::*;

        let mut out: Vec<&Node> = Vec::new();
        match &self.kind {
            Program { body } => out.extend(body),
            PragmaStatement {
                start_version,
                end_version,
            } => {
                out.extend(start_version.as_deref());
                out.extend(end_version.as_deref());
            }
            ExperimentalPragmaStatement { feature } => out.push(feature),
            ImportStatement { symbols, .. } => out.extend(symbols),
            ContractStatement { is, body, .. }
            | InterfaceStatement { is, body, .. }
            | LibraryStatement { is, body, .. } => {
                out.extend(is);
                out.extend(body);
            }
            InheritanceSpecifier {
                base_name,
                arguments,
            } => {
                out.push(base_name);
                out.extend(arguments);
            }
            UsingForDeclaration { type_name, .. } => out.extend(type_name.as_deref()),
            StructDeclaration { body, .. } => out.extend(body),
            EnumDefinition { members, .. } => out.extend(members),
            EventDefinition { parameters, .. } => out.push(parameters),
            ModifierDefinition {
                parameters, body, ..
            } => {
                out.extend(parameters.as_deref());
                out.push(body);
            }
            ModifierInvocation { arguments, .. } => out.extend(arguments),
            FunctionDeclaration {
                params,
                return_parameters,
                modifiers,
                body,
                ..
            } => {
                out.push(params);
                out.extend(modifiers);
                out.extend(return_parameters.as_deref());
                out.extend(body.as_deref());
            }
            StateVariableDeclaration {
                type_name,
                literal,
                value,
                ..
            } => {
                out.push(type_name);
                out.push(literal);
                out.extend(value.as_deref());
            }
            ParameterList { parameters } => out.extend(parameters),
            Parameter { type_name, .. } => out.push(type_name),
            VariableDeclaration { type_name, .. } => out.extend(type_name.as_deref()),
            DeclarativeExpression {
                type_name, literal, ..
            } => {
                out.push(type_name);
                out.push(literal);
            }
            ArrayTypeName {
                base_type_name,
                length,
            } => {
                out.push(base_type_name);
                out.extend(length.as_deref());
            }
            Mapping {
                key_type,
                value_type,
            } => {
                out.push(key_type);
                out.push(value_type);
            }
            FunctionTypeName {
                parameter_types,
                return_types,
                ..
            } => {
                out.extend(parameter_types);
                out.extend(return_types);
            }
            ElementaryTypeNameExpression { type_name } => out.push(type_name),
            Block { statements } => out.extend(statements),
            ExpressionStatement { expression } => out.push(expression),
            IfStatement {
                condition,
                true_body,
                false_body,
            } => {
                out.push(condition);
                out.push(true_body);
                out.extend(false_body.as_deref());
            }
            WhileStatement { condition, body } => {
                out.push(condition);
                out.push(body);
            }
            DoWhileStatement { condition, body } => {
                out.push(body);
                out.push(condition);
            }
            ForStatement {
                init_expression,
                condition_expression,
                loop_expression,
                body,
            } => {
                out.extend(init_expression.as_deref());
                out.extend(condition_expression.as_deref());
                out.extend(loop_expression.as_deref());
                out.push(body);
            }
            ReturnStatement { expression } => out.extend(expression.as_deref()),
            EmitStatement { event_call } => out.push(event_call),
            VariableDeclarationStatement {
                variables,
                initial_value,
            } => {
                out.extend(variables.iter().flatten());
                out.extend(initial_value.as_deref());
            }
            NewExpression { type_name } => out.push(type_name),
            UnaryOperation { sub_expression, .. } => out.push(sub_expression),
            BinaryOperation { left, right, .. } => {
                out.push(left);
                out.push(right);
            }
            TupleExpression { components, .. } => out.extend(components.iter().flatten()),
            MemberAccess { expression, .. } => out.push(expression),
            FunctionCall {
                expression,
                arguments,
                ..
            } => {
                out.push(expression);
                out.extend(arguments);
            }
            IndexAccess { base, index } => {
                out.push(base);
                out.push(index);
            }
            Conditional {
                condition,
                true_expression,
                false_expression,
            } => {
                out.push(condition);
                out.push(true_expression);
                out.push(false_expression);
            }
            InlineAssemblyStatement { body, .. } => out.push(body),
            AssemblyBlock { operations } => out.extend(operations),
            AssemblyCall { arguments, .. } => out.extend(arguments),
            AssemblySwitch { expression, cases } => {
                out.push(expression);
                out.extend(cases);
            }
            AssemblyCase { value, block, .. } => {
                out.extend(value.as_deref());
                out.push(block);
            }
            AssemblyLocalDefinition { names, expression } => {
                out.extend(names);
                out.extend(expression.as_deref());
            }
            AssemblyAssignment { names, expression } => {
                out.extend(names);
                out.push(expression);
            }
            AssemblyFunctionDefinition {
                arguments,
                return_arguments,
                body,
                ..
            } => {
                out.extend(arguments);
                out.extend(return_arguments);
                out.push(body);
            }
            AssemblyFor {
                pre,
                condition,
                post,
                body,
            } => {
                out.push(pre);
                out.push(condition);
                out.push(post);
                out.push(body);
            }
            AssemblyIf { condition, body } => {
                out.push(condition);
                out.push(body);
            }
            PragmaDirective { .. }
            | VersionLiteral { .. }
            | Symbol { .. }
            | EnumValue { .. }
            | Type { .. }
            | ElementaryTypeName { .. }
            | UserDefinedTypeName { .. }
            | ContinueStatement
            | BreakStatement
            | ThrowStatement
            | BooleanLiteral { .. }
            | HexLiteral { .. }
            | StringLiteral { .. }
            | NumberLiteral { .. }
            | Identifier { .. }
            | DecimalNumber { .. }
            | HexNumber { .. }
            | LabelDefinition { .. }
            | AssemblyStackAssignment { .. }
            | Break
            | Continue
            | Generic { .. }
            | Terminal { .. } => {}
        }
        out
    }

    /// Visits this node and every descendant, parents before children.
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a Node)) {
        f(self);
        for child in self.children() {
            child.walk(f);
        }
    }
}

// =============================================================================
// VISIBILITY
// =============================================================================

/// Declared visibility of a function, state variable or function type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Default,
    External,
    Internal,
    Public,
    Private,
}

impl Visibility {
    /// Parses a visibility keyword.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "external" => Some(Visibility::External),
            "internal" => Some(Visibility::Internal),
            "public" => Some(Visibility::Public),
            "private" => Some(Visibility::Private),
            _ => None,
        }
    }
}

// =============================================================================
// NODE KIND
// =============================================================================

/// Every AST construct.
///
/// Grouped by source-unit items, contract members, types, statements,
/// expressions and inline assembly, followed by the two fall-backs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum NodeKind {
    // Source unit
    /// Root of a compilation unit.
    Program { body: Vec<Node> },
    /// `pragma solidity <range>;`
    PragmaStatement {
        start_version: Option<Box<Node>>,
        end_version: Option<Box<Node>>,
    },
    /// One endpoint of a version range, e.g. `^0.8.0`.
    VersionLiteral {
        operator: Option<String>,
        version: String,
    },
    /// `pragma experimental <feature>;`
    ExperimentalPragmaStatement { feature: Box<Node> },
    /// Any other pragma, kept as raw text.
    PragmaDirective { name: String, value: String },
    /// `import ...;`
    ImportStatement {
        from: String,
        alias: Option<String>,
        symbols: Vec<Node>,
    },
    /// One `{name as alias}` entry of an import.
    Symbol { name: String, alias: Option<String> },

    // Contracts
    ContractStatement {
        name: String,
        is: Vec<Node>,
        body: Vec<Node>,
    },
    InterfaceStatement {
        name: String,
        is: Vec<Node>,
        body: Vec<Node>,
    },
    LibraryStatement {
        name: String,
        is: Vec<Node>,
        body: Vec<Node>,
    },
    InheritanceSpecifier {
        base_name: Box<Node>,
        arguments: Vec<Node>,
    },
    /// `using L for T;`, `type_name` is `None` for `*`.
    UsingForDeclaration {
        library_name: String,
        type_name: Option<Box<Node>>,
    },
    StructDeclaration { name: String, body: Vec<Node> },
    EnumDefinition { name: String, members: Vec<Node> },
    EnumValue { name: String },
    EventDefinition {
        name: String,
        parameters: Box<Node>,
        is_anonymous: bool,
    },
    ModifierDefinition {
        name: String,
        parameters: Option<Box<Node>>,
        body: Box<Node>,
    },
    ModifierInvocation { name: String, arguments: Vec<Node> },
    FunctionDeclaration {
        name: String,
        params: Box<Node>,
        return_parameters: Option<Box<Node>>,
        body: Option<Box<Node>>,
        visibility: Visibility,
        modifiers: Vec<Node>,
        is_constructor: bool,
        state_mutability: Option<String>,
    },
    StateVariableDeclaration {
        type_name: Box<Node>,
        literal: Box<Node>,
        name: String,
        visibility: Option<Visibility>,
        is_constant: bool,
        value: Option<Box<Node>>,
    },

    // Parameters and variables
    ParameterList { parameters: Vec<Node> },
    Parameter {
        type_name: Box<Node>,
        name: Option<String>,
        storage_location: Option<String>,
        is_state_var: bool,
        is_indexed: bool,
    },
    VariableDeclaration {
        type_name: Option<Box<Node>>,
        name: Option<String>,
        storage_location: Option<String>,
        is_state_var: bool,
        is_indexed: bool,
    },
    /// A typed local declaration, e.g. `uint256 memory x`.
    DeclarativeExpression {
        name: String,
        type_name: Box<Node>,
        literal: Box<Node>,
        storage_location: Option<String>,
        is_state_var: bool,
        is_indexed: bool,
    },
    /// Flattened type spelling attached to declarations, spanning the
    /// declared identifier.
    Type { literal: Option<String> },

    // Types
    ElementaryTypeName { name: String },
    UserDefinedTypeName { name_path: String },
    ArrayTypeName {
        base_type_name: Box<Node>,
        length: Option<Box<Node>>,
    },
    Mapping {
        key_type: Box<Node>,
        value_type: Box<Node>,
    },
    FunctionTypeName {
        parameter_types: Vec<Node>,
        return_types: Vec<Node>,
        visibility: Visibility,
        state_mutability: Option<String>,
    },
    ElementaryTypeNameExpression { type_name: Box<Node> },

    // Statements
    Block { statements: Vec<Node> },
    ExpressionStatement { expression: Box<Node> },
    IfStatement {
        condition: Box<Node>,
        true_body: Box<Node>,
        false_body: Option<Box<Node>>,
    },
    WhileStatement {
        condition: Box<Node>,
        body: Box<Node>,
    },
    DoWhileStatement {
        condition: Box<Node>,
        body: Box<Node>,
    },
    ForStatement {
        init_expression: Option<Box<Node>>,
        condition_expression: Option<Box<Node>>,
        loop_expression: Option<Box<Node>>,
        body: Box<Node>,
    },
    ReturnStatement { expression: Option<Box<Node>> },
    ContinueStatement,
    BreakStatement,
    ThrowStatement,
    EmitStatement { event_call: Box<Node> },
    VariableDeclarationStatement {
        variables: Vec<Option<Node>>,
        initial_value: Option<Box<Node>>,
    },

    // Expressions
    NewExpression { type_name: Box<Node> },
    UnaryOperation {
        operator: String,
        sub_expression: Box<Node>,
        is_prefix: bool,
    },
    BinaryOperation {
        operator: String,
        left: Box<Node>,
        right: Box<Node>,
    },
    TupleExpression {
        components: Vec<Option<Node>>,
        is_array: bool,
    },
    MemberAccess {
        expression: Box<Node>,
        member_name: String,
    },
    FunctionCall {
        expression: Box<Node>,
        arguments: Vec<Node>,
        names: Vec<String>,
    },
    IndexAccess { base: Box<Node>, index: Box<Node> },
    Conditional {
        condition: Box<Node>,
        true_expression: Box<Node>,
        false_expression: Box<Node>,
    },
    BooleanLiteral { value: bool },
    HexLiteral { value: String },
    StringLiteral { value: String },
    NumberLiteral {
        number: String,
        subdenomination: Option<String>,
    },
    Identifier { name: String },

    // Inline assembly
    InlineAssemblyStatement {
        language: Option<String>,
        body: Box<Node>,
    },
    AssemblyBlock { operations: Vec<Node> },
    AssemblyCall {
        function_name: String,
        arguments: Vec<Node>,
    },
    DecimalNumber { value: String },
    HexNumber { value: String },
    AssemblySwitch {
        expression: Box<Node>,
        cases: Vec<Node>,
    },
    /// `case <value> {..}` or, with `default` set, `default {..}`.
    AssemblyCase {
        value: Option<Box<Node>>,
        block: Box<Node>,
        default: bool,
    },
    AssemblyLocalDefinition {
        names: Vec<Node>,
        expression: Option<Box<Node>>,
    },
    AssemblyAssignment {
        names: Vec<Node>,
        expression: Box<Node>,
    },
    AssemblyFunctionDefinition {
        name: String,
        arguments: Vec<Node>,
        return_arguments: Vec<Node>,
        body: Box<Node>,
    },
    LabelDefinition { name: String },
    /// `=: name`
    AssemblyStackAssignment { name: String },
    AssemblyFor {
        pre: Box<Node>,
        condition: Box<Node>,
        post: Box<Node>,
        body: Box<Node>,
    },
    AssemblyIf {
        condition: Box<Node>,
        body: Box<Node>,
    },
    Break,
    Continue,

    // Fall-backs
    /// A rule with no dedicated transformation; carries only its name.
    Generic { rule: String },
    /// A bare token visited directly.
    Terminal { text: String },
}

impl NodeKind {
    /// Name of the variant as it appears in the serialized `type` field.
    pub fn type_name(&self) -> &'static str {
        use NodeKind::*;

        match self {
            Program { .. } => "Program",
            PragmaStatement { .. } => "PragmaStatement",
            VersionLiteral { .. } => "VersionLiteral",
            ExperimentalPragmaStatement { .. } => "ExperimentalPragmaStatement",
            PragmaDirective { .. } => "PragmaDirective",
            ImportStatement { .. } => "ImportStatement",
            Symbol { .. } => "Symbol",
            ContractStatement { .. } => "ContractStatement",
            InterfaceStatement { .. } => "InterfaceStatement",
            LibraryStatement { .. } => "LibraryStatement",
            InheritanceSpecifier { .. } => "InheritanceSpecifier",
            UsingForDeclaration { .. } => "UsingForDeclaration",
            StructDeclaration { .. } => "StructDeclaration",
            EnumDefinition { .. } => "EnumDefinition",
            EnumValue { .. } => "EnumValue",
            EventDefinition { .. } => "EventDefinition",
            ModifierDefinition { .. } => "ModifierDefinition",
            ModifierInvocation { .. } => "ModifierInvocation",
            FunctionDeclaration { .. } => "FunctionDeclaration",
            StateVariableDeclaration { .. } => "StateVariableDeclaration",
            ParameterList { .. } => "ParameterList",
            Parameter { .. } => "Parameter",
            VariableDeclaration { .. } => "VariableDeclaration",
            DeclarativeExpression { .. } => "DeclarativeExpression",
            Type { .. } => "Type",
            ElementaryTypeName { .. } => "ElementaryTypeName",
            UserDefinedTypeName { .. } => "UserDefinedTypeName",
            ArrayTypeName { .. } => "ArrayTypeName",
            Mapping { .. } => "Mapping",
            FunctionTypeName { .. } => "FunctionTypeName",
            ElementaryTypeNameExpression { .. } => "ElementaryTypeNameExpression",
            Block { .. } => "Block",
            ExpressionStatement { .. } => "ExpressionStatement",
            IfStatement { .. } => "IfStatement",
            WhileStatement { .. } => "WhileStatement",
            DoWhileStatement { .. } => "DoWhileStatement",
            ForStatement { .. } => "ForStatement",
            ReturnStatement { .. } => "ReturnStatement",
            ContinueStatement => "ContinueStatement",
            BreakStatement => "BreakStatement",
            ThrowStatement => "ThrowStatement",
            EmitStatement { .. } => "EmitStatement",
            VariableDeclarationStatement { .. } => "VariableDeclarationStatement",
            NewExpression { .. } => "NewExpression",
            UnaryOperation { .. } => "UnaryOperation",
            BinaryOperation { .. } => "BinaryOperation",
            TupleExpression { .. } => "TupleExpression",
            MemberAccess { .. } => "MemberAccess",
            FunctionCall { .. } => "FunctionCall",
            IndexAccess { .. } => "IndexAccess",
            Conditional { .. } => "Conditional",
            BooleanLiteral { .. } => "BooleanLiteral",
            HexLiteral { .. } => "HexLiteral",
            StringLiteral { .. } => "StringLiteral",
            NumberLiteral { .. } => "NumberLiteral",
            Identifier { .. } => "Identifier",
            InlineAssemblyStatement { .. } => "InlineAssemblyStatement",
            AssemblyBlock { .. } => "AssemblyBlock",
            AssemblyCall { .. } => "AssemblyCall",
            DecimalNumber { .. } => "DecimalNumber",
            HexNumber { .. } => "HexNumber",
            AssemblySwitch { .. } => "AssemblySwitch",
            AssemblyCase { .. } => "AssemblyCase",
            AssemblyLocalDefinition { .. } => "AssemblyLocalDefinition",
            AssemblyAssignment { .. } => "AssemblyAssignment",
            AssemblyFunctionDefinition { .. } => "AssemblyFunctionDefinition",
            LabelDefinition { .. } => "LabelDefinition",
            AssemblyStackAssignment { .. } => "AssemblyStackAssignment",
            AssemblyFor { .. } => "AssemblyFor",
            AssemblyIf { .. } => "AssemblyIf",
            Break => "Break",
            Continue => "Continue",
            Generic { .. } => "Generic",
            Terminal { .. } => "Terminal",
        }
    }
}
