//! # Parse Tree Types
//!
//! Defines the concrete parse tree consumed by the transformer. The tree is
//! produced by an external grammar-driven Solidity parser and handed over
//! either in memory or as JSON.
//!
//! ## Architecture
//!
//! ```text
//! Parser process: Solidity Source → Lexer → Parser → Serialized parse tree (JSON)
//! This crate:     ParseNode → visitor::cst_to_ast → Node (AST)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use solidity_ast::cst::{ParseNode, TreeBuilder};
//!
//! let mut b = TreeBuilder::new();
//! let name = ParseNode::with_children("identifier", vec![b.tok("Token")]);
//! assert_eq!(name.text(), "Token");
//! assert_eq!(name.span().start(), 0);
//! ```

use serde::{Deserialize, Serialize};

use crate::span::Span;

// =============================================================================
// PARSE NODE
// =============================================================================

/// A node in the concrete parse tree.
///
/// Rule nodes carry the grammar rule name and their children in production
/// order; terminal nodes carry the token text and a token type tag.
///
/// # Fields
///
/// * `rule` - Grammar rule name (e.g. "sourceUnit", "expression"), `None` for tokens
/// * `text` - Token text, only present on terminals
/// * `token` - Token type tag, only present on terminals
/// * `start_index` - Start offset of the first token
/// * `end_index` - Stop offset of the last token
/// * `children` - Child nodes in grammar order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseNode {
    /// Grammar rule name, absent for terminal tokens
    #[serde(default)]
    pub rule: Option<String>,

    /// Literal token text
    #[serde(default)]
    pub text: Option<String>,

    /// Token type tag
    #[serde(default)]
    pub token: Option<TokenKind>,

    /// Start offset of the first token
    pub start_index: usize,

    /// Stop offset of the last token
    pub end_index: usize,

    /// Child nodes, empty for terminals
    #[serde(default)]
    pub children: Vec<ParseNode>,
}

impl ParseNode {
    /// Creates a terminal token node.
    pub fn terminal(kind: TokenKind, text: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            rule: None,
            text: Some(text.into()),
            token: Some(kind),
            start_index: start,
            end_index: end,
            children: Vec::new(),
        }
    }

    /// Creates a rule node whose span runs from its first child's start to
    /// its last child's end.
    ///
    /// A rule node without children gets an empty span at offset zero.
    pub fn with_children(rule: impl Into<String>, children: Vec<ParseNode>) -> Self {
        let start_index = children.first().map(|c| c.start_index).unwrap_or(0);
        let end_index = children.last().map(|c| c.end_index).unwrap_or(start_index);
        Self {
            rule: Some(rule.into()),
            text: None,
            token: None,
            start_index,
            end_index,
            children,
        }
    }

    /// Source span of this node.
    #[inline]
    pub fn span(&self) -> Span {
        Span::new(self.start_index, self.end_index)
    }

    /// True for terminal tokens.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.rule.is_none()
    }

    /// Resolves the rule name to a known grammar rule.
    ///
    /// Returns `None` for terminals and for rule names this crate does not
    /// know about.
    pub fn kind(&self) -> Option<Rule> {
        self.rule.as_deref().and_then(Rule::from_name)
    }

    /// Checks whether this node is an application of `rule`.
    pub fn is_rule(&self, rule: Rule) -> bool {
        self.rule.as_deref().is_some_and(|name| rule.matches(name))
    }

    /// Checks if this node is the end-of-input marker.
    pub fn is_eof(&self) -> bool {
        self.is_terminal()
            && (self.token == Some(TokenKind::Eof)
                || self.text.as_deref() == Some(config::constants::EOF_TOKEN_TEXT))
    }

    /// Token text when this node is a terminal.
    #[inline]
    pub fn token_text(&self) -> Option<&str> {
        if self.is_terminal() {
            self.text.as_deref()
        } else {
            None
        }
    }

    /// Concatenated text of every token below this node.
    ///
    /// Hidden tokens (whitespace, comments) are not part of the tree, so
    /// `uint [ ] memory` yields `uint[]memory`.
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if self.is_terminal() {
            if !self.is_eof() {
                out.push_str(self.text.as_deref().unwrap_or_default());
            }
            return;
        }
        for child in &self.children {
            child.collect_text(out);
        }
    }

    /// Child at `index`.
    #[inline]
    pub fn child(&self, index: usize) -> Option<&ParseNode> {
        self.children.get(index)
    }

    /// Token text of the child at `index`, if that child is a terminal.
    pub fn child_token(&self, index: usize) -> Option<&str> {
        self.child(index).and_then(ParseNode::token_text)
    }

    /// Finds the first child that applies `rule`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use solidity_ast::cst::{ParseNode, Rule, TreeBuilder};
    ///
    /// let mut b = TreeBuilder::new();
    /// let id = ParseNode::with_children("identifier", vec![b.tok("x")]);
    /// let expr = ParseNode::with_children("primaryExpression", vec![id]);
    /// assert!(expr.find_child(Rule::Identifier).is_some());
    /// ```
    pub fn find_child(&self, rule: Rule) -> Option<&ParseNode> {
        self.children.iter().find(|c| c.is_rule(rule))
    }

    /// Finds the `nth` child that applies `rule`.
    pub fn nth_child(&self, rule: Rule, nth: usize) -> Option<&ParseNode> {
        self.children_by_rule(rule).nth(nth)
    }

    /// All children that apply `rule`, in order.
    pub fn children_by_rule(&self, rule: Rule) -> impl Iterator<Item = &ParseNode> + '_ {
        self.children.iter().filter(move |c| c.is_rule(rule))
    }

    /// Token type of a terminal.
    ///
    /// Falls back to [`TokenKind::classify`] when the parser reported no tag
    /// or one this crate does not know.
    pub fn token_kind(&self) -> Option<TokenKind> {
        let text = self.token_text()?;
        match self.token {
            Some(kind) if kind != TokenKind::Other => Some(kind),
            _ => Some(TokenKind::classify(text)),
        }
    }

    /// Finds the first terminal child with the given token type.
    pub fn find_token(&self, kind: TokenKind) -> Option<&ParseNode> {
        self.children
            .iter()
            .find(|c| c.token_kind() == Some(kind))
    }

    /// Checks whether a direct terminal child has exactly this text.
    pub fn has_keyword(&self, keyword: &str) -> bool {
        self.children.iter().any(|c| c.token_text() == Some(keyword))
    }

    /// Index of the first direct terminal child with this text.
    pub fn position_of_token(&self, text: &str) -> Option<usize> {
        self.children.iter().position(|c| c.token_text() == Some(text))
    }
}

// =============================================================================
// TOKEN KIND
// =============================================================================

/// Token type tag attached to terminals by the lexer.
///
/// Keyword and operator tests are done by text; the tag only distinguishes
/// literal classes that share no fixed spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    Keyword,
    Operator,
    Identifier,
    BooleanLiteral,
    DecimalNumber,
    HexNumber,
    HexLiteral,
    StringLiteral,
    VersionLiteral,
    #[serde(rename = "EOF")]
    Eof,
    #[serde(other)]
    Other,
}

impl TokenKind {
    /// Guesses the token type from its spelling.
    ///
    /// Used by [`TreeBuilder::tok`]; a real lexer reports the type itself.
    pub fn classify(text: &str) -> Self {
        let first = text.chars().next();
        if text == config::constants::EOF_TOKEN_TEXT {
            TokenKind::Eof
        } else if text == "true" || text == "false" {
            TokenKind::BooleanLiteral
        } else if text.starts_with("hex\"") || text.starts_with("hex'") {
            TokenKind::HexLiteral
        } else if text.starts_with('"') || text.starts_with('\'') {
            TokenKind::StringLiteral
        } else if text.starts_with("0x") {
            TokenKind::HexNumber
        } else if first.is_some_and(|c| c.is_ascii_digit()) {
            if text.matches('.').count() == 2 {
                TokenKind::VersionLiteral
            } else {
                TokenKind::DecimalNumber
            }
        } else if first.is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$') {
            TokenKind::Identifier
        } else {
            TokenKind::Operator
        }
    }
}

// =============================================================================
// RULE
// =============================================================================

macro_rules! grammar_rules {
    ($($variant:ident => $name:literal,)*) => {
        /// Grammar rules of the Solidity parse tree.
        ///
        /// Names follow the grammar's lowerCamelCase rule names; the
        /// UpperCamelCase spelling some parser runtimes report is accepted
        /// as well.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Rule {
            $($variant,)*
        }

        impl Rule {
            /// Every known rule, in grammar order.
            pub const ALL: &'static [Rule] = &[$(Rule::$variant,)*];

            /// The grammar's name for this rule.
            pub fn name(self) -> &'static str {
                match self {
                    $(Rule::$variant => $name,)*
                }
            }

            fn lookup(name: &str) -> Option<Self> {
                match name {
                    $($name => Some(Rule::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

grammar_rules! {
    SourceUnit => "sourceUnit",
    PragmaDirective => "pragmaDirective",
    PragmaName => "pragmaName",
    PragmaValue => "pragmaValue",
    Version => "version",
    VersionConstraint => "versionConstraint",
    VersionOperator => "versionOperator",
    ImportDirective => "importDirective",
    ImportDeclaration => "importDeclaration",
    ContractDefinition => "contractDefinition",
    InheritanceSpecifier => "inheritanceSpecifier",
    ContractPart => "contractPart",
    StateVariableDeclaration => "stateVariableDeclaration",
    UsingForDeclaration => "usingForDeclaration",
    StructDefinition => "structDefinition",
    StructVariableDeclaration => "structVariableDeclaration",
    ModifierDefinition => "modifierDefinition",
    ModifierInvocation => "modifierInvocation",
    FunctionDefinition => "functionDefinition",
    ReturnParameters => "returnParameters",
    ModifierList => "modifierList",
    EventDefinition => "eventDefinition",
    EnumValue => "enumValue",
    EnumDefinition => "enumDefinition",
    ParameterList => "parameterList",
    Parameter => "parameter",
    IndexedParameterList => "indexedParameterList",
    IndexedParameter => "indexedParameter",
    TypeNameList => "typeNameList",
    UnnamedParameter => "unnamedParameter",
    VariableDeclaration => "variableDeclaration",
    TypeName => "typeName",
    UserDefinedTypeName => "userDefinedTypeName",
    Mapping => "mapping",
    FunctionTypeName => "functionTypeName",
    StorageLocation => "storageLocation",
    StateMutability => "stateMutability",
    Block => "block",
    Statement => "statement",
    ExpressionStatement => "expressionStatement",
    IfStatement => "ifStatement",
    WhileStatement => "whileStatement",
    SimpleStatement => "simpleStatement",
    ForStatement => "forStatement",
    InlineAssemblyStatement => "inlineAssemblyStatement",
    DoWhileStatement => "doWhileStatement",
    ContinueStatement => "continueStatement",
    BreakStatement => "breakStatement",
    ReturnStatement => "returnStatement",
    ThrowStatement => "throwStatement",
    EmitStatement => "emitStatement",
    VariableDeclarationStatement => "variableDeclarationStatement",
    VariableDeclarationList => "variableDeclarationList",
    IdentifierList => "identifierList",
    ElementaryTypeName => "elementaryTypeName",
    Expression => "expression",
    PrimaryExpression => "primaryExpression",
    ExpressionList => "expressionList",
    NameValueList => "nameValueList",
    NameValue => "nameValue",
    FunctionCallArguments => "functionCallArguments",
    FunctionCall => "functionCall",
    TupleExpression => "tupleExpression",
    ElementaryTypeNameExpression => "elementaryTypeNameExpression",
    NumberLiteral => "numberLiteral",
    Identifier => "identifier",
    AssemblyBlock => "assemblyBlock",
    AssemblyItem => "assemblyItem",
    AssemblyExpression => "assemblyExpression",
    AssemblyCall => "assemblyCall",
    AssemblyLocalDefinition => "assemblyLocalDefinition",
    AssemblyAssignment => "assemblyAssignment",
    AssemblyIdentifierOrList => "assemblyIdentifierOrList",
    AssemblyIdentifierList => "assemblyIdentifierList",
    AssemblyStackAssignment => "assemblyStackAssignment",
    LabelDefinition => "labelDefinition",
    AssemblySwitch => "assemblySwitch",
    AssemblyCase => "assemblyCase",
    AssemblyFunctionDefinition => "assemblyFunctionDefinition",
    AssemblyFunctionReturns => "assemblyFunctionReturns",
    AssemblyFor => "assemblyFor",
    AssemblyIf => "assemblyIf",
    AssemblyLiteral => "assemblyLiteral",
    SubAssembly => "subAssembly",
}

impl Rule {
    /// Resolves a rule name reported by the parser.
    ///
    /// # Example
    ///
    /// ```rust
    /// use solidity_ast::cst::Rule;
    ///
    /// assert_eq!(Rule::from_name("ifStatement"), Some(Rule::IfStatement));
    /// assert_eq!(Rule::from_name("IfStatement"), Some(Rule::IfStatement));
    /// assert_eq!(Rule::from_name("yulStatement"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<Self> {
        Self::lookup(name).or_else(|| {
            let mut chars = name.chars();
            let first = chars.next()?;
            if first.is_ascii_uppercase() {
                Self::lookup(&format!("{}{}", first.to_ascii_lowercase(), chars.as_str()))
            } else {
                None
            }
        })
    }

    /// Checks a reported rule name against this rule, ignoring the case of
    /// the first letter.
    pub fn matches(self, name: &str) -> bool {
        let own = self.name();
        match (own.split_at_checked(1), name.split_at_checked(1)) {
            (Some((a, rest_a)), Some((b, rest_b))) => {
                a.eq_ignore_ascii_case(b) && rest_a == rest_b
            }
            _ => false,
        }
    }
}

// =============================================================================
// TREE BUILDER
// =============================================================================

/// Lays out tokens at increasing byte offsets, one space apart.
///
/// Parser adapters that only produce token sequences, and tests, use it to
/// get a tree whose spans are consistent: every rule node built with
/// [`ParseNode::with_children`] covers exactly its tokens.
///
/// # Example
///
/// ```rust
/// use solidity_ast::cst::{ParseNode, TreeBuilder};
///
/// let mut b = TreeBuilder::new();
/// let a = b.tok("a");
/// let plus = b.tok("+");
/// let one = b.tok("1");
/// assert_eq!((plus.start_index, plus.end_index), (2, 3));
/// let expr = ParseNode::with_children("expression", vec![a, plus, one]);
/// assert_eq!(expr.span().end(), 5);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TreeBuilder {
    offset: usize,
}

impl TreeBuilder {
    /// Starts laying out tokens at offset zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits a token with an explicit type tag.
    pub fn token(&mut self, kind: TokenKind, text: &str) -> ParseNode {
        let start = self.offset;
        let end = start + text.len();
        self.offset = end + 1;
        ParseNode::terminal(kind, text, start, end)
    }

    /// Emits a token whose type is inferred from its spelling.
    pub fn tok(&mut self, text: &str) -> ParseNode {
        self.token(TokenKind::classify(text), text)
    }

    /// Emits the zero-width end-of-input marker.
    pub fn eof(&mut self) -> ParseNode {
        ParseNode::terminal(
            TokenKind::Eof,
            config::constants::EOF_TOKEN_TEXT,
            self.offset,
            self.offset,
        )
    }
}
