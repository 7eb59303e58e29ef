//! # Solidity AST Crate
//!
//! Converts the concrete parse tree of a Solidity compilation unit into a
//! typed, position-annotated AST for linters, analyzers and code generators.
//! Every node carries the source span of the parse node it came from.
//!
//! ## Architecture
//!
//! ### In process
//!
//! ```text
//! Solidity Source → SourceParser (external) → ParseNode → solidity-ast → Node
//! ```
//!
//! ### Across a process boundary
//!
//! ```text
//! Solidity Source → grammar parser (any runtime) → parse tree JSON → solidity-ast → Node
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use solidity_ast::cst::{ParseNode, TreeBuilder};
//! use solidity_ast::{transform, NodeKind};
//!
//! let mut b = TreeBuilder::new();
//! let unit = ParseNode::with_children("sourceUnit", vec![b.eof()]);
//! let program = transform(&unit).unwrap();
//! assert_eq!(program.kind, NodeKind::Program { body: vec![] });
//! ```
//!
//! ## Design Principles
//!
//! - **Typed AST**: one enum variant per construct, serialized as `{"type": ...}`
//! - **Source Mapping**: every node carries `Span { start, end }`
//! - **Closed Shapes**: malformed expression, assembly literal, case and for
//!   shapes abort the pass; unknown rules become generic nodes
//! - **No Shared State**: each pass owns its context

pub mod ast;
pub mod context;
pub mod cst;
pub mod error;
pub mod span;
pub mod visitor;

// Re-exports for convenience
pub use ast::{Node, NodeKind, Visibility};
pub use config::constants::{TransformConfig, SCHEMA_VERSION};
pub use context::TransformContext;
pub use cst::{ParseNode, Rule, TokenKind, TreeBuilder};
pub use error::TransformError;
pub use span::Span;
pub use visitor::cst_to_ast::Transformer;

use serde::Serialize;
use tracing::instrument;

// =============================================================================
// PUBLIC API
// =============================================================================

/// Transforms a compilation unit with the default configuration.
///
/// # Errors
///
/// Returns a [`TransformError`] when a node's shape does not match its rule.
pub fn transform(root: &ParseNode) -> Result<Node, TransformError> {
    transform_with_config(root, &TransformConfig::default())
}

/// Transforms a compilation unit.
///
/// A fresh [`Transformer`], and with it a fresh context, is used for every
/// call.
#[instrument(level = "debug", skip_all, fields(start = root.start_index, end = root.end_index))]
pub fn transform_with_config(
    root: &ParseNode,
    config: &TransformConfig,
) -> Result<Node, TransformError> {
    Transformer::new(*config).visit(root)
}

/// Deserializes a JSON parse tree and transforms it.
///
/// # Example
///
/// ```rust
/// use solidity_ast::{transform_json, NodeKind};
///
/// let json = r#"{"rule": "sourceUnit", "startIndex": 0, "endIndex": 0,
///               "children": [{"text": "<EOF>", "token": "EOF", "startIndex": 0, "endIndex": 0}]}"#;
/// let program = transform_json(json).unwrap();
/// assert_eq!(program.kind, NodeKind::Program { body: vec![] });
/// ```
pub fn transform_json(json: &str) -> Result<Node, TransformError> {
    let root: ParseNode = serde_json::from_str(json)?;
    transform(&root)
}

/// Serialized AST tagged with the layout version it follows.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionedAst<'a> {
    pub schema_version: u32,
    pub ast: &'a Node,
}

/// Serializes an AST as `{"schemaVersion": .., "ast": ..}`.
///
/// # Example
///
/// ```rust
/// use solidity_ast::{to_json, Node, NodeKind, Span};
///
/// let program = Node::new(NodeKind::Program { body: vec![] }, Span::new(0, 0));
/// let json = to_json(&program).unwrap();
/// assert!(json.starts_with(r#"{"schemaVersion":1,"ast":{"type":"Program""#));
/// ```
pub fn to_json(ast: &Node) -> Result<String, TransformError> {
    let document = VersionedAst {
        schema_version: SCHEMA_VERSION,
        ast,
    };
    Ok(serde_json::to_string(&document)?)
}

/// A grammar-driven Solidity parser producing a parse tree.
pub trait SourceParser {
    /// Error reported for source text the parser rejects.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Parses a whole compilation unit.
    fn parse(&self, source: &str) -> Result<ParseNode, Self::Error>;
}

/// Parses `source` with `parser` and transforms the resulting tree.
///
/// # Errors
///
/// Parser failures surface as [`TransformError::Parse`].
pub fn transform_source<P: SourceParser>(parser: &P, source: &str) -> Result<Node, TransformError> {
    let root = parser
        .parse(source)
        .map_err(|err| TransformError::Parse(Box::new(err)))?;
    transform(&root)
}
