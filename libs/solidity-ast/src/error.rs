//! # Transform Errors
//!
//! Fatal conditions that abort a transformation pass. A rule the crate does
//! not know is not an error; it becomes a generic node instead.

use thiserror::Error;

use crate::span::Span;

/// Errors that can occur while transforming a parse tree.
#[derive(Debug, Error)]
pub enum TransformError {
    /// An expression node whose child count and tokens match no known form
    #[error("unrecognized expression with {arity} children at {}..{}", span.start(), span.end())]
    UnrecognizedExpression { span: Span, arity: usize },

    /// A node of a known rule with a shape the rule cannot take
    #[error("unrecognized {rule} at {}..{}: {detail}", span.start(), span.end())]
    UnrecognizedShape {
        rule: &'static str,
        span: Span,
        detail: String,
    },

    /// A child the grammar production always provides is absent
    #[error("{rule} at {}..{} is missing its {expected}", span.start(), span.end())]
    MissingChild {
        rule: &'static str,
        expected: &'static str,
        span: Span,
    },

    /// Nesting exceeded the configured depth limit
    #[error("nesting deeper than {limit} levels at {}..{}", span.start(), span.end())]
    DepthLimitExceeded { limit: usize, span: Span },

    /// JSON input was not a parse node, or the AST could not be written
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The external parser rejected the source text
    #[error("parse failed: {0}")]
    Parse(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl TransformError {
    /// Source span the error points at, when it has one.
    pub fn span(&self) -> Option<Span> {
        match self {
            TransformError::UnrecognizedExpression { span, .. }
            | TransformError::UnrecognizedShape { span, .. }
            | TransformError::MissingChild { span, .. }
            | TransformError::DepthLimitExceeded { span, .. } => Some(*span),
            TransformError::Json(_) | TransformError::Parse(_) => None,
        }
    }
}
