//! # Source Span
//!
//! Represents a range in the source code for error reporting and source
//! mapping. Every AST node carries the span of the parse node it was built
//! from.
//!
//! ## Usage
//!
//! ```rust
//! use solidity_ast::Span;
//!
//! let span = Span::new(0, 10);
//! assert_eq!(span.start(), 0);
//! assert_eq!(span.end(), 10);
//! assert_eq!(span.len(), 10);
//! ```

use serde::{Deserialize, Serialize};

/// A range in the source code, represented as byte offsets.
///
/// The offsets are copied verbatim from the parse tree: `start` is the
/// start offset of the node's first token, `end` the stop offset of its last
/// token.
///
/// # Example
///
/// ```rust
/// use solidity_ast::Span;
///
/// // For source "contract A {}" the span of "A" would be:
/// let span = Span::new(9, 10);
/// assert_eq!(span.len(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Start offset of the first token
    start: usize,
    /// Stop offset of the last token
    end: usize,
}

impl Span {
    /// Creates a new span from start and end byte offsets.
    ///
    /// # Example
    ///
    /// ```rust
    /// use solidity_ast::Span;
    ///
    /// let span = Span::new(5, 15);
    /// assert_eq!(span.start(), 5);
    /// assert_eq!(span.end(), 15);
    /// ```
    #[inline]
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Returns the starting byte offset.
    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Returns the ending byte offset.
    #[inline]
    pub fn end(&self) -> usize {
        self.end
    }

    /// Returns the length of the span in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the span has zero length.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Creates a span that encompasses both this span and another.
    ///
    /// # Example
    ///
    /// ```rust
    /// use solidity_ast::Span;
    ///
    /// let merged = Span::new(0, 5).merge(&Span::new(10, 15));
    /// assert_eq!(merged, Span::new(0, 15));
    /// ```
    pub fn merge(&self, other: &Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Returns true if `other` lies entirely within this span.
    ///
    /// # Example
    ///
    /// ```rust
    /// use solidity_ast::Span;
    ///
    /// let outer = Span::new(0, 20);
    /// assert!(outer.encloses(&Span::new(3, 20)));
    /// assert!(!outer.encloses(&Span::new(3, 21)));
    /// ```
    #[inline]
    pub fn encloses(&self, other: &Span) -> bool {
        self.start <= other.start && self.end >= other.end
    }
}
