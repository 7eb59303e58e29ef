//! # Configuration Constants
//!
//! Limits, token conventions and schema metadata for the Solidity
//! parse-tree to AST transformation.
//!
//! ## Categories
//!
//! - **Limits**: Recursion bounds and stack growth parameters
//! - **Input Conventions**: Text of the end-of-input marker token
//! - **Schema**: Version of the serialized AST layout

use std::fmt;

// =============================================================================
// LIMIT CONSTANTS
// =============================================================================

/// Suggested nesting cap for callers that want to bound a pass.
///
/// Left-recursive expression rules produce one nesting level per operator,
/// so a cap bounds the size of a single chained expression as well as the
/// block nesting of a contract. The default configuration is unbounded.
///
/// # Example
///
/// ```rust
/// use config::constants::{TransformConfig, MAX_RECURSION_DEPTH};
///
/// let bounded = TransformConfig::new(MAX_RECURSION_DEPTH, true).unwrap();
/// assert!(bounded.max_depth < TransformConfig::default().max_depth);
/// ```
pub const MAX_RECURSION_DEPTH: usize = 1000;

/// Depth limit of the default configuration: no limit.
pub const UNBOUNDED_DEPTH: usize = usize::MAX;

/// Bytes of stack space allocated each time the walker grows its stack
/// using the `stacker` crate.
///
/// # Examples
/// ```
/// use config::constants::STACKER_STACK_SIZE_BYTES;
/// assert!(STACKER_STACK_SIZE_BYTES >= 1024);
/// ```
pub const STACKER_STACK_SIZE_BYTES: usize = 8 * 1024 * 1024;

/// Remaining stack below which the walker requests a new stack segment.
///
/// # Examples
/// ```
/// use config::constants::{STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};
/// assert!(STACKER_RED_ZONE_BYTES < STACKER_STACK_SIZE_BYTES);
/// ```
pub const STACKER_RED_ZONE_BYTES: usize = STACKER_STACK_SIZE_BYTES / 8;

// =============================================================================
// INPUT CONVENTIONS
// =============================================================================

/// Text carried by the end-of-input token that terminates a compilation unit.
pub const EOF_TOKEN_TEXT: &str = "<EOF>";

// =============================================================================
// SCHEMA
// =============================================================================

/// Version of the serialized AST layout (variant set and field names).
///
/// Bumped whenever a variant or field is renamed or removed.
pub const SCHEMA_VERSION: u32 = 1;

// =============================================================================
// RUNTIME CONFIGURATION
// =============================================================================

/// Settings for one transformation pass.
///
/// # Examples
/// ```
/// use config::constants::TransformConfig;
/// let config = TransformConfig::new(64, true).expect("valid config");
/// assert_eq!(config.max_depth, 64);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformConfig {
    /// Deepest nesting level the walker accepts before aborting the pass,
    /// [`UNBOUNDED_DEPTH`] unless the caller opts into a cap.
    pub max_depth: usize,
    /// Whether a trailing end-of-input token is removed from the root.
    pub strip_eof: bool,
}

impl TransformConfig {
    /// Builds a configuration, rejecting a depth limit of zero.
    ///
    /// # Examples
    /// ```
    /// use config::constants::{ConfigError, TransformConfig};
    /// assert_eq!(TransformConfig::new(0, true), Err(ConfigError::InvalidDepth(0)));
    /// ```
    pub fn new(max_depth: usize, strip_eof: bool) -> Result<Self, ConfigError> {
        if max_depth == 0 {
            return Err(ConfigError::InvalidDepth(max_depth));
        }
        Ok(Self {
            max_depth,
            strip_eof,
        })
    }
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            max_depth: UNBOUNDED_DEPTH,
            strip_eof: true,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Raised when the depth limit would reject even the root node.
    InvalidDepth(usize),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidDepth(value) => {
                write!(f, "max_depth must be at least 1: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
