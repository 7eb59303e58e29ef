//! # Config Crate
//!
//! Centralized configuration constants for the Solidity AST pipeline.
//! All limits and tunable parameters of the parse-tree transformation are
//! defined here so that the engine and its callers agree on them.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{TransformConfig, MAX_RECURSION_DEPTH, UNBOUNDED_DEPTH};
//!
//! let config = TransformConfig::default();
//! assert_eq!(config.max_depth, UNBOUNDED_DEPTH);
//! assert!(config.strip_eof);
//!
//! let capped = TransformConfig::new(MAX_RECURSION_DEPTH, true).unwrap();
//! assert_eq!(capped.max_depth, MAX_RECURSION_DEPTH);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Validated Knobs**: Runtime settings are checked on construction
//! - **No Dependencies**: Pure configuration, safe to depend on from anywhere

pub mod constants;
