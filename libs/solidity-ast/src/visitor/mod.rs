//! # AST Visitors
//!
//! Parse tree to AST transformation.
//!
//! ## Structure
//!
//! ```text
//! visitor/
//! ├── mod.rs              - This file
//! └── cst_to_ast/         - Parse tree to AST transformation
//!     ├── mod.rs          - Walker and rule dispatch
//!     ├── directives.rs   - Pragmas and imports
//!     ├── declarations.rs - Contracts, functions, parameters
//!     ├── modifiers.rs    - Visibility, mutability, storage keywords
//!     ├── types.rs        - Type names
//!     ├── statements.rs   - Statements
//!     ├── expressions.rs  - Expressions and literals
//!     ├── lists.rs        - Comma lists with omitted elements
//!     └── assembly.rs     - Inline assembly
//! ```

pub mod cst_to_ast;
