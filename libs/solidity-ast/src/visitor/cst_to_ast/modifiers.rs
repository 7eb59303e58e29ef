//! # Declaration Modifier Keywords
//!
//! Visibility, state mutability and storage location are read by testing
//! for keyword tokens in a fixed priority order. Only the first match of each
//! category counts; `function f() public external` is `external`.

use crate::ast::Visibility;
use crate::cst::{ParseNode, Rule};

/// Priority order for function visibility.
const FUNCTION_VISIBILITY: &[Visibility] = &[
    Visibility::External,
    Visibility::Internal,
    Visibility::Public,
    Visibility::Private,
];

/// Priority order for state variable visibility.
const STATE_VARIABLE_VISIBILITY: &[Visibility] =
    &[Visibility::Internal, Visibility::Public, Visibility::Private];

/// Priority order for function type visibility.
const FUNCTION_TYPE_VISIBILITY: &[Visibility] = &[Visibility::Internal, Visibility::External];

fn first_present(node: &ParseNode, order: &[Visibility]) -> Option<Visibility> {
    let written: Vec<Visibility> = node
        .children
        .iter()
        .filter_map(ParseNode::token_text)
        .filter_map(Visibility::from_keyword)
        .collect();
    order.iter().copied().find(|v| written.contains(v))
}

/// Visibility of a function, read from its `modifierList`.
///
/// # Example
///
/// ```rust
/// use solidity_ast::cst::{ParseNode, TreeBuilder};
/// use solidity_ast::visitor::cst_to_ast::modifiers::function_visibility;
/// use solidity_ast::Visibility;
///
/// let mut b = TreeBuilder::new();
/// let list = ParseNode::with_children("modifierList", vec![b.tok("public"), b.tok("external")]);
/// assert_eq!(function_visibility(&list), Visibility::External);
/// ```
pub fn function_visibility(modifier_list: &ParseNode) -> Visibility {
    first_present(modifier_list, FUNCTION_VISIBILITY).unwrap_or_default()
}

/// Visibility of a state variable, `None` when no keyword is written.
pub fn state_variable_visibility(declaration: &ParseNode) -> Option<Visibility> {
    first_present(declaration, STATE_VARIABLE_VISIBILITY)
}

/// Visibility of a function type; `public` and `private` do not apply.
pub fn function_type_visibility(function_type: &ParseNode) -> Visibility {
    first_present(function_type, FUNCTION_TYPE_VISIBILITY).unwrap_or_default()
}

/// Text of the first `stateMutability` child.
pub fn state_mutability(node: &ParseNode) -> Option<String> {
    node.find_child(Rule::StateMutability).map(ParseNode::text)
}

/// Text of the first `storageLocation` child.
pub fn storage_location(node: &ParseNode) -> Option<String> {
    node.find_child(Rule::StorageLocation).map(ParseNode::text)
}
