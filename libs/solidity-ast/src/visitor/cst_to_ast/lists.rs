//! # Comma Lists With Omitted Elements
//!
//! Tuples, `var (a, , c)` identifier lists and `(uint a, , bool c)`
//! declaration lists may leave positions empty. Each comma-delimited
//! position maps to exactly one slot: the element written there, or `None`.
//!
//! ```text
//! (a,,c) → [a, None, c]
//! (,b,c) → [None, b, c]
//! (a,b,) → [a, b, None]
//! (,,)   → [None, None, None]
//! ()     → []
//! ```

use crate::ast::{Node, NodeKind};
use crate::cst::{ParseNode, Rule};
use crate::error::TransformError;

use super::Transformer;

/// Splits the inside of a bracketed list into comma-delimited slots.
///
/// `items` must not include the enclosing brackets. A slot holds the first
/// rule node written between its two commas, or `None` when there is none.
///
/// # Example
///
/// ```rust
/// use solidity_ast::cst::{ParseNode, TreeBuilder};
/// use solidity_ast::visitor::cst_to_ast::lists::comma_slots;
///
/// let mut b = TreeBuilder::new();
/// let a = ParseNode::with_children("expression", vec![b.tok("a")]);
/// let items = vec![b.tok(","), a, b.tok(",")];
/// let slots = comma_slots(&items);
/// assert_eq!(slots.len(), 3);
/// assert!(slots[0].is_none() && slots[1].is_some() && slots[2].is_none());
/// ```
pub fn comma_slots(items: &[ParseNode]) -> Vec<Option<&ParseNode>> {
    if items.is_empty() {
        return Vec::new();
    }
    items
        .split(|item| item.token_text() == Some(","))
        .map(|segment| segment.iter().find(|item| !item.is_terminal()))
        .collect()
}

/// `var (a, , c)`: each written name becomes a `VariableDeclaration`
/// spanning its identifier.
pub(super) fn identifier_list(list: &ParseNode) -> Vec<Option<Node>> {
    let inner = match list.children.len() {
        0..=2 => &[][..],
        len => &list.children[1..len - 1],
    };
    comma_slots(inner)
        .into_iter()
        .map(|slot| {
            slot.map(|ident| {
                Node::new(
                    NodeKind::VariableDeclaration {
                        type_name: None,
                        name: Some(ident.text()),
                        storage_location: None,
                        is_state_var: false,
                        is_indexed: false,
                    },
                    ident.span(),
                )
            })
        })
        .collect()
}

impl Transformer {
    /// `(uint a, , bool c)`: the list node holds no brackets of its own.
    pub(super) fn variable_declaration_list(
        &mut self,
        list: &ParseNode,
    ) -> Result<Vec<Option<Node>>, TransformError> {
        comma_slots(&list.children)
            .into_iter()
            .map(|slot| self.visit_opt(slot.filter(|n| n.is_rule(Rule::VariableDeclaration))))
            .collect()
    }
}
