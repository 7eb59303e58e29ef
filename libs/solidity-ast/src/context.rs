//! # Transform Context
//!
//! Per-pass state threaded through the walk. A fresh context is created for
//! every top-level transformation and dropped with it.

/// State carried through a single transformation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformContext {
    /// Name of the contract, interface or library most recently entered.
    ///
    /// Not cleared on leaving a definition; only contract entry writes it.
    current_contract: Option<String>,
}

impl TransformContext {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records entry into a contract, interface or library definition.
    pub fn enter_contract(&mut self, name: impl Into<String>) {
        self.current_contract = Some(name.into());
    }

    /// Name of the enclosing contract, if any was entered.
    pub fn current_contract(&self) -> Option<&str> {
        self.current_contract.as_deref()
    }

    /// True when `name` matches the enclosing contract's name.
    pub fn is_constructor_name(&self, name: &str) -> bool {
        self.current_contract() == Some(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_contract_means_no_constructor() {
        let ctx = TransformContext::new();
        assert!(!ctx.is_constructor_name("Token"));
        assert!(!ctx.is_constructor_name(""));
    }

    #[test]
    fn test_latest_contract_wins() {
        let mut ctx = TransformContext::new();
        ctx.enter_contract("A");
        ctx.enter_contract("B");
        assert_eq!(ctx.current_contract(), Some("B"));
        assert!(ctx.is_constructor_name("B"));
        assert!(!ctx.is_constructor_name("A"));
    }
}
