//! # One-Slot Contract Store
//!
//! The host persists the entire contract as a single key-value record; this
//! is that record's in-memory shape. [`ContractCell`] starts empty, accepts
//! exactly one initialization, and hands out the state for every call after
//! that. The second `new` attempt gets [`TokenError::AlreadyInitialized`],
//! an access before the first gets [`TokenError::NotInitialized`] — the
//! supply-defining operation is physically unrepeatable.

use serde::{Deserialize, Serialize};

use crate::account::AccountId;
use crate::context::CallContext;
use crate::contract::Contract;
use crate::error::TokenError;
use crate::metadata::TokenMetadata;

/// The one-slot store enforcing exactly-once initialization.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ContractCell {
    state: Option<Contract>,
}

impl ContractCell {
    /// An empty, uninitialized cell.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the contract has been initialized.
    pub fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    /// Runs the one-time initialization.
    ///
    /// # Errors
    ///
    /// [`TokenError::AlreadyInitialized`] on any call after the first
    /// successful one; whatever [`Contract::new`] returns otherwise. A
    /// failed initialization leaves the cell empty, so it can be retried
    /// with fixed arguments.
    pub fn initialize(
        &mut self,
        ctx: &CallContext,
        owner_id: AccountId,
        total_supply: u128,
        metadata: TokenMetadata,
    ) -> Result<&mut Contract, TokenError> {
        if self.state.is_some() {
            return Err(TokenError::AlreadyInitialized);
        }
        let contract = Contract::new(ctx, owner_id, total_supply, metadata)?;
        Ok(self.state.insert(contract))
    }

    /// The contract state, for read-only calls.
    pub fn get(&self) -> Result<&Contract, TokenError> {
        self.state.as_ref().ok_or(TokenError::NotInitialized)
    }

    /// The contract state, for mutating calls.
    pub fn get_mut(&mut self) -> Result<&mut Contract, TokenError> {
        self.state.as_mut().ok_or(TokenError::NotInitialized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init_args() -> (CallContext, AccountId, u128, TokenMetadata) {
        (
            CallContext::new("token.lumen", "deployer.lumen"),
            "treasury.lumen".into(),
            1_000_000,
            TokenMetadata::new("Lumen Standard Token", "LMN", 8),
        )
    }

    #[test]
    fn access_before_init_rejected() {
        let cell = ContractCell::new();
        assert!(!cell.is_initialized());
        assert!(matches!(cell.get(), Err(TokenError::NotInitialized)));
    }

    #[test]
    fn initializes_exactly_once() {
        let (ctx, owner, supply, meta) = init_args();
        let mut cell = ContractCell::new();

        cell.initialize(&ctx, owner.clone(), supply, meta.clone())
            .expect("first init");
        assert!(cell.is_initialized());
        assert_eq!(cell.get().unwrap().ft_total_supply(), supply);

        let second = cell.initialize(&ctx, owner, supply, meta);
        assert!(matches!(second, Err(TokenError::AlreadyInitialized)));
    }

    #[test]
    fn failed_init_leaves_the_cell_empty() {
        let (ctx, owner, supply, _) = init_args();
        let mut cell = ContractCell::new();

        let mut bad_meta = TokenMetadata::new("Token", "TKN", 8);
        bad_meta.spec = "wrong".into();
        assert!(cell.initialize(&ctx, owner.clone(), supply, bad_meta).is_err());
        assert!(!cell.is_initialized());

        // Retry with fixed metadata succeeds.
        cell.initialize(&ctx, owner, supply, TokenMetadata::new("Token", "TKN", 8))
            .expect("retry after failed init");
    }
}
