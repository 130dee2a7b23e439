//! # Error Taxonomy
//!
//! Every way a contract call can fail, as one enum. Each variant carries the
//! numbers involved so automated callers can branch on [`TokenError::code`]
//! and humans can read the message without a debugger.
//!
//! All of these are fatal to the triggering call: the host discards the
//! call's state changes on error. The one deliberate exception is the
//! extended transfer, whose optimistic first phase stays committed — a
//! failed reconciliation degrades to a truncated refund (an event, not an
//! error) rather than rolling phase one back.

use thiserror::Error;

use crate::account::AccountId;
use crate::context::Gas;

/// Errors that can occur during token contract operations.
#[derive(Debug, Error)]
pub enum TokenError {
    /// The contract was already initialized and `new` was called again.
    #[error("contract is already initialized")]
    AlreadyInitialized,

    /// An operation reached the contract before initialization.
    #[error("contract is not initialized")]
    NotInitialized,

    /// The account has no ledger entry — it never paid the storage bond,
    /// or it unregistered.
    #[error("account {0} is not registered")]
    NotRegistered(AccountId),

    /// Attempted to debit more than the account holds.
    #[error("insufficient balance: {account} holds {available}, tried to withdraw {requested}")]
    InsufficientBalance {
        /// The account being debited.
        account: AccountId,
        /// What the account currently holds.
        available: u128,
        /// What the caller asked to withdraw.
        requested: u128,
    },

    /// A credit would exceed the maximum representable balance or, sooner
    /// in practice, the fixed total supply. Conservation says no.
    #[error("overflow: crediting {amount} to {account} (holding {current}) would exceed the supply cap {cap}")]
    Overflow {
        /// The account being credited.
        account: AccountId,
        /// Its balance before the failed credit.
        current: u128,
        /// The amount that tripped the check.
        amount: u128,
        /// The fixed total supply.
        cap: u128,
    },

    /// The attached payment doesn't cover what the operation needs, or a
    /// storage withdrawal asked for more than is available.
    #[error("insufficient deposit: available {available}, required {required}")]
    InsufficientDeposit {
        /// What was attached / is available.
        available: u128,
        /// What the operation needed.
        required: u128,
    },

    /// Unregistering an account that still holds tokens, without `force`.
    #[error("cannot unregister {account}: balance of {balance} is non-zero (pass force to sweep it)")]
    NonZeroBalance {
        /// The account refusing to go quietly.
        account: AccountId,
        /// Its remaining balance.
        balance: u128,
    },

    /// Sender and receiver are the same account.
    #[error("sender and receiver are the same account")]
    SelfTransfer,

    /// A transfer of zero tokens. A no-op dressed up as a call — rejected
    /// so callers notice the bug.
    #[error("transfer amount must be positive")]
    ZeroAmount,

    /// The transfer's receiver has no ledger entry.
    #[error("receiver {0} is not registered")]
    ReceiverNotRegistered(AccountId),

    /// The caller may not perform this operation: wrong payment guard,
    /// or a platform-only entry point invoked externally.
    #[error("unauthorized: {reason}")]
    Unauthorized {
        /// What exactly was wrong with the call.
        reason: String,
    },

    /// An extended transfer arrived without enough prepaid gas to guarantee
    /// the resolve phase runs.
    #[error("insufficient gas: prepaid {prepaid}, need at least {required}")]
    InsufficientGas {
        /// What the caller prepaid.
        prepaid: Gas,
        /// The floor the operation enforces.
        required: Gas,
    },

    /// An extended transfer with an empty message payload. The receiver
    /// contract dispatches on the message; an empty one is a caller bug.
    #[error("extended transfer requires a non-empty message")]
    EmptyMessage,

    /// Init-time metadata failed validation.
    #[error("invalid metadata: {0}")]
    InvalidMetadata(String),
}

impl TokenError {
    /// A stable, machine-branchable code for this error. Part of the
    /// external interface — automated callers match on these strings.
    pub fn code(&self) -> &'static str {
        match self {
            TokenError::AlreadyInitialized => "ALREADY_INITIALIZED",
            TokenError::NotInitialized => "NOT_INITIALIZED",
            TokenError::NotRegistered(_) => "NOT_REGISTERED",
            TokenError::InsufficientBalance { .. } => "INSUFFICIENT_BALANCE",
            TokenError::Overflow { .. } => "OVERFLOW",
            TokenError::InsufficientDeposit { .. } => "INSUFFICIENT_DEPOSIT",
            TokenError::NonZeroBalance { .. } => "NON_ZERO_BALANCE",
            TokenError::SelfTransfer => "SELF_TRANSFER",
            TokenError::ZeroAmount => "ZERO_AMOUNT",
            TokenError::ReceiverNotRegistered(_) => "RECEIVER_NOT_REGISTERED",
            TokenError::Unauthorized { .. } => "UNAUTHORIZED",
            TokenError::InsufficientGas { .. } => "INSUFFICIENT_GAS",
            TokenError::EmptyMessage => "EMPTY_MESSAGE",
            TokenError::InvalidMetadata(_) => "INVALID_METADATA",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_distinct() {
        use std::collections::HashSet;

        let samples = vec![
            TokenError::AlreadyInitialized,
            TokenError::NotInitialized,
            TokenError::NotRegistered("a".into()),
            TokenError::InsufficientBalance {
                account: "a".into(),
                available: 1,
                requested: 2,
            },
            TokenError::Overflow {
                account: "a".into(),
                current: 1,
                amount: 2,
                cap: 3,
            },
            TokenError::InsufficientDeposit {
                available: 1,
                required: 2,
            },
            TokenError::NonZeroBalance {
                account: "a".into(),
                balance: 1,
            },
            TokenError::SelfTransfer,
            TokenError::ZeroAmount,
            TokenError::ReceiverNotRegistered("a".into()),
            TokenError::Unauthorized {
                reason: "test".into(),
            },
            TokenError::InsufficientGas {
                prepaid: Gas::from_tgas(1),
                required: Gas::from_tgas(30),
            },
            TokenError::EmptyMessage,
            TokenError::InvalidMetadata("test".into()),
        ];

        let codes: HashSet<&str> = samples.iter().map(|e| e.code()).collect();
        assert_eq!(codes.len(), samples.len(), "every error code must be unique");
    }

    #[test]
    fn messages_carry_the_numbers() {
        let err = TokenError::InsufficientBalance {
            account: "alice.lumen".into(),
            available: 100,
            requested: 250,
        };
        let msg = err.to_string();
        assert!(msg.contains("alice.lumen"));
        assert!(msg.contains("100"));
        assert!(msg.contains("250"));
    }
}
