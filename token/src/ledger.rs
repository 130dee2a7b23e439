//! # Balance Ledger
//!
//! The balance book: one [`AccountEntry`] per registered account, keyed by
//! [`AccountId`], plus the total supply fixed at initialization. This module
//! enforces the two invariants everything else leans on:
//!
//! 1. **Registration is presence.** An account has a ledger entry if and
//!    only if it is registered — one keyspace, so the invariant can't drift.
//!    A balance of zero is a valid, present entry, distinct from "no entry".
//! 2. **Conservation.** The sum of all balances never exceeds the total
//!    supply. Every credit is checked against both `u128::MAX` and the
//!    supply cap; every debit is checked subtraction. Nothing wraps.
//!
//! The ledger knows nothing about callers, payments, or gas — that's the
//! contract layer's job. These are the raw book-keeping primitives.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::account::AccountId;
use crate::error::TokenError;

// ---------------------------------------------------------------------------
// AccountEntry
// ---------------------------------------------------------------------------

/// One registered account's slice of the book.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountEntry {
    /// Token balance in smallest units. May be zero; zero is a real balance.
    pub balance: u128,

    /// The storage bond this account paid at registration, in lux.
    /// Returned when the account unregisters. Accounts registered by the
    /// contract itself at init carry a zero bond — the contract underwrote
    /// their storage.
    pub bond: u128,

    /// When the entry was created.
    pub registered_at: DateTime<Utc>,
}

impl AccountEntry {
    fn new(bond: u128) -> Self {
        Self {
            balance: 0,
            bond,
            registered_at: Utc::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// Ledger
// ---------------------------------------------------------------------------

/// The account → balance mapping plus the immutable total supply.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Ledger {
    /// Registered accounts. Presence in this map IS registration.
    entries: HashMap<AccountId, AccountEntry>,

    /// Fixed at initialization. Never mutated afterwards — there are no
    /// mint or burn operations in this design.
    total_supply: u128,
}

impl Ledger {
    /// An empty ledger with the given fixed total supply.
    pub fn new(total_supply: u128) -> Self {
        Self {
            entries: HashMap::new(),
            total_supply,
        }
    }

    /// The immutable total supply.
    pub fn total_supply(&self) -> u128 {
        self.total_supply
    }

    /// Whether the account holds a ledger entry.
    pub fn is_registered(&self, account: &AccountId) -> bool {
        self.entries.contains_key(account)
    }

    /// The account's balance: `None` for an absent account, `Some(0)` for a
    /// registered account with no activity. Callers that need to tell those
    /// apart can — that's the point of the `Option`.
    pub fn balance_of(&self, account: &AccountId) -> Option<u128> {
        self.entries.get(account).map(|e| e.balance)
    }

    /// The full entry for an account, bond and timestamp included.
    pub fn entry_of(&self, account: &AccountId) -> Option<&AccountEntry> {
        self.entries.get(account)
    }

    /// Creates an entry for `account` with the given bond. Returns `false`
    /// (and changes nothing) if the account already has one.
    pub fn register(&mut self, account: &AccountId, bond: u128) -> bool {
        if self.entries.contains_key(account) {
            return false;
        }
        self.entries.insert(account.clone(), AccountEntry::new(bond));
        true
    }

    /// Removes the account's entry and returns it. Policy questions — may
    /// the balance be non-zero, where does it go — are decided by the
    /// caller before this runs.
    pub fn unregister(&mut self, account: &AccountId) -> Option<AccountEntry> {
        self.entries.remove(account)
    }

    /// Credits `amount` to a registered account.
    ///
    /// # Errors
    ///
    /// [`TokenError::NotRegistered`] if the account has no entry.
    /// [`TokenError::Overflow`] if the new balance would exceed the
    /// representable range or the total supply — the conservation check.
    pub fn internal_deposit(
        &mut self,
        account: &AccountId,
        amount: u128,
    ) -> Result<u128, TokenError> {
        let cap = self.total_supply;
        let entry = self
            .entries
            .get_mut(account)
            .ok_or_else(|| TokenError::NotRegistered(account.clone()))?;

        let new_balance = entry
            .balance
            .checked_add(amount)
            .filter(|&b| b <= cap)
            .ok_or(TokenError::Overflow {
                account: account.clone(),
                current: entry.balance,
                amount,
                cap,
            })?;

        entry.balance = new_balance;
        Ok(new_balance)
    }

    /// Debits `amount` from a registered account.
    ///
    /// # Errors
    ///
    /// [`TokenError::NotRegistered`] if the account has no entry.
    /// [`TokenError::InsufficientBalance`] if `amount` exceeds the balance.
    /// Checked subtraction only — underflow is a hard failure, never a wrap.
    pub fn internal_withdraw(
        &mut self,
        account: &AccountId,
        amount: u128,
    ) -> Result<u128, TokenError> {
        let entry = self
            .entries
            .get_mut(account)
            .ok_or_else(|| TokenError::NotRegistered(account.clone()))?;

        let new_balance =
            entry
                .balance
                .checked_sub(amount)
                .ok_or(TokenError::InsufficientBalance {
                    account: account.clone(),
                    available: entry.balance,
                    requested: amount,
                })?;

        entry.balance = new_balance;
        Ok(new_balance)
    }

    /// Sum of all balances. In this design the contract mints the full
    /// supply at init and never burns, so this equals `total_supply`
    /// whenever no call is mid-flight — the conservation property the
    /// tests assert after every operation.
    pub fn circulating(&self) -> u128 {
        self.entries.values().map(|e| e.balance).sum()
    }

    /// Number of registered accounts.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no accounts are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over all entries, in map order.
    pub fn accounts(&self) -> impl Iterator<Item = (&AccountId, &AccountEntry)> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acct(s: &str) -> AccountId {
        AccountId::from(s)
    }

    #[test]
    fn unregistered_account_is_none_not_zero() {
        let mut ledger = Ledger::new(1_000_000);
        assert_eq!(ledger.balance_of(&acct("alice")), None);

        ledger.register(&acct("alice"), 10);
        assert_eq!(ledger.balance_of(&acct("alice")), Some(0));
    }

    #[test]
    fn register_is_not_an_overwrite() {
        let mut ledger = Ledger::new(1_000_000);
        assert!(ledger.register(&acct("alice"), 10));
        ledger.internal_deposit(&acct("alice"), 500).unwrap();

        assert!(!ledger.register(&acct("alice"), 99));
        assert_eq!(ledger.balance_of(&acct("alice")), Some(500));
        assert_eq!(ledger.entry_of(&acct("alice")).unwrap().bond, 10);
    }

    #[test]
    fn deposit_to_unregistered_rejected() {
        let mut ledger = Ledger::new(1_000_000);
        let result = ledger.internal_deposit(&acct("ghost"), 1);
        assert!(matches!(result, Err(TokenError::NotRegistered(_))));
    }

    #[test]
    fn withdraw_from_unregistered_rejected() {
        let mut ledger = Ledger::new(1_000_000);
        let result = ledger.internal_withdraw(&acct("ghost"), 1);
        assert!(matches!(result, Err(TokenError::NotRegistered(_))));
    }

    #[test]
    fn withdraw_more_than_balance_rejected() {
        let mut ledger = Ledger::new(1_000_000);
        ledger.register(&acct("alice"), 0);
        ledger.internal_deposit(&acct("alice"), 100).unwrap();

        let result = ledger.internal_withdraw(&acct("alice"), 101);
        assert!(matches!(
            result,
            Err(TokenError::InsufficientBalance {
                available: 100,
                requested: 101,
                ..
            })
        ));
        // Failed withdraw leaves the balance untouched.
        assert_eq!(ledger.balance_of(&acct("alice")), Some(100));
    }

    #[test]
    fn withdraw_to_exactly_zero_is_fine() {
        let mut ledger = Ledger::new(1_000_000);
        ledger.register(&acct("alice"), 0);
        ledger.internal_deposit(&acct("alice"), 100).unwrap();

        assert_eq!(ledger.internal_withdraw(&acct("alice"), 100).unwrap(), 0);
        assert_eq!(ledger.balance_of(&acct("alice")), Some(0));
        assert!(ledger.is_registered(&acct("alice")));
    }

    #[test]
    fn deposit_beyond_total_supply_rejected() {
        let mut ledger = Ledger::new(1_000);
        ledger.register(&acct("alice"), 0);
        ledger.internal_deposit(&acct("alice"), 1_000).unwrap();

        let result = ledger.internal_deposit(&acct("alice"), 1);
        assert!(matches!(result, Err(TokenError::Overflow { cap: 1_000, .. })));
        assert_eq!(ledger.balance_of(&acct("alice")), Some(1_000));
    }

    #[test]
    fn deposit_beyond_u128_rejected() {
        let mut ledger = Ledger::new(u128::MAX);
        ledger.register(&acct("alice"), 0);
        ledger.internal_deposit(&acct("alice"), u128::MAX).unwrap();

        let result = ledger.internal_deposit(&acct("alice"), 1);
        assert!(matches!(result, Err(TokenError::Overflow { .. })));
    }

    #[test]
    fn withdraw_then_deposit_preserves_circulating_supply() {
        let mut ledger = Ledger::new(1_000_000);
        ledger.register(&acct("alice"), 0);
        ledger.register(&acct("bob"), 0);
        ledger.internal_deposit(&acct("alice"), 1_000_000).unwrap();

        let before = ledger.circulating();
        ledger.internal_withdraw(&acct("alice"), 400_000).unwrap();
        ledger.internal_deposit(&acct("bob"), 400_000).unwrap();
        assert_eq!(ledger.circulating(), before);
        assert_eq!(ledger.circulating(), ledger.total_supply());
    }

    #[test]
    fn unregister_returns_the_entry() {
        let mut ledger = Ledger::new(1_000_000);
        ledger.register(&acct("alice"), 42);
        ledger.internal_deposit(&acct("alice"), 7).unwrap();

        let entry = ledger.unregister(&acct("alice")).unwrap();
        assert_eq!(entry.balance, 7);
        assert_eq!(entry.bond, 42);
        assert!(!ledger.is_registered(&acct("alice")));
        assert!(ledger.unregister(&acct("alice")).is_none());
    }

    #[test]
    fn serialization_roundtrip() {
        let mut ledger = Ledger::new(1_000_000);
        ledger.register(&acct("alice"), 42);
        ledger.internal_deposit(&acct("alice"), 99).unwrap();

        let json = serde_json::to_string(&ledger).expect("serialize");
        let back: Ledger = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.total_supply(), 1_000_000);
        assert_eq!(back.balance_of(&acct("alice")), Some(99));
        assert_eq!(back.entry_of(&acct("alice")).unwrap().bond, 42);
    }
}
