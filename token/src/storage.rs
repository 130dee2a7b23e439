//! # Storage Bond Accounting Types
//!
//! Holding a ledger entry occupies bytes in the platform's key-value store,
//! and bytes cost money. An account pays a fixed bond when it registers and
//! gets the bond back when it unregisters. These are the report types the
//! storage operations hand back to callers; the bookkeeping itself lives in
//! [`Contract`](crate::contract::Contract).
//!
//! With a fixed bond the numbers are boring on purpose: `min == max`, the
//! contract holds exactly the bond per account, and `available` is always
//! zero — anything above the bond was refunded the moment it arrived.

use serde::{Deserialize, Serialize};

use crate::config::storage_bond;

/// One account's storage position with the contract, in lux.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageBalance {
    /// Total lux the contract holds for this account.
    pub total: u128,

    /// The portion withdrawable without unregistering. Always zero in the
    /// fixed-bond design; present because callers of the standard interface
    /// expect the field.
    pub available: u128,
}

impl StorageBalance {
    /// The position of a freshly (or long-ago) registered account holding
    /// the given bond.
    pub fn for_bond(bond: u128) -> Self {
        Self {
            total: bond,
            available: 0,
        }
    }
}

/// The bond price quote: what registration costs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageBalanceBounds {
    /// Minimum acceptable deposit to register an account.
    pub min: u128,

    /// Maximum the contract will keep per account. `Some(min)` here: the
    /// bond is fixed, extra is refunded.
    pub max: Option<u128>,
}

impl Default for StorageBalanceBounds {
    fn default() -> Self {
        Self {
            min: storage_bond(),
            max: Some(storage_bond()),
        }
    }
}

/// What `storage_deposit` did with the attached payment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageDepositOutcome {
    /// The account's storage position after the call.
    pub balance: StorageBalance,

    /// Lux the platform must return to the caller: the full attached
    /// payment for an already-registered account, the excess above the bond
    /// for a new one.
    pub refund: u128,

    /// Whether this call created the registration.
    pub newly_registered: bool,
}

/// What `storage_withdraw` paid out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageWithdrawOutcome {
    /// The account's storage position after the call.
    pub balance: StorageBalance,

    /// Lux paid out to the caller.
    pub paid_out: u128,
}

/// What `storage_unregister` released.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnregisterOutcome {
    /// The bond returned to the departing account.
    pub bond_refund: u128,

    /// Token balance swept into the contract's custodial account by a
    /// forced unregister. Zero on the ordinary path.
    pub swept_balance: u128,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_quote_a_fixed_bond() {
        let bounds = StorageBalanceBounds::default();
        assert_eq!(bounds.min, storage_bond());
        assert_eq!(bounds.max, Some(bounds.min));
    }

    #[test]
    fn storage_balance_has_nothing_available() {
        let sb = StorageBalance::for_bond(storage_bond());
        assert_eq!(sb.total, storage_bond());
        assert_eq!(sb.available, 0);
    }
}
