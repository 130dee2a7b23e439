//! # Call Context — the Platform Boundary
//!
//! Every contract operation receives a [`CallContext`]: the platform's
//! statement of who is calling, how much native currency they attached, and
//! how much gas the call was given. The contract never reaches into ambient
//! host state — if an operation needs a fact about the call, that fact is a
//! field here and arrives by parameter.
//!
//! The platform serializes calls to a contract instance, so a context
//! describes exactly one call from start to finish. For the extended
//! transfer, phase one and the resolve callback are two separate calls with
//! two separate contexts; the resolve context's `predecessor_id` is the
//! contract itself, which is how [`Contract::ft_resolve_transfer`] knows the
//! platform — and only the platform — scheduled it.
//!
//! [`Contract::ft_resolve_transfer`]: crate::contract::Contract::ft_resolve_transfer

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::account::AccountId;
use crate::config::ONE_LUX;
use crate::error::TokenError;

// ---------------------------------------------------------------------------
// Gas
// ---------------------------------------------------------------------------

/// A gas allowance, in the platform's base gas unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Gas(u64);

impl Gas {
    /// One teragas — the unit gas budgets are usually quoted in.
    pub const TGAS: u64 = 1_000_000_000_000;

    /// Builds a gas amount from whole teragas.
    pub const fn from_tgas(tgas: u64) -> Self {
        Self(tgas * Self::TGAS)
    }

    /// The raw gas amount.
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Gas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % Self::TGAS == 0 {
            write!(f, "{} Tgas", self.0 / Self::TGAS)
        } else {
            write!(f, "{} gas", self.0)
        }
    }
}

// ---------------------------------------------------------------------------
// CallContext
// ---------------------------------------------------------------------------

/// Default prepaid gas when the caller doesn't say otherwise. Generous
/// enough for any single synchronous operation.
const DEFAULT_PREPAID_GAS: Gas = Gas::from_tgas(100);

/// The facts of one inbound call, as attested by the platform.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CallContext {
    /// The account the contract itself is deployed at. Also the custodial
    /// account that absorbs force-unregistered balances.
    contract_id: AccountId,

    /// The account that made this call. The platform has already
    /// authenticated it; the contract trusts this field completely.
    predecessor_id: AccountId,

    /// Native currency attached to the call, in lux.
    attached_deposit: u128,

    /// Gas the caller prepaid for this call and everything it schedules.
    prepaid_gas: Gas,
}

impl CallContext {
    /// A context for a call from `predecessor_id` to the contract deployed
    /// at `contract_id`, with no attached payment and a default gas budget.
    pub fn new(contract_id: impl Into<AccountId>, predecessor_id: impl Into<AccountId>) -> Self {
        Self {
            contract_id: contract_id.into(),
            predecessor_id: predecessor_id.into(),
            attached_deposit: 0,
            prepaid_gas: DEFAULT_PREPAID_GAS,
        }
    }

    /// Sets the attached native-currency payment.
    pub fn with_attached_deposit(mut self, deposit: u128) -> Self {
        self.attached_deposit = deposit;
        self
    }

    /// Sets the prepaid gas budget.
    pub fn with_prepaid_gas(mut self, gas: Gas) -> Self {
        self.prepaid_gas = gas;
        self
    }

    pub fn contract_id(&self) -> &AccountId {
        &self.contract_id
    }

    pub fn predecessor_id(&self) -> &AccountId {
        &self.predecessor_id
    }

    pub fn attached_deposit(&self) -> u128 {
        self.attached_deposit
    }

    pub fn prepaid_gas(&self) -> Gas {
        self.prepaid_gas
    }

    /// Enforces the exactly-one-lux payment guard on calls that move tokens
    /// or release bonds. The platform only attaches payment to calls
    /// confirmed with the account's own key, so this doubles as a "the owner
    /// really meant it" assertion.
    pub(crate) fn require_one_lux(&self) -> Result<(), TokenError> {
        if self.attached_deposit != ONE_LUX {
            return Err(TokenError::Unauthorized {
                reason: format!(
                    "requires an attached payment of exactly 1 lux, got {}",
                    self.attached_deposit
                ),
            });
        }
        Ok(())
    }

    /// Enforces that this call was scheduled by the contract itself — the
    /// shape of every platform-issued callback.
    pub(crate) fn require_self_call(&self) -> Result<(), TokenError> {
        if self.predecessor_id != self.contract_id {
            return Err(TokenError::Unauthorized {
                reason: format!(
                    "callback entry point invoked by {}, not by the platform",
                    self.predecessor_id
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_lux_guard_accepts_exactly_one() {
        let ctx = CallContext::new("token.lumen", "alice.lumen").with_attached_deposit(1);
        assert!(ctx.require_one_lux().is_ok());
    }

    #[test]
    fn one_lux_guard_rejects_zero_and_two() {
        for deposit in [0u128, 2] {
            let ctx =
                CallContext::new("token.lumen", "alice.lumen").with_attached_deposit(deposit);
            assert!(matches!(
                ctx.require_one_lux(),
                Err(TokenError::Unauthorized { .. })
            ));
        }
    }

    #[test]
    fn self_call_guard() {
        let platform = CallContext::new("token.lumen", "token.lumen");
        assert!(platform.require_self_call().is_ok());

        let external = CallContext::new("token.lumen", "mallory.lumen");
        assert!(matches!(
            external.require_self_call(),
            Err(TokenError::Unauthorized { .. })
        ));
    }

    #[test]
    fn gas_display_quotes_teragas() {
        assert_eq!(Gas::from_tgas(30).to_string(), "30 Tgas");
        assert_eq!(Gas(1500).to_string(), "1500 gas");
    }
}
