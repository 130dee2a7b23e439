//! # Receiver Boundary & Pending Transfers
//!
//! The extended transfer notifies the receiving account's contract and lets
//! it keep some, all, or none of the amount. Two facts shape this module:
//!
//! 1. **The receiver is duck-typed.** It may be a contract implementing the
//!    notification hook, a contract that doesn't, or a plain account with no
//!    code at all. The platform invocation either produces a declared
//!    used-amount or fails outright — [`ReceiverOutcome`] is exactly that
//!    fork, and the ledger handles both arms explicitly.
//! 2. **There is no suspension.** Phase one (`ft_transfer_call`) returns a
//!    [`PendingTransfer`]; the platform carries it across the notification
//!    call and hands it back to the resolve entry point. The record is
//!    ephemeral — it lives in the receipt chain, never in contract state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::account::AccountId;

/// The amount in flight between the two phases of an extended transfer.
///
/// Created by [`Contract::ft_transfer_call`] after the optimistic
/// debit/credit, consumed by [`Contract::ft_resolve_transfer`]. Everything
/// the resolve phase needs to compute the refund travels in here — the
/// contract keeps no pending-transfer table.
///
/// [`Contract::ft_transfer_call`]: crate::contract::Contract::ft_transfer_call
/// [`Contract::ft_resolve_transfer`]: crate::contract::Contract::ft_resolve_transfer
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingTransfer {
    /// Unique id for correlating the two phases in logs.
    pub id: Uuid,

    /// The debited account, and the refund destination.
    pub sender_id: AccountId,

    /// The credited account whose contract gets notified.
    pub receiver_id: AccountId,

    /// The full optimistically-transferred amount.
    pub amount: u128,

    /// Caller's memo, carried through for the refund event.
    pub memo: Option<String>,

    /// The message the receiver contract dispatches on. Non-empty.
    pub msg: String,

    /// When phase one committed.
    pub issued_at: DateTime<Utc>,
}

/// What came back over the platform boundary from the notified contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReceiverOutcome {
    /// The receiver's hook ran and declared how much of the amount it kept.
    /// Declarations above the transferred amount are clamped at resolve.
    Used(u128),

    /// The notification call failed: the hook trapped, the account has no
    /// contract, or the contract has no such hook. Treated as "used
    /// nothing" — full refund.
    Failed,
}

/// The settled result of an extended transfer, returned to the original
/// caller by the resolve phase.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettledTransfer {
    /// Correlates with [`PendingTransfer::id`].
    pub transfer_id: Uuid,

    /// The amount that actually ended up transferred: the original amount
    /// minus whatever was refunded. When a refund is truncated this exceeds
    /// what the receiver declared it used.
    pub used: u128,

    /// The amount moved back to the sender.
    pub refunded: u128,

    /// Whether the refund had to be clamped below the unused remainder
    /// because the receiver no longer held it.
    pub refund_truncated: bool,
}

/// The notification hook a receiving contract may implement. The host
/// invokes this across the platform boundary and maps the result — or the
/// absence of any implementation — into a [`ReceiverOutcome`]. The token
/// contract itself never calls this trait directly and never assumes a
/// receiver implements it.
pub trait TokenReceiver {
    /// Reacts to an inbound transfer carrying `msg`, returning how much of
    /// `amount` the receiver keeps.
    fn ft_on_transfer(&mut self, sender_id: &AccountId, amount: u128, msg: &str) -> u128;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_transfer_roundtrips_through_json() {
        let pending = PendingTransfer {
            id: Uuid::new_v4(),
            sender_id: "alice.lumen".into(),
            receiver_id: "vault.lumen".into(),
            amount: 250,
            memo: Some("invoice 7".into()),
            msg: "stake".into(),
            issued_at: Utc::now(),
        };
        let json = serde_json::to_string(&pending).expect("serialize");
        let back: PendingTransfer = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(pending, back);
    }

    #[test]
    fn outcome_variants_are_distinguishable() {
        assert_ne!(ReceiverOutcome::Used(0), ReceiverOutcome::Failed);
    }
}
