//! # Event Records
//!
//! Append-only, structured log lines for off-chain consumers. Every record
//! is one line on the [`EVENT_TARGET`] tracing target, shaped as:
//!
//! ```text
//! EVENT_JSON:{"standard":"lum141","version":"1.0.0","event":"ft_transfer","data":[{...}]}
//! ```
//!
//! Indexers parse these lines; the schema is a wire format and must stay
//! byte-stable across releases. Amounts serialize as base-10 strings, not
//! JSON numbers — `u128` doesn't survive every JSON parser, and a string
//! survives all of them.

use serde::Serialize;

use crate::account::AccountId;
use crate::config::{EVENT_STANDARD, EVENT_VERSION};

/// Prefix marking an event line. Consumers strip it and parse the rest.
pub const EVENT_LOG_PREFIX: &str = "EVENT_JSON:";

/// The tracing target event lines are emitted on, so log pipelines can
/// route them away from diagnostic output.
pub const EVENT_TARGET: &str = "lumen_token::events";

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct Envelope<'a, T: Serialize> {
    standard: &'static str,
    version: &'static str,
    event: &'static str,
    data: [&'a T; 1],
}

/// Renders the stable event line for an event payload. Public so tests and
/// out-of-process consumers can pin the exact bytes.
pub fn render<T: Serialize>(event: &'static str, data: &T) -> String {
    let envelope = Envelope {
        standard: EVENT_STANDARD,
        version: EVENT_VERSION,
        event,
        data: [data],
    };
    match serde_json::to_string(&envelope) {
        Ok(json) => format!("{EVENT_LOG_PREFIX}{json}"),
        // None of the payload types below can fail to serialize; if one
        // ever does, surface a parseable marker rather than panicking
        // mid-transfer.
        Err(e) => format!("{EVENT_LOG_PREFIX}{{\"error\":\"{e}\"}}"),
    }
}

fn emit<T: Serialize>(event: &'static str, data: &T) {
    tracing::info!(target: EVENT_TARGET, "{}", render(event, data));
}

fn emit_warn<T: Serialize>(event: &'static str, data: &T) {
    tracing::warn!(target: EVENT_TARGET, "{}", render(event, data));
}

// ---------------------------------------------------------------------------
// Serde helper: u128 amounts as base-10 strings
// ---------------------------------------------------------------------------

/// Serializes `u128` as a base-10 string for the event wire format.
mod amount_string {
    use serde::Serializer;

    pub fn serialize<S: Serializer>(amount: &u128, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&amount.to_string())
    }
}

// ---------------------------------------------------------------------------
// Event payloads
// ---------------------------------------------------------------------------

/// The one-time supply mint at initialization.
#[derive(Serialize)]
pub struct FtMint<'a> {
    pub owner_id: &'a AccountId,
    #[serde(with = "amount_string")]
    pub amount: u128,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<&'a str>,
}

impl FtMint<'_> {
    pub fn emit(&self) {
        emit("ft_mint", self);
    }
}

/// A balance move: simple transfers, the optimistic phase of extended
/// transfers, and refunds (memo `"refund"`).
#[derive(Serialize)]
pub struct FtTransfer<'a> {
    pub old_owner_id: &'a AccountId,
    pub new_owner_id: &'a AccountId,
    #[serde(with = "amount_string")]
    pub amount: u128,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<&'a str>,
}

impl FtTransfer<'_> {
    pub fn emit(&self) {
        emit("ft_transfer", self);
    }
}

/// Warning-level record: a refund could not be honored in full because the
/// receiver no longer held enough. Not a failure — the clamped refund was
/// applied; this line documents the shortfall.
#[derive(Serialize)]
pub struct RefundTruncated<'a> {
    pub sender_id: &'a AccountId,
    pub receiver_id: &'a AccountId,
    #[serde(with = "amount_string")]
    pub requested: u128,
    #[serde(with = "amount_string")]
    pub refunded: u128,
}

impl RefundTruncated<'_> {
    pub fn emit(&self) {
        emit_warn("refund_truncated", self);
    }
}

/// An account paid the bond and joined the registration set.
#[derive(Serialize)]
pub struct StorageRegister<'a> {
    pub account_id: &'a AccountId,
    #[serde(with = "amount_string")]
    pub bond: u128,
}

impl StorageRegister<'_> {
    pub fn emit(&self) {
        emit("storage_register", self);
    }
}

/// An account left the registration set. `swept_balance` is non-zero only
/// for forced removals.
#[derive(Serialize)]
pub struct StorageUnregister<'a> {
    pub account_id: &'a AccountId,
    #[serde(with = "amount_string")]
    pub bond_refund: u128,
    #[serde(with = "amount_string")]
    pub swept_balance: u128,
}

impl StorageUnregister<'_> {
    pub fn emit(&self) {
        emit("storage_unregister", self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transfer_line_is_byte_stable() {
        let sender = AccountId::from("alice.lumen");
        let receiver = AccountId::from("bob.lumen");
        let line = render(
            "ft_transfer",
            &FtTransfer {
                old_owner_id: &sender,
                new_owner_id: &receiver,
                amount: 500,
                memo: None,
            },
        );
        assert_eq!(
            line,
            "EVENT_JSON:{\"standard\":\"lum141\",\"version\":\"1.0.0\",\
             \"event\":\"ft_transfer\",\"data\":[{\"old_owner_id\":\"alice.lumen\",\
             \"new_owner_id\":\"bob.lumen\",\"amount\":\"500\"}]}"
        );
    }

    #[test]
    fn memo_appears_when_present() {
        let sender = AccountId::from("a");
        let receiver = AccountId::from("b");
        let line = render(
            "ft_transfer",
            &FtTransfer {
                old_owner_id: &sender,
                new_owner_id: &receiver,
                amount: 1,
                memo: Some("refund"),
            },
        );
        assert!(line.contains("\"memo\":\"refund\""));
    }

    #[test]
    fn amounts_render_as_strings_even_at_u128_extremes() {
        let owner = AccountId::from("treasury.lumen");
        let line = render(
            "ft_mint",
            &FtMint {
                owner_id: &owner,
                amount: u128::MAX,
                memo: None,
            },
        );
        assert!(line.contains(&format!("\"{}\"", u128::MAX)));
    }

    #[test]
    fn every_line_carries_standard_and_version() {
        let account = AccountId::from("carol.lumen");
        let line = render(
            "storage_register",
            &StorageRegister {
                account_id: &account,
                bond: 7,
            },
        );
        assert!(line.starts_with(EVENT_LOG_PREFIX));
        assert!(line.contains("\"standard\":\"lum141\""));
        assert!(line.contains("\"version\":\"1.0.0\""));
    }
}
