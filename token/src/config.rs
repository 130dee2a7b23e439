//! # Ledger Configuration & Constants
//!
//! Every magic number in the token contract lives here. If you're hardcoding
//! a constant somewhere else, you're doing it wrong.
//!
//! Several of these values are part of the external interface (the event
//! schema tags, the storage bond). Changing them after launch breaks
//! indexers and strands deposits, so choose wisely before then.

use crate::context::Gas;

// ---------------------------------------------------------------------------
// Interface Tags
// ---------------------------------------------------------------------------

/// The metadata specification tag. Stored verbatim in [`TokenMetadata::spec`]
/// and validated at initialization.
///
/// [`TokenMetadata::spec`]: crate::metadata::TokenMetadata
pub const METADATA_SPEC: &str = "lum-141";

/// Standard tag carried by every emitted event record.
pub const EVENT_STANDARD: &str = "lum141";

/// Event schema version. Bump only with a migration plan for every consumer
/// parsing these lines.
pub const EVENT_VERSION: &str = "1.0.0";

// ---------------------------------------------------------------------------
// Storage Bond
// ---------------------------------------------------------------------------

/// Bytes a single ledger entry occupies in the platform's key-value store:
/// the account identifier key plus the serialized entry. A conservative
/// upper bound — refunding a slightly generous bond on unregister is fine,
/// under-charging is not.
pub const ACCOUNT_STORAGE_BYTES: u64 = 128;

/// Price per byte of contract storage, in lux (the native currency's
/// smallest unit). Fixed by the platform's economics, mirrored here so the
/// bond can be quoted without a platform round-trip.
pub const STORAGE_PRICE_PER_BYTE: u128 = 10_000_000_000_000_000_000;

/// The fixed storage bond: what one account pays, once, to hold a ledger
/// entry. Returned in full when the account unregisters.
pub const fn storage_bond() -> u128 {
    ACCOUNT_STORAGE_BYTES as u128 * STORAGE_PRICE_PER_BYTE
}

// ---------------------------------------------------------------------------
// Payment Guard
// ---------------------------------------------------------------------------

/// The exact attached payment required on state-mutating calls that move
/// tokens or release bonds. One lux — economically nothing, but the platform
/// only attaches payments to calls confirmed by the account's own key, so
/// requiring it rules out accidental or delegated invocation.
pub const ONE_LUX: u128 = 1;

// ---------------------------------------------------------------------------
// Gas Budgets
// ---------------------------------------------------------------------------

/// Gas reserved for the resolve phase of an extended transfer. The
/// notification call may burn everything the caller attached; this reserve
/// guarantees the refund bookkeeping still runs.
pub const GAS_FOR_RESOLVE_TRANSFER: Gas = Gas::from_tgas(5);

/// Minimum prepaid gas accepted by `ft_transfer_call`: enough for the
/// receiver notification to do real work plus [`GAS_FOR_RESOLVE_TRANSFER`].
pub const GAS_FLOOR_FOR_TRANSFER_CALL: Gas = Gas::from_tgas(30);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bond_is_product_of_bytes_and_price() {
        assert_eq!(
            storage_bond(),
            ACCOUNT_STORAGE_BYTES as u128 * STORAGE_PRICE_PER_BYTE
        );
    }

    #[test]
    fn transfer_call_floor_covers_resolve_reserve() {
        assert!(GAS_FLOOR_FOR_TRANSFER_CALL.as_u64() > GAS_FOR_RESOLVE_TRANSFER.as_u64());
    }
}
