// Copyright (c) 2026 Lumen Labs. MIT License.
// See LICENSE for details.

//! # Lumen Token — Fungible Token Ledger
//!
//! The state-management core of the Lumen fungible token contract: who holds
//! what, who has paid for the storage they occupy, and how value moves
//! between accounts. Everything else a token needs — wallets, explorers,
//! deployment pipelines — lives outside this crate and talks to it through
//! the exposed call surface.
//!
//! ## Architecture
//!
//! The crate is split into modules that mirror the actual concerns of a
//! token ledger:
//!
//! - **account** — Opaque account identifiers. The platform validates them;
//!   we just hold them.
//! - **context** — The platform boundary: caller identity, attached payment,
//!   prepaid gas. Passed explicitly into every operation. No ambient globals.
//! - **ledger** — The balance book. One entry per registered account,
//!   checked arithmetic everywhere, conservation enforced on every mutation.
//! - **storage** — Storage-bond accounting types. Holding a ledger entry
//!   costs bytes; bytes cost money; the bond covers it.
//! - **metadata** — The immutable-after-init descriptive record.
//! - **receiver** — The duck-typed boundary to notified contracts, plus the
//!   pending-transfer record that bridges the two phases of an extended
//!   transfer.
//! - **contract** — The contract itself: transfer protocol, storage
//!   registration, initialization.
//! - **cell** — The one-slot state store enforcing exactly-once init.
//! - **events** — Structured, append-only event records for off-chain
//!   indexers. The schema is a wire format; treat it like one.
//! - **config** — Every magic number, in one place, with its reasoning.
//!
//! ## Design Principles
//!
//! 1. All amounts are `u128` in smallest-unit denomination. No floating
//!    point, no display math in the protocol.
//! 2. Monetary arithmetic is `checked_*` everywhere. Wrapping arithmetic
//!    and money do not mix.
//! 3. The asynchronous transfer variant is an explicit two-phase state
//!    machine, not language-level suspension. Phase one commits
//!    optimistically; phase two reconciles, never rolls back.
//! 4. Every public state type is serializable (serde) so the host can
//!    persist the whole contract as a single key-value record.

pub mod account;
pub mod cell;
pub mod config;
pub mod context;
pub mod contract;
pub mod error;
pub mod events;
pub mod ledger;
pub mod metadata;
pub mod receiver;
pub mod storage;

pub use account::AccountId;
pub use cell::ContractCell;
pub use context::{CallContext, Gas};
pub use contract::Contract;
pub use error::TokenError;
pub use ledger::{AccountEntry, Ledger};
pub use metadata::TokenMetadata;
pub use receiver::{PendingTransfer, ReceiverOutcome, SettledTransfer, TokenReceiver};
pub use storage::{
    StorageBalance, StorageBalanceBounds, StorageDepositOutcome, StorageWithdrawOutcome,
    UnregisterOutcome,
};
