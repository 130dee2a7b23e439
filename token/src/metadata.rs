//! # Token Metadata
//!
//! The descriptive record fixed at initialization: name, symbol, decimals,
//! spec tag, and optional off-chain reference material. Read-only after
//! init: no mutator exists anywhere in this module.
//!
//! The `decimals` field is for display only. A token with `decimals = 8`
//! and raw amount `12345` renders as `0.00012345`; the protocol itself
//! never divides.

use serde::{Deserialize, Serialize};

use crate::config::METADATA_SPEC;
use crate::error::TokenError;

/// Length of a reference hash in bytes. The hash commits to the content
/// behind [`TokenMetadata::reference`] so wallets can detect tampering.
const REFERENCE_HASH_LEN: usize = 32;

/// The immutable-after-init token description.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    /// Specification tag. Must equal [`METADATA_SPEC`] — wallets use it to
    /// decide whether they can talk to this contract at all.
    pub spec: String,

    /// Human-readable token name (e.g., "Lumen Standard Token").
    pub name: String,

    /// Trading symbol / ticker (e.g., "LMN").
    pub symbol: String,

    /// Optional icon, as a data URL. Stored verbatim.
    pub icon: Option<String>,

    /// Optional URL to off-chain metadata (a JSON document, typically).
    pub reference: Option<String>,

    /// Hex-encoded 32-byte hash of the content behind `reference`.
    pub reference_hash: Option<String>,

    /// Display decimal places.
    pub decimals: u8,
}

impl TokenMetadata {
    /// A minimal valid record: spec tag filled in, no icon, no reference.
    pub fn new(name: impl Into<String>, symbol: impl Into<String>, decimals: u8) -> Self {
        Self {
            spec: METADATA_SPEC.to_string(),
            name: name.into(),
            symbol: symbol.into(),
            icon: None,
            reference: None,
            reference_hash: None,
            decimals,
        }
    }

    /// Attaches an icon data URL.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Attaches an off-chain reference and the hash committing to it.
    pub fn with_reference(
        mut self,
        reference: impl Into<String>,
        reference_hash: impl Into<String>,
    ) -> Self {
        self.reference = Some(reference.into());
        self.reference_hash = Some(reference_hash.into());
        self
    }

    /// Validates the record. Called once, at contract initialization —
    /// after that the record can't change, so it can't become invalid.
    pub fn validate(&self) -> Result<(), TokenError> {
        if self.spec != METADATA_SPEC {
            return Err(TokenError::InvalidMetadata(format!(
                "spec tag is '{}', expected '{}'",
                self.spec, METADATA_SPEC
            )));
        }
        if self.name.trim().is_empty() {
            return Err(TokenError::InvalidMetadata("name is empty".into()));
        }
        if self.symbol.trim().is_empty() {
            return Err(TokenError::InvalidMetadata("symbol is empty".into()));
        }
        // Reference and its hash travel together: a hash with nothing to
        // commit to is meaningless, a reference without a hash is
        // unverifiable.
        match (&self.reference, &self.reference_hash) {
            (Some(_), None) => {
                return Err(TokenError::InvalidMetadata(
                    "reference is set but reference_hash is missing".into(),
                ));
            }
            (None, Some(_)) => {
                return Err(TokenError::InvalidMetadata(
                    "reference_hash is set but reference is missing".into(),
                ));
            }
            (Some(_), Some(hash)) => {
                let bytes = hex::decode(hash).map_err(|e| {
                    TokenError::InvalidMetadata(format!("reference_hash is not hex: {e}"))
                })?;
                if bytes.len() != REFERENCE_HASH_LEN {
                    return Err(TokenError::InvalidMetadata(format!(
                        "reference_hash is {} bytes, expected {}",
                        bytes.len(),
                        REFERENCE_HASH_LEN
                    )));
                }
            }
            (None, None) => {}
        }
        Ok(())
    }
}
