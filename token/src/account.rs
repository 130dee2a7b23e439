//! Opaque account identifiers.
//!
//! The platform validates account identifier syntax before a call ever
//! reaches the contract; this subsystem treats them as opaque strings with
//! value semantics. An [`AccountId`] is cheap to clone, hashable (it keys
//! the ledger map), ordered, and serializes as a plain JSON string.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque, platform-validated account identifier.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    /// Wraps an identifier string. Syntactic validation is the platform's
    /// job, not ours; we only insist the platform didn't hand us nothing.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        debug_assert!(!id.is_empty(), "platform handed us an empty account id");
        Self(id)
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountId({})", self.0)
    }
}

impl From<&str> for AccountId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for AccountId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl AsRef<str> for AccountId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_and_hashing_by_value() {
        use std::collections::HashSet;

        let a1 = AccountId::from("alice.lumen");
        let a2 = AccountId::from("alice.lumen");
        let b = AccountId::from("bob.lumen");
        assert_eq!(a1, a2);
        assert_ne!(a1, b);

        let mut set = HashSet::new();
        set.insert(a1);
        assert!(set.contains(&a2));
        assert!(!set.contains(&b));
    }

    #[test]
    fn serializes_as_plain_string() {
        let a = AccountId::from("alice.lumen");
        assert_eq!(serde_json::to_string(&a).unwrap(), "\"alice.lumen\"");

        let back: AccountId = serde_json::from_str("\"bob.lumen\"").unwrap();
        assert_eq!(back.as_str(), "bob.lumen");
    }
}
