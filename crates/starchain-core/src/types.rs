//! Strong type definitions for the star registry.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A wallet address: the lowercase hex form of an Ed25519 verifying key.
///
/// Addresses arrive over the wire as strings and are kept as strings. No
/// shape validation happens here; a malformed address simply never
/// verifies a signature. Format correctness is the caller's concern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WalletAddress(String);

impl WalletAddress {
    /// Wrap an address string as-is.
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    /// The raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the address carries no characters at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WalletAddress {
    fn from(address: &str) -> Self {
        Self(address.to_owned())
    }
}

impl From<String> for WalletAddress {
    fn from(address: String) -> Self {
        Self(address)
    }
}
