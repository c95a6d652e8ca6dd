//! Challenge bookkeeping for the ownership protocol.
//!
//! A wallet asks for a challenge, signs it, and hands the signature back.
//! Each address holds at most one pending challenge: re-requesting
//! replaces the old one, and a successful submission consumes it.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use starchain_core::WalletAddress;

use crate::error::RegistryError;

/// Fixed suffix identifying this registry's challenge messages.
pub const CHALLENGE_SUFFIX: &str = "starRegistry";

/// A challenge handed to a wallet, ready to be signed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChallengeTicket {
    pub address: WalletAddress,
    pub requested_at: i64,
    pub message: String,
    pub window_remaining_secs: i64,
}

/// A challenge the book is still waiting on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingChallenge {
    pub message: String,
    pub requested_at: i64,
}

/// Pending challenges keyed by wallet address.
///
/// The book never mutates on a failed check: a wallet whose signature was
/// rejected keeps its challenge and may retry within the window.
#[derive(Debug)]
pub struct ChallengeBook {
    window_secs: i64,
    pending: HashMap<WalletAddress, PendingChallenge>,
}

impl ChallengeBook {
    pub fn new(window_secs: i64) -> Self {
        Self {
            window_secs,
            pending: HashMap::new(),
        }
    }

    /// Issue a fresh challenge for `address`, replacing any pending one.
    pub fn issue(&mut self, address: &WalletAddress, now: i64) -> ChallengeTicket {
        let message = format!("{}:{}:{}", address, now, CHALLENGE_SUFFIX);
        self.pending.insert(
            address.clone(),
            PendingChallenge {
                message: message.clone(),
                requested_at: now,
            },
        );

        ChallengeTicket {
            address: address.clone(),
            requested_at: now,
            message,
            window_remaining_secs: self.window_secs,
        }
    }

    /// Check that `message` is the pending challenge for `address` and is
    /// still inside the validity window. Never mutates the book.
    pub fn check(
        &self,
        address: &WalletAddress,
        message: &str,
        now: i64,
    ) -> Result<(), RegistryError> {
        let Some(pending) = self.pending.get(address) else {
            return Err(RegistryError::ChallengeMismatch);
        };
        if pending.message != message {
            return Err(RegistryError::ChallengeMismatch);
        }
        if now - pending.requested_at > self.window_secs {
            return Err(RegistryError::ChallengeExpired);
        }
        Ok(())
    }

    /// Spend the pending challenge for `address`.
    pub fn consume(&mut self, address: &WalletAddress) {
        self.pending.remove(address);
    }

    /// The challenge currently pending for `address`, if any.
    pub fn pending(&self, address: &WalletAddress) -> Option<&PendingChallenge> {
        self.pending.get(address)
    }
}
