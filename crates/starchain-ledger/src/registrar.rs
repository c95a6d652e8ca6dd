//! The Registrar: unified API for the star registry.
//!
//! The Registrar brings together the chain, the challenge book, and
//! signature verification into a cohesive interface for building
//! services on top of the ledger.

use std::sync::Mutex;

use starchain_core::{verify_message, Block, BlockBody, BlockHash, ChainViolation, StarRecord, WalletAddress};

use crate::challenge::{ChallengeBook, ChallengeTicket};
use crate::error::RegistryError;
use crate::ledger::{now_secs, Ledger};
use crate::registry::stars_by_owner;

/// Configuration for the Registrar.
///
/// The digest and signature schemes are fixed at build time; the
/// validity window is the runtime knob.
#[derive(Debug, Clone)]
pub struct RegistrarConfig {
    /// Seconds a wallet has to sign and return a challenge.
    pub validity_window_secs: i64,
}

impl Default for RegistrarConfig {
    fn default() -> Self {
        Self {
            validity_window_secs: 300,
        }
    }
}

/// The main Registrar struct.
///
/// Provides a unified API for:
/// - Issuing ownership challenges
/// - Verifying signed submissions and anchoring stars
/// - Querying blocks and stars
/// - Auditing chain integrity
pub struct Registrar {
    /// The append-only chain.
    ledger: Ledger,
    /// Pending challenges.
    challenges: Mutex<ChallengeBook>,
}

impl Registrar {
    /// Create a new registrar with a fresh genesis block.
    pub fn new(config: RegistrarConfig) -> Self {
        Self {
            ledger: Ledger::new(),
            challenges: Mutex::new(ChallengeBook::new(config.validity_window_secs)),
        }
    }

    /// Get the underlying ledger.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Ownership Protocol
    // ─────────────────────────────────────────────────────────────────────────

    /// Issue a challenge for `address` to sign.
    ///
    /// Re-requesting replaces any challenge already pending for the same
    /// address.
    pub async fn request_challenge(&self, address: &str) -> Result<ChallengeTicket, RegistryError> {
        if address.is_empty() {
            return Err(RegistryError::MissingInput("address"));
        }

        let address = WalletAddress::new(address);
        let ticket = self.challenges.lock().unwrap().issue(&address, now_secs());
        tracing::debug!(address = %ticket.address, "challenge issued");
        Ok(ticket)
    }

    /// Verify a signed challenge and anchor the star in a new block.
    ///
    /// Checks run in order: inputs present, challenge matches, challenge
    /// unexpired, signature valid. The first failure wins, and a failed
    /// submission leaves the pending challenge untouched so the wallet
    /// may retry within the window.
    pub async fn submit_star(
        &self,
        address: &str,
        message: &str,
        signature: &str,
        star: Option<serde_json::Value>,
    ) -> Result<Block, RegistryError> {
        if address.is_empty() {
            return Err(RegistryError::MissingInput("address"));
        }
        if message.is_empty() {
            return Err(RegistryError::MissingInput("message"));
        }
        if signature.is_empty() {
            return Err(RegistryError::MissingInput("signature"));
        }
        let Some(star) = star else {
            return Err(RegistryError::MissingInput("star"));
        };

        let address = WalletAddress::new(address);

        {
            let mut book = self.challenges.lock().unwrap();
            book.check(&address, message, now_secs())?;

            if !verify_message(&address, message.as_bytes(), signature) {
                return Err(RegistryError::InvalidSignature);
            }

            // Consume before releasing the lock so the same challenge
            // cannot authorize two blocks.
            book.consume(&address);
        }

        let body = BlockBody::star(address.clone(), star).encode()?;
        let block = self.ledger.append(body).await;
        tracing::info!(height = block.height, owner = %address, "star anchored");
        Ok(block)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Query Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Get the block at `height`.
    pub async fn block_by_height(&self, height: u64) -> Result<Block, RegistryError> {
        self.ledger
            .get_by_height(height)
            .await
            .ok_or(RegistryError::NotFound)
    }

    /// Get the block sealed with `hash`.
    pub async fn block_by_hash(&self, hash: &BlockHash) -> Result<Block, RegistryError> {
        self.ledger
            .get_by_hash(hash)
            .await
            .ok_or(RegistryError::NotFound)
    }

    /// Every star registered by `owner`, in chain order.
    pub async fn stars_by_owner(&self, owner: &str) -> Vec<StarRecord> {
        let chain = self.ledger.snapshot().await;
        stars_by_owner(&chain, &WalletAddress::new(owner))
    }

    /// Height of the chain tip.
    pub async fn height(&self) -> u64 {
        self.ledger.height().await
    }

    /// Audit the chain, reporting every integrity violation.
    pub async fn audit(&self) -> Vec<ChainViolation> {
        let violations = self.ledger.audit().await;
        if !violations.is_empty() {
            tracing::warn!(count = violations.len(), "chain audit found violations");
        }
        violations
    }
}

impl Default for Registrar {
    fn default() -> Self {
        Self::new(RegistrarConfig::default())
    }
}
