//! # Starchain Ledger
//!
//! Ledger state and the challenge-response registration protocol.
//!
//! ## Overview
//!
//! The ledger crate owns the append-only chain and the ownership
//! protocol built on top of it. A wallet proves control of its address
//! by signing a short-lived challenge; the [`Registrar`] verifies the
//! signature and anchors the claimed star in a new block.
//!
//! ## Key Types
//!
//! - [`Ledger`] - The thread-safe append-only chain
//! - [`Registrar`] - Unified API: challenges, submissions, queries
//! - [`ChallengeBook`] - Pending challenges, one per address
//! - [`RegistryError`] - Everything that can go wrong
//!
//! ## Protocol
//!
//! 1. `request_challenge(address)` returns a message of the form
//!    `<address>:<timestamp>:starRegistry`
//! 2. The wallet signs the message with its Ed25519 key
//! 3. `submit_star(address, message, signature, star)` verifies and
//!    appends; the challenge is spent on success and kept on failure

pub mod challenge;
pub mod error;
pub mod ledger;
pub mod registrar;
pub mod registry;

pub use challenge::{ChallengeBook, ChallengeTicket, PendingChallenge, CHALLENGE_SUFFIX};
pub use error::RegistryError;
pub use ledger::Ledger;
pub use registrar::{Registrar, RegistrarConfig};
pub use registry::stars_by_owner;

pub use starchain_core::{
    audit_chain, verify_message, Block, BlockBody, BlockHash, BodyBytes, ChainViolation,
    CoreError, Keypair, StarRecord, WalletAddress,
};
