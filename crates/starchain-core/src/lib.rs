//! # starchain-core
//!
//! Pure primitives for the star registry ledger: blocks, body encoding,
//! seal digests, ownership signature verification, and the chain audit.
//!
//! This crate contains no I/O and no locking. It is pure computation over
//! the chain's data structures; the ledger crate owns the shared state.
//!
//! ## Key Types
//!
//! - [`Block`] - one immutable, hash-sealed ledger entry
//! - [`BlockBody`] - the decoded body: genesis marker or star record
//! - [`BlockHash`] - SHA-256 seal digest
//! - [`WalletAddress`] - the hex form of an Ed25519 verifying key
//!
//! ## Sealing
//!
//! Seal digests commit to a block's fields through a deterministic CBOR
//! preimage. See the [`canonical`] module.

pub mod audit;
pub mod block;
pub mod canonical;
pub mod crypto;
pub mod error;
pub mod types;

pub use audit::{audit_chain, ChainViolation};
pub use block::{Block, BlockBody, BodyBytes, StarRecord};
pub use canonical::seal_preimage;
pub use crypto::{verify_message, BlockHash, Ed25519Signature, Keypair};
pub use error::CoreError;
pub use types::WalletAddress;
