//! # Starchain Testkit
//!
//! Testing utilities for the star registry.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Signers**: Deterministic wallets that can complete the challenge
//!   protocol in tests
//! - **Fixtures**: Sample star payloads
//!
//! ## Usage
//!
//! ```rust
//! use starchain_testkit::{sample_star, TestSigner};
//!
//! let signer = TestSigner::with_seed(7);
//! let message = format!("{}:1700000000:starRegistry", signer.address());
//! let signature = signer.sign_hex(&message);
//! let star = sample_star("found it over the observatory");
//! ```

pub mod fixtures;

pub use fixtures::{sample_star, signers, TestSigner};
