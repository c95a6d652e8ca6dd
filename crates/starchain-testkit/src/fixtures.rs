//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use starchain_core::{Keypair, WalletAddress};

/// A test wallet that can complete the challenge protocol.
pub struct TestSigner {
    pub keypair: Keypair,
}

impl TestSigner {
    /// Create a signer with a random keypair.
    pub fn new() -> Self {
        Self {
            keypair: Keypair::generate(),
        }
    }

    /// Create a deterministic signer from a one-byte seed.
    pub fn with_seed(seed: u8) -> Self {
        Self {
            keypair: Keypair::from_seed(&[seed; 32]),
        }
    }

    /// The wallet address this signer controls.
    pub fn address(&self) -> WalletAddress {
        self.keypair.address()
    }

    /// Sign a challenge message, returning the hex wire form.
    pub fn sign_hex(&self, message: &str) -> String {
        self.keypair.sign(message.as_bytes()).to_hex()
    }
}

impl Default for TestSigner {
    fn default() -> Self {
        Self::new()
    }
}

/// Create distinct deterministic signers for multi-wallet tests.
pub fn signers(count: usize) -> Vec<TestSigner> {
    (0..count).map(|i| TestSigner::with_seed(i as u8 + 1)).collect()
}

/// A plausible star payload for registration tests.
pub fn sample_star(story: &str) -> serde_json::Value {
    serde_json::json!({
        "dec": "68° 52' 56.9",
        "ra": "16h 29m 1.0s",
        "story": story,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use starchain_core::verify_message;

    #[test]
    fn test_seeded_signer_is_deterministic() {
        let a = TestSigner::with_seed(7);
        let b = TestSigner::with_seed(7);
        assert_eq!(a.address(), b.address());
        assert_eq!(a.sign_hex("message"), b.sign_hex("message"));
    }

    #[test]
    fn test_signature_verifies_against_address() {
        let signer = TestSigner::new();
        let message = format!("{}:1700000000:starRegistry", signer.address());
        let signature = signer.sign_hex(&message);

        assert!(verify_message(
            &signer.address(),
            message.as_bytes(),
            &signature
        ));
    }

    #[test]
    fn test_signers_are_distinct() {
        let wallets = signers(3);
        assert_ne!(wallets[0].address(), wallets[1].address());
        assert_ne!(wallets[1].address(), wallets[2].address());
        assert_ne!(wallets[0].address(), wallets[2].address());
    }
}
