//! Cryptographic primitives for the star registry.
//!
//! Wraps SHA-256 sealing and Ed25519 message signing with strong types.
//! [`verify_message`] is the trust boundary for the ownership protocol.

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;

use crate::types::WalletAddress;

/// A 32-byte SHA-256 digest sealing a block.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockHash(pub [u8; 32]);

impl BlockHash {
    /// Compute the SHA-256 digest of the given data.
    pub fn digest(data: &[u8]) -> Self {
        Self(Sha256::digest(data).into())
    }

    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to lowercase hex, the wire form of a block hash.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let bytes = hex::decode(s)?;
        if bytes.len() != 32 {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl fmt::Debug for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlockHash({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.to_hex()[..16])
    }
}

impl AsRef<[u8]> for BlockHash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for BlockHash {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl Serialize for BlockHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for BlockHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(D::Error::custom)
    }
}

/// A 64-byte Ed25519 signature.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Ed25519Signature(pub [u8; 64]);

impl Ed25519Signature {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    /// Convert to lowercase hex, the wire form of a signature.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let bytes = hex::decode(s)?;
        if bytes.len() != 64 {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        let mut arr = [0u8; 64];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl fmt::Debug for Ed25519Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ed25519Sig({}...)", &self.to_hex()[..16])
    }
}

impl AsRef<[u8]> for Ed25519Signature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// A keypair that can answer ownership challenges.
///
/// This wraps ed25519-dalek's SigningKey. The wallet address is the hex
/// form of the verifying key.
#[derive(Clone)]
pub struct Keypair {
    signing_key: SigningKey,
}

impl Keypair {
    /// Generate a new random keypair.
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let signing_key = SigningKey::generate(&mut rng);
        Self { signing_key }
    }

    /// Create from a 32-byte seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        let signing_key = SigningKey::from_bytes(seed);
        Self { signing_key }
    }

    /// The wallet address this keypair controls.
    pub fn address(&self) -> WalletAddress {
        WalletAddress::new(hex::encode(self.signing_key.verifying_key().to_bytes()))
    }

    /// Sign a message.
    pub fn sign(&self, message: &[u8]) -> Ed25519Signature {
        let sig = self.signing_key.sign(message);
        Ed25519Signature(sig.to_bytes())
    }

    /// Get the raw seed bytes (secret key material).
    pub fn seed(&self) -> [u8; 32] {
        self.signing_key.to_bytes()
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Keypair({})", self.address())
    }
}

/// Verify that `signature_hex` is a valid signature by `address` over
/// `message`.
///
/// This is the sole basis on which the ledger accepts a write tied to an
/// address. It decodes the address and signature from their wire
/// encodings and absorbs every failure into `false`: a malformed address,
/// a malformed signature, and a signature over different bytes all look
/// the same to the caller. Never panics.
pub fn verify_message(address: &WalletAddress, message: &[u8], signature_hex: &str) -> bool {
    checked_verify(address, message, signature_hex).is_some()
}

fn checked_verify(address: &WalletAddress, message: &[u8], signature_hex: &str) -> Option<()> {
    let key_bytes: [u8; 32] = hex::decode(address.as_str())
        .ok()?
        .as_slice()
        .try_into()
        .ok()?;
    let verifying_key = VerifyingKey::from_bytes(&key_bytes).ok()?;
    let signature = Ed25519Signature::from_hex(signature_hex).ok()?;
    verifying_key
        .verify(message, &Signature::from_bytes(&signature.0))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_and_verify() {
        let keypair = Keypair::generate();
        let message = b"hello world";
        let signature = keypair.sign(message).to_hex();

        assert!(verify_message(&keypair.address(), message, &signature));

        // Tampered message must fail
        assert!(!verify_message(&keypair.address(), b"hello worlD", &signature));
    }

    #[test]
    fn test_wrong_address_rejected() {
        let signer = Keypair::from_seed(&[0x11; 32]);
        let other = Keypair::from_seed(&[0x22; 32]);
        let message = b"prove it";
        let signature = signer.sign(message).to_hex();

        assert!(verify_message(&signer.address(), message, &signature));
        assert!(!verify_message(&other.address(), message, &signature));
    }

    #[test]
    fn test_malformed_wire_encodings_never_verify() {
        let keypair = Keypair::generate();
        let signature = keypair.sign(b"msg").to_hex();

        // Not hex at all
        assert!(!verify_message(&WalletAddress::new("not hex"), b"msg", &signature));
        // Hex of the wrong length
        assert!(!verify_message(&WalletAddress::new("abcd"), b"msg", &signature));
        // Empty address
        assert!(!verify_message(&WalletAddress::new(""), b"msg", &signature));
        // Malformed signature
        assert!(!verify_message(&keypair.address(), b"msg", "zz"));
        assert!(!verify_message(&keypair.address(), b"msg", "abcd"));
        assert!(!verify_message(&keypair.address(), b"msg", ""));
    }

    #[test]
    fn test_keypair_deterministic_from_seed() {
        let seed = [0x42u8; 32];
        let kp1 = Keypair::from_seed(&seed);
        let kp2 = Keypair::from_seed(&seed);
        assert_eq!(kp1.address(), kp2.address());
        assert_eq!(kp1.seed(), seed);
    }

    #[test]
    fn test_block_hash_digest_deterministic() {
        let h1 = BlockHash::digest(b"test data");
        let h2 = BlockHash::digest(b"test data");
        assert_eq!(h1, h2);
        assert_ne!(h1, BlockHash::digest(b"different data"));
    }

    #[test]
    fn test_block_hash_hex_roundtrip() {
        let hash = BlockHash::digest(b"round trip");
        let recovered = BlockHash::from_hex(&hash.to_hex()).unwrap();
        assert_eq!(hash, recovered);

        assert!(BlockHash::from_hex("1234").is_err());
        assert!(BlockHash::from_hex("not hex").is_err());
    }

    #[test]
    fn test_block_hash_serde_is_hex_string() {
        let hash = BlockHash::from_bytes([0xab; 32]);
        let json = serde_json::to_string(&hash).unwrap();
        assert_eq!(json, format!("\"{}\"", "ab".repeat(32)));
        let back: BlockHash = serde_json::from_str(&json).unwrap();
        assert_eq!(back, hash);
    }

    #[test]
    fn test_signature_hex_roundtrip() {
        let keypair = Keypair::from_seed(&[7; 32]);
        let sig = keypair.sign(b"payload");
        let recovered = Ed25519Signature::from_hex(&sig.to_hex()).unwrap();
        assert_eq!(sig, recovered);
    }
}
