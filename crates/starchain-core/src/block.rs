//! Blocks and block bodies.
//!
//! A [`Block`] is sealed once at construction: the hash is computed over
//! the canonical preimage of every other field and never changes. The
//! body travels as opaque [`BodyBytes`]; decoding back into a
//! [`BlockBody`] is always possible for bytes produced by
//! [`BlockBody::encode`].

use std::fmt;

use bytes::Bytes;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::canonical::seal_preimage;
use crate::crypto::BlockHash;
use crate::error::CoreError;
use crate::types::WalletAddress;

// ─────────────────────────────────────────────────────────────────────────────
// Star records
// ─────────────────────────────────────────────────────────────────────────────

/// A star claim: which wallet registered which star.
///
/// The star payload is caller-defined JSON. The registry stores it
/// verbatim and never interprets it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarRecord {
    pub owner: WalletAddress,
    pub star: serde_json::Value,
}

// ─────────────────────────────────────────────────────────────────────────────
// Block bodies
// ─────────────────────────────────────────────────────────────────────────────

/// Decoded block payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BlockBody {
    /// The founding block carries no star.
    Genesis,
    /// A verified star registration.
    Star(StarRecord),
}

impl BlockBody {
    /// Build a star body from its parts.
    pub fn star(owner: WalletAddress, star: serde_json::Value) -> Self {
        Self::Star(StarRecord { owner, star })
    }

    /// Encode to the opaque wire form stored inside a block.
    pub fn encode(&self) -> Result<BodyBytes, CoreError> {
        let mut buf = Vec::new();
        ciborium::into_writer(self, &mut buf)
            .map_err(|e| CoreError::BodyEncoding(e.to_string()))?;
        Ok(BodyBytes::from_vec(buf))
    }

    /// Decode from the opaque wire form.
    pub fn decode(bytes: &BodyBytes) -> Result<Self, CoreError> {
        let cursor = std::io::Cursor::new(bytes.as_slice());
        ciborium::from_reader(cursor).map_err(|e| CoreError::BodyDecoding(e.to_string()))
    }
}

/// Opaque encoded block payload.
///
/// Serializes as lowercase hex so blocks stay readable in JSON responses.
#[derive(Clone, PartialEq, Eq)]
pub struct BodyBytes(Bytes);

impl BodyBytes {
    pub fn from_vec(bytes: Vec<u8>) -> Self {
        Self(Bytes::from(bytes))
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        Ok(Self(Bytes::from(hex::decode(s)?)))
    }
}

impl fmt::Debug for BodyBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BodyBytes({} bytes)", self.0.len())
    }
}

impl AsRef<[u8]> for BodyBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Serialize for BodyBytes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for BodyBytes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Blocks
// ─────────────────────────────────────────────────────────────────────────────

/// A sealed entry in the chain.
///
/// Constructed only through [`Block::seal`], which derives the hash from
/// every other field. Mutating any field afterwards makes
/// [`Block::seal_intact`] report false.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub height: u64,
    pub timestamp: i64,
    pub previous_hash: Option<BlockHash>,
    pub hash: BlockHash,
    pub body: BodyBytes,
}

impl Block {
    /// Seal a new block over the given fields.
    pub fn seal(
        height: u64,
        timestamp: i64,
        previous_hash: Option<BlockHash>,
        body: BodyBytes,
    ) -> Self {
        let preimage = seal_preimage(height, timestamp, previous_hash.as_ref(), body.as_slice());
        let hash = BlockHash::digest(&preimage);
        Self {
            height,
            timestamp,
            previous_hash,
            hash,
            body,
        }
    }

    /// Recompute the seal from the current field values.
    pub fn recompute_hash(&self) -> BlockHash {
        let preimage = seal_preimage(
            self.height,
            self.timestamp,
            self.previous_hash.as_ref(),
            self.body.as_slice(),
        );
        BlockHash::digest(&preimage)
    }

    /// True when the stored hash still matches the sealed fields.
    pub fn seal_intact(&self) -> bool {
        self.recompute_hash() == self.hash
    }

    /// True for the founding block.
    pub fn is_genesis(&self) -> bool {
        self.height == 0
    }

    /// Decode the stored body.
    pub fn decode_body(&self) -> Result<BlockBody, CoreError> {
        BlockBody::decode(&self.body)
    }

    /// The star registered in this block, if any.
    ///
    /// Genesis and undecodable bodies both yield `None`.
    pub fn star_record(&self) -> Option<StarRecord> {
        match self.decode_body() {
            Ok(BlockBody::Star(record)) => Some(record),
            _ => None,
        }
    }
}
