//! Canonical encoding for the block seal preimage.
//!
//! This module implements the subset of RFC 8949 Core Deterministic
//! Encoding the seal needs:
//! - Integer map keys in sorted order
//! - Integers use smallest valid encoding
//! - Definite lengths only
//! - No floats (timestamps are i64 seconds)
//!
//! The canonical encoding is critical: the same block fields must produce
//! identical bytes (and thus an identical seal digest) on every platform,
//! or re-validation would break.

use crate::crypto::BlockHash;

/// Preimage field keys. Keys 0-23 encode as single bytes in CBOR.
mod keys {
    pub const HEIGHT: u64 = 0;
    pub const TIMESTAMP: u64 = 1;
    pub const PREVIOUS_HASH: u64 = 2;
    pub const BODY: u64 = 3;
}

/// Encode the seal preimage over a block's fields.
///
/// Format: a four-entry CBOR map keyed 0..=3. The keys are written in
/// order, which is already the canonical order for single-byte keys. A
/// missing parent (genesis) encodes as null, which no byte string can
/// collide with.
pub fn seal_preimage(
    height: u64,
    timestamp: i64,
    previous_hash: Option<&BlockHash>,
    body: &[u8],
) -> Vec<u8> {
    let mut buf = Vec::with_capacity(body.len() + 64);
    encode_uint(&mut buf, 5, 4); // map header, four entries

    encode_uint(&mut buf, 0, keys::HEIGHT);
    encode_uint(&mut buf, 0, height);

    encode_uint(&mut buf, 0, keys::TIMESTAMP);
    encode_int(&mut buf, timestamp);

    encode_uint(&mut buf, 0, keys::PREVIOUS_HASH);
    match previous_hash {
        Some(hash) => encode_bytes(&mut buf, hash.as_bytes()),
        None => buf.push(0xf6), // null: the genesis sentinel
    }

    encode_uint(&mut buf, 0, keys::BODY);
    encode_bytes(&mut buf, body);

    buf
}

/// Encode a signed integer (major types 0 and 1).
fn encode_int(buf: &mut Vec<u8>, n: i64) {
    if n >= 0 {
        encode_uint(buf, 0, n as u64);
    } else {
        // CBOR encodes -1 as 0, -2 as 1, etc.
        encode_uint(buf, 1, (-1 - n) as u64);
    }
}

/// Encode an unsigned integer with the given major type.
fn encode_uint(buf: &mut Vec<u8>, major: u8, n: u64) {
    let mt = major << 5;
    if n < 24 {
        buf.push(mt | (n as u8));
    } else if n <= 0xff {
        buf.push(mt | 24);
        buf.push(n as u8);
    } else if n <= 0xffff {
        buf.push(mt | 25);
        buf.extend_from_slice(&(n as u16).to_be_bytes());
    } else if n <= 0xffffffff {
        buf.push(mt | 26);
        buf.extend_from_slice(&(n as u32).to_be_bytes());
    } else {
        buf.push(mt | 27);
        buf.extend_from_slice(&n.to_be_bytes());
    }
}

/// Encode a byte string (major type 2).
fn encode_bytes(buf: &mut Vec<u8>, bytes: &[u8]) {
    encode_uint(buf, 2, bytes.len() as u64);
    buf.extend_from_slice(bytes);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_encoding() {
        let mut buf = Vec::new();

        // 0-23: single byte
        encode_uint(&mut buf, 0, 0);
        assert_eq!(buf, vec![0x00]);

        buf.clear();
        encode_uint(&mut buf, 0, 23);
        assert_eq!(buf, vec![0x17]);

        // 24-255: two bytes
        buf.clear();
        encode_uint(&mut buf, 0, 24);
        assert_eq!(buf, vec![0x18, 24]);

        buf.clear();
        encode_uint(&mut buf, 0, 255);
        assert_eq!(buf, vec![0x18, 255]);

        // 256-65535: three bytes
        buf.clear();
        encode_uint(&mut buf, 0, 256);
        assert_eq!(buf, vec![0x19, 0x01, 0x00]);

        buf.clear();
        encode_uint(&mut buf, 0, 65535);
        assert_eq!(buf, vec![0x19, 0xff, 0xff]);
    }

    #[test]
    fn test_negative_integer_encoding() {
        let mut buf = Vec::new();
        encode_int(&mut buf, -1);
        assert_eq!(buf, vec![0x20]);

        buf.clear();
        encode_int(&mut buf, -25);
        assert_eq!(buf, vec![0x38, 24]);

        buf.clear();
        encode_int(&mut buf, 42);
        assert_eq!(buf, vec![0x18, 42]);
    }

    #[test]
    fn test_preimage_deterministic() {
        let parent = BlockHash::from_bytes([0x11; 32]);
        let p1 = seal_preimage(3, 1_700_000_000, Some(&parent), b"body");
        let p2 = seal_preimage(3, 1_700_000_000, Some(&parent), b"body");
        assert_eq!(p1, p2);
    }

    #[test]
    fn test_preimage_commits_to_every_field() {
        let parent = BlockHash::from_bytes([0x11; 32]);
        let base = seal_preimage(3, 1_700_000_000, Some(&parent), b"body");

        assert_ne!(base, seal_preimage(4, 1_700_000_000, Some(&parent), b"body"));
        assert_ne!(base, seal_preimage(3, 1_700_000_001, Some(&parent), b"body"));
        assert_ne!(base, seal_preimage(3, 1_700_000_000, None, b"body"));
        assert_ne!(base, seal_preimage(3, 1_700_000_000, Some(&parent), b"bodY"));

        let other_parent = BlockHash::from_bytes([0x12; 32]);
        assert_ne!(
            base,
            seal_preimage(3, 1_700_000_000, Some(&other_parent), b"body")
        );
    }

    #[test]
    fn test_genesis_sentinel_distinct_from_zero_hash() {
        let zero = BlockHash::from_bytes([0; 32]);
        let with_sentinel = seal_preimage(0, 0, None, b"");
        let with_zero_hash = seal_preimage(0, 0, Some(&zero), b"");
        assert_ne!(with_sentinel, with_zero_hash);
    }

    #[test]
    fn test_preimage_layout() {
        let preimage = seal_preimage(1, 2, None, b"ab");
        // Map of 4, then key/value pairs: 0=>1, 1=>2, 2=>null, 3=>h'6162'
        assert_eq!(
            preimage,
            vec![0xa4, 0x00, 0x01, 0x01, 0x02, 0x02, 0xf6, 0x03, 0x42, 0x61, 0x62]
        );
    }
}
