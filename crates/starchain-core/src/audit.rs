//! Whole-chain integrity audit.
//!
//! [`audit_chain`] walks a snapshot and reports every violation it finds
//! rather than stopping at the first, so an operator sees the full damage
//! from a single pass.

use thiserror::Error;

use crate::block::Block;
use crate::crypto::BlockHash;

/// A single integrity violation found during an audit.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChainViolation {
    #[error("chain has no genesis block")]
    MissingGenesis,

    #[error("genesis block claims a parent hash")]
    GenesisHasParent,

    #[error("block at index {index} records height {height}")]
    HeightMismatch { index: u64, height: u64 },

    #[error("block {height} does not link to its parent")]
    BrokenLink {
        height: u64,
        expected: BlockHash,
        found: Option<BlockHash>,
    },

    #[error("block {height} fails seal recomputation")]
    SealMismatch {
        height: u64,
        stored: BlockHash,
        computed: BlockHash,
    },
}

/// Audit a chain snapshot, collecting every violation.
///
/// An empty result means the snapshot is intact. The walk checks, per
/// block: height matches position, the genesis sentinel, the link to the
/// parent's hash, and seal recomputation.
pub fn audit_chain(chain: &[Block]) -> Vec<ChainViolation> {
    let mut violations = Vec::new();

    if chain.is_empty() {
        violations.push(ChainViolation::MissingGenesis);
        return violations;
    }

    for (index, block) in chain.iter().enumerate() {
        let index = index as u64;

        if block.height != index {
            violations.push(ChainViolation::HeightMismatch {
                index,
                height: block.height,
            });
        }

        if index == 0 {
            if block.previous_hash.is_some() {
                violations.push(ChainViolation::GenesisHasParent);
            }
        } else {
            let parent = &chain[(index - 1) as usize];
            if block.previous_hash != Some(parent.hash) {
                violations.push(ChainViolation::BrokenLink {
                    height: block.height,
                    expected: parent.hash,
                    found: block.previous_hash,
                });
            }
        }

        let computed = block.recompute_hash();
        if computed != block.hash {
            violations.push(ChainViolation::SealMismatch {
                height: block.height,
                stored: block.hash,
                computed,
            });
        }
    }

    violations
}
