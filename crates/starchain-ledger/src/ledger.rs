//! The append-only chain.
//!
//! A [`Ledger`] starts life with a sealed genesis block and only ever
//! grows. Every append happens under a single write lock, so heights are
//! distinct and consecutive even under concurrent callers.

use std::sync::RwLock;

use starchain_core::{audit_chain, Block, BlockBody, BlockHash, BodyBytes, ChainViolation};

/// Thread-safe append-only block chain.
///
/// Blocks are never modified or removed after insertion. Reads hand out
/// clones so callers can never alias into the locked state.
pub struct Ledger {
    chain: RwLock<Vec<Block>>,
}

impl Ledger {
    /// Create a ledger with a freshly sealed genesis block.
    pub fn new() -> Self {
        let body = BlockBody::Genesis
            .encode()
            .expect("genesis body always encodes");
        let genesis = Block::seal(0, now_secs(), None, body);
        tracing::info!(hash = %genesis.hash, "ledger initialized");

        Self {
            chain: RwLock::new(vec![genesis]),
        }
    }

    /// Append a new block carrying `body`, linked to the current tip.
    ///
    /// Height assignment, parent linkage, and sealing all happen under
    /// the write lock.
    pub async fn append(&self, body: BodyBytes) -> Block {
        let mut chain = self.chain.write().unwrap();

        let height = chain.len() as u64;
        let previous_hash = chain.last().map(|b| b.hash);
        let block = Block::seal(height, now_secs(), previous_hash, body);

        chain.push(block.clone());
        tracing::debug!(height, hash = %block.hash, "block appended");
        block
    }

    /// Fetch the block at `height`, if the chain has grown that far.
    pub async fn get_by_height(&self, height: u64) -> Option<Block> {
        let chain = self.chain.read().unwrap();
        chain.get(height as usize).cloned()
    }

    /// Fetch the block whose seal matches `hash`.
    pub async fn get_by_hash(&self, hash: &BlockHash) -> Option<Block> {
        let chain = self.chain.read().unwrap();
        chain.iter().find(|b| b.hash == *hash).cloned()
    }

    /// Height of the tip. The genesis-only chain has height 0.
    pub async fn height(&self) -> u64 {
        let chain = self.chain.read().unwrap();
        chain.len() as u64 - 1
    }

    /// Clone the full chain for iteration outside the lock.
    pub async fn snapshot(&self) -> Vec<Block> {
        let chain = self.chain.read().unwrap();
        chain.clone()
    }

    /// Audit the current chain, reporting every integrity violation.
    pub async fn audit(&self) -> Vec<ChainViolation> {
        let chain = self.chain.read().unwrap();
        audit_chain(&chain)
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

/// Get current time in seconds since the Unix epoch.
pub(crate) fn now_secs() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_secs() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use starchain_core::WalletAddress;
    use serde_json::json;

    fn star_body(tag: &str) -> BodyBytes {
        BlockBody::star(WalletAddress::new("ab12"), json!({ "story": tag }))
            .encode()
            .unwrap()
    }

    #[tokio::test]
    async fn test_new_ledger_has_sealed_genesis() {
        let ledger = Ledger::new();
        assert_eq!(ledger.height().await, 0);

        let genesis = ledger.get_by_height(0).await.unwrap();
        assert!(genesis.is_genesis());
        assert_eq!(genesis.previous_hash, None);
        assert!(genesis.seal_intact());
        assert_eq!(genesis.decode_body().unwrap(), BlockBody::Genesis);
    }

    #[tokio::test]
    async fn test_append_links_to_tip() {
        let ledger = Ledger::new();
        let genesis = ledger.get_by_height(0).await.unwrap();

        let first = ledger.append(star_body("one")).await;
        assert_eq!(first.height, 1);
        assert_eq!(first.previous_hash, Some(genesis.hash));

        let second = ledger.append(star_body("two")).await;
        assert_eq!(second.height, 2);
        assert_eq!(second.previous_hash, Some(first.hash));
        assert_eq!(ledger.height().await, 2);
    }

    #[tokio::test]
    async fn test_lookups() {
        let ledger = Ledger::new();
        let block = ledger.append(star_body("findable")).await;

        assert_eq!(ledger.get_by_height(1).await, Some(block.clone()));
        assert_eq!(ledger.get_by_hash(&block.hash).await, Some(block));
        assert_eq!(ledger.get_by_height(99).await, None);

        let absent = starchain_core::BlockHash::digest(b"not in the chain");
        assert_eq!(ledger.get_by_hash(&absent).await, None);
    }

    #[tokio::test]
    async fn test_fresh_chain_audits_clean() {
        let ledger = Ledger::new();
        ledger.append(star_body("one")).await;
        ledger.append(star_body("two")).await;
        assert!(ledger.audit().await.is_empty());
    }
}
