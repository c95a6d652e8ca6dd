//! Owner-indexed star queries.

use starchain_core::{Block, StarRecord, WalletAddress};

/// Collect every star `owner` has registered, in chain order.
///
/// Genesis carries no star and is skipped outright. Blocks whose bodies
/// do not decode as star records are skipped rather than failing the
/// whole query. An owner with no stars yields an empty list.
pub fn stars_by_owner(chain: &[Block], owner: &WalletAddress) -> Vec<StarRecord> {
    chain
        .iter()
        .skip(1)
        .filter_map(|b| b.star_record())
        .filter(|record| record.owner == *owner)
        .collect()
}
