// src/feed/media.rs
//! Content extraction: classify a block sequence into displayable items.

use super::classify::classify;
use crate::model::{Block, ContentItem};
use std::collections::HashSet;

/// Runs the classifier over an expanded block sequence in input order.
///
/// A block id can appear twice when the same block is reachable through two
/// expansion paths; it is emitted at most once, at its first occurrence.
/// Output order equals input order minus skipped and duplicate blocks — the
/// caller owns ordering by supplying already-expanded blocks.
pub fn extract_media(blocks: &[Block], parent_id: &str) -> Vec<ContentItem> {
    let mut seen = HashSet::new();
    let mut items = Vec::new();

    for block in blocks {
        if seen.contains(block.id()) {
            continue;
        }
        if let Some(item) = classify(block, parent_id) {
            seen.insert(block.id().to_string());
            items.push(item);
        }
    }

    log::debug!("extracted {} items from {} blocks", items.len(), blocks.len());
    items
}
