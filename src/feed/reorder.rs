// src/feed/reorder.rs
//! Manual reorder expansion: the inverse of grouping.
//!
//! When a user drags a card, the grouped feed must be flattened back into
//! content items so the next render pass can re-number and re-group it.
//! Synthetic blank separators are re-inserted at compound-group boundaries;
//! without them, re-grouping would silently merge the two groups the user
//! just placed next to each other.

use crate::model::{ContentItem, GroupedItem};

/// Relocates the group matching `moved_id` to the position of `target_id`
/// and linearizes the sequence back into flat content items.
///
/// Relocation uses splice-and-insert semantics: remove at the old index,
/// insert at the target's original index. When the old index precedes the
/// target the intervening groups shift left by one, so the moved entry
/// lands just after the target.
///
/// Returns `None` when `moved_id == target_id` or either id is unknown —
/// the caller should treat that as "nothing happened".
pub fn expand_reorder(
    groups: &[GroupedItem],
    moved_id: &str,
    target_id: &str,
) -> Option<Vec<ContentItem>> {
    if moved_id == target_id {
        return None;
    }
    let from = groups.iter().position(|g| g.id() == moved_id)?;
    let to = groups.iter().position(|g| g.id() == target_id)?;

    let mut reordered: Vec<GroupedItem> = groups.to_vec();
    let moved = reordered.remove(from);
    reordered.insert(to, moved);

    Some(linearize(&reordered))
}

/// Flattens grouped items back into content items, inserting a separator
/// before each boundary where either neighbor is a compound group. Two
/// adjacent standalone items need none: they were never merged and
/// re-grouping a standalone item is position-independent.
fn linearize(groups: &[GroupedItem]) -> Vec<ContentItem> {
    let mut items = Vec::new();
    let mut boundary = 0;

    for (i, grouped) in groups.iter().enumerate() {
        if i > 0 && (groups[i - 1].is_group || grouped.is_group) {
            items.push(ContentItem::separator(boundary));
            boundary += 1;
        }
        if grouped.is_group {
            items.extend(grouped.group_items.iter().cloned());
        } else {
            items.push(grouped.item.clone());
        }
    }

    items
}
