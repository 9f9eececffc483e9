// src/feed/numbering.rs
//! Ordinal numbering for runs of consecutive numbered-list items.

use crate::model::{ContentItem, ItemKind};

/// Stamps sequential ordinals onto runs of consecutive numbered-list items.
///
/// Any item of a different kind resets the counter, so the next run restarts
/// at 1. Pure: returns a new sequence, other items pass through unmodified.
pub fn number_list_items(items: &[ContentItem]) -> Vec<ContentItem> {
    let mut counter = 0u32;

    items
        .iter()
        .map(|item| {
            if item.kind == ItemKind::NumberedList {
                counter += 1;
                let mut numbered = item.clone();
                numbered.metadata.number = Some(counter);
                numbered
            } else {
                counter = 0;
                item.clone()
            }
        })
        .collect()
}
