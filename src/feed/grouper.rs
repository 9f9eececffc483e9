// src/feed/grouper.rs
//! Reading-order grouping: adjacent reading material merges into one card.
//!
//! The walk is a single pass with a buffer. A blank paragraph separates
//! groups and is itself consumed; standalone kinds (media, embeds, code,
//! links, titles) always stand alone. Identical input always yields
//! identical groups and group ids.

use crate::model::{ContentItem, GroupedItem, ItemKind};

/// Partitions a numbered item sequence into the rendered feed.
pub fn group(items: &[ContentItem]) -> Vec<GroupedItem> {
    let mut result = Vec::new();
    let mut buffer: Vec<ContentItem> = Vec::new();

    for item in items {
        if item.is_blank_text() {
            flush(&mut buffer, &mut result);
            continue;
        }

        if item.kind.is_standalone() {
            flush(&mut buffer, &mut result);
            result.push(GroupedItem::standalone(item.clone()));
            continue;
        }

        buffer.push(item.clone());
    }

    flush(&mut buffer, &mut result);
    result
}

fn flush(buffer: &mut Vec<ContentItem>, result: &mut Vec<GroupedItem>) {
    if buffer.is_empty() {
        return;
    }
    let members = std::mem::take(buffer);
    result.push(build_group(members));
}

/// A buffer of one stays a plain item; two or more become a compound group
/// whose id is the `-`-joined member ids, order preserved.
fn build_group(members: Vec<ContentItem>) -> GroupedItem {
    let mut members = members;
    if members.len() == 1 {
        return GroupedItem::standalone(members.remove(0));
    }

    let group_id = members
        .iter()
        .map(|m| m.id.as_str())
        .collect::<Vec<_>>()
        .join("-");

    let headings: Vec<ContentItem> = members
        .iter()
        .filter(|m| m.kind == ItemKind::Heading)
        .cloned()
        .collect();

    let first = &members[0];
    let mut item = ContentItem::new(group_id, ItemKind::Text, first.parent_id.clone());
    item.content = first.content.clone();
    item.metadata.level = headings.first().and_then(|h| h.metadata.level);

    GroupedItem {
        item,
        is_group: true,
        headings: if headings.is_empty() {
            None
        } else {
            Some(headings)
        },
        group_items: members,
    }
}
