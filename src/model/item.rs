// src/model/item.rs
//! Displayable content items and their grouped form.

use super::properties::PropertyEntry;
use serde::{Deserialize, Serialize};

/// Every kind of card the feed can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Image,
    Video,
    Youtube,
    Loom,
    Canva,
    Text,
    Heading,
    Code,
    Link,
    Title,
    File,
    Properties,
    BulletedList,
    NumberedList,
    Todo,
    Quote,
    Callout,
}

impl ItemKind {
    /// Kinds that are always rendered as their own card and never merged
    /// into a reading group, regardless of adjacency.
    pub fn is_standalone(self) -> bool {
        matches!(
            self,
            Self::Image
                | Self::Video
                | Self::Youtube
                | Self::Loom
                | Self::Canva
                | Self::Code
                | Self::Link
                | Self::File
                | Self::Properties
                | Self::Title
        )
    }
}

/// Kind-specific metadata bag. Absent fields are omitted from serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ItemMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Vec<PropertyEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
}

impl ItemMetadata {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// One typed, displayable unit derived from a block.
///
/// `id` equals the originating block's id, except for synthetic separators
/// and title cards, whose ids are deterministic functions of their context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: String,
    pub kind: ItemKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "ItemMetadata::is_empty")]
    pub metadata: ItemMetadata,
    pub parent_id: String,
}

impl ContentItem {
    pub fn new(id: impl Into<String>, kind: ItemKind, parent_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            url: None,
            caption: None,
            content: None,
            metadata: ItemMetadata::default(),
            parent_id: parent_id.into(),
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        let caption = caption.into();
        if !caption.is_empty() {
            self.caption = Some(caption);
        }
        self
    }

    /// Whether this is a blank text item — the separator sentinel the
    /// grouper consumes as a section boundary.
    pub fn is_blank_text(&self) -> bool {
        self.kind == ItemKind::Text
            && self
                .content
                .as_deref()
                .map(|c| c.trim().is_empty())
                .unwrap_or(true)
    }

    /// A synthetic zero-width separator, inserted only while linearizing a
    /// manual reorder so that re-grouping preserves the boundary. Never
    /// produced by extraction, never rendered.
    pub fn separator(boundary: usize) -> Self {
        ContentItem::new(format!("sep-{boundary}"), ItemKind::Text, String::new())
            .with_content("")
    }

    /// The standalone title card shown at the top of a non-empty board feed.
    pub fn title_card(
        title: impl Into<String>,
        board_id: &str,
        parent_title: Option<String>,
    ) -> Self {
        let mut item = ContentItem::new(format!("title-{board_id}"), ItemKind::Title, board_id)
            .with_content(title);
        item.metadata.parent_title = parent_title;
        item
    }
}

/// A content item as it appears in the rendered feed: either a single
/// standalone item, or a compound group of adjacent reading material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupedItem {
    #[serde(flatten)]
    pub item: ContentItem,
    pub is_group: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub group_items: Vec<ContentItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headings: Option<Vec<ContentItem>>,
}

impl GroupedItem {
    /// Wraps an item that stands on its own, structurally identical to its
    /// source.
    pub fn standalone(item: ContentItem) -> Self {
        Self {
            item,
            is_group: false,
            group_items: Vec::new(),
            headings: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.item.id
    }
}
