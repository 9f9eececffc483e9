// src/model/blocks.rs
//! Payload structs for each source block kind.
//!
//! Every struct carries a [`BlockCommon`] plus the kind-specific fields the
//! feed actually consumes. Fields the card feed never reads (annotations,
//! colors on plain text, nested children payloads) are dropped at the
//! parsing boundary rather than modeled here.

use crate::types::RichTextItem;
use serde::{Deserialize, Serialize};

/// Fields shared by every block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BlockCommon {
    pub id: String,
    pub has_children: bool,
    pub archived: bool,
}

impl BlockCommon {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            has_children: false,
            archived: false,
        }
    }
}

/// Rich-text content shared by all text-bearing blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TextBlockContent {
    pub rich_text: Vec<RichTextItem>,
}

impl TextBlockContent {
    pub fn from_plain(text: impl Into<String>) -> Self {
        Self {
            rich_text: vec![RichTextItem::plain(text)],
        }
    }

    /// The concatenated plain-text projection of this content.
    pub fn plain_text(&self) -> String {
        crate::types::concat_plain_text(&self.rich_text)
    }
}

/// A hosted or external file reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FileObject {
    External { url: String },
    Hosted { url: String },
}

impl FileObject {
    pub fn url(&self) -> &str {
        match self {
            Self::External { url } | Self::Hosted { url } => url,
        }
    }
}

impl Default for FileObject {
    fn default() -> Self {
        Self::External { url: String::new() }
    }
}

/// Icon attached to a callout or page: an emoji literal or an image URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Icon {
    Emoji { emoji: String },
    External { url: String },
    File { url: String },
}

impl Icon {
    /// The displayable form: the emoji itself, or the image URL.
    pub fn display(&self) -> &str {
        match self {
            Self::Emoji { emoji } => emoji,
            Self::External { url } | Self::File { url } => url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ParagraphBlock {
    pub common: BlockCommon,
    pub content: TextBlockContent,
}

/// Heading payload shared by all three heading depths; the depth lives in
/// the enclosing [`Block`](super::Block) variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HeadingBlock {
    pub common: BlockCommon,
    pub content: TextBlockContent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BulletedListItemBlock {
    pub common: BlockCommon,
    pub content: TextBlockContent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct NumberedListItemBlock {
    pub common: BlockCommon,
    pub content: TextBlockContent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ToDoBlock {
    pub common: BlockCommon,
    pub content: TextBlockContent,
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ToggleBlock {
    pub common: BlockCommon,
    pub content: TextBlockContent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct QuoteBlock {
    pub common: BlockCommon,
    pub content: TextBlockContent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CalloutBlock {
    pub common: BlockCommon,
    pub content: TextBlockContent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CodeBlock {
    pub common: BlockCommon,
    pub content: TextBlockContent,
    pub language: String,
    pub caption: Vec<RichTextItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ImageBlock {
    pub common: BlockCommon,
    pub file: FileObject,
    pub caption: Vec<RichTextItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct VideoBlock {
    pub common: BlockCommon,
    pub file: FileObject,
    pub caption: Vec<RichTextItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FileBlock {
    pub common: BlockCommon,
    pub file: FileObject,
    pub caption: Vec<RichTextItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BookmarkBlock {
    pub common: BlockCommon,
    pub url: String,
    pub caption: Vec<RichTextItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EmbedBlock {
    pub common: BlockCommon,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ChildPageBlock {
    pub common: BlockCommon,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ChildDatabaseBlock {
    pub common: BlockCommon,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ColumnListBlock {
    pub common: BlockCommon,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ColumnBlock {
    pub common: BlockCommon,
}

/// Any block kind the feed does not model; preserved so de-duplication and
/// diagnostics can still see it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UnsupportedBlock {
    pub common: BlockCommon,
    pub block_type: String,
}
