// src/model/block.rs
//! The closed tagged-variant block union.
//!
//! One discriminant per source block kind, each carrying its payload struct.
//! Downstream classification is a total match over this enum with a default
//! arm, never untyped property probing.

use super::blocks::*;
use serde::{Deserialize, Serialize};

/// Macro to reduce boilerplate in `Block` accessor methods.
macro_rules! for_all_blocks {
    ($self:expr, $pattern:pat => $result:expr) => {
        match $self {
            Block::Paragraph($pattern) => $result,
            Block::Heading1($pattern) => $result,
            Block::Heading2($pattern) => $result,
            Block::Heading3($pattern) => $result,
            Block::BulletedListItem($pattern) => $result,
            Block::NumberedListItem($pattern) => $result,
            Block::ToDo($pattern) => $result,
            Block::Toggle($pattern) => $result,
            Block::Quote($pattern) => $result,
            Block::Callout($pattern) => $result,
            Block::Code($pattern) => $result,
            Block::Image($pattern) => $result,
            Block::Video($pattern) => $result,
            Block::File($pattern) => $result,
            Block::Bookmark($pattern) => $result,
            Block::Embed($pattern) => $result,
            Block::ChildPage($pattern) => $result,
            Block::ChildDatabase($pattern) => $result,
            Block::ColumnList($pattern) => $result,
            Block::Column($pattern) => $result,
            Block::Unsupported($pattern) => $result,
        }
    };
}

/// All block kinds the feed understands, plus an `Unsupported` catch-all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Block {
    Paragraph(ParagraphBlock),
    Heading1(HeadingBlock),
    Heading2(HeadingBlock),
    Heading3(HeadingBlock),
    BulletedListItem(BulletedListItemBlock),
    NumberedListItem(NumberedListItemBlock),
    ToDo(ToDoBlock),
    Toggle(ToggleBlock),
    Quote(QuoteBlock),
    Callout(CalloutBlock),
    Code(CodeBlock),
    Image(ImageBlock),
    Video(VideoBlock),
    File(FileBlock),
    Bookmark(BookmarkBlock),
    Embed(EmbedBlock),
    ChildPage(ChildPageBlock),
    ChildDatabase(ChildDatabaseBlock),
    ColumnList(ColumnListBlock),
    Column(ColumnBlock),
    Unsupported(UnsupportedBlock),
}

impl Block {
    /// The block's stable id.
    pub fn id(&self) -> &str {
        for_all_blocks!(self, b => &b.common.id)
    }

    /// Common fields shared by every kind.
    pub fn common(&self) -> &BlockCommon {
        for_all_blocks!(self, b => &b.common)
    }

    /// Whether the source reports nested children for this block.
    pub fn has_children(&self) -> bool {
        self.common().has_children
    }

    /// The source kind tag, as the API spells it.
    pub fn block_type(&self) -> &'static str {
        match self {
            Block::Paragraph(_) => "paragraph",
            Block::Heading1(_) => "heading_1",
            Block::Heading2(_) => "heading_2",
            Block::Heading3(_) => "heading_3",
            Block::BulletedListItem(_) => "bulleted_list_item",
            Block::NumberedListItem(_) => "numbered_list_item",
            Block::ToDo(_) => "to_do",
            Block::Toggle(_) => "toggle",
            Block::Quote(_) => "quote",
            Block::Callout(_) => "callout",
            Block::Code(_) => "code",
            Block::Image(_) => "image",
            Block::Video(_) => "video",
            Block::File(_) => "file",
            Block::Bookmark(_) => "bookmark",
            Block::Embed(_) => "embed",
            Block::ChildPage(_) => "child_page",
            Block::ChildDatabase(_) => "child_database",
            Block::ColumnList(_) => "column_list",
            Block::Column(_) => "column",
            Block::Unsupported(_) => "unsupported",
        }
    }

    /// Whether this block is a multi-column layout container whose real
    /// content lives two fetches deeper (column list → columns → content).
    pub fn is_layout_container(&self) -> bool {
        matches!(self, Block::ColumnList(_))
    }
}
