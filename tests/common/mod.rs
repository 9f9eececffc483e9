// tests/common/mod.rs
//! Shared builders for integration tests.

#![allow(dead_code)]

use notion2feed::blocks::*;
use notion2feed::{Block, ContentItem, ItemKind};

pub fn common(id: &str) -> BlockCommon {
    BlockCommon::new(id)
}

pub fn paragraph(id: &str, text: &str) -> Block {
    Block::Paragraph(ParagraphBlock {
        common: common(id),
        content: TextBlockContent::from_plain(text),
    })
}

pub fn heading1(id: &str, text: &str) -> Block {
    Block::Heading1(HeadingBlock {
        common: common(id),
        content: TextBlockContent::from_plain(text),
    })
}

pub fn numbered_item(id: &str, text: &str) -> Block {
    Block::NumberedListItem(NumberedListItemBlock {
        common: common(id),
        content: TextBlockContent::from_plain(text),
    })
}

pub fn image(id: &str, url: &str) -> Block {
    Block::Image(ImageBlock {
        common: common(id),
        file: FileObject::External {
            url: url.to_string(),
        },
        caption: vec![],
    })
}

pub fn toggle(id: &str, title: &str) -> Block {
    Block::Toggle(ToggleBlock {
        common: common(id),
        content: TextBlockContent::from_plain(title),
    })
}

pub fn child_database(id: &str, title: &str) -> Block {
    Block::ChildDatabase(ChildDatabaseBlock {
        common: common(id),
        title: title.to_string(),
    })
}

pub fn column_list(id: &str) -> Block {
    let mut common = common(id);
    common.has_children = true;
    Block::ColumnList(ColumnListBlock { common })
}

pub fn column(id: &str) -> Block {
    let mut common = common(id);
    common.has_children = true;
    Block::Column(ColumnBlock { common })
}

pub fn text_item(id: &str, content: &str) -> ContentItem {
    ContentItem::new(id, ItemKind::Text, "page").with_content(content)
}

pub fn image_item(id: &str) -> ContentItem {
    ContentItem::new(id, ItemKind::Image, "page").with_url(format!("http://x/{id}.png"))
}
