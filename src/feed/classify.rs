// src/feed/classify.rs
//! Block classification: one raw block in, at most one content item out.
//!
//! Text-bearing kinds are emitted only when their plain text is non-empty —
//! except paragraphs, which are emitted even when empty because an empty
//! paragraph is the separator sentinel the grouper consumes. Removing that
//! asymmetry breaks the separator mechanism.

use crate::model::{Block, ContentItem, ItemKind};
use crate::types::concat_plain_text;
use url::Url;

/// Maps one block to a content item, or `None` when the block contributes
/// nothing displayable. Pure; malformed payloads degrade to empty defaults.
pub fn classify(block: &Block, parent_id: &str) -> Option<ContentItem> {
    let id = block.id();
    match block {
        Block::Paragraph(b) => {
            // Emitted even when empty: the grouper needs the sentinel.
            Some(ContentItem::new(id, ItemKind::Text, parent_id).with_content(b.content.plain_text()))
        }
        Block::Heading1(b) => text_item(id, parent_id, ItemKind::Heading, b.content.plain_text())
            .map(|mut item| {
                item.metadata.level = Some(1);
                item
            }),
        Block::Heading2(b) => text_item(id, parent_id, ItemKind::Heading, b.content.plain_text())
            .map(|mut item| {
                item.metadata.level = Some(2);
                item
            }),
        Block::Heading3(b) => text_item(id, parent_id, ItemKind::Heading, b.content.plain_text())
            .map(|mut item| {
                item.metadata.level = Some(3);
                item
            }),
        Block::BulletedListItem(b) => {
            text_item(id, parent_id, ItemKind::BulletedList, b.content.plain_text())
        }
        Block::NumberedListItem(b) => {
            text_item(id, parent_id, ItemKind::NumberedList, b.content.plain_text())
        }
        Block::ToDo(b) => {
            text_item(id, parent_id, ItemKind::Todo, b.content.plain_text()).map(|mut item| {
                item.metadata.checked = Some(b.checked);
                item
            })
        }
        Block::Quote(b) => text_item(id, parent_id, ItemKind::Quote, b.content.plain_text()),
        Block::Callout(b) => {
            text_item(id, parent_id, ItemKind::Callout, b.content.plain_text()).map(|mut item| {
                item.metadata.icon = b.icon.as_ref().map(|i| i.display().to_string());
                if !b.color.is_empty() {
                    item.metadata.color = Some(b.color.clone());
                }
                item
            })
        }
        Block::Code(b) => {
            text_item(id, parent_id, ItemKind::Code, b.content.plain_text()).map(|mut item| {
                if !b.language.is_empty() {
                    item.metadata.language = Some(b.language.clone());
                }
                item.caption = non_empty(concat_plain_text(&b.caption));
                item
            })
        }
        Block::Image(b) => media_item(id, parent_id, ItemKind::Image, b.file.url())
            .map(|item| item.with_caption(concat_plain_text(&b.caption))),
        Block::Video(b) => {
            let url = b.file.url();
            if url.is_empty() {
                return None;
            }
            let (kind, video_id) = classify_video_url(url);
            let mut item = ContentItem::new(id, kind, parent_id)
                .with_url(url)
                .with_caption(concat_plain_text(&b.caption));
            item.metadata.video_id = video_id;
            Some(item)
        }
        Block::File(b) => media_item(id, parent_id, ItemKind::File, b.file.url()).map(|mut item| {
            let caption = concat_plain_text(&b.caption);
            item.metadata.file_name = Some(if caption.trim().is_empty() {
                file_name_from_url(b.file.url())
            } else {
                caption
            });
            item
        }),
        Block::Bookmark(b) => media_item(id, parent_id, ItemKind::Link, &b.url).map(|item| {
            item.with_content(b.url.clone())
                .with_caption(concat_plain_text(&b.caption))
        }),
        Block::Embed(b) => classify_embed(id, parent_id, &b.url),
        // Containers and unknown kinds produce no card of their own.
        _ => None,
    }
}

/// Emits a text-bearing item only when the content is non-empty after trim.
fn text_item(id: &str, parent_id: &str, kind: ItemKind, content: String) -> Option<ContentItem> {
    if content.trim().is_empty() {
        return None;
    }
    Some(ContentItem::new(id, kind, parent_id).with_content(content))
}

/// Emits a media item only when a resolvable URL is present.
fn media_item(id: &str, parent_id: &str, kind: ItemKind, url: &str) -> Option<ContentItem> {
    if url.is_empty() {
        return None;
    }
    Some(ContentItem::new(id, kind, parent_id).with_url(url))
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

/// Splits a video URL into a platform sub-kind plus video id, falling back
/// to a plain video when the host is unrecognized or the URL is malformed.
fn classify_video_url(raw: &str) -> (ItemKind, Option<String>) {
    let Ok(url) = Url::parse(raw) else {
        return (ItemKind::Video, None);
    };
    if let Some(id) = youtube_video_id(&url) {
        return (ItemKind::Youtube, Some(id));
    }
    if let Some(id) = loom_video_id(&url) {
        return (ItemKind::Loom, Some(id));
    }
    (ItemKind::Video, None)
}

/// Classifies an embed URL by host; unrecognized hosts are skipped entirely.
fn classify_embed(id: &str, parent_id: &str, raw: &str) -> Option<ContentItem> {
    let url = Url::parse(raw).ok()?;
    if let Some(video_id) = youtube_video_id(&url) {
        let mut item = ContentItem::new(id, ItemKind::Youtube, parent_id).with_url(raw);
        item.metadata.video_id = Some(video_id);
        return Some(item);
    }
    if let Some(video_id) = loom_video_id(&url) {
        let mut item = ContentItem::new(id, ItemKind::Loom, parent_id).with_url(raw);
        item.metadata.video_id = Some(video_id);
        return Some(item);
    }
    if let Some((design_id, embed_url)) = canva_embed(&url) {
        let mut item = ContentItem::new(id, ItemKind::Canva, parent_id).with_url(embed_url);
        item.metadata.video_id = Some(design_id);
        return Some(item);
    }
    None
}

fn host_is(url: &Url, domain: &str) -> bool {
    url.host_str()
        .map(|h| h == domain || h.ends_with(&format!(".{domain}")))
        .unwrap_or(false)
}

/// Extracts a YouTube video id from watch, short-link, or embed URLs.
fn youtube_video_id(url: &Url) -> Option<String> {
    if host_is(url, "youtu.be") {
        return url
            .path_segments()
            .and_then(|mut segments| segments.next())
            .filter(|s| !s.is_empty())
            .map(str::to_string);
    }
    if !host_is(url, "youtube.com") {
        return None;
    }
    if let Some((_, v)) = url.query_pairs().find(|(k, _)| k == "v") {
        if !v.is_empty() {
            return Some(v.into_owned());
        }
    }
    segment_after(url, "embed")
}

/// Extracts a Loom video id from share or embed URLs.
fn loom_video_id(url: &Url) -> Option<String> {
    if !host_is(url, "loom.com") {
        return None;
    }
    segment_after(url, "share").or_else(|| segment_after(url, "embed"))
}

/// Extracts the Canva design id and share key, rewriting the URL to the
/// embeddable view form: `/design/<id>/<key>/view?embed`.
fn canva_embed(url: &Url) -> Option<(String, String)> {
    if !host_is(url, "canva.com") {
        return None;
    }
    let segments: Vec<&str> = url.path_segments()?.collect();
    let design_pos = segments.iter().position(|s| *s == "design")?;
    let design_id = segments.get(design_pos + 1).filter(|s| !s.is_empty())?;
    let share_key = segments.get(design_pos + 2).filter(|s| !s.is_empty())?;
    let host = url.host_str()?;
    let embed_url = format!(
        "{}://{}/design/{}/{}/view?embed",
        url.scheme(),
        host,
        design_id,
        share_key
    );
    Some((design_id.to_string(), embed_url))
}

/// The path segment immediately following `marker`, if present.
fn segment_after(url: &Url, marker: &str) -> Option<String> {
    let segments: Vec<&str> = url.path_segments()?.collect();
    let pos = segments.iter().position(|s| *s == marker)?;
    segments
        .get(pos + 1)
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

/// The last path segment of a file URL with any query string removed, used
/// as a display name when the file block carries no caption.
fn file_name_from_url(url: &str) -> String {
    let without_query = url.split('?').next().unwrap_or(url);
    without_query
        .rsplit('/')
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or("File")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::blocks::*;
    use crate::model::Block;
    use crate::types::RichTextItem;
    use pretty_assertions::assert_eq;

    fn paragraph(id: &str, text: &str) -> Block {
        Block::Paragraph(ParagraphBlock {
            common: BlockCommon::new(id),
            content: TextBlockContent::from_plain(text),
        })
    }

    #[test]
    fn empty_paragraph_is_still_emitted() {
        let item = classify(&paragraph("p1", ""), "page").unwrap();
        assert_eq!(item.kind, ItemKind::Text);
        assert!(item.is_blank_text());
    }

    #[test]
    fn empty_heading_is_skipped() {
        let block = Block::Heading2(HeadingBlock {
            common: BlockCommon::new("h"),
            content: TextBlockContent::from_plain("   "),
        });
        assert_eq!(classify(&block, "page"), None);
    }

    #[test]
    fn heading_level_comes_from_the_variant() {
        let block = Block::Heading3(HeadingBlock {
            common: BlockCommon::new("h3"),
            content: TextBlockContent::from_plain("Deep"),
        });
        let item = classify(&block, "page").unwrap();
        assert_eq!(item.kind, ItemKind::Heading);
        assert_eq!(item.metadata.level, Some(3));
    }

    #[test]
    fn todo_keeps_checked_state() {
        let block = Block::ToDo(ToDoBlock {
            common: BlockCommon::new("t"),
            content: TextBlockContent::from_plain("write tests"),
            checked: true,
        });
        assert_eq!(classify(&block, "page").unwrap().metadata.checked, Some(true));
    }

    #[test]
    fn callout_keeps_icon_and_color() {
        let block = Block::Callout(CalloutBlock {
            common: BlockCommon::new("c"),
            content: TextBlockContent::from_plain("Note"),
            icon: Some(Icon::Emoji {
                emoji: "💡".to_string(),
            }),
            color: "yellow_background".to_string(),
        });
        let item = classify(&block, "page").unwrap();
        assert_eq!(item.metadata.icon.as_deref(), Some("💡"));
        assert_eq!(item.metadata.color.as_deref(), Some("yellow_background"));
    }

    #[test]
    fn image_without_url_is_skipped() {
        let block = Block::Image(ImageBlock {
            common: BlockCommon::new("img"),
            file: FileObject::External { url: String::new() },
            caption: vec![RichTextItem::plain("a caption alone is not enough")],
        });
        assert_eq!(classify(&block, "page"), None);
    }

    fn video(id: &str, url: &str) -> Block {
        Block::Video(VideoBlock {
            common: BlockCommon::new(id),
            file: FileObject::External {
                url: url.to_string(),
            },
            caption: vec![],
        })
    }

    #[test]
    fn youtube_watch_url_is_reclassified() {
        let item = classify(&video("v", "https://www.youtube.com/watch?v=dQw4w9WgXcQ"), "p").unwrap();
        assert_eq!(item.kind, ItemKind::Youtube);
        assert_eq!(item.metadata.video_id.as_deref(), Some("dQw4w9WgXcQ"));
    }

    #[test]
    fn youtube_short_link_is_reclassified() {
        let item = classify(&video("v", "https://youtu.be/abc123XYZ"), "p").unwrap();
        assert_eq!(item.kind, ItemKind::Youtube);
        assert_eq!(item.metadata.video_id.as_deref(), Some("abc123XYZ"));
    }

    #[test]
    fn loom_share_url_is_reclassified() {
        let item = classify(&video("v", "https://www.loom.com/share/feedc0ffee"), "p").unwrap();
        assert_eq!(item.kind, ItemKind::Loom);
        assert_eq!(item.metadata.video_id.as_deref(), Some("feedc0ffee"));
    }

    #[test]
    fn hosted_video_stays_plain_video() {
        let item = classify(&video("v", "https://files.example.com/clip.mp4"), "p").unwrap();
        assert_eq!(item.kind, ItemKind::Video);
        assert_eq!(item.metadata.video_id, None);
    }

    fn embed(id: &str, url: &str) -> Block {
        Block::Embed(EmbedBlock {
            common: BlockCommon::new(id),
            url: url.to_string(),
        })
    }

    #[test]
    fn canva_embed_is_rewritten_to_view_form() {
        let item = classify(
            &embed("e", "https://www.canva.com/design/DAF123/sh4r3key/edit?utm=x"),
            "p",
        )
        .unwrap();
        assert_eq!(item.kind, ItemKind::Canva);
        assert_eq!(item.metadata.video_id.as_deref(), Some("DAF123"));
        assert_eq!(
            item.url.as_deref(),
            Some("https://www.canva.com/design/DAF123/sh4r3key/view?embed")
        );
    }

    #[test]
    fn unrecognized_embed_is_skipped() {
        assert_eq!(classify(&embed("e", "https://example.com/widget"), "p"), None);
    }

    #[test]
    fn file_name_falls_back_to_url_segment() {
        let block = Block::File(FileBlock {
            common: BlockCommon::new("f"),
            file: FileObject::Hosted {
                url: "https://files.example.com/docs/report.pdf?sig=abc".to_string(),
            },
            caption: vec![],
        });
        let item = classify(&block, "page").unwrap();
        assert_eq!(item.metadata.file_name.as_deref(), Some("report.pdf"));
    }

    #[test]
    fn bookmark_becomes_a_link_with_url_content() {
        let block = Block::Bookmark(BookmarkBlock {
            common: BlockCommon::new("b"),
            url: "https://example.com".to_string(),
            caption: vec![RichTextItem::plain("Example")],
        });
        let item = classify(&block, "page").unwrap();
        assert_eq!(item.kind, ItemKind::Link);
        assert_eq!(item.content.as_deref(), Some("https://example.com"));
        assert_eq!(item.caption.as_deref(), Some("Example"));
    }

    #[test]
    fn containers_produce_no_items() {
        let toggle = Block::Toggle(ToggleBlock {
            common: BlockCommon::new("t"),
            content: TextBlockContent::from_plain("Section"),
        });
        let column_list = Block::ColumnList(ColumnListBlock {
            common: BlockCommon::new("cl"),
        });
        assert_eq!(classify(&toggle, "p"), None);
        assert_eq!(classify(&column_list, "p"), None);
    }
}
