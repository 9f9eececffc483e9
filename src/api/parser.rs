// src/api/parser.rs
//! Parsing raw API JSON into the typed domain model.
//!
//! Parsing degrades rather than fails: a missing or malformed payload field
//! becomes an empty string / `false`, and an unknown block kind becomes
//! `Unsupported`. Only a structurally unusable response (no `results`
//! array) is an error.

use crate::error::AppError;
use crate::model::blocks::*;
use crate::model::{first_numeric, Block, Board, BoardKind, PropertyEntry, PropertyValue};
use crate::types::RichTextItem;
use chrono::{DateTime, Utc};
use serde_json::Value;

/// One page of a paginated listing.
pub struct PaginatedPage<T> {
    pub results: Vec<T>,
    pub has_more: bool,
    pub next_cursor: Option<String>,
}

/// Parses one page of a block-children listing.
pub fn parse_children_page(body: &Value) -> Result<PaginatedPage<Block>, AppError> {
    let results = body
        .get("results")
        .and_then(Value::as_array)
        .ok_or_else(|| AppError::MalformedResponse("missing 'results' array".to_string()))?;

    Ok(PaginatedPage {
        results: results.iter().map(block_from_json).collect(),
        has_more: bool_field(body, "has_more"),
        next_cursor: string_field(body, "next_cursor"),
    })
}

/// Parses one page of a database query into page-kind boards.
pub fn parse_query_page(body: &Value, database_id: &str) -> Result<PaginatedPage<Board>, AppError> {
    let results = body
        .get("results")
        .and_then(Value::as_array)
        .ok_or_else(|| AppError::MalformedResponse("missing 'results' array".to_string()))?;

    Ok(PaginatedPage {
        results: results
            .iter()
            .map(|row| board_from_row(row, database_id))
            .collect(),
        has_more: bool_field(body, "has_more"),
        next_cursor: string_field(body, "next_cursor"),
    })
}

/// Sorts boards descending by their first numeric property; boards without
/// one keep their relative order at the end.
pub fn sort_boards_by_first_numeric_desc(boards: &mut [Board]) {
    boards.sort_by(|a, b| {
        let a_num = a.properties.as_deref().and_then(first_numeric);
        let b_num = b.properties.as_deref().and_then(first_numeric);
        match (a_num, b_num) {
            (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(std::cmp::Ordering::Equal),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        }
    });
}

// ---------------------------------------------------------------------------
// Blocks
// ---------------------------------------------------------------------------

/// Converts one raw block object into the typed union.
pub fn block_from_json(value: &Value) -> Block {
    let common = BlockCommon {
        id: string_field(value, "id").unwrap_or_default(),
        has_children: bool_field(value, "has_children"),
        archived: bool_field(value, "archived"),
    };
    let kind = value.get("type").and_then(Value::as_str).unwrap_or("");
    let payload = value.get(kind).cloned().unwrap_or(Value::Null);

    match kind {
        "paragraph" => Block::Paragraph(ParagraphBlock {
            common,
            content: text_content(&payload),
        }),
        "heading_1" => Block::Heading1(heading(common, &payload)),
        "heading_2" => Block::Heading2(heading(common, &payload)),
        "heading_3" => Block::Heading3(heading(common, &payload)),
        "bulleted_list_item" => Block::BulletedListItem(BulletedListItemBlock {
            common,
            content: text_content(&payload),
        }),
        "numbered_list_item" => Block::NumberedListItem(NumberedListItemBlock {
            common,
            content: text_content(&payload),
        }),
        "to_do" => Block::ToDo(ToDoBlock {
            common,
            content: text_content(&payload),
            checked: bool_field(&payload, "checked"),
        }),
        "toggle" => Block::Toggle(ToggleBlock {
            common,
            content: text_content(&payload),
        }),
        "quote" => Block::Quote(QuoteBlock {
            common,
            content: text_content(&payload),
        }),
        "callout" => Block::Callout(CalloutBlock {
            common,
            content: text_content(&payload),
            icon: payload.get("icon").and_then(icon_from_json),
            color: string_field(&payload, "color").unwrap_or_default(),
        }),
        "code" => Block::Code(CodeBlock {
            common,
            content: text_content(&payload),
            language: string_field(&payload, "language").unwrap_or_default(),
            caption: rich_text(payload.get("caption")),
        }),
        "image" => Block::Image(ImageBlock {
            common,
            file: file_object(&payload),
            caption: rich_text(payload.get("caption")),
        }),
        "video" => Block::Video(VideoBlock {
            common,
            file: file_object(&payload),
            caption: rich_text(payload.get("caption")),
        }),
        "file" => Block::File(FileBlock {
            common,
            file: file_object(&payload),
            caption: rich_text(payload.get("caption")),
        }),
        "bookmark" => Block::Bookmark(BookmarkBlock {
            common,
            url: string_field(&payload, "url").unwrap_or_default(),
            caption: rich_text(payload.get("caption")),
        }),
        "embed" => Block::Embed(EmbedBlock {
            common,
            url: string_field(&payload, "url").unwrap_or_default(),
        }),
        "child_page" => Block::ChildPage(ChildPageBlock {
            common,
            title: string_field(&payload, "title").unwrap_or_default(),
        }),
        "child_database" => Block::ChildDatabase(ChildDatabaseBlock {
            common,
            title: string_field(&payload, "title").unwrap_or_default(),
        }),
        "column_list" => Block::ColumnList(ColumnListBlock { common }),
        "column" => Block::Column(ColumnBlock { common }),
        other => Block::Unsupported(UnsupportedBlock {
            common,
            block_type: other.to_string(),
        }),
    }
}

fn heading(common: BlockCommon, payload: &Value) -> HeadingBlock {
    HeadingBlock {
        common,
        content: text_content(payload),
    }
}

fn text_content(payload: &Value) -> TextBlockContent {
    TextBlockContent {
        rich_text: rich_text(payload.get("rich_text")),
    }
}

fn rich_text(value: Option<&Value>) -> Vec<RichTextItem> {
    value
        .and_then(Value::as_array)
        .map(|runs| {
            runs.iter()
                .map(|run| RichTextItem {
                    plain_text: string_field(run, "plain_text").unwrap_or_default(),
                    href: string_field(run, "href"),
                })
                .collect()
        })
        .unwrap_or_default()
}

/// A `file`/`external` tagged file reference; malformed input degrades to an
/// empty external URL, which downstream classification treats as absent.
fn file_object(payload: &Value) -> FileObject {
    match payload.get("type").and_then(Value::as_str) {
        Some("file") => FileObject::Hosted {
            url: payload
                .get("file")
                .and_then(|f| string_field(f, "url"))
                .unwrap_or_default(),
        },
        _ => FileObject::External {
            url: payload
                .get("external")
                .and_then(|f| string_field(f, "url"))
                .unwrap_or_default(),
        },
    }
}

// ---------------------------------------------------------------------------
// Database rows and page icons
// ---------------------------------------------------------------------------

/// Converts one database row (a page object) into a page-kind board.
fn board_from_row(row: &Value, database_id: &str) -> Board {
    let properties = row.get("properties");
    let title = properties
        .and_then(row_title)
        .unwrap_or_else(|| crate::constants::UNTITLED_BOARD.to_string());

    let mut board = Board::new(
        string_field(row, "id").unwrap_or_default(),
        title,
        BoardKind::Page,
    )
    .with_parent(database_id);
    // Row pages are navigable before we know anything about their content.
    board.has_children = true;
    board.icon = row.get("icon").and_then(icon_display);

    let entries = properties.map(properties_from_json).unwrap_or_default();
    if !entries.is_empty() {
        board.properties = Some(entries);
    }
    board
}

/// The concatenated plain text of the row's title property, if non-empty.
fn row_title(properties: &Value) -> Option<String> {
    let map = properties.as_object()?;
    let title_prop = map
        .values()
        .find(|p| p.get("type").and_then(Value::as_str) == Some("title"))?;
    let text = crate::types::concat_plain_text(&rich_text(title_prop.get("title")));
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Parses a page/callout icon into its displayable form.
fn icon_from_json(value: &Value) -> Option<Icon> {
    match value.get("type").and_then(Value::as_str)? {
        "emoji" => Some(Icon::Emoji {
            emoji: string_field(value, "emoji")?,
        }),
        "external" => Some(Icon::External {
            url: value.get("external").and_then(|f| string_field(f, "url"))?,
        }),
        "file" => Some(Icon::File {
            url: value.get("file").and_then(|f| string_field(f, "url"))?,
        }),
        _ => None,
    }
}

/// The display string of a page icon (emoji literal or image URL).
pub fn icon_display(value: &Value) -> Option<String> {
    icon_from_json(value).map(|icon| icon.display().to_string())
}

/// Extracts the typed property entries of a database row, in the order the
/// API returned them. The title property is surfaced as the board title
/// instead and skipped here; unsupported types are dropped.
pub fn properties_from_json(properties: &Value) -> Vec<PropertyEntry> {
    let Some(map) = properties.as_object() else {
        return Vec::new();
    };

    map.iter()
        .filter_map(|(name, prop)| {
            let kind = prop.get("type").and_then(Value::as_str)?;
            let (value, color) = property_value(kind, prop)?;
            Some(PropertyEntry {
                name: name.clone(),
                value,
                color,
            })
        })
        .collect()
}

fn property_value(kind: &str, prop: &Value) -> Option<(PropertyValue, Option<String>)> {
    let payload = prop.get(kind);
    let value = match kind {
        "rich_text" => {
            let text = crate::types::concat_plain_text(&rich_text(payload));
            if text.is_empty() {
                PropertyValue::Empty
            } else {
                PropertyValue::Text(text)
            }
        }
        "number" => match payload.and_then(Value::as_f64) {
            Some(n) => PropertyValue::Number(n),
            None => PropertyValue::Empty,
        },
        "checkbox" => PropertyValue::Checkbox(payload.and_then(Value::as_bool).unwrap_or(false)),
        "date" => match payload.and_then(|d| string_field(d, "start")) {
            Some(start) => PropertyValue::Date {
                start,
                end: payload.and_then(|d| string_field(d, "end")),
            },
            None => PropertyValue::Empty,
        },
        "select" => {
            return Some(named_option_value(payload, PropertyValue::Select));
        }
        "status" => {
            return Some(named_option_value(payload, PropertyValue::Status));
        }
        "multi_select" => {
            let names = payload
                .and_then(Value::as_array)
                .map(|opts| {
                    opts.iter()
                        .filter_map(|o| string_field(o, "name"))
                        .collect::<Vec<_>>()
                })
                .unwrap_or_default();
            if names.is_empty() {
                PropertyValue::Empty
            } else {
                PropertyValue::MultiSelect(names)
            }
        }
        "url" => match payload.and_then(Value::as_str) {
            Some(url) => PropertyValue::Url(url.to_string()),
            None => PropertyValue::Empty,
        },
        "email" => match payload.and_then(Value::as_str) {
            Some(email) => PropertyValue::Email(email.to_string()),
            None => PropertyValue::Empty,
        },
        "phone_number" => match payload.and_then(Value::as_str) {
            Some(phone) => PropertyValue::Phone(phone.to_string()),
            None => PropertyValue::Empty,
        },
        "people" => {
            let names = payload
                .and_then(Value::as_array)
                .map(|users| {
                    users
                        .iter()
                        .filter_map(|u| string_field(u, "name"))
                        .collect::<Vec<_>>()
                })
                .unwrap_or_default();
            if names.is_empty() {
                PropertyValue::Empty
            } else {
                PropertyValue::People(names)
            }
        }
        "created_time" => match payload.and_then(Value::as_str).and_then(parse_timestamp) {
            Some(ts) => PropertyValue::CreatedTime(ts),
            None => PropertyValue::Empty,
        },
        "last_edited_time" => match payload.and_then(Value::as_str).and_then(parse_timestamp) {
            Some(ts) => PropertyValue::EditedTime(ts),
            None => PropertyValue::Empty,
        },
        _ => return None,
    };
    Some((value, None))
}

fn named_option_value(
    payload: Option<&Value>,
    make: fn(String) -> PropertyValue,
) -> (PropertyValue, Option<String>) {
    match payload.and_then(|o| string_field(o, "name")) {
        Some(name) => {
            let color = payload.and_then(|o| string_field(o, "color"));
            (make(name), color)
        }
        None => (PropertyValue::Empty, None),
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

// ---------------------------------------------------------------------------
// JSON helpers
// ---------------------------------------------------------------------------

fn string_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}

fn bool_field(value: &Value, key: &str) -> bool {
    value.get(key).and_then(Value::as_bool).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn parses_paragraph_block() {
        let raw = json!({
            "id": "p1",
            "type": "paragraph",
            "has_children": false,
            "paragraph": { "rich_text": [{"plain_text": "hello"}] }
        });
        let block = block_from_json(&raw);
        match &block {
            Block::Paragraph(p) => assert_eq!(p.content.plain_text(), "hello"),
            other => panic!("expected paragraph, got {other:?}"),
        }
    }

    #[test]
    fn malformed_payload_degrades_to_defaults() {
        let raw = json!({ "id": "x", "type": "to_do" });
        match block_from_json(&raw) {
            Block::ToDo(todo) => {
                assert_eq!(todo.content.plain_text(), "");
                assert!(!todo.checked);
            }
            other => panic!("expected to_do, got {other:?}"),
        }
    }

    #[test]
    fn unknown_kind_becomes_unsupported() {
        let raw = json!({ "id": "x", "type": "table_of_contents", "table_of_contents": {} });
        match block_from_json(&raw) {
            Block::Unsupported(u) => assert_eq!(u.block_type, "table_of_contents"),
            other => panic!("expected unsupported, got {other:?}"),
        }
    }

    #[test]
    fn hosted_and_external_files_both_resolve() {
        let hosted = json!({
            "id": "i1", "type": "image",
            "image": { "type": "file", "file": {"url": "https://s3/x.png"}, "caption": [] }
        });
        let external = json!({
            "id": "i2", "type": "image",
            "image": { "type": "external", "external": {"url": "https://cdn/y.png"}, "caption": [] }
        });
        match block_from_json(&hosted) {
            Block::Image(b) => assert_eq!(b.file.url(), "https://s3/x.png"),
            _ => unreachable!(),
        }
        match block_from_json(&external) {
            Block::Image(b) => assert_eq!(b.file.url(), "https://cdn/y.png"),
            _ => unreachable!(),
        }
    }

    fn row(id: &str, title: &str, extra: Value) -> Value {
        let mut properties = json!({
            "Name": { "type": "title", "title": [{"plain_text": title}] }
        });
        if let (Some(dst), Some(src)) = (properties.as_object_mut(), extra.as_object()) {
            for (k, v) in src {
                dst.insert(k.clone(), v.clone());
            }
        }
        json!({ "id": id, "object": "page", "properties": properties })
    }

    #[test]
    fn query_rows_become_page_boards_with_properties() {
        let body = json!({
            "results": [row("r1", "First", json!({
                "Order": { "type": "number", "number": 3 },
                "Tags": { "type": "multi_select", "multi_select": [{"name": "art"}] }
            }))],
            "has_more": false,
            "next_cursor": null
        });
        let page = parse_query_page(&body, "db1").unwrap();
        assert_eq!(page.results.len(), 1);
        let board = &page.results[0];
        assert_eq!(board.title, "First");
        assert_eq!(board.kind, BoardKind::Page);
        assert_eq!(board.parent_id.as_deref(), Some("db1"));
        assert!(board.has_children);
        assert!(!board.is_loaded);
        let props = board.properties.as_ref().unwrap();
        assert_eq!(first_numeric(props), Some(3.0));
    }

    #[test]
    fn rows_sort_descending_by_first_numeric_property() {
        let body = json!({
            "results": [
                row("low", "Low", json!({"Order": {"type": "number", "number": 1}})),
                row("none", "None", json!({})),
                row("high", "High", json!({"Order": {"type": "number", "number": 9}})),
            ],
            "has_more": false
        });
        let mut boards = parse_query_page(&body, "db").unwrap().results;
        sort_boards_by_first_numeric_desc(&mut boards);
        let ids: Vec<&str> = boards.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["high", "low", "none"]);
    }

    #[test]
    fn page_icon_resolves_emoji_and_files() {
        assert_eq!(
            icon_display(&json!({"type": "emoji", "emoji": "🎨"})),
            Some("🎨".to_string())
        );
        assert_eq!(
            icon_display(&json!({"type": "external", "external": {"url": "https://x/icon.png"}})),
            Some("https://x/icon.png".to_string())
        );
        assert_eq!(icon_display(&json!({"type": "unknown"})), None);
    }

    #[test]
    fn property_extraction_covers_typed_values() {
        let props = json!({
            "Done": { "type": "checkbox", "checkbox": true },
            "When": { "type": "date", "date": {"start": "2024-05-01", "end": null} },
            "Status": { "type": "status", "status": {"name": "Shipped", "color": "green"} },
            "Contact": { "type": "email", "email": "a@b.c" },
        });
        let entries = properties_from_json(&props);
        assert_eq!(entries.len(), 4);
        let status = entries.iter().find(|e| e.name == "Status").unwrap();
        assert_eq!(status.value, PropertyValue::Status("Shipped".to_string()));
        assert_eq!(status.color.as_deref(), Some("green"));
    }
}
