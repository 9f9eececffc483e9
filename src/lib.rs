// src/lib.rs
//! notion2feed library — reconstructs Notion content into an ordered,
//! grouped card feed.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling** — `AppError`, `NotionErrorCode`, `ValidationError`
//! - **Configuration** — `FeedConfig`
//! - **Domain model** — `Block`, `Board`, `ContentItem`, `GroupedItem`, etc.
//! - **API client** — `BlockSource`, `NotionHttpClient`, `CachedBlockSource`
//! - **Feed transforms** — `classify`, `extract_boards`, `extract_media`,
//!   `number_list_items`, `group`, `expand_reorder`
//! - **Orchestration** — `FeedPipeline`

mod api;
mod config;
mod constants;
mod error;
mod feed;
mod model;
mod pipeline;
mod types;

// --- Error Handling ---
pub use crate::error::{AppError, NotionErrorCode, Result};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{CommandLineInput, FeedConfig};
pub use crate::constants::{
    ICON_FETCH_BATCH_SIZE, NOTION_API_PAGE_SIZE, RESPONSE_CACHE_TTL_SECS,
};

// --- Domain Model ---
pub use crate::model::{
    blocks, Block, BlockCommon, Board, BoardCatalog, BoardKind, ContentItem, FileObject,
    GroupedItem, Icon, ItemKind, ItemMetadata, PropertyEntry, PropertyValue, TextBlockContent,
};

// --- Domain Types ---
pub use crate::types::{concat_plain_text, ApiKey, NotionId, RichTextItem};

// --- API Client ---
pub use crate::api::{
    expand_layout_columns, BlockSource, CachedBlockSource, CachedValue, NotionHttpClient,
    ResponseCache,
};
pub use crate::api::parser::{
    block_from_json, parse_children_page, parse_query_page, sort_boards_by_first_numeric_desc,
    PaginatedPage,
};

// --- Feed Transforms ---
pub use crate::feed::{
    classify, expand_reorder, extract_boards, extract_media, group, number_list_items,
};

// --- Orchestration ---
pub use crate::pipeline::FeedPipeline;
