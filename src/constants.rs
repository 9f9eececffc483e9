// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Reading these constants should tell you the story of how the feed
//! operates: how much it fetches per round-trip, how long responses stay
//! fresh, how wide the enrichment batches are.

// ---------------------------------------------------------------------------
// Notion API boundaries
// ---------------------------------------------------------------------------

/// How many objects the Notion API returns per page of results.
///
/// The API maximum is 100; we use it to minimize round-trips while
/// paginating block children and database rows.
pub const NOTION_API_PAGE_SIZE: u32 = 100;

/// The Notion API version header value this client speaks.
pub const NOTION_API_VERSION: &str = "2022-06-28";

/// Default base URL for the Notion HTTP API.
pub const NOTION_API_BASE: &str = "https://api.notion.com/v1";

// ---------------------------------------------------------------------------
// Caching and enrichment
// ---------------------------------------------------------------------------

/// How long a cached children/database response stays fresh, in seconds.
///
/// Deliberately short: the feed is meant to reflect edits made in Notion
/// within a few seconds, while still absorbing the burst of repeated
/// fetches a single navigation produces.
pub const RESPONSE_CACHE_TTL_SECS: u64 = 5;

/// How many page-icon fetches run concurrently during board enrichment.
pub const ICON_FETCH_BATCH_SIZE: usize = 5;

// ---------------------------------------------------------------------------
// Content fallbacks
// ---------------------------------------------------------------------------

/// Title shown for boards whose source block carries no usable title.
pub const UNTITLED_BOARD: &str = "Untitled";

/// Title card text for a feed loaded outside any known board (the root).
pub const DEFAULT_FEED_TITLE: &str = "Gallery";
