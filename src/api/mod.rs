// src/api/mod.rs
//! Notion API interaction — the ability to retrieve feed content.
//!
//! The pipeline depends on the [`BlockSource`] trait, never on HTTP
//! details; the production implementation wraps an HTTP client with a
//! short-TTL response cache.

pub mod cache;
pub mod client;
mod expand;
pub mod parser;

use crate::error::AppError;
use crate::model::{Block, Board};

/// The ability to retrieve content blocks and database rows.
///
/// Container ids are opaque strings, exactly as the source API reports
/// them. Implementations own pagination and caching; callers see the full
/// ordered result.
#[async_trait::async_trait]
pub trait BlockSource: Send + Sync {
    /// The full ordered child list of a container. `force_refresh` bypasses
    /// and replaces any cached entry.
    async fn fetch_children(
        &self,
        container: &str,
        force_refresh: bool,
    ) -> Result<Vec<Block>, AppError>;

    /// All rows of a database as page boards, sorted descending by their
    /// first numeric property.
    async fn query_database(
        &self,
        database: &str,
        force_refresh: bool,
    ) -> Result<Vec<Board>, AppError>;

    /// Evicts every cache entry related to a container id.
    fn invalidate(&self, container: &str);

    /// Best-effort page icon lookup; failure degrades to `None`.
    async fn fetch_page_icon(&self, page: &str) -> Option<String>;

    /// Creates a new toggle board under `parent` and invalidates the
    /// parent's cached children.
    async fn create_board(&self, parent: &str, title: &str) -> Result<Board, AppError>;
}

pub use cache::{CachedValue, ResponseCache};
pub use client::{CachedBlockSource, NotionHttpClient};
pub use expand::expand_layout_columns;
