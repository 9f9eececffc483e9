// src/pipeline.rs
//! Pipeline orchestration: one extraction pass per navigation.
//!
//! Stages run strictly in sequence — fetch → expand → extract boards →
//! auto-load databases → enrich icons → extract media → number → group —
//! and nothing is committed to the shared board catalog until the whole
//! pass succeeds. Every pass carries a generation token; a pass that is no
//! longer the latest when it finishes is discarded instead of committed,
//! so rapid navigation can never apply a stale response over a newer one.

use crate::api::{expand_layout_columns, BlockSource};
use crate::constants::{DEFAULT_FEED_TITLE, ICON_FETCH_BATCH_SIZE};
use crate::error::AppError;
use crate::feed::{extract_boards, extract_media, group, number_list_items};
use crate::model::{Board, BoardCatalog, BoardKind, ContentItem, GroupedItem};
use futures::future::join_all;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};

/// Drives the content reconstruction pipeline over an injected block source
/// and accumulates the session's board catalog.
pub struct FeedPipeline<S> {
    source: S,
    catalog: RwLock<BoardCatalog>,
    generation: AtomicU64,
}

impl<S: BlockSource> FeedPipeline<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            catalog: RwLock::new(BoardCatalog::new()),
            generation: AtomicU64::new(0),
        }
    }

    /// The block source this pipeline fetches through.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// A snapshot of the accumulated board catalog.
    pub fn boards(&self) -> Vec<Board> {
        self.catalog.read().boards().to_vec()
    }

    /// Loads one board and returns its rendered feed.
    ///
    /// Selecting a database board queries its rows into the catalog and
    /// yields an empty feed; anything else fetches and reconstructs its
    /// content. Returns [`AppError::Superseded`] when a newer load started
    /// before this one finished — the result is discarded, not committed.
    pub async fn load_board(
        &self,
        board_id: &str,
        force_refresh: bool,
    ) -> Result<Vec<GroupedItem>, AppError> {
        let token = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let known = self.catalog.read().get(board_id).cloned();

        if force_refresh {
            self.source.invalidate(board_id);
        }

        let (sub_boards, items) = if known.as_ref().map(|b| b.kind) == Some(BoardKind::Database) {
            let rows = self.source.query_database(board_id, force_refresh).await?;
            (rows, Vec::new())
        } else {
            let children = self.source.fetch_children(board_id, force_refresh).await?;
            let expanded = expand_layout_columns(&self.source, &children, force_refresh).await?;
            let boards = extract_boards(&expanded, Some(board_id));
            let items = extract_media(&expanded, board_id);
            (boards, items)
        };

        let mut sub_boards = self.auto_load_databases(sub_boards, force_refresh).await;
        self.enrich_icons(&mut sub_boards).await;

        let feed = self.assemble_feed(board_id, known.as_ref(), items);

        if self.generation.load(Ordering::SeqCst) != token {
            log::debug!("discarding superseded load of {}", board_id);
            return Err(AppError::Superseded);
        }

        let mut catalog = self.catalog.write();
        catalog.merge(sub_boards);
        catalog.mark_loaded(board_id);
        Ok(feed)
    }

    /// Creates a toggle board under `parent` and records it in the catalog.
    pub async fn create_board(&self, parent: &str, title: &str) -> Result<Board, AppError> {
        let board = self.source.create_board(parent, title).await?;
        self.catalog.write().merge(vec![board.clone()]);
        Ok(board)
    }

    /// Prepends the title card and runs the numbering and grouping passes.
    fn assemble_feed(
        &self,
        board_id: &str,
        known: Option<&Board>,
        items: Vec<ContentItem>,
    ) -> Vec<GroupedItem> {
        if items.is_empty() {
            return Vec::new();
        }

        let title = known
            .map(|b| b.title.clone())
            .unwrap_or_else(|| DEFAULT_FEED_TITLE.to_string());
        let parent_title = known
            .and_then(|b| b.parent_id.as_deref())
            .and_then(|parent| self.catalog.read().get(parent).map(|p| p.title.clone()));

        let mut with_title = Vec::with_capacity(items.len() + 1);
        with_title.push(ContentItem::title_card(title, board_id, parent_title));
        with_title.extend(items);

        group(&number_list_items(&with_title))
    }

    /// Expands database boards row-by-row until no unloaded database
    /// remains: an explicit work queue rather than recursion, so
    /// termination is visible — a database id is queried at most once and
    /// appended rows are de-duplicated by id.
    ///
    /// A failed query degrades: the boards accumulated so far are kept and
    /// expansion stops.
    async fn auto_load_databases(&self, boards: Vec<Board>, force_refresh: bool) -> Vec<Board> {
        let mut all = boards;

        loop {
            let pending: Vec<String> = all
                .iter()
                .filter(|b| b.kind == BoardKind::Database && !b.is_loaded)
                .map(|b| b.id.clone())
                .collect();
            if pending.is_empty() {
                return all;
            }

            let results = join_all(
                pending
                    .iter()
                    .map(|id| self.source.query_database(id, force_refresh)),
            )
            .await;

            for (id, result) in pending.iter().zip(results) {
                match result {
                    Ok(rows) => {
                        if let Some(db) = all.iter_mut().find(|b| &b.id == id) {
                            db.is_loaded = true;
                        }
                        for row in rows {
                            if !all.iter().any(|b| b.id == row.id) {
                                all.push(row);
                            }
                        }
                    }
                    Err(e) => {
                        log::warn!("database {} failed to load, keeping partial boards: {}", id, e);
                        return all;
                    }
                }
            }
        }
    }

    /// Fills in missing icons for page boards, a bounded batch at a time.
    /// Individual failures degrade to "no icon".
    async fn enrich_icons(&self, boards: &mut [Board]) {
        let targets: Vec<usize> = boards
            .iter()
            .enumerate()
            .filter(|(_, b)| b.kind == BoardKind::Page && b.icon.is_none())
            .map(|(i, _)| i)
            .collect();

        for batch in targets.chunks(ICON_FETCH_BATCH_SIZE) {
            let ids: Vec<String> = batch.iter().map(|&i| boards[i].id.clone()).collect();
            let icons = join_all(ids.iter().map(|id| self.source.fetch_page_icon(id))).await;
            for (&i, icon) in batch.iter().zip(icons) {
                boards[i].icon = icon;
            }
        }
    }
}
