// src/model/board.rs
//! Navigation boards and the session-scoped board catalog.
//!
//! A board is any navigable container surfaced in the sidebar tree: a toggle
//! section, a sub-page, or a database. Boards form a forest keyed by
//! `parent_id`; the catalog accumulates them over a session and is only ever
//! appended to or upgraded, never shrunk.

use super::properties::PropertyEntry;
use serde::{Deserialize, Serialize};

/// What kind of container a board represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoardKind {
    Toggle,
    Page,
    Database,
}

/// One navigable container node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    pub kind: BoardKind,
    pub has_children: bool,
    pub is_loaded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Vec<PropertyEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl Board {
    pub fn new(id: impl Into<String>, title: impl Into<String>, kind: BoardKind) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            parent_id: None,
            kind,
            has_children: false,
            is_loaded: false,
            properties: None,
            icon: None,
        }
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }
}

/// The accumulated board forest for one session.
///
/// Merge semantics are append/upgrade-only: an incoming board with a known
/// id never replaces the stored one, and `is_loaded` can only transition
/// false → true. Re-applying the same extraction result is therefore a
/// no-op.
#[derive(Debug, Default, Clone)]
pub struct BoardCatalog {
    boards: Vec<Board>,
}

impl BoardCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges extracted boards into the catalog by id.
    ///
    /// Returns how many boards were actually added.
    pub fn merge(&mut self, incoming: Vec<Board>) -> usize {
        let mut added = 0;
        for board in incoming {
            if self.boards.iter().any(|known| known.id == board.id) {
                continue;
            }
            self.boards.push(board);
            added += 1;
        }
        added
    }

    /// Marks a board as having had its children fetched.
    pub fn mark_loaded(&mut self, id: &str) {
        if let Some(board) = self.boards.iter_mut().find(|b| b.id == id) {
            board.is_loaded = true;
        }
    }

    /// Attaches an icon to a board, if it is known.
    pub fn set_icon(&mut self, id: &str, icon: String) {
        if let Some(board) = self.boards.iter_mut().find(|b| b.id == id) {
            board.icon = Some(icon);
        }
    }

    pub fn get(&self, id: &str) -> Option<&Board> {
        self.boards.iter().find(|b| b.id == id)
    }

    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    pub fn len(&self) -> usize {
        self.boards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }
}
