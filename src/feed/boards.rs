// src/feed/boards.rs
//! Board extraction: the navigable containers within a block sequence.

use crate::constants::UNTITLED_BOARD;
use crate::model::{Block, Board, BoardKind};

/// Extracts the boards (toggle sections, sub-pages, databases) from a block
/// sequence. No de-duplication happens here; the catalog merge owns that.
pub fn extract_boards(blocks: &[Block], parent_id: Option<&str>) -> Vec<Board> {
    blocks
        .iter()
        .filter_map(|block| board_from_block(block, parent_id))
        .collect()
}

fn board_from_block(block: &Block, parent_id: Option<&str>) -> Option<Board> {
    let (title, kind) = match block {
        Block::Toggle(b) => (b.content.plain_text(), BoardKind::Toggle),
        Block::ChildPage(b) => (b.title.clone(), BoardKind::Page),
        Block::ChildDatabase(b) => (b.title.clone(), BoardKind::Database),
        _ => return None,
    };

    let title = if title.trim().is_empty() {
        UNTITLED_BOARD.to_string()
    } else {
        title
    };

    let mut board = Board::new(block.id(), title, kind);
    board.parent_id = parent_id.map(str::to_string);
    // Database children are queried on demand, not reported by the block.
    board.has_children = block.has_children() || kind == BoardKind::Database;
    Some(board)
}
