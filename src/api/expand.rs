// src/api/expand.rs
//! Tree expansion: flattening multi-column layouts into the block sequence.
//!
//! A column list hides its real content two fetches deep: the list's
//! children are column containers, and each column's children are the
//! content. Expansion appends both layers after the original sequence —
//! callers must tolerate that columns appear after their siblings rather
//! than interleaved at their visual position.

use super::BlockSource;
use crate::error::AppError;
use crate::model::Block;
use futures::future::try_join_all;

/// Expands the column-list containers among `children`, returning the
/// original list followed by the column containers and their content.
///
/// The fetches within each stage run concurrently; any failure propagates
/// and discards the whole expansion.
pub async fn expand_layout_columns<S: BlockSource + ?Sized>(
    source: &S,
    children: &[Block],
    force_refresh: bool,
) -> Result<Vec<Block>, AppError> {
    let mut expanded = children.to_vec();

    let column_lists: Vec<&Block> = children.iter().filter(|b| b.is_layout_container()).collect();
    if column_lists.is_empty() {
        return Ok(expanded);
    }

    let column_batches = try_join_all(
        column_lists
            .iter()
            .map(|list| source.fetch_children(list.id(), force_refresh)),
    )
    .await?;
    let columns: Vec<Block> = column_batches.into_iter().flatten().collect();

    let content_batches = try_join_all(
        columns
            .iter()
            .map(|column| source.fetch_children(column.id(), force_refresh)),
    )
    .await?;

    log::debug!(
        "expanded {} column lists into {} columns",
        column_lists.len(),
        columns.len()
    );

    expanded.extend(columns);
    expanded.extend(content_batches.into_iter().flatten());
    Ok(expanded)
}
