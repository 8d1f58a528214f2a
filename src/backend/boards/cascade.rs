//! Cascade Deleter
//!
//! Explicit delete sagas for the board -> column -> card hierarchy. Children
//! always go first, so an interrupted saga leaves orphans-free leftovers that
//! a retry of the same call finishes.

use serde::Serialize;
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::backend::ordering::Sequencer;
use crate::backend::store::{SiblingGroup, Store};
use crate::shared::kanban::Column;

/// What a cascade removed
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CascadeReport {
    pub columns: u64,
    pub cards: u64,
}

/// Delete a board, its columns and their cards
///
/// Whole sibling groups disappear together, so no gap needs closing. The
/// caller holds the locks of the board's column group and of every card
/// group in it.
pub async fn delete_board(store: &dyn Store, board_id: Uuid) -> Result<CascadeReport, BackendError> {
    let column_ids: Vec<Uuid> = store
        .columns_in_board(board_id)
        .await?
        .into_iter()
        .map(|column| column.id)
        .collect();

    let cards = if column_ids.is_empty() {
        0
    } else {
        store.delete_cards_in_columns(&column_ids).await?
    };
    let columns = store.delete_columns_in_board(board_id).await?;
    store.delete_board(board_id).await?;

    tracing::info!("Deleted board {} with {} columns and {} cards", board_id, columns, cards);
    Ok(CascadeReport { columns, cards })
}

/// Delete a column and its cards, then close the gap among its siblings
///
/// The caller holds the locks of the column's board group and card group.
pub async fn delete_column(
    store: &dyn Store,
    sequencer: &Sequencer,
    column: &Column,
) -> Result<CascadeReport, BackendError> {
    let cards = store.delete_cards_in_columns(&[column.id]).await?;
    store.delete_column(column.id).await?;
    sequencer
        .close_gap(SiblingGroup::BoardColumns(column.board_id), column.order)
        .await?;

    tracing::info!("Deleted column {} with {} cards", column.id, cards);
    Ok(CascadeReport { columns: 1, cards })
}
