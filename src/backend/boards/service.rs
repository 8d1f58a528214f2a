/**
 * Board Service
 *
 * Board CRUD plus the two operations that span a whole board: the cascade
 * delete and the repair pass over every sibling group of the board.
 */

use std::sync::Arc;
use uuid::Uuid;

use super::cascade::{self, CascadeReport};
use super::guard::owned_board;
use crate::backend::error::BackendError;
use crate::backend::ordering::{GroupGuard, GroupLocks, Sequencer};
use crate::backend::realtime::BoardRooms;
use crate::backend::store::{SiblingGroup, Store};
use crate::shared::kanban::validation::{validate_board_create, validate_board_update};
use crate::shared::kanban::{
    Board, BoardDetails, ColumnWithCards, CreateBoardRequest, RepairReport, UpdateBoardRequest,
};
use crate::shared::{EventType, RealtimeEvent};

#[derive(Clone)]
pub struct BoardService {
    store: Arc<dyn Store>,
    sequencer: Sequencer,
    locks: GroupLocks,
    rooms: BoardRooms,
}

impl BoardService {
    pub fn new(store: Arc<dyn Store>, locks: GroupLocks, rooms: BoardRooms) -> Self {
        Self {
            sequencer: Sequencer::new(store.clone()),
            store,
            locks,
            rooms,
        }
    }

    pub async fn create_board(&self, principal: Uuid, request: CreateBoardRequest) -> Result<Board, BackendError> {
        validate_board_create(&request)?;
        let board = Board::new(
            principal,
            request.title.trim().to_string(),
            request.icon,
            request.background,
        );
        self.store.insert_board(&board).await?;
        tracing::info!("Created board {} for user {}", board.id, principal);
        Ok(board)
    }

    /// Boards owned by `principal`, newest first
    pub async fn list_boards(&self, principal: Uuid) -> Result<Vec<Board>, BackendError> {
        Ok(self.store.boards_for_owner(principal).await?)
    }

    /// A board with its columns and their cards, all in ascending order
    pub async fn get_board(&self, principal: Uuid, board_id: Uuid) -> Result<BoardDetails, BackendError> {
        let board = owned_board(self.store.as_ref(), board_id, principal).await?;
        let columns = self.store.columns_in_board(board.id).await?;
        let column_ids: Vec<Uuid> = columns.iter().map(|column| column.id).collect();
        let cards = self.store.cards_in_columns(&column_ids).await?;

        let columns = columns
            .into_iter()
            .map(|column| {
                let cards = cards
                    .iter()
                    .filter(|card| card.column_id == column.id)
                    .cloned()
                    .collect();
                ColumnWithCards { column, cards }
            })
            .collect();

        Ok(BoardDetails { board, columns })
    }

    pub async fn update_board(
        &self,
        principal: Uuid,
        board_id: Uuid,
        request: UpdateBoardRequest,
    ) -> Result<Board, BackendError> {
        validate_board_update(&request)?;
        let mut board = owned_board(self.store.as_ref(), board_id, principal).await?;

        if let Some(title) = request.title {
            board.title = title.trim().to_string();
        }
        if let Some(icon) = request.icon.filter(|icon| !icon.is_empty()) {
            board.icon = icon;
        }
        if let Some(background) = request.background {
            board.background = background;
        }
        board.updated_at = chrono::Utc::now();

        if !self.store.save_board(&board).await? {
            return Err(BackendError::not_found("Board", board.id));
        }
        self.rooms
            .publish(RealtimeEvent::of(EventType::BoardUpdated, board.id, &board));
        Ok(board)
    }

    /// Delete a board with every column and card below it
    pub async fn delete_board(&self, principal: Uuid, board_id: Uuid) -> Result<CascadeReport, BackendError> {
        owned_board(self.store.as_ref(), board_id, principal).await?;
        let _guards = self.lock_board(board_id).await?;

        let report = cascade::delete_board(self.store.as_ref(), board_id).await?;
        self.rooms
            .publish(RealtimeEvent::deleted(EventType::BoardDeleted, board_id, board_id));
        Ok(report)
    }

    /// Re-derive a dense order for the board's columns and every card group
    pub async fn repair_board(&self, principal: Uuid, board_id: Uuid) -> Result<RepairReport, BackendError> {
        owned_board(self.store.as_ref(), board_id, principal).await?;
        let guards = self.lock_board(board_id).await?;

        let mut report = RepairReport::default();
        for guard in &guards {
            for group in guard.groups() {
                report.rows_updated += self.sequencer.resequence(*group).await?;
                report.groups += 1;
            }
        }

        tracing::info!(
            "Repaired board {}: {} groups, {} rows updated",
            board_id,
            report.groups,
            report.rows_updated
        );
        self.rooms
            .publish(RealtimeEvent::of(EventType::BoardRepaired, board_id, &report));
        Ok(report)
    }

    /// Lock the board's column group, then every card group inside it
    ///
    /// Column groups sort before card groups, so taking them in two steps
    /// keeps the global lock order. No column can be added or removed once
    /// the first guard is held.
    async fn lock_board(&self, board_id: Uuid) -> Result<[GroupGuard; 2], BackendError> {
        let columns_guard = self.locks.lock(SiblingGroup::BoardColumns(board_id)).await;
        let card_groups: Vec<SiblingGroup> = self
            .store
            .columns_in_board(board_id)
            .await?
            .iter()
            .map(|column| SiblingGroup::ColumnCards(column.id))
            .collect();
        let cards_guard = self.locks.lock_all(&card_groups).await;
        Ok([columns_guard, cards_guard])
    }
}
