/**
 * Column Service
 *
 * Columns are the sibling group of a board. Every operation that changes
 * an `order` holds the board's column lock from the first read of current
 * orders until the last write, and reloads the column once the lock is held.
 */

use std::sync::Arc;
use uuid::Uuid;

use crate::backend::boards::cascade::{self, CascadeReport};
use crate::backend::boards::guard::{owned_board, owned_column, require};
use crate::backend::error::BackendError;
use crate::backend::ordering::{GroupLocks, Sequencer};
use crate::backend::realtime::BoardRooms;
use crate::backend::store::{SiblingGroup, Store};
use crate::shared::kanban::validation::{validate_assignments, validate_column_title, validate_order};
use crate::shared::kanban::{
    Board, Column, CreateColumnRequest, MoveColumnRequest, ReorderColumnsRequest, UpdateColumnRequest,
};
use crate::shared::{EventType, RealtimeEvent};

#[derive(Clone)]
pub struct ColumnService {
    store: Arc<dyn Store>,
    sequencer: Sequencer,
    locks: GroupLocks,
    rooms: BoardRooms,
}

impl ColumnService {
    pub fn new(store: Arc<dyn Store>, locks: GroupLocks, rooms: BoardRooms) -> Self {
        Self {
            sequencer: Sequencer::new(store.clone()),
            store,
            locks,
            rooms,
        }
    }

    /// Append a column to the end of its board
    pub async fn create_column(
        &self,
        principal: Uuid,
        request: CreateColumnRequest,
    ) -> Result<Column, BackendError> {
        validate_column_title(&request.title)?;
        let board = owned_board(self.store.as_ref(), request.board_id, principal).await?;

        let group = SiblingGroup::BoardColumns(board.id);
        let _guard = self.locks.lock(group).await;
        let board: Board = require(self.store.board(board.id).await?, board.id)?;
        let order = self.sequencer.append(group).await?;
        let column = Column::new(&board, request.title.trim().to_string(), order);
        self.store.insert_column(&column).await?;

        tracing::info!("Created column {} at order {} in board {}", column.id, order, board.id);
        self.rooms
            .publish(RealtimeEvent::of(EventType::ColumnCreated, board.id, &column));
        Ok(column)
    }

    /// Columns of a board in ascending order
    pub async fn list_columns(&self, principal: Uuid, board_id: Uuid) -> Result<Vec<Column>, BackendError> {
        let board = owned_board(self.store.as_ref(), board_id, principal).await?;
        Ok(self.store.columns_in_board(board.id).await?)
    }

    pub async fn get_column(&self, principal: Uuid, column_id: Uuid) -> Result<Column, BackendError> {
        owned_column(self.store.as_ref(), column_id, principal).await
    }

    /// Rename a column; its order is untouched
    pub async fn update_column(
        &self,
        principal: Uuid,
        column_id: Uuid,
        request: UpdateColumnRequest,
    ) -> Result<Column, BackendError> {
        validate_column_title(&request.title)?;
        let column = owned_column(self.store.as_ref(), column_id, principal).await?;
        let _guard = self.locks.lock(SiblingGroup::BoardColumns(column.board_id)).await;
        let mut column: Column = require(self.store.column(column_id).await?, column_id)?;

        column.title = request.title.trim().to_string();
        column.updated_at = chrono::Utc::now();
        if !self.store.save_column(&column).await? {
            return Err(BackendError::not_found("Column", column.id));
        }

        self.rooms
            .publish(RealtimeEvent::of(EventType::ColumnUpdated, column.board_id, &column));
        Ok(column)
    }

    /// Delete a column with its cards and close the gap it leaves
    pub async fn delete_column(&self, principal: Uuid, column_id: Uuid) -> Result<CascadeReport, BackendError> {
        let column = owned_column(self.store.as_ref(), column_id, principal).await?;
        let board_group = SiblingGroup::BoardColumns(column.board_id);
        let _guard = self
            .locks
            .lock_all(&[board_group, SiblingGroup::ColumnCards(column.id)])
            .await;

        let column: Column = require(self.store.column(column_id).await?, column_id)?;
        let result = cascade::delete_column(self.store.as_ref(), &self.sequencer, &column).await;
        let report = self.sequencer.repair_on_failure(&[board_group], result).await?;

        self.rooms
            .publish(RealtimeEvent::deleted(EventType::ColumnDeleted, column.board_id, column.id));
        Ok(report)
    }

    /// Re-derive the column order of a board from client hints
    ///
    /// Returns every column of the board in its new order.
    pub async fn reorder_columns(
        &self,
        principal: Uuid,
        request: ReorderColumnsRequest,
    ) -> Result<Vec<Column>, BackendError> {
        validate_assignments("columnOrders", &request.column_orders)?;
        let board = owned_board(self.store.as_ref(), request.board_id, principal).await?;

        let group = SiblingGroup::BoardColumns(board.id);
        let _guard = self.locks.lock(group).await;
        let result = self.sequencer.reorder(group, &request.column_orders).await;
        self.sequencer.repair_on_failure(&[group], result).await?;

        let columns = self.store.columns_in_board(board.id).await?;
        self.rooms
            .publish(RealtimeEvent::of(EventType::ColumnsReordered, board.id, &columns));
        Ok(columns)
    }

    /// Move one column to `order` inside its board
    ///
    /// The target is clamped to the last position.
    pub async fn move_column(
        &self,
        principal: Uuid,
        column_id: Uuid,
        request: MoveColumnRequest,
    ) -> Result<Column, BackendError> {
        validate_order("order", request.order)?;
        let column = owned_column(self.store.as_ref(), column_id, principal).await?;

        let group = SiblingGroup::BoardColumns(column.board_id);
        let _guard = self.locks.lock(group).await;
        let mut column: Column = require(self.store.column(column_id).await?, column_id)?;

        let result = self
            .sequencer
            .move_within(group, column.id, column.order, request.order)
            .await;
        column.order = self.sequencer.repair_on_failure(&[group], result).await?;

        let columns = self.store.columns_in_board(column.board_id).await?;
        self.rooms
            .publish(RealtimeEvent::of(EventType::ColumnsReordered, column.board_id, &columns));
        Ok(column)
    }
}
