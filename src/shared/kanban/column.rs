//! Column Data Structure

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::board::Board;
use super::ordering::OrderAssignment;

/// An ordered lane of cards inside a board
///
/// `order` is dense within the board: the columns of one board always carry
/// the orders `0..count` after any completed operation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: Uuid,
    pub title: String,
    pub board_id: Uuid,
    pub order: i32,
    /// Copied from the board at creation time
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Column {
    /// Create a column inside `board` at position `order`
    pub fn new(board: &Board, title: String, order: i32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            board_id: board.id,
            order,
            owner_id: board.owner_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Body of `POST /api/columns`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateColumnRequest {
    pub title: String,
    pub board_id: Uuid,
}

/// Body of `PUT /api/columns/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateColumnRequest {
    pub title: String,
}

/// Body of `PATCH /api/columns/reorder`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderColumnsRequest {
    pub board_id: Uuid,
    pub column_orders: Vec<OrderAssignment>,
}

/// Body of `PATCH /api/columns/{id}/move`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveColumnRequest {
    pub order: i32,
}
