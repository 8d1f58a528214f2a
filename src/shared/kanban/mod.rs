//! Kanban Module
//!
//! This module contains the data structures of the task board:
//!
//! - `Board` - Top-level container owned by a single user
//! - `Column` - An ordered lane inside a board
//! - `Card` - An ordered task inside a column
//! - `OrderAssignment` / `OrderSlot` - Payloads of the reordering protocol
//!
//! Every column and card carries the `owner_id` of the board it ultimately
//! belongs to. The constructors take the owner explicitly so it is copied at
//! creation time and never derived later.
//!
//! # Usage
//!
//! ```rust
//! use taskboard::shared::kanban::{Board, Column};
//! use uuid::Uuid;
//!
//! let owner = Uuid::new_v4();
//! let board = Board::new(owner, "Roadmap".to_string(), None, None);
//! let column = Column::new(&board, "Backlog".to_string(), 0);
//! assert_eq!(column.owner_id, owner);
//! ```

pub mod board;
pub mod card;
pub mod column;
pub mod ordering;
pub mod validation;

pub use board::{Board, BoardDetails, ColumnWithCards, CreateBoardRequest, UpdateBoardRequest};
pub use card::{Card, CreateCardRequest, MoveCardRequest, Priority, ReorderCardsRequest, UpdateCardRequest};
pub use column::{
    Column, CreateColumnRequest, MoveColumnRequest, ReorderColumnsRequest, UpdateColumnRequest,
};
pub use ordering::{OrderAssignment, OrderSlot, RepairReport};

use serde::Serialize;

/// Success envelope used by every JSON response: `{"status":"success","data":...}`
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub status: &'static str,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: "success",
            data,
        }
    }
}
