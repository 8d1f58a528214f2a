//! Persistence Port
//!
//! This module defines the `Store` trait every service talks to, plus the two
//! adapters that implement it:
//!
//! - **`postgres`** - `PgStore`, backed by sqlx and the migrations under `migrations/`
//! - **`memory`** - `MemoryStore`, hash maps behind a tokio `RwLock`
//!
//! # Module Structure
//!
//! ```text
//! store/
//! ├── mod.rs      - Store trait, sibling groups, order shifts
//! ├── postgres.rs - PostgreSQL adapter
//! └── memory.rs   - In-memory adapter
//! ```
//!
//! # Ordering Primitives
//!
//! The ordering subsystem only needs four things from storage: the highest
//! order in a group, the members of a group, an atomic range shift and a
//! point write of one order value. Each is a single call here; multi-step
//! sequences are composed (and locked) by the sequencer.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

use crate::backend::auth::sessions::Session;
use crate::backend::auth::users::User;
use crate::shared::kanban::{Board, Card, Column, OrderSlot};

/// In-memory adapter
pub mod memory;

/// PostgreSQL adapter
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// A set of siblings sharing one dense `order` sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SiblingGroup {
    /// The columns of a board
    BoardColumns(Uuid),
    /// The cards of a column
    ColumnCards(Uuid),
}

impl SiblingGroup {
    /// Id of the parent entity
    pub fn parent_id(&self) -> Uuid {
        match self {
            SiblingGroup::BoardColumns(id) | SiblingGroup::ColumnCards(id) => *id,
        }
    }
}

impl fmt::Display for SiblingGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiblingGroup::BoardColumns(id) => write!(f, "board:{}/columns", id),
            SiblingGroup::ColumnCards(id) => write!(f, "column:{}/cards", id),
        }
    }
}

/// Atomic range update of a group's order values
///
/// Adds `delta` to every member whose order lies in `min..=max` (no upper
/// bound when `max` is `None`), skipping `exclude`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderShift {
    pub min: i32,
    pub max: Option<i32>,
    pub delta: i32,
    pub exclude: Option<Uuid>,
}

impl OrderShift {
    /// Decrement everything above `removed`
    pub fn close_gap(removed: i32) -> Self {
        Self {
            min: removed + 1,
            max: None,
            delta: -1,
            exclude: None,
        }
    }

    /// Increment everything at or above `slot`, except the incoming entity
    pub fn open_slot(slot: i32, incoming: Uuid) -> Self {
        Self {
            min: slot,
            max: None,
            delta: 1,
            exclude: Some(incoming),
        }
    }

    /// Shift a bounded range by `delta`
    pub fn range(min: i32, max: i32, delta: i32) -> Self {
        Self {
            min,
            max: Some(max),
            delta,
            exclude: None,
        }
    }

    pub fn excluding(mut self, id: Uuid) -> Self {
        self.exclude = Some(id);
        self
    }

    /// Whether a member with `id` at `order` is affected
    pub fn applies_to(&self, id: Uuid, order: i32) -> bool {
        order >= self.min
            && self.max.map_or(true, |max| order <= max)
            && self.exclude != Some(id)
    }
}

/// Persistence errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database driver error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Uniqueness violation (e.g. duplicate email)
    #[error("{0}")]
    Conflict(String),

    /// Store could not serve the request
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Persistence port used by every service
///
/// Each method is one atomic call against the backing store. Nothing here
/// spans more than one statement; callers that need multi-step sequences
/// hold the matching group locks.
#[async_trait]
pub trait Store: Send + Sync {
    // Users

    /// Insert a user. Fails with `StoreError::Conflict` on a duplicate email.
    async fn insert_user(&self, user: &User) -> Result<(), StoreError>;
    async fn user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;
    async fn user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
    /// Persist name, email and theme; `false` when the user is gone.
    /// Fails with `StoreError::Conflict` when the email belongs to another user.
    async fn save_user(&self, user: &User) -> Result<bool, StoreError>;
    /// Remove the user row only; boards and sessions are removed by the caller
    async fn delete_user(&self, id: Uuid) -> Result<bool, StoreError>;

    // Sessions

    async fn insert_session(&self, session: &Session) -> Result<(), StoreError>;
    async fn session(&self, id: Uuid) -> Result<Option<Session>, StoreError>;
    async fn delete_session(&self, id: Uuid) -> Result<bool, StoreError>;
    async fn delete_sessions_for_user(&self, user_id: Uuid) -> Result<u64, StoreError>;
    /// Drop sessions whose expiry is at or before `now`
    async fn purge_expired_sessions(&self, now: DateTime<Utc>) -> Result<u64, StoreError>;

    // Boards

    async fn insert_board(&self, board: &Board) -> Result<(), StoreError>;
    async fn board(&self, id: Uuid) -> Result<Option<Board>, StoreError>;
    /// Boards of one owner, newest first
    async fn boards_for_owner(&self, owner_id: Uuid) -> Result<Vec<Board>, StoreError>;
    /// Persist title, icon and background; `false` when the board is gone
    async fn save_board(&self, board: &Board) -> Result<bool, StoreError>;
    async fn delete_board(&self, id: Uuid) -> Result<bool, StoreError>;

    // Columns

    async fn insert_column(&self, column: &Column) -> Result<(), StoreError>;
    async fn column(&self, id: Uuid) -> Result<Option<Column>, StoreError>;
    /// Columns of a board in ascending order
    async fn columns_in_board(&self, board_id: Uuid) -> Result<Vec<Column>, StoreError>;
    /// Persist the title only; order and board are left alone.
    /// Returns `false` when the column is gone.
    async fn save_column(&self, column: &Column) -> Result<bool, StoreError>;
    async fn delete_column(&self, id: Uuid) -> Result<bool, StoreError>;
    async fn delete_columns_in_board(&self, board_id: Uuid) -> Result<u64, StoreError>;

    // Cards

    async fn insert_card(&self, card: &Card) -> Result<(), StoreError>;
    async fn card(&self, id: Uuid) -> Result<Option<Card>, StoreError>;
    /// Cards of a column in ascending order
    async fn cards_in_column(&self, column_id: Uuid) -> Result<Vec<Card>, StoreError>;
    /// Cards of several columns, ordered by column then order
    async fn cards_in_columns(&self, column_ids: &[Uuid]) -> Result<Vec<Card>, StoreError>;
    /// Persist the editable fields only; order and column are left alone.
    /// Returns `false` when the card is gone.
    async fn save_card(&self, card: &Card) -> Result<bool, StoreError>;
    async fn delete_card(&self, id: Uuid) -> Result<bool, StoreError>;
    async fn delete_cards_in_columns(&self, column_ids: &[Uuid]) -> Result<u64, StoreError>;
    /// Move a card to `column_id` at `order` in one write
    async fn relocate_card(&self, id: Uuid, column_id: Uuid, order: i32) -> Result<(), StoreError>;

    // Ordering primitives

    /// Highest order in the group, `None` when it is empty
    async fn max_order(&self, group: SiblingGroup) -> Result<Option<i32>, StoreError>;
    /// Members ascending by order, ties broken by creation time
    async fn members(&self, group: SiblingGroup) -> Result<Vec<OrderSlot>, StoreError>;
    /// Apply a range shift; returns the number of members changed
    async fn shift_orders(&self, group: SiblingGroup, shift: OrderShift) -> Result<u64, StoreError>;
    async fn set_order(&self, group: SiblingGroup, id: Uuid, order: i32) -> Result<(), StoreError>;
}
