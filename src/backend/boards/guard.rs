//! Ownership Guard
//!
//! Every column and card carries the `owner_id` of its board, copied when it
//! was created. The guard compares that field with the principal directly
//! instead of walking board -> column -> card on each request.

use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::backend::store::Store;
use crate::shared::kanban::{Board, Card, Column};

/// An entity with a denormalized owner
pub trait Owned {
    /// Entity name used in error messages
    const KIND: &'static str;

    fn id(&self) -> Uuid;
    fn owner_id(&self) -> Uuid;
}

impl Owned for Board {
    const KIND: &'static str = "Board";

    fn id(&self) -> Uuid {
        self.id
    }

    fn owner_id(&self) -> Uuid {
        self.owner_id
    }
}

impl Owned for Column {
    const KIND: &'static str = "Column";

    fn id(&self) -> Uuid {
        self.id
    }

    fn owner_id(&self) -> Uuid {
        self.owner_id
    }
}

impl Owned for Card {
    const KIND: &'static str = "Card";

    fn id(&self) -> Uuid {
        self.id
    }

    fn owner_id(&self) -> Uuid {
        self.owner_id
    }
}

/// Fail with `Forbidden` unless `principal` owns `entity`
pub fn authorize<T: Owned>(entity: &T, principal: Uuid) -> Result<(), BackendError> {
    if entity.owner_id() == principal {
        return Ok(());
    }
    tracing::warn!(
        "Ownership check failed: user {} tried to access {} {}",
        principal,
        T::KIND,
        entity.id()
    );
    Err(BackendError::forbidden(format!(
        "Not authorized to access this {}",
        T::KIND.to_lowercase()
    )))
}

/// Turn a lookup result into `NotFound` when empty
pub fn require<T: Owned>(found: Option<T>, id: Uuid) -> Result<T, BackendError> {
    found.ok_or_else(|| BackendError::not_found(T::KIND, id))
}

/// Load a board and check that `principal` owns it
pub async fn owned_board(store: &dyn Store, id: Uuid, principal: Uuid) -> Result<Board, BackendError> {
    let board = require(store.board(id).await?, id)?;
    authorize(&board, principal)?;
    Ok(board)
}

/// Load a column and check that `principal` owns it
pub async fn owned_column(store: &dyn Store, id: Uuid, principal: Uuid) -> Result<Column, BackendError> {
    let column = require(store.column(id).await?, id)?;
    authorize(&column, principal)?;
    Ok(column)
}

/// Load a card and check that `principal` owns it
pub async fn owned_card(store: &dyn Store, id: Uuid, principal: Uuid) -> Result<Card, BackendError> {
    let card = require(store.card(id).await?, id)?;
    authorize(&card, principal)?;
    Ok(card)
}
