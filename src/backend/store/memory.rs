/**
 * In-Memory Store
 *
 * Hash maps behind one tokio `RwLock`. Every trait call takes the lock once,
 * so each call is atomic just like a single SQL statement is.
 *
 * The server falls back to this adapter when no database is configured, and
 * the test suites run against it.
 */

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
#[cfg(test)]
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::backend::auth::sessions::Session;
use crate::backend::auth::users::User;
use crate::backend::store::{OrderShift, SiblingGroup, Store, StoreError};
use crate::shared::kanban::{Board, Card, Column, OrderSlot};

#[cfg(test)]
const NO_FAULT: usize = usize::MAX;

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    sessions: HashMap<Uuid, Session>,
    boards: HashMap<Uuid, Board>,
    columns: HashMap<Uuid, Column>,
    cards: HashMap<Uuid, Card>,
}

/// In-memory `Store` implementation
pub struct MemoryStore {
    tables: RwLock<Tables>,
    /// Number of range shifts allowed before one injected failure
    #[cfg(test)]
    shifts_before_fault: AtomicUsize,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            #[cfg(test)]
            shifts_before_fault: AtomicUsize::new(NO_FAULT),
        }
    }

    /// Let the next `allowed` range shifts succeed, then fail exactly one.
    ///
    /// Used to exercise the repair path of multi-step moves.
    #[cfg(test)]
    pub fn fail_shift_after(&self, allowed: usize) {
        self.shifts_before_fault.store(allowed, Ordering::SeqCst);
    }

    #[cfg(not(test))]
    fn take_shift_permit(&self) -> Result<(), StoreError> {
        Ok(())
    }

    #[cfg(test)]
    fn take_shift_permit(&self) -> Result<(), StoreError> {
        let remaining = self.shifts_before_fault.load(Ordering::SeqCst);
        match remaining {
            NO_FAULT => Ok(()),
            0 => {
                self.shifts_before_fault.store(NO_FAULT, Ordering::SeqCst);
                Err(StoreError::Unavailable("injected shift failure".to_string()))
            }
            n => {
                self.shifts_before_fault.store(n - 1, Ordering::SeqCst);
                Ok(())
            }
        }
    }
}

fn sorted_columns<'a>(columns: impl Iterator<Item = &'a Column>) -> Vec<Column> {
    let mut columns: Vec<Column> = columns.cloned().collect();
    columns.sort_by(|a, b| (a.order, a.created_at, a.id).cmp(&(b.order, b.created_at, b.id)));
    columns
}

fn sorted_cards<'a>(cards: impl Iterator<Item = &'a Card>) -> Vec<Card> {
    let mut cards: Vec<Card> = cards.cloned().collect();
    cards.sort_by(|a, b| {
        (a.column_id, a.order, a.created_at, a.id).cmp(&(b.column_id, b.order, b.created_at, b.id))
    });
    cards
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_user(&self, user: &User) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|existing| existing.email == user.email) {
            return Err(StoreError::Conflict("Email already registered".to_string()));
        }
        tables.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|user| user.email == email).cloned())
    }

    async fn save_user(&self, user: &User) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        if tables
            .users
            .values()
            .any(|existing| existing.id != user.id && existing.email == user.email)
        {
            return Err(StoreError::Conflict("Email already registered".to_string()));
        }
        let Some(existing) = tables.users.get_mut(&user.id) else {
            return Ok(false);
        };
        existing.name = user.name.clone();
        existing.email = user.email.clone();
        existing.theme = user.theme;
        existing.updated_at = user.updated_at;
        Ok(true)
    }

    async fn delete_user(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(self.tables.write().await.users.remove(&id).is_some())
    }

    async fn insert_session(&self, session: &Session) -> Result<(), StoreError> {
        self.tables.write().await.sessions.insert(session.id, session.clone());
        Ok(())
    }

    async fn session(&self, id: Uuid) -> Result<Option<Session>, StoreError> {
        Ok(self.tables.read().await.sessions.get(&id).cloned())
    }

    async fn delete_session(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(self.tables.write().await.sessions.remove(&id).is_some())
    }

    async fn delete_sessions_for_user(&self, user_id: Uuid) -> Result<u64, StoreError> {
        let mut tables = self.tables.write().await;
        let before = tables.sessions.len();
        tables.sessions.retain(|_, session| session.user_id != user_id);
        Ok((before - tables.sessions.len()) as u64)
    }

    async fn purge_expired_sessions(&self, now: DateTime<Utc>) -> Result<u64, StoreError> {
        let mut tables = self.tables.write().await;
        let before = tables.sessions.len();
        tables.sessions.retain(|_, session| !session.is_expired(now));
        Ok((before - tables.sessions.len()) as u64)
    }

    async fn insert_board(&self, board: &Board) -> Result<(), StoreError> {
        self.tables.write().await.boards.insert(board.id, board.clone());
        Ok(())
    }

    async fn board(&self, id: Uuid) -> Result<Option<Board>, StoreError> {
        Ok(self.tables.read().await.boards.get(&id).cloned())
    }

    async fn boards_for_owner(&self, owner_id: Uuid) -> Result<Vec<Board>, StoreError> {
        let tables = self.tables.read().await;
        let mut boards: Vec<Board> = tables
            .boards
            .values()
            .filter(|board| board.owner_id == owner_id)
            .cloned()
            .collect();
        boards.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(boards)
    }

    async fn save_board(&self, board: &Board) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        let Some(existing) = tables.boards.get_mut(&board.id) else {
            return Ok(false);
        };
        existing.title = board.title.clone();
        existing.icon = board.icon.clone();
        existing.background = board.background.clone();
        existing.updated_at = board.updated_at;
        Ok(true)
    }

    async fn delete_board(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(self.tables.write().await.boards.remove(&id).is_some())
    }

    async fn insert_column(&self, column: &Column) -> Result<(), StoreError> {
        self.tables.write().await.columns.insert(column.id, column.clone());
        Ok(())
    }

    async fn column(&self, id: Uuid) -> Result<Option<Column>, StoreError> {
        Ok(self.tables.read().await.columns.get(&id).cloned())
    }

    async fn columns_in_board(&self, board_id: Uuid) -> Result<Vec<Column>, StoreError> {
        let tables = self.tables.read().await;
        Ok(sorted_columns(
            tables.columns.values().filter(|column| column.board_id == board_id),
        ))
    }

    async fn save_column(&self, column: &Column) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        let Some(existing) = tables.columns.get_mut(&column.id) else {
            return Ok(false);
        };
        existing.title = column.title.clone();
        existing.updated_at = column.updated_at;
        Ok(true)
    }

    async fn delete_column(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(self.tables.write().await.columns.remove(&id).is_some())
    }

    async fn delete_columns_in_board(&self, board_id: Uuid) -> Result<u64, StoreError> {
        let mut tables = self.tables.write().await;
        let before = tables.columns.len();
        tables.columns.retain(|_, column| column.board_id != board_id);
        Ok((before - tables.columns.len()) as u64)
    }

    async fn insert_card(&self, card: &Card) -> Result<(), StoreError> {
        self.tables.write().await.cards.insert(card.id, card.clone());
        Ok(())
    }

    async fn card(&self, id: Uuid) -> Result<Option<Card>, StoreError> {
        Ok(self.tables.read().await.cards.get(&id).cloned())
    }

    async fn cards_in_column(&self, column_id: Uuid) -> Result<Vec<Card>, StoreError> {
        let tables = self.tables.read().await;
        Ok(sorted_cards(
            tables.cards.values().filter(|card| card.column_id == column_id),
        ))
    }

    async fn cards_in_columns(&self, column_ids: &[Uuid]) -> Result<Vec<Card>, StoreError> {
        let tables = self.tables.read().await;
        Ok(sorted_cards(
            tables.cards.values().filter(|card| column_ids.contains(&card.column_id)),
        ))
    }

    async fn save_card(&self, card: &Card) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        let Some(existing) = tables.cards.get_mut(&card.id) else {
            return Ok(false);
        };
        existing.title = card.title.clone();
        existing.description = card.description.clone();
        existing.priority = card.priority;
        existing.labels = card.labels.clone();
        existing.due_date = card.due_date;
        existing.updated_at = card.updated_at;
        Ok(true)
    }

    async fn delete_card(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(self.tables.write().await.cards.remove(&id).is_some())
    }

    async fn delete_cards_in_columns(&self, column_ids: &[Uuid]) -> Result<u64, StoreError> {
        let mut tables = self.tables.write().await;
        let before = tables.cards.len();
        tables.cards.retain(|_, card| !column_ids.contains(&card.column_id));
        Ok((before - tables.cards.len()) as u64)
    }

    async fn relocate_card(&self, id: Uuid, column_id: Uuid, order: i32) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        if let Some(card) = tables.cards.get_mut(&id) {
            card.column_id = column_id;
            card.order = order;
            card.updated_at = chrono::Utc::now();
        }
        Ok(())
    }

    async fn max_order(&self, group: SiblingGroup) -> Result<Option<i32>, StoreError> {
        let tables = self.tables.read().await;
        Ok(match group {
            SiblingGroup::BoardColumns(board_id) => tables
                .columns
                .values()
                .filter(|column| column.board_id == board_id)
                .map(|column| column.order)
                .max(),
            SiblingGroup::ColumnCards(column_id) => tables
                .cards
                .values()
                .filter(|card| card.column_id == column_id)
                .map(|card| card.order)
                .max(),
        })
    }

    async fn members(&self, group: SiblingGroup) -> Result<Vec<OrderSlot>, StoreError> {
        let tables = self.tables.read().await;
        Ok(match group {
            SiblingGroup::BoardColumns(board_id) => sorted_columns(
                tables.columns.values().filter(|column| column.board_id == board_id),
            )
            .into_iter()
            .map(|column| OrderSlot { id: column.id, order: column.order })
            .collect(),
            SiblingGroup::ColumnCards(column_id) => sorted_cards(
                tables.cards.values().filter(|card| card.column_id == column_id),
            )
            .into_iter()
            .map(|card| OrderSlot { id: card.id, order: card.order })
            .collect(),
        })
    }

    async fn shift_orders(&self, group: SiblingGroup, shift: OrderShift) -> Result<u64, StoreError> {
        self.take_shift_permit()?;
        let mut tables = self.tables.write().await;
        let mut changed = 0;
        match group {
            SiblingGroup::BoardColumns(board_id) => {
                for column in tables.columns.values_mut() {
                    if column.board_id == board_id && shift.applies_to(column.id, column.order) {
                        column.order += shift.delta;
                        changed += 1;
                    }
                }
            }
            SiblingGroup::ColumnCards(column_id) => {
                for card in tables.cards.values_mut() {
                    if card.column_id == column_id && shift.applies_to(card.id, card.order) {
                        card.order += shift.delta;
                        changed += 1;
                    }
                }
            }
        }
        Ok(changed)
    }

    async fn set_order(&self, group: SiblingGroup, id: Uuid, order: i32) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        match group {
            SiblingGroup::BoardColumns(board_id) => {
                if let Some(column) = tables.columns.get_mut(&id).filter(|c| c.board_id == board_id) {
                    column.order = order;
                }
            }
            SiblingGroup::ColumnCards(column_id) => {
                if let Some(card) = tables.cards.get_mut(&id).filter(|c| c.column_id == column_id) {
                    card.order = order;
                }
            }
        }
        Ok(())
    }
}
