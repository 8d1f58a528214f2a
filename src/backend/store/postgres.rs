/**
 * PostgreSQL Store
 *
 * sqlx implementation of the `Store` port. The schema lives in
 * `migrations/`; the order column is called `sort_order` and is indexed
 * together with its parent key, but not unique, so a range shift can pass
 * through transient duplicates inside one statement.
 */

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::backend::auth::sessions::Session;
use crate::backend::auth::users::{Theme, User};
use crate::backend::store::{OrderShift, SiblingGroup, Store, StoreError};
use crate::shared::kanban::{Board, Card, Column, OrderSlot, Priority};

const USER_FIELDS: &str = "id, name, email, password_hash, theme, created_at, updated_at";
const BOARD_FIELDS: &str = "id, title, icon, background, owner_id, created_at, updated_at";
const COLUMN_FIELDS: &str = "id, title, board_id, sort_order, owner_id, created_at, updated_at";
const CARD_FIELDS: &str = "id, title, description, column_id, sort_order, priority, labels, due_date, owner_id, created_at, updated_at";

/// PostgreSQL `Store` implementation
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Table and parent key column of a sibling group
fn group_table(group: SiblingGroup) -> (&'static str, &'static str) {
    match group {
        SiblingGroup::BoardColumns(_) => ("columns", "board_id"),
        SiblingGroup::ColumnCards(_) => ("cards", "column_id"),
    }
}

fn user_from_row(row: &PgRow) -> User {
    User {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        theme: Theme::from_str(row.get::<String, _>("theme").as_str()).unwrap_or_default(),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn board_from_row(row: &PgRow) -> Board {
    Board {
        id: row.get("id"),
        title: row.get("title"),
        icon: row.get("icon"),
        background: row.get("background"),
        owner_id: row.get("owner_id"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn column_from_row(row: &PgRow) -> Column {
    Column {
        id: row.get("id"),
        title: row.get("title"),
        board_id: row.get("board_id"),
        order: row.get("sort_order"),
        owner_id: row.get("owner_id"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn card_from_row(row: &PgRow) -> Card {
    Card {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        column_id: row.get("column_id"),
        order: row.get("sort_order"),
        priority: Priority::from_str(row.get::<String, _>("priority").as_str()).unwrap_or_default(),
        labels: row.get("labels"),
        due_date: row.get("due_date"),
        owner_id: row.get("owner_id"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn map_unique_violation(err: sqlx::Error, message: &str) -> StoreError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            StoreError::Conflict(message.to_string())
        }
        _ => StoreError::Database(err),
    }
}

#[async_trait]
impl Store for PgStore {
    async fn insert_user(&self, user: &User) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, password_hash, theme, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.theme.as_str())
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "Email already registered"))?;
        Ok(())
    }

    async fn user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let row = sqlx::query(&format!("SELECT {} FROM users WHERE id = $1", USER_FIELDS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(user_from_row))
    }

    async fn user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let row = sqlx::query(&format!("SELECT {} FROM users WHERE email = $1", USER_FIELDS))
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(user_from_row))
    }

    async fn save_user(&self, user: &User) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET name = $1, email = $2, theme = $3, updated_at = $4
            WHERE id = $5
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.theme.as_str())
        .bind(user.updated_at)
        .bind(user.id)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "Email already registered"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_user(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn insert_session(&self, session: &Session) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO sessions (id, user_id, created_at, expires_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(session.id)
        .bind(session.user_id)
        .bind(session.created_at)
        .bind(session.expires_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn session(&self, id: Uuid) -> Result<Option<Session>, StoreError> {
        let row = sqlx::query("SELECT id, user_id, created_at, expires_at FROM sessions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(|row| Session {
            id: row.get("id"),
            user_id: row.get("user_id"),
            created_at: row.get("created_at"),
            expires_at: row.get("expires_at"),
        }))
    }

    async fn delete_session(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM sessions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_sessions_for_user(&self, user_id: Uuid) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM sessions WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn purge_expired_sessions(&self, now: DateTime<Utc>) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= $1")
            .bind(now)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn insert_board(&self, board: &Board) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO boards (id, title, icon, background, owner_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(board.id)
        .bind(&board.title)
        .bind(&board.icon)
        .bind(&board.background)
        .bind(board.owner_id)
        .bind(board.created_at)
        .bind(board.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn board(&self, id: Uuid) -> Result<Option<Board>, StoreError> {
        let row = sqlx::query(&format!("SELECT {} FROM boards WHERE id = $1", BOARD_FIELDS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(board_from_row))
    }

    async fn boards_for_owner(&self, owner_id: Uuid) -> Result<Vec<Board>, StoreError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM boards WHERE owner_id = $1 ORDER BY created_at DESC",
            BOARD_FIELDS
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(board_from_row).collect())
    }

    async fn save_board(&self, board: &Board) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE boards
            SET title = $1, icon = $2, background = $3, updated_at = $4
            WHERE id = $5
            "#,
        )
        .bind(&board.title)
        .bind(&board.icon)
        .bind(&board.background)
        .bind(board.updated_at)
        .bind(board.id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_board(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM boards WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn insert_column(&self, column: &Column) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO columns (id, title, board_id, sort_order, owner_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(column.id)
        .bind(&column.title)
        .bind(column.board_id)
        .bind(column.order)
        .bind(column.owner_id)
        .bind(column.created_at)
        .bind(column.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn column(&self, id: Uuid) -> Result<Option<Column>, StoreError> {
        let row = sqlx::query(&format!("SELECT {} FROM columns WHERE id = $1", COLUMN_FIELDS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(column_from_row))
    }

    async fn columns_in_board(&self, board_id: Uuid) -> Result<Vec<Column>, StoreError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM columns WHERE board_id = $1 ORDER BY sort_order, created_at, id",
            COLUMN_FIELDS
        ))
        .bind(board_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(column_from_row).collect())
    }

    async fn save_column(&self, column: &Column) -> Result<bool, StoreError> {
        let result = sqlx::query("UPDATE columns SET title = $1, updated_at = $2 WHERE id = $3")
            .bind(&column.title)
            .bind(column.updated_at)
            .bind(column.id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_column(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM columns WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_columns_in_board(&self, board_id: Uuid) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM columns WHERE board_id = $1")
            .bind(board_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn insert_card(&self, card: &Card) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO cards (id, title, description, column_id, sort_order, priority, labels, due_date, owner_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(card.id)
        .bind(&card.title)
        .bind(&card.description)
        .bind(card.column_id)
        .bind(card.order)
        .bind(card.priority.as_str())
        .bind(&card.labels)
        .bind(card.due_date)
        .bind(card.owner_id)
        .bind(card.created_at)
        .bind(card.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn card(&self, id: Uuid) -> Result<Option<Card>, StoreError> {
        let row = sqlx::query(&format!("SELECT {} FROM cards WHERE id = $1", CARD_FIELDS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(card_from_row))
    }

    async fn cards_in_column(&self, column_id: Uuid) -> Result<Vec<Card>, StoreError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM cards WHERE column_id = $1 ORDER BY sort_order, created_at, id",
            CARD_FIELDS
        ))
        .bind(column_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(card_from_row).collect())
    }

    async fn cards_in_columns(&self, column_ids: &[Uuid]) -> Result<Vec<Card>, StoreError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM cards WHERE column_id = ANY($1) ORDER BY column_id, sort_order, created_at, id",
            CARD_FIELDS
        ))
        .bind(column_ids.to_vec())
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(card_from_row).collect())
    }

    async fn save_card(&self, card: &Card) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE cards
            SET title = $1, description = $2, priority = $3, labels = $4, due_date = $5, updated_at = $6
            WHERE id = $7
            "#,
        )
        .bind(&card.title)
        .bind(&card.description)
        .bind(card.priority.as_str())
        .bind(&card.labels)
        .bind(card.due_date)
        .bind(card.updated_at)
        .bind(card.id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_card(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM cards WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_cards_in_columns(&self, column_ids: &[Uuid]) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM cards WHERE column_id = ANY($1)")
            .bind(column_ids.to_vec())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn relocate_card(&self, id: Uuid, column_id: Uuid, order: i32) -> Result<(), StoreError> {
        sqlx::query("UPDATE cards SET column_id = $1, sort_order = $2, updated_at = NOW() WHERE id = $3")
            .bind(column_id)
            .bind(order)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn max_order(&self, group: SiblingGroup) -> Result<Option<i32>, StoreError> {
        let (table, parent) = group_table(group);
        let row = sqlx::query(&format!(
            "SELECT MAX(sort_order) AS max_order FROM {} WHERE {} = $1",
            table, parent
        ))
        .bind(group.parent_id())
        .fetch_one(&self.pool)
        .await?;
        Ok(row.get("max_order"))
    }

    async fn members(&self, group: SiblingGroup) -> Result<Vec<OrderSlot>, StoreError> {
        let (table, parent) = group_table(group);
        let rows = sqlx::query(&format!(
            "SELECT id, sort_order FROM {} WHERE {} = $1 ORDER BY sort_order, created_at, id",
            table, parent
        ))
        .bind(group.parent_id())
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .iter()
            .map(|row| OrderSlot {
                id: row.get("id"),
                order: row.get("sort_order"),
            })
            .collect())
    }

    async fn shift_orders(&self, group: SiblingGroup, shift: OrderShift) -> Result<u64, StoreError> {
        let (table, parent) = group_table(group);
        let result = sqlx::query(&format!(
            r#"
            UPDATE {} SET sort_order = sort_order + $2
            WHERE {} = $1
              AND sort_order >= $3
              AND ($4::INT IS NULL OR sort_order <= $4)
              AND ($5::UUID IS NULL OR id <> $5)
            "#,
            table, parent
        ))
        .bind(group.parent_id())
        .bind(shift.delta)
        .bind(shift.min)
        .bind(shift.max)
        .bind(shift.exclude)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    async fn set_order(&self, group: SiblingGroup, id: Uuid, order: i32) -> Result<(), StoreError> {
        let (table, parent) = group_table(group);
        sqlx::query(&format!(
            "UPDATE {} SET sort_order = $1 WHERE id = $2 AND {} = $3",
            table, parent
        ))
        .bind(order)
        .bind(id)
        .bind(group.parent_id())
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
