//! Board Data Structure
//!
//! A board is the root of the ownership hierarchy. Deleting it removes every
//! column and card below it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::card::Card;
use super::column::Column;

/// Icon assigned when the client does not pick one
pub const DEFAULT_ICON: &str = "project";

/// A task board
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    /// Unique board ID
    pub id: Uuid,
    /// Display title (3-50 characters)
    pub title: String,
    /// Icon name
    pub icon: String,
    /// Background identifier or image URL
    pub background: String,
    /// User who owns the board and everything below it
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Board {
    /// Create a new board owned by `owner_id`
    pub fn new(owner_id: Uuid, title: String, icon: Option<String>, background: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            icon: icon
                .filter(|icon| !icon.is_empty())
                .unwrap_or_else(|| DEFAULT_ICON.to_string()),
            background: background.unwrap_or_default(),
            owner_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A column together with its cards, both in ascending order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ColumnWithCards {
    #[serde(flatten)]
    pub column: Column,
    pub cards: Vec<Card>,
}

/// Full board view returned by `GET /api/boards/{id}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BoardDetails {
    #[serde(flatten)]
    pub board: Board,
    pub columns: Vec<ColumnWithCards>,
}

/// Body of `POST /api/boards`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBoardRequest {
    pub title: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub background: Option<String>,
}

/// Body of `PUT /api/boards/{id}`; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBoardRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub background: Option<String>,
}
