/**
 * User Model
 *
 * This module defines the user record and the lookups and profile edits the
 * auth and account handlers perform through the store.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::backend::store::Store;

/// Colour scheme a user picked for the client
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    Violet,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::Violet => "violet",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            "violet" => Some(Theme::Violet),
            _ => None,
        }
    }
}

/// User struct representing a user in the store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user ID (UUID)
    pub id: Uuid,
    /// Display name (2-50 chars)
    pub name: String,
    /// User email address (unique)
    pub email: String,
    /// Hashed password (bcrypt)
    pub password_hash: String,
    pub theme: Theme,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
    /// Updated at timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash,
            theme: Theme::default(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Create a new user
///
/// # Errors
/// `Conflict` if the email is already registered
pub async fn create_user(
    store: &dyn Store,
    name: String,
    email: String,
    password_hash: String,
) -> Result<User, BackendError> {
    let user = User::new(name, email, password_hash);
    store.insert_user(&user).await?;
    Ok(user)
}

/// Get user by email
pub async fn get_user_by_email(store: &dyn Store, email: &str) -> Result<Option<User>, BackendError> {
    Ok(store.user_by_email(email).await?)
}

/// Get user by ID, failing with `NotFound` when it does not exist
pub async fn get_user_by_id(store: &dyn Store, id: Uuid) -> Result<User, BackendError> {
    store
        .user_by_id(id)
        .await?
        .ok_or_else(|| BackendError::not_found("User", id))
}

/// Persist an edited user
///
/// # Errors
/// `NotFound` if the user was deleted meanwhile, `Conflict` if the new email
/// belongs to another account
pub async fn save_user(store: &dyn Store, mut user: User) -> Result<User, BackendError> {
    user.updated_at = Utc::now();
    if !store.save_user(&user).await? {
        return Err(BackendError::not_found("User", user.id));
    }
    Ok(user)
}
