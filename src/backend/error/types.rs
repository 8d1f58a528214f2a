/**
 * Backend Error Types
 *
 * This module defines the single failure type returned by every service
 * operation. Each variant maps to one HTTP status code.
 *
 * # Error Categories
 *
 * ## Client errors
 *
 * - `NotFound` - a referenced board, column, card or user does not exist
 * - `Forbidden` - the principal does not own the source or destination
 * - `Validation` - malformed input (titles, priority, orders, reorder payloads)
 * - `Unauthorized` - missing or invalid bearer token, bad credentials
 *
 * ## Conflicts
 *
 * `Conflict` covers duplicate sign-ups and multi-step reindexes that failed
 * midway and were repaired. The caller may simply retry.
 *
 * ## Store errors
 *
 * `Store` wraps persistence failures and `Internal` everything else that
 * goes wrong on the server. Their details are logged, never sent to the
 * client.
 */

use thiserror::Error;
use axum::http::StatusCode;
use uuid::Uuid;
use crate::backend::store::StoreError;
use crate::shared::SharedError;

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use taskboard::backend::error::BackendError;
/// use uuid::Uuid;
///
/// let err = BackendError::not_found("Column", Uuid::nil());
/// assert_eq!(err.status_code().as_u16(), 404);
///
/// let err = BackendError::forbidden("Not authorized to update this card");
/// assert_eq!(err.status_code().as_u16(), 403);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Referenced entity does not exist
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of the missing entity (Board, Column, Card, User)
        entity: &'static str,
        /// Requested id
        id: Uuid,
    },

    /// Principal does not own the entity it tried to touch
    #[error("Forbidden: {message}")]
    Forbidden {
        /// Human-readable error message
        message: String,
    },

    /// Malformed input
    #[error(transparent)]
    Validation(#[from] SharedError),

    /// Missing or invalid credentials
    #[error("Unauthorized: {message}")]
    Unauthorized {
        /// Human-readable error message
        message: String,
    },

    /// Duplicate resource, or a reindex that failed and was repaired
    #[error("Conflict: {message}")]
    Conflict {
        /// Human-readable error message
        message: String,
    },

    /// Persistence failure
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Any other server-side failure (password hashing, token signing)
    #[error("Internal error: {message}")]
    Internal {
        /// Detail for the logs; never sent to the client
        message: String,
    },
}

impl BackendError {
    /// Create a new not-found error
    pub fn not_found(entity: &'static str, id: Uuid) -> Self {
        Self::NotFound { entity, id }
    }

    /// Create a new forbidden error
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    /// Create a new unauthorized error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Create a new conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Create a new internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Create a new validation error for `field`
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation(SharedError::validation(field, message))
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `NotFound` - 404 Not Found
    /// - `Forbidden` - 403 Forbidden
    /// - `Validation` - 400 Bad Request
    /// - `Unauthorized` - 401 Unauthorized
    /// - `Conflict` - 409 Conflict
    /// - `Store`, `Internal` - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::Validation(err) => match err {
                SharedError::ValidationError { .. } => StatusCode::BAD_REQUEST,
                SharedError::SerializationError { .. } => StatusCode::BAD_REQUEST,
            },
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Store(StoreError::Conflict(_)) => StatusCode::CONFLICT,
            Self::Store(_) | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the client-facing error message
    pub fn message(&self) -> String {
        match self {
            Self::NotFound { entity, .. } => format!("{} not found", entity),
            Self::Forbidden { message } => message.clone(),
            Self::Validation(err) => match err {
                SharedError::ValidationError { message, .. } => message.clone(),
                SharedError::SerializationError { message } => message.clone(),
            },
            Self::Unauthorized { message } => message.clone(),
            Self::Conflict { message } => message.clone(),
            Self::Store(StoreError::Conflict(message)) => message.clone(),
            Self::Store(_) | Self::Internal { .. } => "Internal server error".to_string(),
        }
    }
}
