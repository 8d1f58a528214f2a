/**
 * Session Management and JWT Tokens
 *
 * This module issues and verifies the HS256 bearer tokens that identify the
 * principal of every board, column and card request. The secret and the
 * lifetime come from [`AppConfig`].
 *
 * # Sessions
 *
 * Every token names a server-side [`Session`] in its `sid` claim. A token is
 * only honored while its session exists, so logging out or deleting the
 * account revokes it before `exp` is reached.
 */

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::backend::auth::users::User;
use crate::backend::error::BackendError;
use crate::backend::store::Store;
use crate::shared::AppConfig;

const INVALID_TOKEN: &str = "Invalid or expired token";

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Session ID
    pub sid: String,
    /// Email
    pub email: String,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
    /// Issued at time (Unix timestamp)
    pub iat: u64,
}

/// Server-side record of one issued token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn new(user_id: Uuid, ttl_hours: u64) -> Self {
        let now = Utc::now();
        let ttl = i64::try_from(ttl_hours)
            .ok()
            .and_then(Duration::try_hours)
            .unwrap_or(Duration::MAX);
        Self {
            id: Uuid::new_v4(),
            user_id,
            created_at: now,
            expires_at: now.checked_add_signed(ttl).unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Principal resolved from a bearer token
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub session_id: Uuid,
    pub email: String,
}

/// Create a JWT token for a user session
///
/// # Arguments
/// * `config` - Supplies the secret and the token lifetime
/// * `user_id` - User ID (UUID)
/// * `session_id` - Session the token belongs to
/// * `email` - User email
pub fn create_token(
    config: &AppConfig,
    user_id: Uuid,
    session_id: Uuid,
    email: String,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now().timestamp().max(0) as u64;
    let exp = now + config.token_ttl_hours * 60 * 60;

    let claims = Claims {
        sub: user_id.to_string(),
        sid: session_id.to_string(),
        email,
        exp,
        iat: now,
    };

    let key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
    encode(&Header::default(), &claims, &key)
}

/// Verify and decode a JWT token
pub fn verify_token(config: &AppConfig, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let key = DecodingKey::from_secret(config.jwt_secret.as_bytes());
    let validation = Validation::default();

    let token_data = decode::<Claims>(token, &key, &validation)?;
    Ok(token_data.claims)
}

/// Record a new session for `user` and sign a token naming it
pub async fn open_session(store: &dyn Store, config: &AppConfig, user: &User) -> Result<String, BackendError> {
    let session = Session::new(user.id, config.token_ttl_hours);
    store.insert_session(&session).await?;

    create_token(config, user.id, session.id, user.email.clone()).map_err(|e| {
        tracing::error!("Failed to create token: {:?}", e);
        BackendError::internal("token generation failed")
    })
}

/// Resolve a bearer token to its principal
///
/// The signature, the expiry, the session and the user must all check out.
/// Any failure is reported as `Unauthorized`; the cause is only logged.
pub async fn authenticate(
    store: &dyn Store,
    config: &AppConfig,
    token: &str,
) -> Result<AuthenticatedUser, BackendError> {
    let claims = verify_token(config, token).map_err(|e| {
        tracing::warn!("Invalid token: {:?}", e);
        BackendError::unauthorized(INVALID_TOKEN)
    })?;

    let (user_id, session_id) = match (Uuid::parse_str(&claims.sub), Uuid::parse_str(&claims.sid)) {
        (Ok(user_id), Ok(session_id)) => (user_id, session_id),
        _ => {
            tracing::warn!("Malformed ids in token: sub={} sid={}", claims.sub, claims.sid);
            return Err(BackendError::unauthorized(INVALID_TOKEN));
        }
    };

    match store.session(session_id).await? {
        Some(session) if session.user_id == user_id && !session.is_expired(Utc::now()) => {}
        _ => {
            tracing::warn!("Token for ended session {} of user {}", session_id, user_id);
            return Err(BackendError::unauthorized("Session has ended"));
        }
    }

    if store.user_by_id(user_id).await?.is_none() {
        tracing::warn!("Token for unknown user: {}", user_id);
        return Err(BackendError::unauthorized("User no longer exists"));
    }

    Ok(AuthenticatedUser {
        user_id,
        session_id,
        email: claims.email,
    })
}
