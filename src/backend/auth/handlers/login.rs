/**
 * Login Handler
 *
 * This module implements the user authentication handler for POST /api/auth/login.
 *
 * # Authentication Process
 *
 * 1. Look up user by email
 * 2. Verify password using bcrypt
 * 3. Open a session and sign a token naming it
 * 4. Return token and user info
 *
 * # Security
 *
 * - Unknown email and wrong password produce the same 401 answer
 * - User passwords are never returned in responses
 */

use axum::{extract::State, response::Json};
use bcrypt::verify;

use crate::backend::auth::handlers::types::{AuthResponse, LoginRequest};
use crate::backend::auth::sessions::open_session;
use crate::backend::auth::users::get_user_by_email;
use crate::backend::error::BackendError;
use crate::backend::middleware::ApiJson;
use crate::backend::server::state::AppState;
use crate::shared::kanban::ApiResponse;

const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Login handler
///
/// # Errors
///
/// * `401 Unauthorized` - If user is not found or password is incorrect
/// * `500 Internal Server Error` - If the store or token generation fails
///
/// # Example Request
///
/// ```http
/// POST /api/auth/login HTTP/1.1
/// Content-Type: application/json
///
/// {
///   "email": "ada@example.com",
///   "password": "securepassword123"
/// }
/// ```
pub async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, BackendError> {
    let email = request.email.trim().to_lowercase();

    let user = get_user_by_email(state.store.as_ref(), &email)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Login attempt for unknown email: {}", email);
            BackendError::unauthorized(INVALID_CREDENTIALS)
        })?;

    let valid = verify(&request.password, &user.password_hash).map_err(|e| {
        tracing::error!("Failed to verify password hash: {:?}", e);
        BackendError::unauthorized(INVALID_CREDENTIALS)
    })?;
    if !valid {
        tracing::warn!("Invalid password for user: {}", user.id);
        return Err(BackendError::unauthorized(INVALID_CREDENTIALS));
    }

    let token = open_session(state.store.as_ref(), &state.config, &user).await?;

    tracing::info!("User logged in: {}", user.id);
    Ok(Json(ApiResponse::success(AuthResponse {
        token,
        user: user.into(),
    })))
}
