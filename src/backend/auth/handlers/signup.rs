/**
 * Signup Handler
 *
 * This module implements the user registration handler for POST /api/auth/signup.
 *
 * # Registration Process
 *
 * 1. Validate name, email format and password length
 * 2. Check if the email is already registered
 * 3. Hash password using bcrypt
 * 4. Create user in the store
 * 5. Open a session and sign a token naming it
 * 6. Return token and user info
 *
 * # Validation
 *
 * - Name must be 2-50 characters long
 * - Email must contain '@' character (basic validation)
 * - Password must be at least 8 characters long
 */

use axum::{extract::State, http::StatusCode, response::Json};
use bcrypt::{hash, DEFAULT_COST};

use crate::backend::auth::handlers::types::{AuthResponse, SignupRequest};
use crate::backend::auth::sessions::open_session;
use crate::backend::auth::users::{create_user, get_user_by_email};
use crate::backend::error::BackendError;
use crate::backend::middleware::ApiJson;
use crate::backend::server::state::AppState;
use crate::shared::kanban::ApiResponse;

/// Check a display name, returning it trimmed
pub(crate) fn validate_name(name: &str) -> Result<String, BackendError> {
    let name = name.trim();
    if !(2..=50).contains(&name.chars().count()) {
        return Err(BackendError::validation("name", "Name must be between 2 and 50 characters"));
    }
    Ok(name.to_string())
}

/// Check an email address, returning it normalized
pub(crate) fn normalize_email(email: &str) -> Result<String, BackendError> {
    let normalized = email.trim().to_lowercase();
    if !normalized.contains('@') {
        tracing::warn!("Invalid email format: {}", email);
        return Err(BackendError::validation("email", "Invalid email format"));
    }
    Ok(normalized)
}

/// Check the signup payload, returning the normalized email
fn validate_signup(request: &SignupRequest) -> Result<String, BackendError> {
    validate_name(&request.name)?;
    let email = normalize_email(&request.email)?;

    if request.password.len() < 8 {
        return Err(BackendError::validation("password", "Password must be at least 8 characters"));
    }
    Ok(email)
}

/// Sign up handler
///
/// # Errors
///
/// * `400 Bad Request` - Invalid name, email format or password length
/// * `409 Conflict` - A user with this email already exists
/// * `500 Internal Server Error` - Hashing, storage or token generation failed
///
/// # Example Request
///
/// ```http
/// POST /api/auth/signup HTTP/1.1
/// Content-Type: application/json
///
/// {
///   "name": "Ada Lovelace",
///   "email": "ada@example.com",
///   "password": "securepassword123"
/// }
/// ```
///
/// # Example Response
///
/// ```json
/// {
///   "status": "success",
///   "data": {
///     "token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
///     "user": { "id": "123e4567-...", "name": "Ada Lovelace", "email": "ada@example.com" }
///   }
/// }
/// ```
pub async fn signup(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<SignupRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AuthResponse>>), BackendError> {
    let email = validate_signup(&request)?;
    tracing::info!("Signup request for email: {}", email);

    if get_user_by_email(state.store.as_ref(), &email).await?.is_some() {
        tracing::warn!("Email already exists: {}", email);
        return Err(BackendError::conflict("Email already registered"));
    }

    let password_hash = hash(&request.password, DEFAULT_COST).map_err(|e| {
        tracing::error!("Failed to hash password: {:?}", e);
        BackendError::internal("password hashing failed")
    })?;

    let user = create_user(
        state.store.as_ref(),
        request.name.trim().to_string(),
        email,
        password_hash,
    )
    .await?;

    let token = open_session(state.store.as_ref(), &state.config, &user).await?;

    tracing::info!("User created successfully: {}", user.id);
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(AuthResponse {
            token,
            user: user.into(),
        })),
    ))
}
