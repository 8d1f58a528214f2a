//! Authentication test helpers
//!
//! Provides utilities for spinning up a server on the in-memory store,
//! creating test users and generating tokens.

use axum_test::TestServer;
use std::sync::Arc;
use taskboard::backend::auth::sessions::open_session;
use taskboard::backend::auth::users::{create_user, User};
use taskboard::backend::routes::create_router;
use taskboard::backend::server::AppState;
use taskboard::backend::MemoryStore;
use taskboard::shared::AppConfig;
use uuid::Uuid;

/// Test user credentials
pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub password: String,
    pub token: String,
}

/// Server plus the state behind it, so tests can seed users directly
pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
}

/// Create a test server backed by a fresh in-memory store
pub fn create_test_app() -> TestApp {
    let config = AppConfig::builder()
        .jwt_secret("integration-test-secret")
        .build()
        .expect("Failed to build test configuration");
    let state = AppState::new(config, Arc::new(MemoryStore::new()));
    let server = TestServer::new(create_router(state.clone())).expect("Failed to start test server");
    TestApp { server, state }
}

/// Create a test user in the store with a unique email
///
/// Uses the lowest bcrypt cost to keep the suite fast.
pub async fn create_test_user(state: &AppState, name: &str) -> TestUser {
    let email = format!("{}_{}@example.com", name.to_lowercase(), Uuid::new_v4().simple());
    let password = "test_password_123".to_string();
    let hash = bcrypt::hash(&password, 4).expect("Failed to hash password");

    let user = crate::assert_ok!(
        create_user(state.store.as_ref(), name.to_string(), email.clone(), hash).await,
        "Failed to create test user"
    );
    let token = generate_test_token(state, &user).await;

    TestUser {
        id: user.id,
        email,
        password,
        token,
    }
}

/// Open a session for the user and return its token
pub async fn generate_test_token(state: &AppState, user: &User) -> String {
    crate::assert_ok!(
        open_session(state.store.as_ref(), &state.config, user).await,
        "Failed to generate test token"
    )
}

/// Create authorization header value
pub fn auth_header(token: &str) -> String {
    format!("Bearer {}", token)
}
