//! Authentication API integration tests
//!
//! Tests for the authentication endpoints including login, signup, and user info.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{create_test_app, create_test_user, data};

#[tokio::test]
async fn test_signup_success() {
    let app = create_test_app();

    let response = app
        .server
        .post("/api/auth/signup")
        .json(&json!({
            "name": "Ada",
            "email": "Ada@Example.com",
            "password": "password123"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body = data(response.json());
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(body["user"]["email"], "ada@example.com");
    assert_eq!(body["user"]["name"], "Ada");
    assert!(body["user"].get("passwordHash").is_none());
}

#[tokio::test]
async fn test_signup_duplicate_email() {
    let app = create_test_app();
    let user = create_test_user(&app.state, "ada").await;

    let response = app
        .server
        .post("/api/auth/signup")
        .json(&json!({
            "name": "Ada Again",
            "email": user.email,
            "password": "password123"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_signup_rejects_short_password() {
    let app = create_test_app();

    let response = app
        .server
        .post("/api/auth/signup")
        .json(&json!({
            "name": "Ada",
            "email": "ada@example.com",
            "password": "short"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_success() {
    let app = create_test_app();
    let user = create_test_user(&app.state, "grace").await;

    let response = app
        .server
        .post("/api/auth/login")
        .json(&json!({ "email": user.email, "password": user.password }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = data(response.json());
    assert_eq!(body["user"]["id"], user.id.to_string());

    let token = body["token"].as_str().unwrap().to_string();
    let me = app.server.get("/api/auth/me").authorization_bearer(token).await;
    assert_eq!(me.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = create_test_app();
    let user = create_test_user(&app.state, "grace").await;

    let response = app
        .server
        .post("/api/auth/login")
        .json(&json!({ "email": user.email, "password": "not-the-password" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = response.json();
    crate::assert_contains!(body["error"].as_str().unwrap_or_default(), "Invalid credentials");
}

#[tokio::test]
async fn test_get_me() {
    let app = create_test_app();
    let user = create_test_user(&app.state, "linus").await;

    let response = app.server.get("/api/auth/me").authorization_bearer(&user.token).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = data(response.json());
    assert_eq!(body["email"], user.email);
}

#[tokio::test]
async fn test_get_me_without_token() {
    let app = create_test_app();

    let response = app.server.get("/api/auth/me").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let response = app.server.get("/api/auth/me").authorization_bearer("garbage").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_revokes_only_that_token() {
    let app = create_test_app();
    let user = create_test_user(&app.state, "margaret").await;

    let login = app
        .server
        .post("/api/auth/login")
        .json(&json!({ "email": user.email, "password": user.password }))
        .await;
    let second = data(login.json())["token"].as_str().unwrap().to_string();

    let response = app.server.post("/api/auth/logout").authorization_bearer(&user.token).await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    let me = app.server.get("/api/auth/me").authorization_bearer(&user.token).await;
    assert_eq!(me.status_code(), StatusCode::UNAUTHORIZED);
    let again = app.server.post("/api/auth/logout").authorization_bearer(&user.token).await;
    assert_eq!(again.status_code(), StatusCode::UNAUTHORIZED);

    let me = app.server.get("/api/auth/me").authorization_bearer(&second).await;
    assert_eq!(me.status_code(), StatusCode::OK);
}
