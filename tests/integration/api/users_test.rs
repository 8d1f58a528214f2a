//! Account API integration tests
//!
//! Profile edits, theme selection and account deletion.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{create_board, create_card, create_column, create_test_app, create_test_user, data, id_of};

#[tokio::test]
async fn test_update_profile() {
    let app = create_test_app();
    let user = create_test_user(&app.state, "ada").await;

    let response = app
        .server
        .put("/api/users/profile")
        .authorization_bearer(&user.token)
        .json(&json!({ "name": " Ada King ", "email": "Ada.King@Example.com" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = data(response.json());
    assert_eq!(body["name"], "Ada King");
    assert_eq!(body["email"], "ada.king@example.com");

    let me = data(app.server.get("/api/auth/me").authorization_bearer(&user.token).await.json());
    assert_eq!(me["email"], "ada.king@example.com");
}

#[tokio::test]
async fn test_update_profile_rejects_taken_email_and_bad_fields() {
    let app = create_test_app();
    let ada = create_test_user(&app.state, "ada").await;
    let grace = create_test_user(&app.state, "grace").await;

    let taken = app
        .server
        .put("/api/users/profile")
        .authorization_bearer(&ada.token)
        .json(&json!({ "email": grace.email }))
        .await;
    assert_eq!(taken.status_code(), StatusCode::CONFLICT);

    let bad_email = app
        .server
        .put("/api/users/profile")
        .authorization_bearer(&ada.token)
        .json(&json!({ "email": "not-an-email" }))
        .await;
    assert_eq!(bad_email.status_code(), StatusCode::BAD_REQUEST);

    let short_name = app
        .server
        .put("/api/users/profile")
        .authorization_bearer(&ada.token)
        .json(&json!({ "name": "A" }))
        .await;
    assert_eq!(short_name.status_code(), StatusCode::BAD_REQUEST);

    let me = data(app.server.get("/api/auth/me").authorization_bearer(&ada.token).await.json());
    assert_eq!(me["email"], ada.email);
}

#[tokio::test]
async fn test_update_theme() {
    let app = create_test_app();
    let user = create_test_user(&app.state, "linus").await;

    let me = data(app.server.get("/api/auth/me").authorization_bearer(&user.token).await.json());
    assert_eq!(me["theme"], "light");

    let response = app
        .server
        .patch("/api/users/theme")
        .authorization_bearer(&user.token)
        .json(&json!({ "theme": "violet" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(data(response.json())["theme"], "violet");

    let rejected = app
        .server
        .patch("/api/users/theme")
        .authorization_bearer(&user.token)
        .json(&json!({ "theme": "sepia" }))
        .await;
    assert_eq!(rejected.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_account_removes_boards_and_sessions() {
    let app = create_test_app();
    let user = create_test_user(&app.state, "ada").await;
    let other = create_test_user(&app.state, "grace").await;

    let board = create_board(&app.server, &user.token, "Roadmap").await;
    let column = create_column(&app.server, &user.token, &id_of(&board), "Todo").await;
    let card = create_card(&app.server, &user.token, &id_of(&column), "Write docs").await;
    let kept = create_board(&app.server, &other.token, "Kept board").await;

    let response = app
        .server
        .delete("/api/users/account")
        .authorization_bearer(&user.token)
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    let me = app.server.get("/api/auth/me").authorization_bearer(&user.token).await;
    assert_eq!(me.status_code(), StatusCode::UNAUTHORIZED);

    let login = app
        .server
        .post("/api/auth/login")
        .json(&json!({ "email": user.email, "password": user.password }))
        .await;
    assert_eq!(login.status_code(), StatusCode::UNAUTHORIZED);

    let gone = app
        .server
        .get(&format!("/api/cards/{}", id_of(&card)))
        .authorization_bearer(&other.token)
        .await;
    assert_eq!(gone.status_code(), StatusCode::NOT_FOUND);

    let response = app
        .server
        .get(&format!("/api/boards/{}", id_of(&kept)))
        .authorization_bearer(&other.token)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_account_routes_require_token() {
    let app = create_test_app();

    let response = app.server.put("/api/users/profile").json(&json!({ "name": "Ada" })).await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let response = app.server.delete("/api/users/account").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}
