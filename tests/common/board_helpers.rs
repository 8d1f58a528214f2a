//! Board test helpers
//!
//! Thin wrappers over the REST API that create boards, columns and cards
//! and read back their `data` payloads.

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};

/// Unwrap the success envelope
pub fn data(body: Value) -> Value {
    assert_eq!(body["status"], "success", "unexpected body: {}", body);
    body["data"].clone()
}

/// Read an id field as a string
pub fn id_of(value: &Value) -> String {
    value["id"].as_str().expect("missing id").to_string()
}

pub async fn create_board(server: &TestServer, token: &str, title: &str) -> Value {
    let response = server
        .post("/api/boards")
        .authorization_bearer(token)
        .json(&json!({ "title": title }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    data(response.json())
}

pub async fn create_column(server: &TestServer, token: &str, board_id: &str, title: &str) -> Value {
    let response = server
        .post("/api/columns")
        .authorization_bearer(token)
        .json(&json!({ "title": title, "boardId": board_id }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    data(response.json())
}

pub async fn create_card(server: &TestServer, token: &str, column_id: &str, title: &str) -> Value {
    let response = server
        .post("/api/cards")
        .authorization_bearer(token)
        .json(&json!({ "title": title, "columnId": column_id }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    data(response.json())
}

/// `(title, order)` of every card in a column, in order
pub async fn card_orders(server: &TestServer, token: &str, column_id: &str) -> Vec<(String, i64)> {
    let response = server
        .get(&format!("/api/cards/column/{}", column_id))
        .authorization_bearer(token)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    pairs(&data(response.json()))
}

/// `(title, order)` of every column in a board, in order
pub async fn column_orders(server: &TestServer, token: &str, board_id: &str) -> Vec<(String, i64)> {
    let response = server
        .get(&format!("/api/columns/board/{}", board_id))
        .authorization_bearer(token)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    pairs(&data(response.json()))
}

fn pairs(list: &Value) -> Vec<(String, i64)> {
    list.as_array()
        .expect("expected a list")
        .iter()
        .map(|item| {
            (
                item["title"].as_str().unwrap_or_default().to_string(),
                item["order"].as_i64().unwrap_or(-1),
            )
        })
        .collect()
}
