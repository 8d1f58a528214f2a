//! Card API integration tests
//!
//! Dense ordering through create, delete, reorder and the move protocol.

use axum::http::StatusCode;
use axum_test::TestServer;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{
    card_orders, create_board, create_card, create_column, create_test_app, create_test_user, data, id_of,
};

fn titled(pairs: &[(&str, i64)]) -> Vec<(String, i64)> {
    pairs.iter().map(|(title, order)| (title.to_string(), *order)).collect()
}

/// Board with two columns: X holding cards x-0..x-3, Y holding y-0..y-1
struct TwoColumns {
    x: String,
    y: String,
    x_cards: Vec<Value>,
}

async fn two_columns(server: &TestServer, token: &str) -> TwoColumns {
    let board = id_of(&create_board(server, token, "Roadmap").await);
    let x = id_of(&create_column(server, token, &board, "Column X").await);
    let y = id_of(&create_column(server, token, &board, "Column Y").await);

    let mut x_cards = Vec::new();
    for title in ["x-0", "x-1", "x-2", "x-3"] {
        x_cards.push(create_card(server, token, &x, title).await);
    }
    for title in ["y-0", "y-1"] {
        create_card(server, token, &y, title).await;
    }
    TwoColumns { x, y, x_cards }
}

#[tokio::test]
async fn test_create_card_defaults() {
    let app = create_test_app();
    let user = create_test_user(&app.state, "ada").await;
    let board = id_of(&create_board(&app.server, &user.token, "Roadmap").await);
    let column = id_of(&create_column(&app.server, &user.token, &board, "Todo").await);

    let card = create_card(&app.server, &user.token, &column, "Write docs").await;

    assert_eq!(card["order"], 0);
    assert_eq!(card["priority"], "low");
    assert_eq!(card["description"], "");
    assert_eq!(card["labels"], json!([]));
    assert_eq!(card["ownerId"], user.id.to_string());
}

#[tokio::test]
async fn test_delete_card_closes_gap() {
    let app = create_test_app();
    let user = create_test_user(&app.state, "ada").await;
    let setup = two_columns(&app.server, &user.token).await;

    let response = app
        .server
        .delete(&format!("/api/cards/{}", id_of(&setup.x_cards[1])))
        .authorization_bearer(&user.token)
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    assert_eq!(
        card_orders(&app.server, &user.token, &setup.x).await,
        titled(&[("x-0", 0), ("x-2", 1), ("x-3", 2)])
    );
}

#[tokio::test]
async fn test_move_card_across_columns() {
    let app = create_test_app();
    let user = create_test_user(&app.state, "ada").await;
    let setup = two_columns(&app.server, &user.token).await;

    let response = app
        .server
        .patch(&format!("/api/cards/{}/move", id_of(&setup.x_cards[2])))
        .authorization_bearer(&user.token)
        .json(&json!({ "destinationColumnId": setup.y, "order": 1 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let moved = data(response.json());
    assert_eq!(moved["columnId"], setup.y);
    assert_eq!(moved["order"], 1);
    assert_eq!(
        card_orders(&app.server, &user.token, &setup.x).await,
        titled(&[("x-0", 0), ("x-1", 1), ("x-3", 2)])
    );
    assert_eq!(
        card_orders(&app.server, &user.token, &setup.y).await,
        titled(&[("y-0", 0), ("x-2", 1), ("y-1", 2)])
    );
}

#[tokio::test]
async fn test_move_card_accepts_legacy_field_names() {
    let app = create_test_app();
    let user = create_test_user(&app.state, "ada").await;
    let setup = two_columns(&app.server, &user.token).await;

    let response = app
        .server
        .patch(&format!("/api/cards/{}/move", id_of(&setup.x_cards[0])))
        .authorization_bearer(&user.token)
        .json(&json!({ "newColumnId": setup.y, "newPosition": 99 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        card_orders(&app.server, &user.token, &setup.y).await,
        titled(&[("y-0", 0), ("y-1", 1), ("x-0", 2)])
    );
}

#[tokio::test]
async fn test_move_card_within_same_column() {
    let app = create_test_app();
    let user = create_test_user(&app.state, "ada").await;
    let setup = two_columns(&app.server, &user.token).await;

    let response = app
        .server
        .patch(&format!("/api/cards/{}/move", id_of(&setup.x_cards[0])))
        .authorization_bearer(&user.token)
        .json(&json!({ "destinationColumnId": setup.x, "order": 2 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(data(response.json())["order"], 2);
    assert_eq!(
        card_orders(&app.server, &user.token, &setup.x).await,
        titled(&[("x-1", 0), ("x-2", 1), ("x-0", 2), ("x-3", 3)])
    );

    let response = app
        .server
        .patch(&format!("/api/cards/{}/move", id_of(&setup.x_cards[3])))
        .authorization_bearer(&user.token)
        .json(&json!({ "destinationColumnId": setup.x, "order": 0 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        card_orders(&app.server, &user.token, &setup.x).await,
        titled(&[("x-3", 0), ("x-1", 1), ("x-2", 2), ("x-0", 3)])
    );
}

#[tokio::test]
async fn test_move_card_to_foreign_column_is_forbidden() {
    let app = create_test_app();
    let ada = create_test_user(&app.state, "ada").await;
    let grace = create_test_user(&app.state, "grace").await;
    let setup = two_columns(&app.server, &ada.token).await;
    let theirs = id_of(&create_board(&app.server, &grace.token, "Grace's").await);
    let foreign = id_of(&create_column(&app.server, &grace.token, &theirs, "Inbox").await);

    let response = app
        .server
        .patch(&format!("/api/cards/{}/move", id_of(&setup.x_cards[0])))
        .authorization_bearer(&ada.token)
        .json(&json!({ "destinationColumnId": foreign, "order": 0 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

    assert_eq!(card_orders(&app.server, &ada.token, &setup.x).await.len(), 4);
    assert!(card_orders(&app.server, &grace.token, &foreign).await.is_empty());
}

#[tokio::test]
async fn test_move_card_to_missing_column_is_not_found() {
    let app = create_test_app();
    let user = create_test_user(&app.state, "ada").await;
    let setup = two_columns(&app.server, &user.token).await;

    let response = app
        .server
        .patch(&format!("/api/cards/{}/move", id_of(&setup.x_cards[0])))
        .authorization_bearer(&user.token)
        .json(&json!({ "destinationColumnId": uuid::Uuid::new_v4(), "order": 0 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_reorder_cards() {
    let app = create_test_app();
    let user = create_test_user(&app.state, "ada").await;
    let setup = two_columns(&app.server, &user.token).await;
    let x3 = id_of(&setup.x_cards[3]);

    let response = app
        .server
        .patch("/api/cards/reorder")
        .authorization_bearer(&user.token)
        .json(&json!({
            "columnId": setup.x,
            "cardOrders": [{ "id": x3, "order": 0 }]
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        card_orders(&app.server, &user.token, &setup.x).await,
        titled(&[("x-3", 0), ("x-0", 1), ("x-1", 2), ("x-2", 3)])
    );
}

#[tokio::test]
async fn test_update_card_fields() {
    let app = create_test_app();
    let user = create_test_user(&app.state, "ada").await;
    let setup = two_columns(&app.server, &user.token).await;
    let path = format!("/api/cards/{}", id_of(&setup.x_cards[1]));

    let response = app
        .server
        .put(&path)
        .authorization_bearer(&user.token)
        .json(&json!({
            "title": "Renamed",
            "priority": "high",
            "labels": ["bug"],
            "dueDate": "2030-01-01T00:00:00Z"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let card = data(response.json());
    assert_eq!(card["title"], "Renamed");
    assert_eq!(card["priority"], "high");
    assert_eq!(card["labels"], json!(["bug"]));
    assert_eq!(card["order"], 1);

    let response = app
        .server
        .put(&path)
        .authorization_bearer(&user.token)
        .json(&json!({ "dueDate": null }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(data(response.json())["dueDate"], Value::Null);
}

#[tokio::test]
async fn test_card_of_other_user_is_forbidden() {
    let app = create_test_app();
    let ada = create_test_user(&app.state, "ada").await;
    let grace = create_test_user(&app.state, "grace").await;
    let setup = two_columns(&app.server, &ada.token).await;

    let response = app
        .server
        .get(&format!("/api/cards/{}", id_of(&setup.x_cards[0])))
        .authorization_bearer(&grace.token)
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

    let response = app
        .server
        .delete(&format!("/api/cards/{}", id_of(&setup.x_cards[0])))
        .authorization_bearer(&grace.token)
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    assert_eq!(card_orders(&app.server, &ada.token, &setup.x).await.len(), 4);
}
