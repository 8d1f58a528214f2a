//! Column API integration tests
//!
//! Appending, compaction after delete, reorder and move within a board.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{
    column_orders, create_board, create_card, create_column, create_test_app, create_test_user, data, id_of,
};

fn titled(pairs: &[(&str, i64)]) -> Vec<(String, i64)> {
    pairs.iter().map(|(title, order)| (title.to_string(), *order)).collect()
}

#[tokio::test]
async fn test_new_column_is_appended() {
    let app = create_test_app();
    let user = create_test_user(&app.state, "ada").await;
    let board = id_of(&create_board(&app.server, &user.token, "Roadmap").await);
    create_column(&app.server, &user.token, &board, "Todo").await;
    create_column(&app.server, &user.token, &board, "Doing").await;

    let third = create_column(&app.server, &user.token, &board, "Done").await;

    assert_eq!(third["order"], 2);
    assert_eq!(
        column_orders(&app.server, &user.token, &board).await,
        titled(&[("Todo", 0), ("Doing", 1), ("Done", 2)])
    );
}

#[tokio::test]
async fn test_create_column_on_foreign_board_is_forbidden() {
    let app = create_test_app();
    let ada = create_test_user(&app.state, "ada").await;
    let grace = create_test_user(&app.state, "grace").await;
    let board = id_of(&create_board(&app.server, &ada.token, "Private").await);

    let response = app
        .server
        .post("/api/columns")
        .authorization_bearer(&grace.token)
        .json(&json!({ "title": "Sneaky", "boardId": board }))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    assert!(column_orders(&app.server, &ada.token, &board).await.is_empty());
}

#[tokio::test]
async fn test_create_column_on_missing_board_is_not_found() {
    let app = create_test_app();
    let user = create_test_user(&app.state, "ada").await;

    let response = app
        .server
        .post("/api/columns")
        .authorization_bearer(&user.token)
        .json(&json!({ "title": "Orphan", "boardId": uuid::Uuid::new_v4() }))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_column_compacts_and_removes_cards() {
    let app = create_test_app();
    let user = create_test_user(&app.state, "ada").await;
    let board = id_of(&create_board(&app.server, &user.token, "Roadmap").await);
    create_column(&app.server, &user.token, &board, "Todo").await;
    let doing = create_column(&app.server, &user.token, &board, "Doing").await;
    create_column(&app.server, &user.token, &board, "Done").await;
    let card = create_card(&app.server, &user.token, &id_of(&doing), "In flight").await;

    let response = app
        .server
        .delete(&format!("/api/columns/{}", id_of(&doing)))
        .authorization_bearer(&user.token)
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    assert_eq!(
        column_orders(&app.server, &user.token, &board).await,
        titled(&[("Todo", 0), ("Done", 1)])
    );
    let response = app
        .server
        .get(&format!("/api/cards/{}", id_of(&card)))
        .authorization_bearer(&user.token)
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_reorder_out_of_range_hint_is_clamped() {
    let app = create_test_app();
    let user = create_test_user(&app.state, "ada").await;
    let board = id_of(&create_board(&app.server, &user.token, "Roadmap").await);
    let todo = create_column(&app.server, &user.token, &board, "Todo").await;
    create_column(&app.server, &user.token, &board, "Doing").await;
    create_column(&app.server, &user.token, &board, "Done").await;

    let response = app
        .server
        .patch("/api/columns/reorder")
        .authorization_bearer(&user.token)
        .json(&json!({
            "boardId": board,
            "columnOrders": [{ "id": id_of(&todo), "order": 5 }]
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let columns = data(response.json());
    assert_eq!(columns[2]["id"], id_of(&todo));
    assert_eq!(
        column_orders(&app.server, &user.token, &board).await,
        titled(&[("Doing", 0), ("Done", 1), ("Todo", 2)])
    );
}

#[tokio::test]
async fn test_reorder_full_permutation() {
    let app = create_test_app();
    let user = create_test_user(&app.state, "ada").await;
    let board = id_of(&create_board(&app.server, &user.token, "Roadmap").await);
    let a = id_of(&create_column(&app.server, &user.token, &board, "Alpha").await);
    let b = id_of(&create_column(&app.server, &user.token, &board, "Bravo").await);
    let c = id_of(&create_column(&app.server, &user.token, &board, "Charlie").await);

    let response = app
        .server
        .patch("/api/columns/reorder")
        .authorization_bearer(&user.token)
        .json(&json!({
            "boardId": board,
            "columnOrders": [
                { "id": c, "order": 0 },
                { "id": a, "order": 1 },
                { "id": b, "order": 2 }
            ]
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        column_orders(&app.server, &user.token, &board).await,
        titled(&[("Charlie", 0), ("Alpha", 1), ("Bravo", 2)])
    );
}

#[tokio::test]
async fn test_reorder_with_unknown_id_is_rejected() {
    let app = create_test_app();
    let user = create_test_user(&app.state, "ada").await;
    let board = id_of(&create_board(&app.server, &user.token, "Roadmap").await);
    let a = id_of(&create_column(&app.server, &user.token, &board, "Alpha").await);
    create_column(&app.server, &user.token, &board, "Bravo").await;

    let response = app
        .server
        .patch("/api/columns/reorder")
        .authorization_bearer(&user.token)
        .json(&json!({
            "boardId": board,
            "columnOrders": [
                { "id": a, "order": 1 },
                { "id": uuid::Uuid::new_v4(), "order": 0 }
            ]
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        column_orders(&app.server, &user.token, &board).await,
        titled(&[("Alpha", 0), ("Bravo", 1)])
    );
}

#[tokio::test]
async fn test_move_column_shifts_neighbours() {
    let app = create_test_app();
    let user = create_test_user(&app.state, "ada").await;
    let board = id_of(&create_board(&app.server, &user.token, "Roadmap").await);
    let a = id_of(&create_column(&app.server, &user.token, &board, "Alpha").await);
    create_column(&app.server, &user.token, &board, "Bravo").await;
    create_column(&app.server, &user.token, &board, "Charlie").await;

    let response = app
        .server
        .patch(&format!("/api/columns/{}/move", a))
        .authorization_bearer(&user.token)
        .json(&json!({ "order": 2 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(data(response.json())["order"], 2);
    assert_eq!(
        column_orders(&app.server, &user.token, &board).await,
        titled(&[("Bravo", 0), ("Charlie", 1), ("Alpha", 2)])
    );

    let response = app
        .server
        .patch(&format!("/api/columns/{}/move", a))
        .authorization_bearer(&user.token)
        .json(&json!({ "order": -1 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_column_title_keeps_order() {
    let app = create_test_app();
    let user = create_test_user(&app.state, "ada").await;
    let board = id_of(&create_board(&app.server, &user.token, "Roadmap").await);
    create_column(&app.server, &user.token, &board, "Alpha").await;
    let b = id_of(&create_column(&app.server, &user.token, &board, "Bravo").await);

    let response = app
        .server
        .put(&format!("/api/columns/{}", b))
        .authorization_bearer(&user.token)
        .json(&json!({ "title": "Beta" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        column_orders(&app.server, &user.token, &board).await,
        titled(&[("Alpha", 0), ("Beta", 1)])
    );
}
