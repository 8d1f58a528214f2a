//! Board API integration tests
//!
//! Board CRUD, the cascading delete, repair and the ownership guard.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{
    card_orders, create_board, create_card, create_column, create_test_app, create_test_user, data, id_of,
};

#[tokio::test]
async fn test_create_and_list_boards() {
    let app = create_test_app();
    let user = create_test_user(&app.state, "ada").await;

    let board = create_board(&app.server, &user.token, "  Roadmap  ").await;
    assert_eq!(board["title"], "Roadmap");
    assert_eq!(board["ownerId"], user.id.to_string());

    let response = app.server.get("/api/boards").authorization_bearer(&user.token).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let boards = data(response.json());
    assert_eq!(boards.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_list_boards_only_returns_own_boards() {
    let app = create_test_app();
    let ada = create_test_user(&app.state, "ada").await;
    let grace = create_test_user(&app.state, "grace").await;
    create_board(&app.server, &ada.token, "Ada's").await;

    let response = app.server.get("/api/boards").authorization_bearer(&grace.token).await;
    assert_eq!(data(response.json()), json!([]));
}

#[tokio::test]
async fn test_get_board_nests_columns_and_cards() {
    let app = create_test_app();
    let user = create_test_user(&app.state, "ada").await;
    let board = create_board(&app.server, &user.token, "Roadmap").await;
    let todo = create_column(&app.server, &user.token, &id_of(&board), "Todo").await;
    create_column(&app.server, &user.token, &id_of(&board), "Done").await;
    create_card(&app.server, &user.token, &id_of(&todo), "Write tests").await;

    let response = app
        .server
        .get(&format!("/api/boards/{}", id_of(&board)))
        .authorization_bearer(&user.token)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let details = data(response.json());
    assert_eq!(details["title"], "Roadmap");
    let columns = details["columns"].as_array().unwrap();
    assert_eq!(columns.len(), 2);
    assert_eq!(columns[0]["title"], "Todo");
    assert_eq!(columns[0]["cards"][0]["title"], "Write tests");
    assert_eq!(columns[1]["cards"], json!([]));
}

#[tokio::test]
async fn test_other_users_board_is_forbidden() {
    let app = create_test_app();
    let ada = create_test_user(&app.state, "ada").await;
    let grace = create_test_user(&app.state, "grace").await;
    let board = create_board(&app.server, &ada.token, "Private").await;
    let path = format!("/api/boards/{}", id_of(&board));

    let response = app.server.get(&path).authorization_bearer(&grace.token).await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

    let response = app
        .server
        .put(&path)
        .authorization_bearer(&grace.token)
        .json(&json!({ "title": "Mine now" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

    let response = app.server.delete(&path).authorization_bearer(&grace.token).await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_unknown_board_is_not_found() {
    let app = create_test_app();
    let user = create_test_user(&app.state, "ada").await;

    let response = app
        .server
        .get(&format!("/api/boards/{}", uuid::Uuid::new_v4()))
        .authorization_bearer(&user.token)
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_board_validates_title() {
    let app = create_test_app();
    let user = create_test_user(&app.state, "ada").await;
    let board = create_board(&app.server, &user.token, "Roadmap").await;
    let path = format!("/api/boards/{}", id_of(&board));

    let response = app
        .server
        .put(&path)
        .authorization_bearer(&user.token)
        .json(&json!({ "title": "   " }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let response = app
        .server
        .put(&path)
        .authorization_bearer(&user.token)
        .json(&json!({ "title": "Renamed", "background": "#fff" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let updated = data(response.json());
    assert_eq!(updated["title"], "Renamed");
    assert_eq!(updated["background"], "#fff");
}

#[tokio::test]
async fn test_delete_board_cascades() {
    let app = create_test_app();
    let user = create_test_user(&app.state, "ada").await;
    let board = create_board(&app.server, &user.token, "Doomed").await;
    let column = create_column(&app.server, &user.token, &id_of(&board), "Todo").await;
    let card = create_card(&app.server, &user.token, &id_of(&column), "Gone soon").await;

    let response = app
        .server
        .delete(&format!("/api/boards/{}", id_of(&board)))
        .authorization_bearer(&user.token)
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    for path in [
        format!("/api/boards/{}", id_of(&board)),
        format!("/api/columns/{}", id_of(&column)),
        format!("/api/cards/{}", id_of(&card)),
    ] {
        let response = app.server.get(&path).authorization_bearer(&user.token).await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND, "{} survived", path);
    }
}

#[tokio::test]
async fn test_repair_on_dense_board_changes_nothing() {
    let app = create_test_app();
    let user = create_test_user(&app.state, "ada").await;
    let board = create_board(&app.server, &user.token, "Roadmap").await;
    let column = create_column(&app.server, &user.token, &id_of(&board), "Todo").await;
    create_card(&app.server, &user.token, &id_of(&column), "One").await;
    create_card(&app.server, &user.token, &id_of(&column), "Two").await;

    let response = app
        .server
        .post(&format!("/api/boards/{}/repair", id_of(&board)))
        .authorization_bearer(&user.token)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let report = data(response.json());
    assert_eq!(report["groups"], 2);
    assert_eq!(report["rowsUpdated"], 0);
    assert_eq!(
        card_orders(&app.server, &user.token, &id_of(&column)).await,
        vec![("One".to_string(), 0), ("Two".to_string(), 1)]
    );
}

#[tokio::test]
async fn test_board_routes_require_token() {
    let app = create_test_app();

    let response = app.server.get("/api/boards").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let response = app.server.post("/api/boards").json(&json!({ "title": "x" })).await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}
