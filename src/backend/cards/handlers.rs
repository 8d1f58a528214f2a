/**
 * Card Handlers
 *
 * HTTP handlers for `/api/cards`.
 */

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use uuid::Uuid;

use super::service::CardService;
use crate::backend::error::BackendError;
use crate::backend::middleware::{ApiJson, AuthUser};
use crate::shared::kanban::{
    ApiResponse, Card, CreateCardRequest, MoveCardRequest, ReorderCardsRequest, UpdateCardRequest,
};

/// Append a card to a column
///
/// # Errors
///
/// * `400 Bad Request` - Title outside 3..=100 characters, description over
///   1000 characters, unknown priority
/// * `403 Forbidden` - The column belongs to another user
/// * `404 Not Found` - No such column
///
/// # Example Request
///
/// ```http
/// POST /api/cards HTTP/1.1
/// Authorization: Bearer <token>
/// Content-Type: application/json
///
/// {
///   "title": "Write release notes",
///   "columnId": "123e4567-e89b-12d3-a456-426614174000",
///   "priority": "high",
///   "labels": ["docs"]
/// }
/// ```
pub async fn create_card(
    AuthUser(user): AuthUser,
    State(service): State<CardService>,
    ApiJson(request): ApiJson<CreateCardRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Card>>), BackendError> {
    let card = service.create_card(user.user_id, request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(card))))
}

/// List the cards of a column in ascending order
pub async fn list_cards(
    AuthUser(user): AuthUser,
    State(service): State<CardService>,
    Path(column_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<Card>>>, BackendError> {
    let cards = service.list_cards(user.user_id, column_id).await?;
    Ok(Json(ApiResponse::success(cards)))
}

pub async fn get_card(
    AuthUser(user): AuthUser,
    State(service): State<CardService>,
    Path(card_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Card>>, BackendError> {
    let card = service.get_card(user.user_id, card_id).await?;
    Ok(Json(ApiResponse::success(card)))
}

/// Update card fields
///
/// Absent fields are kept; `"dueDate": null` clears the due date.
pub async fn update_card(
    AuthUser(user): AuthUser,
    State(service): State<CardService>,
    Path(card_id): Path<Uuid>,
    ApiJson(request): ApiJson<UpdateCardRequest>,
) -> Result<Json<ApiResponse<Card>>, BackendError> {
    let card = service.update_card(user.user_id, card_id, request).await?;
    Ok(Json(ApiResponse::success(card)))
}

pub async fn delete_card(
    AuthUser(user): AuthUser,
    State(service): State<CardService>,
    Path(card_id): Path<Uuid>,
) -> Result<StatusCode, BackendError> {
    service.delete_card(user.user_id, card_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Reorder the cards of a column from placement hints
pub async fn reorder_cards(
    AuthUser(user): AuthUser,
    State(service): State<CardService>,
    ApiJson(request): ApiJson<ReorderCardsRequest>,
) -> Result<Json<ApiResponse<Vec<Card>>>, BackendError> {
    let cards = service.reorder_cards(user.user_id, request).await?;
    Ok(Json(ApiResponse::success(cards)))
}

/// Move a card to a position in the same or another column
///
/// # Errors
///
/// * `403 Forbidden` - The card or the destination column belongs to another user
/// * `404 Not Found` - No such card or destination column
/// * `409 Conflict` - A write failed midway and both columns were renumbered
///
/// # Example Request
///
/// ```http
/// PATCH /api/cards/5f0c0a4e-.../move HTTP/1.1
/// Authorization: Bearer <token>
/// Content-Type: application/json
///
/// { "destinationColumnId": "123e4567-e89b-12d3-a456-426614174000", "order": 1 }
/// ```
pub async fn move_card(
    AuthUser(user): AuthUser,
    State(service): State<CardService>,
    Path(card_id): Path<Uuid>,
    ApiJson(request): ApiJson<MoveCardRequest>,
) -> Result<Json<ApiResponse<Card>>, BackendError> {
    let card = service.move_card(user.user_id, card_id, request).await?;
    Ok(Json(ApiResponse::success(card)))
}
