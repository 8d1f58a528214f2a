/**
 * Column Handlers
 *
 * HTTP handlers for `/api/columns`.
 */

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use uuid::Uuid;

use super::service::ColumnService;
use crate::backend::error::BackendError;
use crate::backend::middleware::{ApiJson, AuthUser};
use crate::shared::kanban::{
    ApiResponse, Column, CreateColumnRequest, MoveColumnRequest, ReorderColumnsRequest,
    UpdateColumnRequest,
};

/// Append a column to a board
///
/// # Errors
///
/// * `400 Bad Request` - Title shorter than 3 or longer than 50 characters
/// * `403 Forbidden` - The board belongs to another user
/// * `404 Not Found` - No such board
///
/// # Example Request
///
/// ```http
/// POST /api/columns HTTP/1.1
/// Authorization: Bearer <token>
/// Content-Type: application/json
///
/// { "title": "Backlog", "boardId": "123e4567-e89b-12d3-a456-426614174000" }
/// ```
pub async fn create_column(
    AuthUser(user): AuthUser,
    State(service): State<ColumnService>,
    ApiJson(request): ApiJson<CreateColumnRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Column>>), BackendError> {
    let column = service.create_column(user.user_id, request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(column))))
}

/// List the columns of a board in ascending order
pub async fn list_columns(
    AuthUser(user): AuthUser,
    State(service): State<ColumnService>,
    Path(board_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<Column>>>, BackendError> {
    let columns = service.list_columns(user.user_id, board_id).await?;
    Ok(Json(ApiResponse::success(columns)))
}

pub async fn get_column(
    AuthUser(user): AuthUser,
    State(service): State<ColumnService>,
    Path(column_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Column>>, BackendError> {
    let column = service.get_column(user.user_id, column_id).await?;
    Ok(Json(ApiResponse::success(column)))
}

pub async fn update_column(
    AuthUser(user): AuthUser,
    State(service): State<ColumnService>,
    Path(column_id): Path<Uuid>,
    ApiJson(request): ApiJson<UpdateColumnRequest>,
) -> Result<Json<ApiResponse<Column>>, BackendError> {
    let column = service.update_column(user.user_id, column_id, request).await?;
    Ok(Json(ApiResponse::success(column)))
}

/// Delete a column and its cards
///
/// Answers `204 No Content`; the remaining columns are renumbered.
pub async fn delete_column(
    AuthUser(user): AuthUser,
    State(service): State<ColumnService>,
    Path(column_id): Path<Uuid>,
) -> Result<StatusCode, BackendError> {
    service.delete_column(user.user_id, column_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Reorder the columns of a board
///
/// The `order` values are placement hints; the response carries the dense
/// sequence the server derived from them.
///
/// # Errors
///
/// * `400 Bad Request` - Negative order, or an id that is not a column of the board
/// * `409 Conflict` - A write failed midway and the board was renumbered
///
/// # Example Request
///
/// ```http
/// PATCH /api/columns/reorder HTTP/1.1
/// Authorization: Bearer <token>
/// Content-Type: application/json
///
/// {
///   "boardId": "123e4567-e89b-12d3-a456-426614174000",
///   "columnOrders": [{ "id": "5f0c...", "order": 0 }]
/// }
/// ```
pub async fn reorder_columns(
    AuthUser(user): AuthUser,
    State(service): State<ColumnService>,
    ApiJson(request): ApiJson<ReorderColumnsRequest>,
) -> Result<Json<ApiResponse<Vec<Column>>>, BackendError> {
    let columns = service.reorder_columns(user.user_id, request).await?;
    Ok(Json(ApiResponse::success(columns)))
}

/// Move one column to a new position in its board
pub async fn move_column(
    AuthUser(user): AuthUser,
    State(service): State<ColumnService>,
    Path(column_id): Path<Uuid>,
    ApiJson(request): ApiJson<MoveColumnRequest>,
) -> Result<Json<ApiResponse<Column>>, BackendError> {
    let column = service.move_column(user.user_id, column_id, request).await?;
    Ok(Json(ApiResponse::success(column)))
}
