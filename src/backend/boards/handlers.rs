/**
 * Board Handlers
 *
 * HTTP handlers for `/api/boards`. Each one extracts the authenticated user
 * and delegates to [`BoardService`]; failures are rendered by
 * `BackendError`'s `IntoResponse`.
 */

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use uuid::Uuid;

use super::service::BoardService;
use crate::backend::error::BackendError;
use crate::backend::middleware::{ApiJson, AuthUser};
use crate::shared::kanban::{
    ApiResponse, Board, BoardDetails, CreateBoardRequest, RepairReport, UpdateBoardRequest,
};

/// Create a board owned by the caller
///
/// # Errors
///
/// * `400 Bad Request` - Title shorter than 3 or longer than 50 characters
///
/// # Example Request
///
/// ```http
/// POST /api/boards HTTP/1.1
/// Authorization: Bearer <token>
/// Content-Type: application/json
///
/// { "title": "Roadmap", "icon": "rocket" }
/// ```
pub async fn create_board(
    AuthUser(user): AuthUser,
    State(service): State<BoardService>,
    ApiJson(request): ApiJson<CreateBoardRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Board>>), BackendError> {
    let board = service.create_board(user.user_id, request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(board))))
}

/// List the caller's boards, newest first
pub async fn list_boards(
    AuthUser(user): AuthUser,
    State(service): State<BoardService>,
) -> Result<Json<ApiResponse<Vec<Board>>>, BackendError> {
    let boards = service.list_boards(user.user_id).await?;
    Ok(Json(ApiResponse::success(boards)))
}

/// Get a board with its columns and cards
///
/// # Errors
///
/// * `404 Not Found` - No such board
/// * `403 Forbidden` - The board belongs to another user
pub async fn get_board(
    AuthUser(user): AuthUser,
    State(service): State<BoardService>,
    Path(board_id): Path<Uuid>,
) -> Result<Json<ApiResponse<BoardDetails>>, BackendError> {
    let details = service.get_board(user.user_id, board_id).await?;
    Ok(Json(ApiResponse::success(details)))
}

pub async fn update_board(
    AuthUser(user): AuthUser,
    State(service): State<BoardService>,
    Path(board_id): Path<Uuid>,
    ApiJson(request): ApiJson<UpdateBoardRequest>,
) -> Result<Json<ApiResponse<Board>>, BackendError> {
    let board = service.update_board(user.user_id, board_id, request).await?;
    Ok(Json(ApiResponse::success(board)))
}

/// Delete a board with all of its columns and cards
///
/// Answers `204 No Content` on success.
pub async fn delete_board(
    AuthUser(user): AuthUser,
    State(service): State<BoardService>,
    Path(board_id): Path<Uuid>,
) -> Result<StatusCode, BackendError> {
    service.delete_board(user.user_id, board_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Renumber every sibling group of a board densely
///
/// # Example Response
///
/// ```json
/// { "status": "success", "data": { "groups": 4, "rowsUpdated": 2 } }
/// ```
pub async fn repair_board(
    AuthUser(user): AuthUser,
    State(service): State<BoardService>,
    Path(board_id): Path<Uuid>,
) -> Result<Json<ApiResponse<RepairReport>>, BackendError> {
    let report = service.repair_board(user.user_id, board_id).await?;
    Ok(Json(ApiResponse::success(report)))
}
