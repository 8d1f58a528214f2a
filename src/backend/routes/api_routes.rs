/**
 * API Route Handlers
 *
 * This module wires the REST endpoints to their handlers.
 *
 * # Routes
 *
 * ## Authentication
 * - `POST /api/auth/signup` - User registration
 * - `POST /api/auth/login` - User login
 * - `POST /api/auth/logout` - Close the current session
 * - `GET /api/auth/me` - Get current user info
 *
 * ## Account
 * - `PUT /api/users/profile`, `PATCH /api/users/theme`
 * - `DELETE /api/users/account`
 *
 * ## Boards
 * - `POST /api/boards`, `GET /api/boards`
 * - `GET|PUT|DELETE /api/boards/{id}`
 * - `POST /api/boards/{id}/repair`
 *
 * ## Columns
 * - `POST /api/columns`, `GET /api/columns/board/{board_id}`
 * - `GET|PUT|DELETE /api/columns/{id}`
 * - `PATCH /api/columns/reorder`, `PATCH /api/columns/{id}/move`
 *
 * ## Cards
 * - `POST /api/cards`, `GET /api/cards/column/{column_id}`
 * - `GET|PUT|DELETE /api/cards/{id}`
 * - `PATCH /api/cards/reorder`, `PATCH /api/cards/{id}/move`
 */

use axum::{
    middleware,
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::backend::auth::{delete_account, get_me, login, logout, signup, update_profile, update_theme};
use crate::backend::boards::handlers as boards;
use crate::backend::cards::handlers as cards;
use crate::backend::columns::handlers as columns;
use crate::backend::middleware::auth_middleware;
use crate::backend::server::state::AppState;

/// Configure API routes
///
/// Signup and login are public. Every other route sits behind
/// `auth_middleware`, which answers 401 before the handler runs when the
/// bearer token is missing, invalid or expired, or names a closed session
/// or a deleted user.
pub fn configure_api_routes(router: Router<AppState>, app_state: AppState) -> Router<AppState> {
    let public: Router<AppState> = Router::new()
        .route("/api/auth/signup", post(signup))
        .route("/api/auth/login", post(login));

    let protected: Router<AppState> = Router::new()
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/me", get(get_me))
        // Account
        .route("/api/users/profile", put(update_profile))
        .route("/api/users/theme", patch(update_theme))
        .route("/api/users/account", delete(delete_account))
        // Boards
        .route("/api/boards", post(boards::create_board).get(boards::list_boards))
        .route(
            "/api/boards/{id}",
            get(boards::get_board)
                .put(boards::update_board)
                .delete(boards::delete_board),
        )
        .route("/api/boards/{id}/repair", post(boards::repair_board))
        // Columns
        .route("/api/columns", post(columns::create_column))
        .route("/api/columns/board/{board_id}", get(columns::list_columns))
        .route("/api/columns/reorder", patch(columns::reorder_columns))
        .route(
            "/api/columns/{id}",
            get(columns::get_column)
                .put(columns::update_column)
                .delete(columns::delete_column),
        )
        .route("/api/columns/{id}/move", patch(columns::move_column))
        // Cards
        .route("/api/cards", post(cards::create_card))
        .route("/api/cards/column/{column_id}", get(cards::list_cards))
        .route("/api/cards/reorder", patch(cards::reorder_cards))
        .route(
            "/api/cards/{id}",
            get(cards::get_card)
                .put(cards::update_card)
                .delete(cards::delete_card),
        )
        .route("/api/cards/{id}/move", patch(cards::move_card))
        .route_layer(middleware::from_fn_with_state(app_state, auth_middleware));

    router.merge(public).merge(protected)
}
