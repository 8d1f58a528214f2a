//! Middleware Module
//!
//! This module contains the HTTP middleware and extractors that run before
//! a handler body.
//!
//! # Architecture
//!
//! - **`auth`** - Bearer token middleware and the `AuthUser` extractor
//! - **`json`** - `ApiJson`, a JSON body extractor with `BackendError` rejections
//!
//! # Example
//!
//! ```rust,no_run
//! use axum::{middleware, routing::get, Router};
//! use taskboard::backend::middleware::auth_middleware;
//! use taskboard::backend::server::state::AppState;
//!
//! # fn example(state: AppState) {
//! let protected: Router<AppState> = Router::new()
//!     .route("/api/auth/me", get(taskboard::backend::auth::get_me))
//!     .route_layer(middleware::from_fn_with_state(state, auth_middleware));
//! # }
//! ```

pub mod auth;
pub mod json;

pub use auth::{auth_middleware, AuthUser, AuthenticatedUser};
pub use json::ApiJson;
