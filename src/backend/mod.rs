//! Backend Module
//!
//! This module contains all server-side code for the task board. It provides
//! an Axum HTTP server, a WebSocket board-room channel and the ordering
//! subsystem that keeps columns and cards densely numbered.
//!
//! # Architecture
//!
//! The backend is organized into focused submodules:
//!
//! - **`server`** - Server initialization, application state, database loading
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`store`** - Persistence port with Postgres and in-memory adapters
//! - **`ordering`** - Order sequencer and per-group locks
//! - **`boards`** - Ownership guard, cascade deleter, board CRUD
//! - **`columns`** - Column CRUD, reorder and move
//! - **`cards`** - Card CRUD, reorder and cross-column move
//! - **`auth`** - Authentication, JWT tokens, user management
//! - **`realtime`** - Board rooms over WebSocket
//! - **`middleware`** - Request processing middleware and extractors
//! - **`error`** - Backend-specific error types
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── store/          - Persistence port and adapters
//! ├── ordering/       - Sequencer and group locks
//! ├── boards/         - Boards, ownership guard, cascade deletes
//! ├── columns/        - Column service and handlers
//! ├── cards/          - Card service and handlers
//! ├── auth/           - Authentication
//! ├── realtime/       - Board rooms
//! ├── middleware/     - Request middleware
//! └── error/          - Error types
//! ```
//!
//! # Control Flow
//!
//! A mutating request passes through the auth middleware, which attaches the
//! principal. The service loads the target entity, checks ownership, takes
//! the lock of every sibling group it will renumber, asks the sequencer for
//! the order changes, writes them through the store and finally publishes a
//! board event to the room.
//!
//! # Error Handling
//!
//! Every service operation returns `Result<T, BackendError>`. `BackendError`
//! implements `IntoResponse`, so handlers return it directly with `?`.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Persistence port and adapters
pub mod store;

/// Order sequencer and per-group locks
pub mod ordering;

/// Boards, ownership guard and cascade deletes
pub mod boards;

/// Column service and handlers
pub mod columns;

/// Card service and handlers
pub mod cards;

/// Board rooms over WebSocket
pub mod realtime;

/// Backend error types
pub mod error;

/// Authentication and user management
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Re-export commonly used types
pub use server::create_app;
pub use error::BackendError;
pub use store::{MemoryStore, PgStore, SiblingGroup, Store, StoreError};
pub use ordering::{GroupLocks, Sequencer};
pub use realtime::BoardRooms;
