//! Taskboard - Main Library
//!
//! Taskboard is a Kanban-style task board backend built with Rust: users own
//! boards, boards hold ordered columns, columns hold ordered cards. It is
//! served as a REST API plus a WebSocket board-room channel.
//!
//! # Overview
//!
//! This library provides:
//! - Dense, gap-free ordering of columns within a board and cards within a column
//! - Reordering and cross-column moves that keep that ordering intact
//! - Ownership checks on every mutation
//! - Cascading deletes from boards down to cards
//! - Real-time board events over WebSocket
//!
//! # Module Structure
//!
//! - **`shared`** - Types shared between the API and its clients
//!   - Board, column and card records, request payloads
//!   - Board room events
//!   - Validation errors and configuration
//!
//! - **`backend`** - Server-side code
//!   - Axum HTTP server and routes
//!   - Persistence port with Postgres and in-memory adapters
//!   - Order sequencer and per-group locks
//!   - Authentication and board rooms
//!
//! # Usage
//!
//! ```rust,no_run
//! use taskboard::backend::server::init::create_app;
//! use taskboard::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::from_env()?;
//! let app = create_app(config).await;
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! All server state is shared through `Arc`. Each sibling group (the columns
//! of a board, the cards of a column) is serialized by its own async mutex
//! while its order values are being rewritten.

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;
