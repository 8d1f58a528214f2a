//! Boards Module
//!
//! Board CRUD and the pieces every board, column and card operation shares.
//!
//! # Module Structure
//!
//! ```text
//! boards/
//! ├── mod.rs      - Module exports and documentation
//! ├── guard.rs    - Ownership Guard
//! ├── cascade.rs  - Cascade Deleter
//! ├── service.rs  - Board operations
//! └── handlers.rs - HTTP handlers for /api/boards
//! ```

pub mod cascade;
pub mod guard;
pub mod handlers;
pub mod service;

pub use cascade::CascadeReport;
pub use guard::{authorize, Owned};
pub use service::BoardService;
