//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Architecture
//!
//! - **`router`** - Main router creation, fallback and layers
//! - **`api_routes`** - REST endpoints (auth, boards, columns, cards)
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation
//! └── api_routes.rs   - API endpoint wiring
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use taskboard::backend::routes::create_router;
//! use taskboard::backend::server::state::AppState;
//! use taskboard::backend::MemoryStore;
//! use taskboard::shared::AppConfig;
//!
//! let config = AppConfig::builder().build().unwrap();
//! let router = create_router(AppState::new(config, Arc::new(MemoryStore::new())));
//! ```

/// Main router creation
pub mod router;

/// API endpoint wiring
pub mod api_routes;

pub use router::create_router;
