//! Server Module
//!
//! This module contains all server-side code for initializing and configuring
//! the Axum HTTP server.
//!
//! # Architecture
//!
//! The server module is organized into focused submodules:
//!
//! - **`state`** - Application state structure and `FromRef` implementations
//! - **`config`** - Database loading and store selection
//! - **`init`** - Server initialization and app creation
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── state.rs        - AppState and FromRef implementations
//! ├── config.rs       - Database loading and store selection
//! └── init.rs         - Server initialization and app creation
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Configuration**: `AppConfig` is loaded from the environment by `main`
//! 2. **Store Selection**: Postgres when reachable, in-memory otherwise
//! 3. **State Creation**: Store, group locks and board rooms
//! 4. **Router Creation**: Configures all routes and middleware
//! 5. **Background Tasks**: Periodic sweep of empty rooms and idle locks
//!
//! # Example
//!
//! ```rust,no_run
//! use taskboard::backend::server::create_app;
//! use taskboard::shared::AppConfig;
//!
//! # async fn example() {
//! let config = AppConfig::builder().server_port(8080).build().unwrap();
//! let app = create_app(config).await;
//! # }
//! ```

/// Application state management
pub mod state;

/// Store selection
pub mod config;

/// Server initialization
pub mod init;

// Re-export commonly used types
pub use init::create_app;
pub use state::AppState;
