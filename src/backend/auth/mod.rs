//! Authentication Module
//!
//! This module handles user authentication, registration, and session management.
//! It provides HTTP handlers for authentication endpoints and manages user data
//! and JWT tokens.
//!
//! # Architecture
//!
//! The auth module is organized into focused submodules:
//!
//! - **`users`** - User record and store lookups
//! - **`sessions`** - Session records, JWT token generation and validation
//! - **`handlers`** - HTTP handlers for authentication endpoints
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── users.rs        - User record and store lookups
//! ├── sessions.rs     - Sessions and JWT token management
//! └── handlers/       - HTTP handlers
//!     ├── mod.rs      - Handler exports
//!     ├── types.rs    - Request/response types
//!     ├── signup.rs   - User registration handler
//!     ├── login.rs    - User authentication handler
//!     ├── logout.rs   - Session close handler
//!     ├── me.rs       - Get current user handler
//!     └── account.rs  - Profile, theme and account deletion
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Signup**: name, email and password → user created → token returned
//! 2. **Login**: email and password → credentials verified → token returned
//! 3. **Get Me**: bearer token → verified → user info returned
//! 4. **Logout**: bearer token → session deleted → token refused from then on
//!
//! The user id carried by a verified token is the principal every board,
//! column and card operation checks ownership against.
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - Tokens are HS256 JWTs signed with `JWT_SECRET`
//! - Tokens expire after `JWT_TTL_HOURS` (30 days by default)
//! - Each token names a stored session; logout and account deletion remove it
//! - Invalid credentials return 401 (no information leakage)

/// User record and store lookups
pub mod users;

/// Session records, JWT token generation and validation
pub mod sessions;

/// HTTP handlers for authentication endpoints
pub mod handlers;

// Re-export commonly used types and handlers
pub use handlers::types::{SignupRequest, LoginRequest, AuthResponse, UserResponse};
pub use handlers::{delete_account, get_me, login, logout, signup, update_profile, update_theme};

