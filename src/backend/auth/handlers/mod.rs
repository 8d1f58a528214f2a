//! Authentication Handlers Module
//!
//! This module contains all HTTP handlers for authentication endpoints.
//! Handlers are organized into focused submodules for maintainability.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Module exports and documentation
//! ├── types.rs    - Request and response types
//! ├── signup.rs   - User registration handler
//! ├── login.rs    - User authentication handler
//! ├── logout.rs   - Session close handler
//! ├── me.rs       - Get current user handler
//! └── account.rs  - Profile, theme and account deletion
//! ```
//!
//! # Handlers
//!
//! - **`signup`** - POST /api/auth/signup - User registration
//! - **`login`** - POST /api/auth/login - User authentication
//! - **`logout`** - POST /api/auth/logout - Close the caller's session
//! - **`get_me`** - GET /api/auth/me - Get current user info
//! - **`update_profile`** - PUT /api/users/profile - Change name or email
//! - **`update_theme`** - PATCH /api/users/theme - Pick a theme
//! - **`delete_account`** - DELETE /api/users/account - Remove the user and their boards
//!
//! # Authentication Flow
//!
//! 1. **Signup**: name, email and password → user created → token returned (201)
//! 2. **Login**: email and password → credentials verified → token returned
//! 3. **Get Me**: bearer token → verified by the middleware → user returned
//! 4. **Logout**: bearer token → its session deleted → 204
//!
//! Every response with a body uses the `{"status": "success", "data": ...}`
//! envelope.

/// Request and response types
pub mod types;

/// Signup handler
pub mod signup;

/// Login handler
pub mod login;

/// Logout handler
pub mod logout;

/// Get current user handler
pub mod me;

/// Profile, theme and account deletion handlers
pub mod account;

// Re-export commonly used types
pub use types::{
    AuthResponse, LoginRequest, SignupRequest, UpdateProfileRequest, UpdateThemeRequest, UserResponse,
};

// Re-export handlers
pub use account::{delete_account, update_profile, update_theme};
pub use login::login;
pub use logout::logout;
pub use me::get_me;
pub use signup::signup;

