//! Common test utilities and helpers
//!
//! This module provides shared utilities for all tests including:
//! - An in-memory test server
//! - Authentication test helpers
//! - Board, column and card fixtures over the REST API
//! - Custom assertion macros

pub mod assertions;
pub mod auth_helpers;
pub mod board_helpers;

pub use auth_helpers::*;
pub use board_helpers::*;
