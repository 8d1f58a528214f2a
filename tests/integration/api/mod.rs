//! API integration tests
//!
//! Integration tests for all API endpoints

mod auth_test;
mod boards_test;
mod cards_test;
mod columns_test;
mod users_test;
