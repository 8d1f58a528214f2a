//! Integration tests
//!
//! HTTP-level tests against the in-memory store

pub mod api;
