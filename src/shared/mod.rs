//! Shared Module
//!
//! This module contains types and data structures that are shared between
//! the HTTP layer, the services and the realtime channel. These types are
//! used for serialization over the REST API and the board-room WebSocket.
//!
//! # Overview
//!
//! The shared module provides transport-agnostic types with no dependency on
//! the server runtime, so a client crate can reuse them as-is.

/// Board, column and card records plus request payloads
pub mod kanban;

/// Board room event system
pub mod event;

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use event::{EventType, RealtimeEvent};
pub use error::SharedError;
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
pub use kanban::{ApiResponse, Board, Card, Column, OrderAssignment, OrderSlot, Priority};
