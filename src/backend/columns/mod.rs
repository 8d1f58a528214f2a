//! Columns Module
//!
//! Column CRUD, bulk reorder and single-column moves. Ordering work is
//! delegated to [`Sequencer`](crate::backend::ordering::Sequencer).

pub mod handlers;
pub mod service;

pub use service::ColumnService;
