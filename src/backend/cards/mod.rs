//! Cards Module
//!
//! Card CRUD, bulk reorder inside a column, and moves between columns.

pub mod handlers;
pub mod service;

pub use service::CardService;
