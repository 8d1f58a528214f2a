//! Reordering payloads shared by columns and cards

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One `{id, order}` pair of a reorder request
///
/// The order is a placement hint. The server re-derives a dense sequence from
/// the hints instead of storing them verbatim.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderAssignment {
    pub id: Uuid,
    pub order: i32,
}

impl OrderAssignment {
    pub fn new(id: Uuid, order: i32) -> Self {
        Self { id, order }
    }
}

/// Position of one member of a sibling group
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderSlot {
    pub id: Uuid,
    pub order: i32,
}

/// Result of a repair pass over a board
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RepairReport {
    /// Number of sibling groups inspected
    pub groups: usize,
    /// Number of rows whose order was rewritten
    pub rows_updated: u64,
}
