/**
 * Board Room Event System
 *
 * This module defines the events pushed to the WebSocket clients that joined
 * a board room. Every successful mutation of a board, its columns or its
 * cards produces one event for that board.
 */
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Type of board room event
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum EventType {
    BoardUpdated,
    BoardDeleted,
    BoardRepaired,
    ColumnCreated,
    ColumnUpdated,
    ColumnDeleted,
    ColumnsReordered,
    CardCreated,
    CardUpdated,
    CardDeleted,
    CardsReordered,
    CardMoved,
    /// Room membership changed
    Presence,
}

/// Event broadcast to every member of a board room
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RealtimeEvent {
    /// Type of event
    #[serde(rename = "type")]
    pub event_type: EventType,
    /// Board the event belongs to
    pub board_id: Uuid,
    /// Event payload (the affected entity or entities)
    pub payload: serde_json::Value,
    /// RFC3339 timestamp of when the event occurred
    pub timestamp: String,
}

impl RealtimeEvent {
    /// Create a new board room event
    pub fn new(event_type: EventType, board_id: Uuid, payload: serde_json::Value) -> Self {
        Self {
            event_type,
            board_id,
            payload,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Create an event whose payload is a serializable entity
    ///
    /// Serialization of the board types cannot fail; should it ever, the
    /// payload degrades to `null` rather than dropping the event.
    pub fn of<T: Serialize>(event_type: EventType, board_id: Uuid, entity: &T) -> Self {
        let payload = serde_json::to_value(entity).unwrap_or(serde_json::Value::Null);
        Self::new(event_type, board_id, payload)
    }

    /// Create a presence event carrying the current member count
    pub fn presence(board_id: Uuid, user_id: Uuid, joined: bool, members: usize) -> Self {
        Self::new(
            EventType::Presence,
            board_id,
            serde_json::json!({
                "userId": user_id,
                "joined": joined,
                "members": members,
            }),
        )
    }

    /// Create a deletion event carrying only the removed id
    pub fn deleted(event_type: EventType, board_id: Uuid, id: Uuid) -> Self {
        Self::new(event_type, board_id, serde_json::json!({ "id": id }))
    }
}
