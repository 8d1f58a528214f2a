//! Real-time Board Rooms
//!
//! This module pushes board changes to connected clients. Each board has a
//! room backed by a broadcast channel; services publish a `RealtimeEvent`
//! after every successful mutation and sockets joined to the board forward
//! it as a JSON text frame.
//!
//! # Architecture
//!
//! - **`broadcast`** - Per-board channels, member counts and publishing
//! - **`socket`** - WebSocket endpoint handling join and leave frames
//!
//! # Module Structure
//!
//! ```text
//! realtime/
//! ├── mod.rs          - Module exports and documentation
//! ├── broadcast.rs    - Board rooms and event broadcasting
//! └── socket.rs       - WebSocket handler
//! ```
//!
//! # Event Types
//!
//! Board, column and card mutations (`column-created`, `cards-reordered`,
//! `card-moved`, ...), `board-repaired` after a repair, and `presence` when
//! a member joins or leaves a room.
//!
//! # Example
//!
//! ```rust
//! use taskboard::backend::realtime::BoardRooms;
//! use taskboard::shared::{EventType, RealtimeEvent};
//! use uuid::Uuid;
//!
//! let rooms = BoardRooms::new();
//! let board_id = Uuid::new_v4();
//! let (_receiver, members) = rooms.join(board_id);
//! assert_eq!(members, 1);
//!
//! let event = RealtimeEvent::deleted(EventType::CardDeleted, board_id, Uuid::new_v4());
//! assert_eq!(rooms.publish(event), 1);
//! ```

/// Board rooms and event broadcasting
pub mod broadcast;

/// WebSocket board room handler
pub mod socket;

pub use broadcast::{broadcast_event, BoardRooms, RealtimeEventBroadcast};
pub use socket::handle_board_socket;
