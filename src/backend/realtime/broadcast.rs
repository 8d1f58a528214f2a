/**
 * Board Room Broadcasting
 *
 * One `tokio::sync::broadcast` channel per board. Sockets that joined a
 * board subscribe to its channel; services publish an event after every
 * successful mutation. Publishing to a board nobody watches is a no-op.
 */

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::shared::RealtimeEvent;

/// Capacity of each board channel; slow sockets skip what they miss
const ROOM_CAPACITY: usize = 100;

/// Sender side of one board channel
pub type RealtimeEventBroadcast = broadcast::Sender<RealtimeEvent>;

struct Room {
    sender: RealtimeEventBroadcast,
    members: usize,
}

/// Per-board broadcast channels and member counts
#[derive(Clone, Default)]
pub struct BoardRooms {
    rooms: Arc<Mutex<HashMap<Uuid, Room>>>,
}

impl BoardRooms {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter a board room; returns the receiver and the new member count
    pub fn join(&self, board_id: Uuid) -> (broadcast::Receiver<RealtimeEvent>, usize) {
        let mut rooms = self.rooms.lock().unwrap_or_else(PoisonError::into_inner);
        let room = rooms.entry(board_id).or_insert_with(|| Room {
            sender: broadcast::channel(ROOM_CAPACITY).0,
            members: 0,
        });
        room.members += 1;
        (room.sender.subscribe(), room.members)
    }

    /// Leave a board room; returns the remaining member count
    pub fn leave(&self, board_id: Uuid) -> usize {
        let mut rooms = self.rooms.lock().unwrap_or_else(PoisonError::into_inner);
        match rooms.get_mut(&board_id) {
            Some(room) => {
                room.members = room.members.saturating_sub(1);
                room.members
            }
            None => 0,
        }
    }

    /// Broadcast an event to every member of its board
    pub fn publish(&self, event: RealtimeEvent) -> usize {
        let sender = {
            let rooms = self.rooms.lock().unwrap_or_else(PoisonError::into_inner);
            rooms.get(&event.board_id).map(|room| room.sender.clone())
        };
        match sender {
            Some(sender) => broadcast_event(&sender, event),
            None => 0,
        }
    }

    /// Current member count of a board room
    pub fn member_count(&self, board_id: Uuid) -> usize {
        let rooms = self.rooms.lock().unwrap_or_else(PoisonError::into_inner);
        rooms.get(&board_id).map_or(0, |room| room.members)
    }

    /// Drop rooms with no members and no receivers; returns how many were removed
    pub fn cleanup_inactive_channels(&self) -> usize {
        let mut rooms = self.rooms.lock().unwrap_or_else(PoisonError::into_inner);
        let before = rooms.len();
        rooms.retain(|_, room| room.members > 0 || room.sender.receiver_count() > 0);
        before - rooms.len()
    }
}

/// Broadcast a real-time event to all subscribers of one channel
///
/// # Returns
///
/// Number of active subscribers that received the event (0 if no subscribers)
pub fn broadcast_event(broadcast_tx: &RealtimeEventBroadcast, event: RealtimeEvent) -> usize {
    match broadcast_tx.send(event) {
        Ok(subscriber_count) => {
            tracing::debug!("[Realtime] Event broadcast to {} subscribers", subscriber_count);
            subscriber_count
        }
        Err(e) => {
            // No subscribers, that's okay
            tracing::debug!("[Realtime] No subscribers to receive event: {:?}", e.0.event_type);
            0
        }
    }
}
