/**
 * Board Room Socket
 *
 * WebSocket endpoint clients use to follow boards live.
 *
 * # Protocol
 *
 * The client connects to `/ws?token=<jwt>` and sends JSON frames:
 *
 * ```json
 * {"type": "join-board", "boardId": "..."}
 * {"type": "leave-board", "boardId": "..."}
 * ```
 *
 * After a successful join the socket receives every event published on that
 * board as a JSON text frame, and each member receives a `presence` frame
 * whenever someone joins or leaves. Frames the server cannot honor are
 * answered with `{"type": "error", "message": "..."}`.
 *
 * # Tasks
 *
 * A connection runs one writer task draining an mpsc outbox into the socket
 * and one forwarding task per joined board. Forwarders are aborted on leave
 * and on disconnect.
 */

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::Response;
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use std::collections::HashMap;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::backend::auth::sessions::authenticate;
use crate::backend::boards::guard::owned_board;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::shared::RealtimeEvent;

/// Frames buffered per connection before forwarders wait on the writer
const OUTBOX_CAPACITY: usize = 64;

/// Query string of the upgrade request
#[derive(Debug, Deserialize)]
pub struct SocketQuery {
    pub token: Option<String>,
}

/// Frames a client may send
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientFrame {
    JoinBoard {
        #[serde(rename = "boardId")]
        board_id: Uuid,
    },
    LeaveBoard {
        #[serde(rename = "boardId")]
        board_id: Uuid,
    },
}

/// Upgrade to a board room socket
///
/// The token is checked before the upgrade so an unauthenticated client gets
/// a plain 401 instead of a socket that closes immediately.
///
/// # Errors
///
/// - `401 Unauthorized` - Missing, invalid or expired token, or a closed session
pub async fn handle_board_socket(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    Query(query): Query<SocketQuery>,
) -> Result<Response, BackendError> {
    let token = query
        .token
        .ok_or_else(|| BackendError::unauthorized("Missing token"))?;
    let user_id = authenticate(state.store.as_ref(), &state.config, &token).await?.user_id;

    tracing::info!("[Realtime] Socket upgrade for user {}", user_id);
    Ok(ws.on_upgrade(move |socket| run_socket(socket, state, user_id)))
}

async fn run_socket(socket: WebSocket, state: AppState, user_id: Uuid) {
    let (mut sink, mut stream) = socket.split();
    let (outbox, mut outgoing) = mpsc::channel::<String>(OUTBOX_CAPACITY);

    let writer = tokio::spawn(async move {
        while let Some(text) = outgoing.recv().await {
            if sink.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    let mut joined: HashMap<Uuid, JoinHandle<()>> = HashMap::new();

    while let Some(Ok(message)) = stream.next().await {
        match message {
            Message::Text(text) => match serde_json::from_str::<ClientFrame>(text.as_str()) {
                Ok(frame) => handle_frame(&state, user_id, frame, &outbox, &mut joined).await,
                Err(e) => {
                    tracing::debug!("[Realtime] Malformed frame from {}: {}", user_id, e);
                    send_error(&outbox, "Malformed frame").await;
                }
            },
            Message::Close(_) => break,
            _ => {}
        }
    }

    for (board_id, forwarder) in joined.drain() {
        forwarder.abort();
        leave_room(&state, board_id, user_id);
    }
    writer.abort();
    tracing::info!("[Realtime] Socket closed for user {}", user_id);
}

async fn handle_frame(
    state: &AppState,
    user_id: Uuid,
    frame: ClientFrame,
    outbox: &mpsc::Sender<String>,
    joined: &mut HashMap<Uuid, JoinHandle<()>>,
) {
    match frame {
        ClientFrame::JoinBoard { board_id } => {
            if joined.contains_key(&board_id) {
                return;
            }
            if let Err(e) = owned_board(state.store.as_ref(), board_id, user_id).await {
                send_error(outbox, &e.message()).await;
                return;
            }

            let (receiver, members) = state.rooms.join(board_id);
            joined.insert(board_id, forward_room(receiver, outbox.clone()));
            tracing::info!("[Realtime] User {} joined board {} ({} members)", user_id, board_id, members);
            state
                .rooms
                .publish(RealtimeEvent::presence(board_id, user_id, true, members));
        }
        ClientFrame::LeaveBoard { board_id } => {
            if let Some(forwarder) = joined.remove(&board_id) {
                forwarder.abort();
                leave_room(state, board_id, user_id);
            }
        }
    }
}

fn leave_room(state: &AppState, board_id: Uuid, user_id: Uuid) {
    let members = state.rooms.leave(board_id);
    tracing::info!("[Realtime] User {} left board {} ({} members)", user_id, board_id, members);
    state
        .rooms
        .publish(RealtimeEvent::presence(board_id, user_id, false, members));
}

/// Copy one board's events into the connection outbox
fn forward_room(
    mut receiver: broadcast::Receiver<RealtimeEvent>,
    outbox: mpsc::Sender<String>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    let text = match serde_json::to_string(&event) {
                        Ok(text) => text,
                        Err(e) => {
                            tracing::error!("[Realtime] Failed to serialize event: {:?}", e);
                            continue;
                        }
                    };
                    if outbox.send(text).await.is_err() {
                        return;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("[Realtime] Receiver lagged, skipped {} events", skipped);
                }
                Err(RecvError::Closed) => return,
            }
        }
    })
}

async fn send_error(outbox: &mpsc::Sender<String>, message: &str) {
    let frame = serde_json::json!({ "type": "error", "message": message });
    let _ = outbox.send(frame.to_string()).await;
}
