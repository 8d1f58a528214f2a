/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * The `AppState` struct serves as the central state container for the
 * application, holding:
 * - The validated configuration
 * - The store (Postgres or in-memory) behind `Arc<dyn Store>`
 * - The per-group locks shared by every service
 * - The board rooms that receive realtime events
 *
 * # State Extraction
 *
 * The `FromRef` implementations allow Axum handlers to extract a service or
 * a single component without needing the entire `AppState`:
 *
 * ```rust
 * use axum::extract::State;
 * use taskboard::backend::columns::ColumnService;
 *
 * async fn handler(State(columns): State<ColumnService>) {
 *     // ...
 * }
 * ```
 */

use axum::extract::FromRef;
use std::sync::Arc;

use crate::backend::boards::BoardService;
use crate::backend::cards::CardService;
use crate::backend::columns::ColumnService;
use crate::backend::ordering::GroupLocks;
use crate::backend::realtime::BoardRooms;
use crate::backend::store::Store;
use crate::shared::AppConfig;

/// Application state shared by every handler
///
/// Cloning is cheap: every field is reference counted.
#[derive(Clone)]
pub struct AppState {
    /// Validated configuration (token secret and lifetime, CORS origins)
    pub config: Arc<AppConfig>,

    /// Persistence port
    ///
    /// `PgStore` when a database is configured and reachable, `MemoryStore`
    /// otherwise.
    pub store: Arc<dyn Store>,

    /// One async mutex per sibling group, shared by all services so that
    /// every request renumbering a group waits for the others
    pub locks: GroupLocks,

    /// Per-board broadcast channels
    pub rooms: BoardRooms,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn Store>) -> Self {
        Self {
            config: Arc::new(config),
            store,
            locks: GroupLocks::new(),
            rooms: BoardRooms::new(),
        }
    }
}

impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}

impl FromRef<AppState> for Arc<dyn Store> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.store.clone()
    }
}

impl FromRef<AppState> for BoardRooms {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.rooms.clone()
    }
}

/// Implement FromRef for BoardService
///
/// Services are assembled per request from the shared store, locks and rooms.
impl FromRef<AppState> for BoardService {
    fn from_ref(app_state: &AppState) -> Self {
        BoardService::new(
            app_state.store.clone(),
            app_state.locks.clone(),
            app_state.rooms.clone(),
        )
    }
}

impl FromRef<AppState> for ColumnService {
    fn from_ref(app_state: &AppState) -> Self {
        ColumnService::new(
            app_state.store.clone(),
            app_state.locks.clone(),
            app_state.rooms.clone(),
        )
    }
}

impl FromRef<AppState> for CardService {
    fn from_ref(app_state: &AppState) -> Self {
        CardService::new(
            app_state.store.clone(),
            app_state.locks.clone(),
            app_state.rooms.clone(),
        )
    }
}
