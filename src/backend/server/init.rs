/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP server,
 * including store selection, state creation, route configuration and the
 * periodic cleanup task.
 */

use axum::Router;
use std::time::Duration;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::load_store;
use crate::backend::server::state::AppState;
use crate::shared::AppConfig;

/// Interval of the background sweep over rooms, idle locks and expired sessions
const CLEANUP_INTERVAL: Duration = Duration::from_secs(300);

/// Create and configure the Axum application
///
/// # Initialization Steps
///
/// 1. **Load Store**: Postgres if configured and reachable, in-memory otherwise
/// 2. **Create State**: Shared store, group locks and board rooms
/// 3. **Create Router**: Configures all routes and middleware
/// 4. **Start Cleanup**: Periodically drops empty rooms, idle locks and expired sessions
pub async fn create_app(config: AppConfig) -> Router<()> {
    tracing::info!("Initializing taskboard backend server");
    if config.uses_dev_secret() {
        tracing::warn!("JWT_SECRET not set; using the development secret");
    }

    let store = load_store(&config).await;
    let app_state = AppState::new(config, store);

    let app = create_router(app_state.clone());
    spawn_cleanup_task(app_state);

    tracing::info!("Router configured with periodic cleanup task");
    app
}

/// Start periodic cleanup of board rooms, group locks and expired sessions
pub fn spawn_cleanup_task(app_state: AppState) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(CLEANUP_INTERVAL);
        loop {
            interval.tick().await;
            let rooms = app_state.rooms.cleanup_inactive_channels();
            let locks = app_state.locks.sweep_idle();
            tracing::debug!("Cleaned up {} empty board rooms and {} idle group locks", rooms, locks);

            match app_state.store.purge_expired_sessions(chrono::Utc::now()).await {
                Ok(0) => {}
                Ok(sessions) => tracing::info!("Purged {} expired sessions", sessions),
                Err(e) => tracing::error!("Failed to purge expired sessions: {:?}", e),
            }
        }
    })
}
