/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP server,
 * including database loading, state creation and route configuration.
 *
 * # Initialization Process
 *
 * 1. Open the database pool and run migrations
 * 2. Build `AppState` (session store, authenticator, room registry)
 * 3. Start the expired-session cleanup task
 * 4. Create and configure the router
 */

use axum::Router;

use crate::backend::error::BackendError;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::{connect_database, AppConfig};
use crate::backend::server::state::AppState;

/// Create and configure the Axum application
///
/// # Errors
///
/// Fails when the database cannot be opened or migrated. Unlike optional
/// integrations, the database is required: sessions and users live there.
pub async fn create_app(config: AppConfig) -> Result<Router, BackendError> {
    tracing::info!("Initializing huddle server");

    let db = connect_database(&config.database_url).await?;
    let app_state = AppState::new(config, db);

    spawn_session_cleanup(&app_state);

    let app = create_router(app_state);
    tracing::info!("Router configured with periodic session cleanup task");

    Ok(app)
}

/// Purge expired sessions on a fixed interval
///
/// The task lives for the rest of the process.
pub fn spawn_session_cleanup(app_state: &AppState) -> tokio::task::JoinHandle<()> {
    let sessions = app_state.sessions.clone();
    let period = app_state.config.session_cleanup_interval;

    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            match sessions.purge_expired().await {
                Ok(0) => {}
                Ok(purged) => tracing::debug!("Purged {} expired sessions", purged),
                Err(e) => tracing::warn!("Failed to purge expired sessions: {}", e),
            }
        }
    })
}
