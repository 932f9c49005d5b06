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
 * - The startup configuration
 * - The database connection pool
 * - The session store and the cookie signing key
 * - The authenticator (strategy registry)
 * - The room registry shared by all socket connections
 *
 * Everything is built once at startup and handed to components explicitly;
 * there are no process-wide globals.
 *
 * # Thread Safety
 *
 * - `SqlitePool` is a cheaply cloneable handle to a thread-safe pool
 * - services are behind `Arc` and are `Send + Sync`
 * - `RoomRegistry` guards its map with a `tokio::sync::RwLock`
 *
 * # State Extraction
 *
 * The `FromRef` implementations allow Axum handlers to extract specific
 * parts of the state without needing the entire `AppState`.
 *
 * ```rust,ignore
 * async fn handler(State(pool): State<SqlitePool>) {
 *     // ...
 * }
 * ```
 */

use std::sync::Arc;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use sqlx::SqlitePool;

use crate::backend::auth::authenticator::Authenticator;
use crate::backend::realtime::rooms::RoomRegistry;
use crate::backend::server::config::{AppConfig, RunMode};
use crate::backend::session::{session_key, SessionStore, SqliteSessionStore};

/// Application state shared by every handler and middleware
#[derive(Clone)]
pub struct AppState {
    /// Startup configuration
    pub config: Arc<AppConfig>,

    /// Database connection pool
    pub db: SqlitePool,

    /// Session persistence
    pub sessions: Arc<dyn SessionStore>,

    /// Key signing the session cookie, derived from `SESSION_SECRET`
    pub session_key: Key,

    /// Authentication strategy registry
    pub authenticator: Arc<Authenticator>,

    /// Room membership of socket connections
    pub rooms: Arc<RoomRegistry>,
}

impl AppState {
    /// Assemble the state around an open pool
    ///
    /// Sessions live in the same database, and the `local` strategy is
    /// registered on the authenticator.
    pub fn new(config: AppConfig, db: SqlitePool) -> Self {
        let session_key = session_key(&config.session_secret);
        Self {
            sessions: Arc::new(SqliteSessionStore::new(db.clone())),
            authenticator: Arc::new(Authenticator::with_local_strategy(db.clone())),
            rooms: Arc::new(RoomRegistry::new()),
            config: Arc::new(config),
            db,
            session_key,
        }
    }
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db.clone()
    }
}

impl FromRef<AppState> for Arc<Authenticator> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.authenticator.clone()
    }
}

impl FromRef<AppState> for Arc<RoomRegistry> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.rooms.clone()
    }
}

impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}

impl FromRef<AppState> for RunMode {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.run_mode.clone()
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.session_key.clone()
    }
}
