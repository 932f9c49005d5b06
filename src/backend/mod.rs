//! Backend Module
//!
//! This module contains all server-side code for huddle: an Axum HTTP
//! server with cookie sessions, pluggable authentication, static file
//! mounts and a WebSocket room channel.
//!
//! # Architecture
//!
//! The backend is organized into focused submodules:
//!
//! - **`server`** - Configuration, application state, initialization
//! - **`routes`** - Middleware chain and route groups
//! - **`middleware`** - Request processing steps
//! - **`session`** - Session handle and persistence
//! - **`auth`** - Users, strategies and authentication handlers
//! - **`realtime`** - WebSocket rooms
//! - **`error`** - Backend-specific error types
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Binary entry point
//! ├── server/         - Configuration, state and initialization
//! ├── routes/         - Router assembly
//! ├── middleware/     - Request middleware
//! ├── session/        - Sessions
//! ├── auth/           - Authentication
//! ├── realtime/       - WebSocket rooms
//! └── error/          - Error types
//! ```
//!
//! # State Management
//!
//! `AppState` is built once at startup from an explicit `AppConfig` and
//! passed to middleware and handlers through Axum's `State`/`FromRef`.
//!
//! # Example
//!
//! ```rust,no_run
//! use huddle::backend::server::{create_app, AppConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::from_env()?;
//! let app = create_app(config).await?;
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3001").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Middleware for request processing
pub mod middleware;

/// Server-side sessions
pub mod session;

/// Authentication and user management
pub mod auth;

/// Real-time room channel
pub mod realtime;

/// Backend error types
pub mod error;

/// Re-export commonly used types
pub use error::BackendError;
pub use server::{create_app, AppConfig, AppState};
