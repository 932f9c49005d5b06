//! Huddle - Main Library
//!
//! Huddle is a small chat server: an Axum HTTP application with cookie
//! sessions, username/password authentication, static file mounts and a
//! WebSocket channel for joining chat rooms.
//!
//! # Module Structure
//!
//! - **`shared`** - Types shared with clients
//!   - Socket event frames
//!   - Input validation rules
//!   - Error types
//!
//! - **`backend`** - Server-side code
//!   - Configuration and startup
//!   - The ordered middleware chain
//!   - Sessions, authentication and route groups
//!   - WebSocket rooms
//!
//! # Usage
//!
//! ```rust,no_run
//! use huddle::backend::server::{create_app, AppConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let app = create_app(AppConfig::from_env()?).await?;
//! // Serve `app` with axum::serve
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! - Custom error types in `shared::error` and `backend::error`
//! - `BackendError` renders itself as a JSON HTTP response

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;
