//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server and wraps
//! them in the middleware chain.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Middleware chain and router assembly
//! ├── api_routes.rs   - /api collection
//! ├── auth_routes.rs  - /auth collection
//! └── chat_routes.rs  - /chat collection
//! ```
//!
//! # Routes
//!
//! - `GET /api`, `GET /api/health`, `GET /api/me`
//! - `POST /auth/signup`, `POST /auth/login`, `GET|DELETE /auth/logout`
//! - `GET /chat`, `GET /chat/rooms/{room}`
//! - `GET /socket` - WebSocket upgrade, outside the middleware chain
//!
//! Anything else falls through the static mounts to a 404 JSON error.

/// Main router creation
pub mod router;

/// API endpoint handlers
pub mod api_routes;

/// Authentication endpoints
pub mod auth_routes;

/// Chat room endpoints
pub mod chat_routes;

// Re-export commonly used functions
pub use router::{create_router, SOCKET_PATH};
