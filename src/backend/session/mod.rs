//! Session Module
//!
//! Server-side sessions identified by a signed cookie.
//!
//! # Module Structure
//!
//! ```text
//! session/
//! ├── mod.rs   - Cookie name, signing key derivation, re-exports
//! ├── data.rs  - SessionData and the per-request Session handle
//! └── store.rs - SessionStore trait and the SQLite implementation
//! ```
//!
//! The middleware that loads and saves sessions around each request lives in
//! `backend::middleware::session`.

/// Session data and per-request handle
pub mod data;

/// Session persistence
pub mod store;

use axum_extra::extract::cookie::Key;
use sha2::{Digest, Sha512};

pub use data::{Session, SessionData, SessionSnapshot, SessionStatus};
pub use store::{SessionStore, SessionStoreError, SqliteSessionStore};

/// Name of the cookie carrying the session id
pub const SESSION_COOKIE: &str = "huddle.sid";

/// Derive the cookie signing key from the configured secret
///
/// Secrets of any length are stretched to the 64 bytes the signing key
/// requires.
pub fn session_key(secret: &str) -> Key {
    let digest = Sha512::digest(secret.as_bytes());
    Key::from(digest.as_slice())
}

/// Generate a new random session id
pub fn new_session_id() -> String {
    format!(
        "{}{}",
        uuid::Uuid::new_v4().simple(),
        uuid::Uuid::new_v4().simple()
    )
}
