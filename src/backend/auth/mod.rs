//! Authentication Module
//!
//! This module handles user authentication, registration and login state.
//! Identity is kept in the server-side session rather than in tokens.
//!
//! # Architecture
//!
//! - **`users`** - User data model and database operations
//! - **`strategy`** - `AuthStrategy` trait and the username/password strategy
//! - **`authenticator`** - Strategy registry and session login state
//! - **`handlers`** - HTTP handlers for authentication endpoints
//!
//! # Authentication Flow
//!
//! 1. **Signup**: username and password → user created → logged in on the session
//! 2. **Login**: credentials checked by the `local` strategy → session regenerated → user id stored at `passport.user`
//! 3. **Every request**: the auth middleware resolves `passport.user` back into a `User`
//! 4. **Logout**: session destroyed
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - The session id is regenerated on login
//! - Invalid credentials return 401 (no information leakage)

/// User data model and database operations
pub mod users;

/// Pluggable authentication strategies
pub mod strategy;

/// Strategy registry and session login state
pub mod authenticator;

/// HTTP handlers for authentication endpoints
pub mod handlers;

// Re-export commonly used types and handlers
pub use authenticator::{Authenticator, PassportState, PASSPORT_KEY};
pub use handlers::types::{LoginRequest, SignupRequest, UserResponse};
pub use handlers::{get_me, login, logout, signup};
pub use strategy::{AuthStrategy, Credentials, LocalStrategy};
pub use users::User;
