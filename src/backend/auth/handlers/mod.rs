//! Authentication Handlers Module
//!
//! This module contains all HTTP handlers for authentication endpoints.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Module exports and documentation
//! ├── types.rs    - Request and response types
//! ├── signup.rs   - User registration handler
//! ├── login.rs    - Login and logout handlers
//! └── me.rs       - Get current user handler
//! ```
//!
//! # Handlers
//!
//! - **`signup`** - POST /auth/signup - User registration
//! - **`login`** - POST /auth/login - User authentication
//! - **`logout`** - GET/DELETE /auth/logout - End the session
//! - **`get_me`** - GET /api/me - Get current user info

/// Request and response types
pub mod types;

/// Signup handler
pub mod signup;

/// Login and logout handlers
pub mod login;

/// Get current user handler
pub mod me;

// Re-export commonly used types
pub use types::{LoginRequest, LogoutResponse, SignupRequest, UserResponse};

// Re-export handlers
pub use login::{login, logout};
pub use me::get_me;
pub use signup::signup;
