//! Backend Error Module
//!
//! This module defines error types specific to the backend server.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - IntoResponse implementation
//! ```
//!
//! Every handler and middleware returns `Result<_, BackendError>`; the
//! conversion renders the error as `{"error": ..., "status": ...}` JSON.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::BackendError;
