//! Shared Module
//!
//! Types shared between the server and its clients: the real-time socket
//! frames, input validation rules and the errors they produce. Nothing in
//! here touches the database or the HTTP stack.

/// Real-time socket event frames
pub mod event;

/// Shared error types
pub mod error;

/// Account field validation
pub mod validation;

/// Re-export commonly used types for convenience
pub use error::SharedError;
pub use event::{ClientEvent, ServerEvent, JOIN_GREETING};
