//! Shared Error Types
//!
//! Errors produced while checking data that comes from clients: account
//! fields submitted over HTTP and frames received on the socket.
//!
//! ```rust
//! use huddle::shared::error::SharedError;
//!
//! let error = SharedError::validation("username", "Username cannot be empty");
//! assert_eq!(error.field(), Some("username"));
//! ```
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// A socket frame that is not a known event
    #[error("Invalid frame: {message}")]
    InvalidFrame { message: String },

    /// A submitted field that breaks an account rule
    #[error("Invalid {field}: {message}")]
    ValidationError {
        field: &'static str,
        message: String,
    },
}

impl SharedError {
    pub fn invalid_frame(message: impl Into<String>) -> Self {
        Self::InvalidFrame {
            message: message.into(),
        }
    }

    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field,
            message: message.into(),
        }
    }

    /// The offending field, for validation errors
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::ValidationError { field, .. } => Some(field),
            Self::InvalidFrame { .. } => None,
        }
    }
}

impl From<serde_json::Error> for SharedError {
    fn from(err: serde_json::Error) -> Self {
        Self::invalid_frame(err.to_string())
    }
}
