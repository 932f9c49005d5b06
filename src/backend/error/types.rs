/**
 * Backend Error Types
 *
 * This module defines error types specific to the backend server.
 * These errors are used in HTTP handlers and middleware and can be
 * converted to HTTP responses.
 *
 * # Error Categories
 *
 * ## Handler Errors
 *
 * Handler errors occur when processing HTTP requests:
 * - Malformed request bodies
 * - Authentication failures
 * - Missing resources
 *
 * ## Infrastructure Errors
 *
 * Infrastructure errors come from the pieces the server is built on:
 * - Database queries and migrations
 * - The session store
 * - Password hashing
 * - Startup configuration
 *
 * Infrastructure errors are logged in full but rendered to clients as a
 * generic message so that internals never leak into responses.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::server::config::ConfigError;
use crate::backend::session::SessionStoreError;
use crate::shared::SharedError;

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use huddle::backend::error::BackendError;
/// use axum::http::StatusCode;
///
/// let err = BackendError::handler(StatusCode::BAD_REQUEST, "Invalid request");
/// assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Handler error (e.g., malformed body, bad credentials)
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Client input rejected by the shared validation rules
    #[error(transparent)]
    SharedError(#[from] SharedError),

    /// Database query error
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    /// Schema migration error
    #[error("Migration error: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    /// Session store error
    #[error(transparent)]
    SessionError(#[from] SessionStoreError),

    /// Password hashing error
    #[error("Password hashing error: {0}")]
    PasswordError(#[from] bcrypt::BcryptError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Startup configuration error
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
}

impl BackendError {
    /// Create a new handler error with a status code
    ///
    /// # Arguments
    ///
    /// * `status` - HTTP status code
    /// * `message` - Error message
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    /// Shorthand for a 401 handler error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::UNAUTHORIZED, message)
    }

    /// Shorthand for a 404 handler error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::NOT_FOUND, message)
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `HandlerError` - Uses the status code from the error
    /// - `SharedError` - 400 Bad Request
    /// - everything else - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::SharedError(_) => StatusCode::BAD_REQUEST,
            Self::DatabaseError(_)
            | Self::MigrationError(_)
            | Self::SessionError(_)
            | Self::PasswordError(_)
            | Self::SerializationError(_)
            | Self::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the client-facing error message
    ///
    /// Handler and validation errors are returned verbatim. Infrastructure
    /// errors collapse to "Internal server error".
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::SharedError(
                SharedError::ValidationError { message, .. } | SharedError::InvalidFrame { message },
            ) => message.clone(),
            _ => "Internal server error".to_string(),
        }
    }
}
