//! Common test utilities and helpers
//!
//! This module provides shared utilities for all tests including:
//! - An application built on an in-memory database and temporary static dirs
//! - Request builders and a buffered response type
//! - User fixtures

pub mod requests;

// Re-export commonly used utilities
pub use app::*;
pub use auth_helpers::*;
pub use requests::*;
