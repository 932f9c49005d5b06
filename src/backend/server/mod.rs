//! Server Module
//!
//! This module contains the code that initializes and configures the Axum
//! HTTP server.
//!
//! # Architecture
//!
//! - **`config`** - Environment configuration and the database connector
//! - **`state`** - Application state structure and `FromRef` implementations
//! - **`init`** - Server initialization and app creation
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── config.rs       - AppConfig, RunMode, connect_database
//! ├── state.rs        - AppState and FromRef implementations
//! └── init.rs         - create_app and background tasks
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Configuration Loading**: `AppConfig::from_env`
//! 2. **Database**: pool opened and migrated
//! 3. **State Creation**: session store, authenticator, room registry
//! 4. **Background Tasks**: expired-session cleanup
//! 5. **Router Creation**: middleware chain and route groups

/// Server configuration loading
pub mod config;

/// Application state management
pub mod state;

/// Server initialization
pub mod init;

// Re-export commonly used types
pub use config::{AppConfig, ConfigError, RunMode};
pub use init::create_app;
pub use state::AppState;
