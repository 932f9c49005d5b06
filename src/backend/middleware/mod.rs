//! Middleware Module
//!
//! This module contains all HTTP middleware for the backend server. The
//! router applies them in this fixed order:
//!
//! 1. **`body_parser`** - decode URL-encoded and JSON bodies
//! 2. **`method_override`** - honour a `_method` field on POST
//! 3. **`logging`** - development-mode request log
//! 4. **`static_files`** - images directory
//! 5. **`session`** - load and commit the cookie session
//! 6. **`auth`** - resolve the session identity
//! 7. **`locals`** - expose the user to every handler
//! 8. **`static_files`** - general static directory
//!
//! The ordering itself lives in `routes::router`.

pub mod auth;
pub mod body_parser;
pub mod locals;
pub mod logging;
pub mod method_override;
pub mod session;
pub mod static_files;

pub use auth::{resolve_identity, AuthUser, CurrentUser};
pub use body_parser::{parse_body, Input, ParsedBody};
pub use locals::{inject_locals, Locals};
pub use logging::log_requests;
pub use method_override::{override_method, OriginalMethod};
pub use session::attach_session;
pub use static_files::serve_static;
