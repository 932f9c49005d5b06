/**
 * Authentication Handler Types
 *
 * This module defines the request and response types used by authentication handlers.
 * Requests deserialize from the parsed body, so they accept both JSON and
 * URL-encoded forms.
 */

use serde::{Deserialize, Serialize};

use crate::backend::auth::users::User;

/// Sign up request
#[derive(Deserialize, Serialize, Debug)]
pub struct SignupRequest {
    /// User's chosen username (3-30 chars, alphanumeric + underscore)
    pub username: String,
    /// Name shown to other users; defaults to the username
    #[serde(default)]
    pub display_name: Option<String>,
    /// User's password (will be hashed before storage)
    pub password: String,
}

/// Login request
#[derive(Deserialize, Serialize, Debug)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// User response (without sensitive data)
///
/// This is also the shape of `Locals.user`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserResponse {
    /// User's unique ID (UUID)
    pub id: String,
    pub username: String,
    pub display_name: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            display_name: user.display_name.clone(),
        }
    }
}

/// Body returned by the logout routes
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LogoutResponse {
    pub status: String,
}

impl LogoutResponse {
    pub fn logged_out() -> Self {
        Self {
            status: "logged_out".to_string(),
        }
    }
}
