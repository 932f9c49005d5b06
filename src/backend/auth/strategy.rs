/**
 * Authentication Strategies
 *
 * A strategy turns submitted credentials into a user. Strategies are
 * registered by name on the [`Authenticator`](super::authenticator::Authenticator)
 * so that routes can ask for "local" (or any other registered scheme)
 * without knowing how it verifies.
 *
 * # Local Strategy
 *
 * The only strategy shipped is the conventional username/password check:
 *
 * 1. Look up user by username
 * 2. Verify password using bcrypt
 *
 * An unknown username and a wrong password are indistinguishable to the
 * caller; both yield `Ok(None)`.
 */

use async_trait::async_trait;
use bcrypt::verify;
use sqlx::SqlitePool;

use crate::backend::auth::users::{get_user_by_username, User};
use crate::backend::error::BackendError;

/// Credentials submitted to a strategy
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// A named way of verifying a user's identity
#[async_trait]
pub trait AuthStrategy: Send + Sync {
    /// Registry name of the strategy
    fn name(&self) -> &'static str;

    /// Verify the credentials
    ///
    /// Returns `Ok(None)` when the credentials are rejected and `Err` only
    /// for infrastructure failures.
    async fn authenticate(&self, credentials: &Credentials) -> Result<Option<User>, BackendError>;
}

/// Username and password checked against the users table
#[derive(Debug, Clone)]
pub struct LocalStrategy {
    pool: SqlitePool,
}

impl LocalStrategy {
    pub const NAME: &'static str = "local";

    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthStrategy for LocalStrategy {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn authenticate(&self, credentials: &Credentials) -> Result<Option<User>, BackendError> {
        let Some(user) = get_user_by_username(&self.pool, &credentials.username).await? else {
            tracing::warn!("User not found: {}", credentials.username);
            return Ok(None);
        };

        if !verify(&credentials.password, &user.password_hash)? {
            tracing::warn!("Invalid password for user: {}", credentials.username);
            return Ok(None);
        }

        Ok(Some(user))
    }
}
