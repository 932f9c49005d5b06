/**
 * Authenticator
 *
 * Registry of authentication strategies plus the glue between a verified
 * user and the session.
 *
 * # Session Layout
 *
 * A logged-in session stores the serialized user id under
 * `passport.user`:
 *
 * ```json
 * { "passport": { "user": "123e4567-e89b-12d3-a456-426614174000" } }
 * ```
 *
 * Each request resolves that id back to a `User` through
 * [`Authenticator::deserialize_user`]; a dangling id resolves to nobody.
 */

use std::collections::HashMap;
use std::sync::Arc;

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::auth::strategy::{AuthStrategy, Credentials, LocalStrategy};
use crate::backend::auth::users::{get_user_by_id, User};
use crate::backend::error::BackendError;
use crate::backend::session::Session;

/// Session key holding the login state
pub const PASSPORT_KEY: &str = "passport";

/// Login state stored in the session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassportState {
    pub user: String,
}

pub struct Authenticator {
    pool: SqlitePool,
    strategies: HashMap<&'static str, Arc<dyn AuthStrategy>>,
}

impl Authenticator {
    /// An authenticator with no strategies registered
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            strategies: HashMap::new(),
        }
    }

    /// An authenticator with the username/password strategy registered
    pub fn with_local_strategy(pool: SqlitePool) -> Self {
        let mut authenticator = Self::new(pool.clone());
        authenticator.use_strategy(LocalStrategy::new(pool));
        authenticator
    }

    /// Register a strategy under its own name, replacing any previous one
    pub fn use_strategy<S>(&mut self, strategy: S)
    where
        S: AuthStrategy + 'static,
    {
        let name = strategy.name();
        tracing::debug!("Registering authentication strategy: {}", name);
        self.strategies.insert(name, Arc::new(strategy));
    }

    pub fn has_strategy(&self, name: &str) -> bool {
        self.strategies.contains_key(name)
    }

    /// Run the named strategy against the credentials
    pub async fn authenticate(
        &self,
        strategy: &str,
        credentials: &Credentials,
    ) -> Result<Option<User>, BackendError> {
        let strategy = self.strategies.get(strategy).ok_or_else(|| {
            tracing::error!("Unknown authentication strategy: {}", strategy);
            BackendError::handler(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Unknown authentication strategy: {}", strategy),
            )
        })?;
        strategy.authenticate(credentials).await
    }

    /// The value stored in the session for a user
    pub fn serialize_user(&self, user: &User) -> String {
        user.id.to_string()
    }

    /// Resolve a stored session value back into a user
    ///
    /// Unparsable ids and ids of deleted users resolve to `None`.
    pub async fn deserialize_user(&self, serialized: &str) -> Result<Option<User>, BackendError> {
        let Ok(id) = Uuid::parse_str(serialized) else {
            tracing::warn!("Malformed user id in session: {}", serialized);
            return Ok(None);
        };
        Ok(get_user_by_id(&self.pool, id).await?)
    }

    /// Establish a login on the session
    ///
    /// The session is regenerated first so a pre-login session id is never
    /// promoted to an authenticated one.
    pub async fn login(&self, session: &Session, user: &User) -> Result<(), BackendError> {
        session.regenerate().await;
        session
            .insert(
                PASSPORT_KEY,
                PassportState {
                    user: self.serialize_user(user),
                },
            )
            .await?;
        tracing::info!("User logged in: {}", user.username);
        Ok(())
    }

    /// Drop the login and the session with it
    pub async fn logout(&self, session: &Session) {
        session.destroy().await;
    }

    /// The serialized user id stored in the session, if any
    pub async fn session_user(&self, session: &Session) -> Option<String> {
        session
            .get::<PassportState>(PASSPORT_KEY)
            .await
            .map(|passport| passport.user)
    }
}
