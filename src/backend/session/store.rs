/**
 * Session Store
 *
 * Persistence for session records. The trait is object safe so the server
 * state can hold any backend behind `Arc<dyn SessionStore>`; the shipped
 * implementation keeps sessions in the application's SQLite database.
 *
 * # Table
 *
 * ```sql
 * sessions (id TEXT PRIMARY KEY, data TEXT, expires_at INTEGER)
 * ```
 *
 * `expires_at` is a unix timestamp in milliseconds. A record whose expiry is
 * not in the future is treated as absent by `load` and removed by
 * `purge_expired`.
 */

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use thiserror::Error;

use super::data::SessionData;

#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("Session store database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Session data could not be encoded: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Backend that persists session records with an expiry
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load an unexpired session
    async fn load(&self, id: &str) -> Result<Option<SessionData>, SessionStoreError>;

    /// Insert or replace a session
    async fn save(
        &self,
        id: &str,
        data: &SessionData,
        expires_at: DateTime<Utc>,
    ) -> Result<(), SessionStoreError>;

    /// Extend the expiry of a session without rewriting its data
    async fn touch(&self, id: &str, expires_at: DateTime<Utc>) -> Result<(), SessionStoreError>;

    async fn destroy(&self, id: &str) -> Result<(), SessionStoreError>;

    /// Delete every expired record, returning how many were removed
    async fn purge_expired(&self) -> Result<u64, SessionStoreError>;
}

/// Session store backed by the `sessions` table
#[derive(Debug, Clone)]
pub struct SqliteSessionStore {
    pool: SqlitePool,
}

impl SqliteSessionStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for SqliteSessionStore {
    async fn load(&self, id: &str) -> Result<Option<SessionData>, SessionStoreError> {
        let row = sqlx::query_as::<_, (String,)>(
            r#"
            SELECT data
            FROM sessions
            WHERE id = ? AND expires_at > ?
            "#,
        )
        .bind(id)
        .bind(Utc::now().timestamp_millis())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some((data,)) => Ok(Some(serde_json::from_str(&data)?)),
            None => Ok(None),
        }
    }

    async fn save(
        &self,
        id: &str,
        data: &SessionData,
        expires_at: DateTime<Utc>,
    ) -> Result<(), SessionStoreError> {
        let encoded = serde_json::to_string(data)?;

        sqlx::query(
            r#"
            INSERT INTO sessions (id, data, expires_at)
            VALUES (?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET data = excluded.data, expires_at = excluded.expires_at
            "#,
        )
        .bind(id)
        .bind(encoded)
        .bind(expires_at.timestamp_millis())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn touch(&self, id: &str, expires_at: DateTime<Utc>) -> Result<(), SessionStoreError> {
        sqlx::query("UPDATE sessions SET expires_at = ? WHERE id = ?")
            .bind(expires_at.timestamp_millis())
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn destroy(&self, id: &str) -> Result<(), SessionStoreError> {
        sqlx::query("DELETE FROM sessions WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn purge_expired(&self) -> Result<u64, SessionStoreError> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
            .bind(Utc::now().timestamp_millis())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
