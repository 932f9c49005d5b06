/**
 * Session Data and Handle
 *
 * `SessionData` is the JSON object persisted for a session. `Session` is the
 * per-request handle placed in the request extensions by the session
 * middleware; handlers read and mutate it, and the middleware inspects its
 * final state once the response has been produced.
 *
 * # Lifecycle
 *
 * A handle starts `Unchanged`. Writes mark it `Modified`; `regenerate`
 * keeps the data but asks for a fresh id; `destroy` drops the data and the
 * record. Writing to a destroyed session turns it into a regenerated one so
 * that the old id is never reused.
 */

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::sync::Mutex;

use crate::backend::error::BackendError;

/// JSON object stored for one session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionData(Map<String, Value>);

impl SessionData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

/// What the middleware has to do with the session after the handler ran
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Unchanged,
    Modified,
    Regenerated,
    Destroyed,
}

#[derive(Debug)]
struct SessionInner {
    id: Option<String>,
    data: SessionData,
    status: SessionStatus,
}

impl SessionInner {
    fn mark_modified(&mut self) {
        self.status = match self.status {
            SessionStatus::Unchanged => SessionStatus::Modified,
            SessionStatus::Destroyed => SessionStatus::Regenerated,
            other => other,
        };
    }
}

/// Final state of a session handle, consumed by the middleware
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    /// Id the request arrived with, if its record was found
    pub id: Option<String>,
    pub data: SessionData,
    pub status: SessionStatus,
}

/// Per-request session handle
///
/// Cloning the handle shares the same underlying session.
#[derive(Debug, Clone)]
pub struct Session {
    inner: Arc<Mutex<SessionInner>>,
}

impl Session {
    /// A handle for a session loaded from the store
    pub fn existing(id: String, data: SessionData) -> Self {
        Self::build(Some(id), data)
    }

    /// A handle for a request that carried no valid session
    pub fn fresh() -> Self {
        Self::build(None, SessionData::new())
    }

    fn build(id: Option<String>, data: SessionData) -> Self {
        Self {
            inner: Arc::new(Mutex::new(SessionInner {
                id,
                data,
                status: SessionStatus::Unchanged,
            })),
        }
    }

    /// The stored id of this session, `None` until it has been persisted
    pub async fn id(&self) -> Option<String> {
        self.inner.lock().await.id.clone()
    }

    pub async fn get_value(&self, key: &str) -> Option<Value> {
        self.inner.lock().await.data.get(key).cloned()
    }

    /// Read a typed value; values that fail to deserialize read as `None`
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.get_value(key)
            .await
            .and_then(|value| serde_json::from_value(value).ok())
    }

    pub async fn insert<T: Serialize>(&self, key: &str, value: T) -> Result<(), serde_json::Error> {
        let value = serde_json::to_value(value)?;
        let mut inner = self.inner.lock().await;
        inner.data.insert(key, value);
        inner.mark_modified();
        Ok(())
    }

    pub async fn remove(&self, key: &str) -> Option<Value> {
        let mut inner = self.inner.lock().await;
        let removed = inner.data.remove(key);
        if removed.is_some() {
            inner.mark_modified();
        }
        removed
    }

    /// Keep the data but move it to a new id, destroying the old record
    pub async fn regenerate(&self) {
        self.inner.lock().await.status = SessionStatus::Regenerated;
    }

    /// Drop all data and delete the stored record
    pub async fn destroy(&self) {
        let mut inner = self.inner.lock().await;
        inner.data.clear();
        inner.status = SessionStatus::Destroyed;
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.data.is_empty()
    }

    pub async fn status(&self) -> SessionStatus {
        self.inner.lock().await.status
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        let inner = self.inner.lock().await;
        SessionSnapshot {
            id: inner.id.clone(),
            data: inner.data.clone(),
            status: inner.status,
        }
    }
}

impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<Session>().cloned().ok_or_else(|| {
            tracing::error!("Session requested on a route outside the session layer");
            BackendError::handler(
                axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                "Session unavailable",
            )
        })
    }
}
