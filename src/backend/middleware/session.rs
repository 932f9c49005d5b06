/**
 * Session Middleware
 *
 * Loads the session named by the signed `huddle.sid` cookie, places a
 * [`Session`] handle in the request extensions, and after the rest of the
 * chain has produced a response decides what to persist.
 *
 * # Commit Rules
 *
 * | Handle state | Store | Cookie |
 * |---|---|---|
 * | unchanged, loaded from store | expiry extended | untouched |
 * | unchanged, fresh | nothing | none |
 * | modified, non-empty | saved | set |
 * | modified, now empty | record deleted | cleared |
 * | regenerated | old record deleted, data saved under a new id | set |
 * | destroyed | record deleted | cleared |
 *
 * A fresh session that is never written is never stored, so anonymous
 * traffic gets no cookie. A cookie whose signature does not verify is
 * treated as absent.
 */

use std::time::Duration;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, SameSite, SignedCookieJar};
use chrono::{DateTime, Utc};

use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::backend::session::{
    new_session_id, Session, SessionSnapshot, SessionStatus, SessionStore, SESSION_COOKIE,
};

pub async fn attach_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let jar = SignedCookieJar::from_headers(request.headers(), state.session_key.clone());
    let had_cookie = jar.get(SESSION_COOKIE).is_some();

    let session = match jar.get(SESSION_COOKIE) {
        Some(cookie) => {
            let id = cookie.value().to_string();
            match state.sessions.load(&id).await? {
                Some(data) => Session::existing(id, data),
                None => {
                    tracing::debug!("Session cookie refers to a missing or expired session");
                    Session::fresh()
                }
            }
        }
        None => Session::fresh(),
    };

    request.extensions_mut().insert(session.clone());
    let response = next.run(request).await;

    let snapshot = session.snapshot().await;
    let jar = commit(
        state.sessions.as_ref(),
        jar,
        snapshot,
        had_cookie,
        state.config.session_ttl,
    )
    .await?;

    Ok((jar, response).into_response())
}

async fn commit(
    store: &dyn SessionStore,
    jar: SignedCookieJar,
    snapshot: SessionSnapshot,
    had_cookie: bool,
    ttl: Duration,
) -> Result<SignedCookieJar, BackendError> {
    let SessionSnapshot { id, data, status } = snapshot;
    let expires_at = expiry(ttl);

    let jar = match status {
        SessionStatus::Unchanged => {
            if let Some(id) = id {
                store.touch(&id, expires_at).await?;
            }
            jar
        }
        SessionStatus::Modified if data.is_empty() => match id {
            Some(id) => {
                store.destroy(&id).await?;
                jar.remove(removal_cookie())
            }
            None => jar,
        },
        SessionStatus::Modified => {
            let id = id.unwrap_or_else(new_session_id);
            store.save(&id, &data, expires_at).await?;
            jar.add(session_cookie(id))
        }
        SessionStatus::Regenerated => {
            if let Some(old) = id {
                store.destroy(&old).await?;
            }
            if data.is_empty() {
                if had_cookie {
                    jar.remove(removal_cookie())
                } else {
                    jar
                }
            } else {
                let id = new_session_id();
                store.save(&id, &data, expires_at).await?;
                jar.add(session_cookie(id))
            }
        }
        SessionStatus::Destroyed => {
            if let Some(id) = id {
                store.destroy(&id).await?;
            }
            if had_cookie {
                jar.remove(removal_cookie())
            } else {
                jar
            }
        }
    };

    Ok(jar)
}

fn expiry(ttl: Duration) -> DateTime<Utc> {
    let now = Utc::now();
    chrono::Duration::from_std(ttl)
        .ok()
        .and_then(|ttl| now.checked_add_signed(ttl))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

fn session_cookie(id: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, id))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

fn removal_cookie() -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE).path("/").build()
}
