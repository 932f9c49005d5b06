/**
 * Authentication Middleware
 *
 * Resolves the identity stored in the session into a `User` once per
 * request and exposes it to handlers through extractors.
 *
 * The middleware never rejects a request: anonymous traffic simply carries
 * `CurrentUser(None)`. Routes that need an identity ask for [`AuthUser`],
 * which turns a missing identity into 401.
 */

use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};

use crate::backend::auth::authenticator::{Authenticator, PASSPORT_KEY};
use crate::backend::auth::users::User;
use crate::backend::error::BackendError;
use crate::backend::session::Session;

/// Identity resolved for the current request
#[derive(Clone, Debug, Default)]
pub struct CurrentUser(pub Option<User>);

/// Authentication middleware
///
/// This middleware:
/// 1. Reads `passport.user` from the session
/// 2. Resolves it through the authenticator's deserializer
/// 3. Drops a dangling id (deleted user) from the session
/// 4. Attaches `CurrentUser` to the request extensions
pub async fn resolve_identity(
    State(authenticator): State<Arc<Authenticator>>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let session = request.extensions().get::<Session>().cloned();

    let user = match session {
        Some(session) => identity_from_session(&authenticator, &session).await?,
        None => None,
    };

    request.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(request).await)
}

async fn identity_from_session(
    authenticator: &Authenticator,
    session: &Session,
) -> Result<Option<User>, BackendError> {
    let Some(serialized) = authenticator.session_user(session).await else {
        return Ok(None);
    };

    match authenticator.deserialize_user(&serialized).await? {
        Some(user) => Ok(Some(user)),
        None => {
            tracing::warn!("Session refers to unknown user {}; clearing login", serialized);
            session.remove(PASSPORT_KEY).await;
            Ok(None)
        }
    }
}

fn current_user(parts: &Parts) -> Option<User> {
    parts
        .extensions
        .get::<CurrentUser>()
        .and_then(|current| current.0.clone())
}

/// Axum extractor for an authenticated user
///
/// Rejects with 401 when the request carries no identity.
#[derive(Clone, Debug)]
pub struct AuthUser(pub User);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        current_user(parts).map(AuthUser).ok_or_else(|| {
            tracing::warn!("Unauthenticated request to {}", parts.uri.path());
            BackendError::unauthorized("Authentication required")
        })
    }
}
