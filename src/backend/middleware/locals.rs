//! User-context injection
//!
//! Every request past the authentication step carries [`Locals`], whose
//! `user` is the public view of the current identity or explicitly `None`.

use axum::{
    extract::{FromRequestParts, Request},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use serde::Serialize;

use crate::backend::auth::handlers::types::UserResponse;
use crate::backend::middleware::auth::CurrentUser;

/// Per-request values shared with every handler
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Locals {
    pub user: Option<UserResponse>,
}

pub async fn inject_locals(mut request: Request, next: Next) -> Response {
    let user = request
        .extensions()
        .get::<CurrentUser>()
        .and_then(|current| current.0.as_ref())
        .map(UserResponse::from);

    request.extensions_mut().insert(Locals { user });
    next.run(request).await
}

impl<S> FromRequestParts<S> for Locals
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts.extensions.get::<Locals>().cloned().unwrap_or_default())
    }
}
