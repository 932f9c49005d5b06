/**
 * Login and Logout Handlers
 *
 * `POST /auth/login` checks credentials with the "local" strategy and, on
 * success, binds the user to a regenerated session. `GET /auth/logout` and
 * `DELETE /auth/logout` destroy the session.
 *
 * # Security
 *
 * - Invalid credentials return 401 Unauthorized (no information leakage)
 * - The session id changes on login
 * - User passwords are never returned in responses
 */

use std::sync::Arc;

use axum::{extract::State, response::Json};

use crate::backend::auth::authenticator::Authenticator;
use crate::backend::auth::handlers::types::{LoginRequest, LogoutResponse, UserResponse};
use crate::backend::auth::strategy::{Credentials, LocalStrategy};
use crate::backend::error::BackendError;
use crate::backend::middleware::body_parser::Input;
use crate::backend::session::Session;

/// Login handler
///
/// # Errors
///
/// * `401 Unauthorized` - If user is not found or password is incorrect
/// * `500 Internal Server Error` - If the database or session store fails
pub async fn login(
    State(authenticator): State<Arc<Authenticator>>,
    session: Session,
    Input(request): Input<LoginRequest>,
) -> Result<Json<UserResponse>, BackendError> {
    tracing::info!("Login request for: {}", request.username);

    let credentials = Credentials {
        username: request.username,
        password: request.password,
    };

    let user = authenticator
        .authenticate(LocalStrategy::NAME, &credentials)
        .await?
        .ok_or_else(|| BackendError::unauthorized("Invalid username or password"))?;

    authenticator.login(&session, &user).await?;

    Ok(Json(UserResponse::from(&user)))
}

/// Logout handler
///
/// Always succeeds, whether or not anybody was logged in.
pub async fn logout(
    State(authenticator): State<Arc<Authenticator>>,
    session: Session,
) -> Json<LogoutResponse> {
    authenticator.logout(&session).await;
    Json(LogoutResponse::logged_out())
}
