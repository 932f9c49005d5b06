/**
 * Signup Handler
 *
 * This module implements the user registration handler for POST /auth/signup.
 *
 * # Registration Process
 *
 * 1. Validate username format and password length
 * 2. Hash password using bcrypt
 * 3. Create user in database (unique username enforced by the table)
 * 4. Log the new user in on the current session
 * 5. Return 201 and the user info
 *
 * # Security
 *
 * - Passwords are hashed using bcrypt with DEFAULT_COST
 * - Passwords are never returned in responses
 */

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Json};
use bcrypt::{hash, DEFAULT_COST};
use sqlx::SqlitePool;

use crate::backend::auth::authenticator::Authenticator;
use crate::backend::auth::handlers::types::{SignupRequest, UserResponse};
use crate::backend::auth::users::{create_user, is_unique_violation};
use crate::backend::error::BackendError;
use crate::backend::middleware::body_parser::Input;
use crate::backend::session::Session;
use crate::shared::validation::{validate_password, validate_username};

/// Sign up handler
///
/// # Errors
///
/// * `400 Bad Request` - If the username format is invalid or the password is too short
/// * `409 Conflict` - If the username is taken
/// * `500 Internal Server Error` - If password hashing or user creation fails
///
/// # Example Request
///
/// ```http
/// POST /auth/signup HTTP/1.1
/// Content-Type: application/x-www-form-urlencoded
///
/// username=ada&display_name=Ada&password=securepassword123
/// ```
pub async fn signup(
    State(pool): State<SqlitePool>,
    State(authenticator): State<Arc<Authenticator>>,
    session: Session,
    Input(request): Input<SignupRequest>,
) -> Result<(StatusCode, Json<UserResponse>), BackendError> {
    tracing::info!("Signup request for username: {}", request.username);

    validate_username(&request.username)?;
    validate_password(&request.password)?;

    let display_name = request
        .display_name
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| request.username.clone());

    let password_hash = hash(&request.password, DEFAULT_COST)?;

    let user = create_user(&pool, request.username.clone(), display_name, password_hash)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                tracing::warn!("Username already exists: {}", request.username);
                BackendError::handler(StatusCode::CONFLICT, "Username already taken")
            } else {
                tracing::error!("Failed to create user: {:?}", e);
                BackendError::from(e)
            }
        })?;

    authenticator.login(&session, &user).await?;

    tracing::info!("User created successfully: {}", user.username);

    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}
