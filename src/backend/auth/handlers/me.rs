/**
 * Get Current User Handler
 *
 * Returns the user bound to the request's session. The identity is resolved
 * by the authentication middleware; this handler only reads it.
 */

use axum::response::Json;

use crate::backend::auth::handlers::types::UserResponse;
use crate::backend::middleware::auth::AuthUser;

/// Get current user handler
///
/// # Errors
///
/// * `401 Unauthorized` - If the session carries no identity
///
/// # Example Response
///
/// ```json
/// {
///   "id": "123e4567-e89b-12d3-a456-426614174000",
///   "username": "ada",
///   "display_name": "Ada"
/// }
/// ```
pub async fn get_me(AuthUser(user): AuthUser) -> Json<UserResponse> {
    Json(UserResponse::from(&user))
}
