/**
 * Authentication Routes
 *
 * # Routes
 *
 * - `POST /auth/signup` - User registration
 * - `POST /auth/login` - User login
 * - `GET /auth/logout` - End the session
 * - `DELETE /auth/logout` - End the session (reachable from an HTML form
 *   through `_method=DELETE`)
 */

use axum::{
    routing::{get, post},
    Router,
};

use crate::backend::auth::{login, logout, signup};
use crate::backend::server::state::AppState;

/// Configure authentication routes
///
/// Mounts the authentication collection under `/auth` on the given router.
pub fn configure_auth_routes(router: Router<AppState>) -> Router<AppState> {
    router.nest("/auth", auth_routes())
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/logout", get(logout).delete(logout))
}
