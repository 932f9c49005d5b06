/**
 * API Route Handlers
 *
 * # Routes
 *
 * - `GET /api` - Index; returns the current user context
 * - `GET /api/health` - Liveness probe
 * - `GET /api/me` - Get current user info (requires authentication)
 */

use axum::{response::Json, routing::get, Router};
use serde_json::{json, Value};

use crate::backend::auth::get_me;
use crate::backend::middleware::locals::Locals;
use crate::backend::server::state::AppState;

/// Configure API routes
///
/// Mounts the API collection under `/api` on the given router.
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router.nest("/api", api_routes())
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/me", get(get_me))
}

/// Index handler
///
/// ```json
/// { "user": null }
/// ```
async fn index(locals: Locals) -> Json<Locals> {
    Json(locals)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
