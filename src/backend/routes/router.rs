/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * the middleware chain and all route groups into a single Axum router.
 *
 * # Request Pipeline
 *
 * Every HTTP request passes these steps in this exact order:
 *
 * 1. Body parsing (URL-encoded and JSON)
 * 2. Method override (`_method` body field)
 * 3. Request logging (development mode only)
 * 4. Static files from the images directory
 * 5. Session attachment
 * 6. Identity resolution from the session
 * 7. User-context injection (`Locals`)
 * 8. Static files from the general static directory
 * 9. Route dispatch: `/api`, `/auth`, `/chat`, else 404
 *
 * The chain wraps the route groups as a whole rather than being attached
 * with `Router::layer`, so a method override is applied before routing and
 * the static mounts see paths no route matches.
 *
 * # Socket Endpoint
 *
 * `GET /socket` is routed before the chain and is independent of it.
 */

use axum::{http::Uri, middleware, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::services::ServeDir;

use crate::backend::error::BackendError;
use crate::backend::middleware::{
    attach_session, inject_locals, log_requests, override_method, parse_body, resolve_identity,
    serve_static,
};
use crate::backend::realtime::socket_handler;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::routes::auth_routes::configure_auth_routes;
use crate::backend::routes::chat_routes::configure_chat_routes;
use crate::backend::server::state::AppState;

/// Path of the WebSocket endpoint
pub const SOCKET_PATH: &str = "/socket";

/// Create the Axum router with the middleware chain and all routes
///
/// # Arguments
///
/// * `app_state` - Application state shared by middleware and handlers
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub fn create_router(app_state: AppState) -> Router {
    let routes = Router::new();
    let routes = configure_api_routes(routes);
    let routes = configure_auth_routes(routes);
    let routes = configure_chat_routes(routes);
    let routes = routes.fallback(not_found).with_state(app_state.clone());

    let images = ServeDir::new(&app_state.config.images_dir);
    let public = ServeDir::new(&app_state.config.static_dir);

    let chain = ServiceBuilder::new()
        .layer(middleware::from_fn(parse_body))
        .layer(middleware::from_fn(override_method))
        .layer(middleware::from_fn_with_state(
            app_state.config.run_mode.clone(),
            log_requests,
        ))
        .layer(middleware::from_fn_with_state(images, serve_static))
        .layer(middleware::from_fn_with_state(
            app_state.clone(),
            attach_session,
        ))
        .layer(middleware::from_fn_with_state(
            app_state.authenticator.clone(),
            resolve_identity,
        ))
        .layer(middleware::from_fn(inject_locals))
        .layer(middleware::from_fn_with_state(public, serve_static))
        .service(routes);

    Router::new()
        .route(SOCKET_PATH, get(socket_handler))
        .fallback_service(chain)
        .with_state(app_state)
}

/// Fallback handler for unknown paths
async fn not_found(uri: Uri) -> BackendError {
    BackendError::not_found(format!("Not found: {}", uri.path()))
}
