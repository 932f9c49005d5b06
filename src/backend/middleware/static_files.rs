/**
 * Static File Middleware
 *
 * Serves files from a directory in the middle of the chain. Unlike a nested
 * `ServeDir` service, a miss does not end the request: anything the
 * directory cannot answer falls through to the next step, so the same path
 * space is shared by static files and routes.
 *
 * Only `GET` and `HEAD` are probed. The directory is asked with a bodiless
 * copy of the request so the original body stays available downstream.
 */

use axum::{
    body::Body,
    extract::{Request, State},
    http::{Method, StatusCode},
    middleware::Next,
    response::Response,
};
use tower::ServiceExt;
use tower_http::services::ServeDir;

pub async fn serve_static(State(dir): State<ServeDir>, request: Request, next: Next) -> Response {
    if !matches!(*request.method(), Method::GET | Method::HEAD) {
        return next.run(request).await;
    }

    let mut probe = Request::new(Body::empty());
    *probe.method_mut() = request.method().clone();
    *probe.uri_mut() = request.uri().clone();
    *probe.headers_mut() = request.headers().clone();

    match dir.oneshot(probe).await {
        Ok(response) if response.status() != StatusCode::NOT_FOUND => response.map(Body::new),
        Ok(_) => next.run(request).await,
        Err(never) => match never {},
    }
}
