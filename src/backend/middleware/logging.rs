//! Request logging middleware
//!
//! In development mode every request produces one line on the `http` target:
//!
//! ```text
//! GET /api/me 401 0.412 ms - 45
//! ```
//!
//! that is method, URL, status, response time and response length (`-` when
//! the length is not known up front). In any other mode nothing is logged.

use std::time::Instant;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::backend::server::config::RunMode;

pub async fn log_requests(State(mode): State<RunMode>, request: Request, next: Next) -> Response {
    if !mode.is_development() {
        return next.run(request).await;
    }

    let start = Instant::now();
    let method = request.method().to_string();
    let uri = request.uri().to_string();

    let response = next.run(request).await;

    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    tracing::info!(
        target: "http",
        "{} {} {} {:.3} ms - {}",
        method,
        uri,
        response.status().as_u16(),
        elapsed_ms,
        content_length(response.headers()),
    );

    response
}

fn content_length(headers: &HeaderMap) -> String {
    headers
        .get(header::CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| "-".to_string())
}
