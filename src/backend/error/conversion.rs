/**
 * Error Conversion
 *
 * All backend errors implement `IntoResponse` from Axum, allowing them to be
 * returned directly from handlers and middleware.
 *
 * # Response Format
 *
 * Error responses are returned as JSON with the following structure:
 * ```json
 * {
 *   "error": "Error message",
 *   "status": 400
 * }
 * ```
 */

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use crate::backend::error::types::BackendError;

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }

        let body = serde_json::json!({
            "error": self.message(),
            "status": status.as_u16(),
        });

        (status, Json(body)).into_response()
    }
}
