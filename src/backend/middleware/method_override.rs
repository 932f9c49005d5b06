/**
 * Method Override Middleware
 *
 * Lets HTML forms, which can only submit GET and POST, reach routes for
 * other methods. A POST whose parsed body carries a `_method` field is
 * re-dispatched with that method:
 *
 * ```http
 * POST /auth/logout HTTP/1.1
 * Content-Type: application/x-www-form-urlencoded
 *
 * _method=DELETE
 * ```
 *
 * is routed as `DELETE /auth/logout`.
 *
 * # Rules
 *
 * - Only requests arriving as POST are considered
 * - The `_method` field is always removed from the body handlers see,
 *   including when its value is not a supported method
 * - An array value uses its first element
 * - The value is matched case-insensitively against the standard methods
 *
 * The method the request arrived with is kept as an [`OriginalMethod`]
 * extension.
 */

use axum::{extract::Request, http::Method, middleware::Next, response::Response};
use serde_json::Value;

use crate::backend::error::BackendError;
use crate::backend::middleware::body_parser::{rewrite_body, ParsedBody};

/// Body field naming the method to use
pub const METHOD_FIELD: &str = "_method";

const SUPPORTED_METHODS: [Method; 9] = [
    Method::GET,
    Method::HEAD,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::PATCH,
    Method::OPTIONS,
    Method::CONNECT,
    Method::TRACE,
];

/// Method the request arrived with, before any override
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginalMethod(pub Method);

pub async fn override_method(mut request: Request, next: Next) -> Result<Response, BackendError> {
    let original = request.method().clone();
    request.extensions_mut().insert(OriginalMethod(original.clone()));

    if original == Method::POST {
        if let Some(method) = take_override(&mut request)? {
            tracing::debug!("Overriding method {} with {}", original, method);
            *request.method_mut() = method;
        }
    }

    Ok(next.run(request).await)
}

/// Remove `_method` from the parsed body and return the method it names
fn take_override(request: &mut Request) -> Result<Option<Method>, BackendError> {
    let Some(parsed) = request.extensions_mut().get_mut::<ParsedBody>() else {
        return Ok(None);
    };
    let Some(fields) = parsed.value.as_object_mut() else {
        return Ok(None);
    };
    let Some(requested) = fields.remove(METHOD_FIELD) else {
        return Ok(None);
    };

    let parsed = parsed.clone();
    rewrite_body(request, &parsed)?;

    Ok(supported_method(&requested))
}

fn supported_method(value: &Value) -> Option<Method> {
    let name = match value {
        Value::String(name) => name.as_str(),
        Value::Array(values) => values.first()?.as_str()?,
        _ => return None,
    };
    let name = name.trim().to_ascii_uppercase();
    SUPPORTED_METHODS
        .iter()
        .find(|method| method.as_str() == name)
        .cloned()
}
