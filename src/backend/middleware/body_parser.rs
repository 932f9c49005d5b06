/**
 * Body Parsing Middleware
 *
 * Buffers URL-encoded and JSON request bodies and decodes them into a
 * [`ParsedBody`] stored in the request extensions. Later middleware (method
 * override) and handlers (through [`Input`]) read the decoded value instead
 * of parsing the body themselves. The raw bytes are put back on the request
 * so body-consuming extractors keep working.
 *
 * # Decoding Rules
 *
 * - `application/x-www-form-urlencoded` decodes to an object of strings;
 *   a repeated key becomes an array of strings
 * - `application/json` must hold an object or array
 * - any other content type, or an empty body, is passed through untouched
 *
 * # Errors
 *
 * - `413 Payload Too Large` - body larger than [`BODY_LIMIT`]
 * - `400 Bad Request` - malformed JSON, a JSON scalar, or invalid UTF-8 in a form
 */

use axum::{
    body::Body,
    extract::{FromRequestParts, Request},
    http::{header, request::Parts, HeaderMap, HeaderValue, StatusCode},
    middleware::Next,
    response::Response,
};
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::backend::error::BackendError;

/// Largest body the parser will buffer
pub const BODY_LIMIT: usize = 100 * 1024;

/// Wire encoding a body arrived in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyEncoding {
    UrlEncoded,
    Json,
}

/// Decoded request body
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedBody {
    pub value: Value,
    pub encoding: BodyEncoding,
}

impl ParsedBody {
    /// Re-encode the value in its original encoding
    pub fn encode(&self) -> Result<Bytes, BackendError> {
        match self.encoding {
            BodyEncoding::Json => Ok(Bytes::from(serde_json::to_vec(&self.value)?)),
            BodyEncoding::UrlEncoded => Ok(Bytes::from(encode_form(&self.value))),
        }
    }
}

/// Decode the body of supported content types into a [`ParsedBody`]
pub async fn parse_body(request: Request, next: Next) -> Result<Response, BackendError> {
    let Some(encoding) = body_encoding(request.headers()) else {
        return Ok(next.run(request).await);
    };

    if declared_length(request.headers()).is_some_and(|len| len > BODY_LIMIT) {
        return Err(payload_too_large());
    }

    let (mut parts, body) = request.into_parts();
    let bytes = axum::body::to_bytes(body, BODY_LIMIT).await.map_err(|e| {
        tracing::warn!("Failed to buffer request body: {}", e);
        payload_too_large()
    })?;

    if !bytes.is_empty() {
        let value = match encoding {
            BodyEncoding::Json => decode_json(&bytes)?,
            BodyEncoding::UrlEncoded => decode_form(&bytes)?,
        };
        parts.extensions.insert(ParsedBody { value, encoding });
    }

    Ok(next.run(Request::from_parts(parts, Body::from(bytes))).await)
}

/// Replace a request's body with the re-encoded parsed body
pub fn rewrite_body(request: &mut Request, parsed: &ParsedBody) -> Result<(), BackendError> {
    let bytes = parsed.encode()?;
    request
        .headers_mut()
        .insert(header::CONTENT_LENGTH, HeaderValue::from(bytes.len()));
    *request.body_mut() = Body::from(bytes);
    Ok(())
}

fn payload_too_large() -> BackendError {
    BackendError::handler(StatusCode::PAYLOAD_TOO_LARGE, "Request body too large")
}

fn body_encoding(headers: &HeaderMap) -> Option<BodyEncoding> {
    let content_type = headers.get(header::CONTENT_TYPE)?.to_str().ok()?;
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    if essence == "application/x-www-form-urlencoded" {
        Some(BodyEncoding::UrlEncoded)
    } else if essence == "application/json" {
        Some(BodyEncoding::Json)
    } else {
        None
    }
}

fn declared_length(headers: &HeaderMap) -> Option<usize> {
    headers
        .get(header::CONTENT_LENGTH)?
        .to_str()
        .ok()?
        .parse()
        .ok()
}

fn decode_json(bytes: &[u8]) -> Result<Value, BackendError> {
    let value: Value = serde_json::from_slice(bytes).map_err(|e| {
        tracing::warn!("Malformed JSON body: {}", e);
        BackendError::handler(StatusCode::BAD_REQUEST, "Malformed JSON body")
    })?;

    if !(value.is_object() || value.is_array()) {
        return Err(BackendError::handler(
            StatusCode::BAD_REQUEST,
            "JSON body must be an object or an array",
        ));
    }
    Ok(value)
}

fn decode_form(bytes: &[u8]) -> Result<Value, BackendError> {
    let invalid = || BackendError::handler(StatusCode::BAD_REQUEST, "Malformed form body");
    let text = std::str::from_utf8(bytes).map_err(|_| invalid())?;

    let mut fields = Map::new();
    for pair in text.split('&').filter(|pair| !pair.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let key = decode_component(key).ok_or_else(invalid)?;
        let value = Value::String(decode_component(value).ok_or_else(invalid)?);

        match fields.get_mut(&key) {
            Some(Value::Array(values)) => values.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
            None => {
                fields.insert(key, value);
            }
        }
    }
    Ok(Value::Object(fields))
}

fn decode_component(component: &str) -> Option<String> {
    urlencoding::decode(&component.replace('+', " "))
        .ok()
        .map(|decoded| decoded.into_owned())
}

fn encode_form(value: &Value) -> String {
    let Some(fields) = value.as_object() else {
        return String::new();
    };

    let mut pairs = Vec::new();
    for (key, value) in fields {
        let values = match value {
            Value::Array(values) => values.iter().collect(),
            single => vec![single],
        };
        for value in values {
            let text = match value {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            };
            pairs.push(format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(&text)
            ));
        }
    }
    pairs.join("&")
}

/// Extractor deserializing the parsed body into `T`
///
/// Works for both JSON and URL-encoded requests. A request without a
/// parsed body is rejected with 400.
#[derive(Debug, Clone)]
pub struct Input<T>(pub T);

impl<S, T> FromRequestParts<S> for Input<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let parsed = parts.extensions.get::<ParsedBody>().ok_or_else(|| {
            BackendError::handler(StatusCode::BAD_REQUEST, "Missing request body")
        })?;

        serde_json::from_value(parsed.value.clone())
            .map(Input)
            .map_err(|e| {
                tracing::warn!("Invalid request body: {}", e);
                BackendError::handler(
                    StatusCode::BAD_REQUEST,
                    format!("Invalid request body: {}", e),
                )
            })
    }
}
