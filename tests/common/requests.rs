//! Request builders and buffered responses

use axum::{
    body::{to_bytes, Body, Bytes},
    http::{header, HeaderMap, Method, Request, StatusCode},
    response::Response,
};
use huddle::backend::session::SESSION_COOKIE;
use serde_json::Value;

/// Build a request, optionally carrying a `name=value` cookie pair
pub fn request(method: Method, uri: &str, cookie: Option<&str>) -> Request<Body> {
    builder(method, uri, cookie).body(Body::empty()).unwrap()
}

pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    request(Method::GET, uri, cookie)
}

/// POST a URL-encoded form body
pub fn post_form(uri: &str, form: &str, cookie: Option<&str>) -> Request<Body> {
    builder(Method::POST, uri, cookie)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap()
}

/// POST a JSON body
pub fn post_json(uri: &str, json: &Value, cookie: Option<&str>) -> Request<Body> {
    builder(Method::POST, uri, cookie)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json.to_string()))
        .unwrap()
}

fn builder(method: Method, uri: &str, cookie: Option<&str>) -> axum::http::request::Builder {
    let builder = Request::builder().method(method).uri(uri);
    match cookie {
        Some(cookie) => builder.header(header::COOKIE, cookie),
        None => builder,
    }
}

/// A response with its body read into memory
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub async fn read(response: Response) -> Self {
        let (parts, body) = response.into_parts();
        let body = to_bytes(body, usize::MAX).await.unwrap();
        Self {
            status: parts.status,
            headers: parts.headers,
            body,
        }
    }

    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// The session `Set-Cookie` header, if any
    pub fn session_set_cookie(&self) -> Option<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .find(|value| value.starts_with(&format!("{}=", SESSION_COOKIE)))
            .map(str::to_string)
    }

    /// The `name=value` pair of a session cookie being set
    ///
    /// `None` when no session cookie is set or when it is being cleared.
    pub fn session_cookie(&self) -> Option<String> {
        let set_cookie = self.session_set_cookie()?;
        let pair = set_cookie.split(';').next()?.trim().to_string();
        if pair.len() > SESSION_COOKIE.len() + 1 {
            Some(pair)
        } else {
            None
        }
    }

    /// Whether the response clears the session cookie
    pub fn clears_session_cookie(&self) -> bool {
        self.session_set_cookie().is_some() && self.session_cookie().is_none()
    }
}
