//! Body parsing, method override and fallback behaviour

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::middleware as axum_middleware;
use axum::routing::delete;
use axum::{Json, Router};
use huddle::backend::middleware::{override_method, parse_body, Input};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceBuilder;

use crate::common::*;

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;

    let response = app.send(get("/api/health", None)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_unknown_path_is_json_404() {
    let app = TestApp::new().await;

    let response = app.send(get("/nowhere/at/all", None)).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.json()["status"], 404);
    assert!(response.session_set_cookie().is_none());
}

#[tokio::test]
async fn test_form_method_override_reaches_delete_route() {
    let app = TestApp::new().await;

    let plain = app.send(post_form("/auth/logout", "", None)).await;
    assert_eq!(plain.status, StatusCode::METHOD_NOT_ALLOWED);

    let overridden = app
        .send(post_form("/auth/logout", "_method=DELETE", None))
        .await;
    assert_eq!(overridden.status, StatusCode::OK);
    assert_eq!(overridden.json(), json!({ "status": "logged_out" }));
}

#[tokio::test]
async fn test_json_method_override_is_case_insensitive() {
    let app = TestApp::new().await;

    let response = app
        .send(post_json("/auth/logout", &json!({ "_method": "delete" }), None))
        .await;

    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_override_keeps_post() {
    let app = TestApp::new().await;

    let response = app
        .send(post_form("/auth/logout", "_method=TELEPORT", None))
        .await;

    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_override_to_post_still_reaches_login() {
    let app = TestApp::new().await;
    create_test_user(&app.state.db, "alonzo", TEST_PASSWORD).await;

    let response = app
        .send(post_form(
            "/auth/login",
            &format!("_method=POST&username=alonzo&password={}", TEST_PASSWORD),
            None,
        ))
        .await;

    assert_eq!(response.status, StatusCode::OK);
}

async fn echo_body(Input(fields): Input<Value>, raw: String) -> Json<Value> {
    Json(json!({ "fields": fields, "raw": raw }))
}

#[tokio::test]
async fn test_override_field_is_stripped_before_handlers() {
    let routes = Router::new().route("/echo", delete(echo_body));
    let chain = ServiceBuilder::new()
        .layer(axum_middleware::from_fn(parse_body))
        .layer(axum_middleware::from_fn(override_method))
        .service(routes);
    let router = Router::new().fallback_service(chain);

    let response = send_to(
        &router,
        post_form("/echo", "_method=DELETE&room=lobby&note=hi", None),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert_eq!(body["fields"], json!({ "note": "hi", "room": "lobby" }));
    assert!(body["fields"].get("_method").is_none());
    assert!(!body["raw"].as_str().unwrap().contains("_method"));
}

#[tokio::test]
async fn test_malformed_json_is_rejected() {
    let app = TestApp::new().await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"username\": "))
        .unwrap();
    let response = app.send(request).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let app = TestApp::new().await;
    let form = format!("username={}", "x".repeat(200 * 1024));

    let response = app.send(post_form("/auth/login", &form, None)).await;

    assert_eq!(response.status, StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_unsupported_content_type_leaves_body_unparsed() {
    let app = TestApp::new().await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/auth/login")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from("username=alonzo"))
        .unwrap();
    let response = app.send(request).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
