//! Authentication API integration tests
//!
//! Tests for signup, login, logout and the current-user endpoints.

use axum::http::{Method, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::*;

#[tokio::test]
async fn test_signup_success_logs_user_in() {
    let app = TestApp::new().await;

    let response = app
        .send(post_form(
            "/auth/signup",
            "username=ada_l&display_name=Ada+Lovelace&password=analytical-engine",
            None,
        ))
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let body = response.json();
    assert_eq!(body["username"], "ada_l");
    assert_eq!(body["display_name"], "Ada Lovelace");
    assert!(body.get("password_hash").is_none());

    let cookie = response.session_cookie().expect("signup sets a session");
    let me = app.send(get("/api/me", Some(&cookie))).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.json()["username"], "ada_l");
}

#[tokio::test]
async fn test_signup_duplicate_username() {
    let app = TestApp::new().await;
    create_test_user(&app.state.db, "grace", TEST_PASSWORD).await;

    let response = app
        .send(post_json(
            "/auth/signup",
            &json!({ "username": "grace", "password": "another-password" }),
            None,
        ))
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.json()["status"], 409);
    assert!(response.session_cookie().is_none());
}

#[tokio::test]
async fn test_signup_rejects_invalid_input() {
    let app = TestApp::new().await;

    let bad_username = app
        .send(post_form("/auth/signup", "username=a!&password=longenough", None))
        .await;
    assert_eq!(bad_username.status, StatusCode::BAD_REQUEST);

    let short_password = app
        .send(post_form("/auth/signup", "username=alan&password=short", None))
        .await;
    assert_eq!(short_password.status, StatusCode::BAD_REQUEST);

    let missing_fields = app.send(post_form("/auth/signup", "username=alan", None)).await;
    assert_eq!(missing_fields.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_with_form_body() {
    let app = TestApp::new().await;
    create_test_user(&app.state.db, "linus", TEST_PASSWORD).await;

    let response = app
        .send(post_form(
            "/auth/login",
            &format!("username=linus&password={}", TEST_PASSWORD),
            None,
        ))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["username"], "linus");
    assert!(response.session_cookie().is_some());
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::new().await;
    create_test_user(&app.state.db, "linus", TEST_PASSWORD).await;

    let response = app
        .send(post_json(
            "/auth/login",
            &json!({ "username": "linus", "password": "not-the-password" }),
            None,
        ))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.json()["error"], "Invalid username or password");
    assert!(response.session_set_cookie().is_none());
}

#[tokio::test]
async fn test_login_unknown_user() {
    let app = TestApp::new().await;

    let response = app
        .send(post_json(
            "/auth/login",
            &json!({ "username": "nobody", "password": TEST_PASSWORD }),
            None,
        ))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_requires_login() {
    let app = TestApp::new().await;

    let response = app.send(get("/api/me", None)).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.json()["status"], 401);
}

#[tokio::test]
async fn test_logout_destroys_session() {
    let app = TestApp::new().await;
    let (_user, cookie) = login_test_user(&app, "margaret").await;

    let response = app
        .send(request(Method::DELETE, "/auth/logout", Some(&cookie)))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), json!({ "status": "logged_out" }));
    assert!(response.clears_session_cookie());

    let me = app.send(get("/api/me", Some(&cookie))).await;
    assert_eq!(me.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_without_session() {
    let app = TestApp::new().await;

    let response = app.send(get("/auth/logout", None)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.session_set_cookie().is_none());
}

#[tokio::test]
async fn test_api_index_exposes_locals() {
    let app = TestApp::new().await;

    let anonymous = app.send(get("/api", None)).await;
    assert_eq!(anonymous.status, StatusCode::OK);
    assert_eq!(anonymous.json(), json!({ "user": null }));

    let (user, cookie) = login_test_user(&app, "barbara").await;
    let signed_in = app.send(get("/api", Some(&cookie))).await;
    assert_eq!(
        signed_in.json(),
        json!({
            "user": {
                "id": user.id.to_string(),
                "username": "barbara",
                "display_name": "barbara",
            }
        })
    );
}

#[tokio::test]
async fn test_deleted_user_is_logged_out() {
    let app = TestApp::new().await;
    let (user, cookie) = login_test_user(&app, "edsger").await;

    huddle::backend::auth::users::delete_user(&app.state.db, user.id)
        .await
        .unwrap();

    let me = app.send(get("/api/me", Some(&cookie))).await;
    assert_eq!(me.status, StatusCode::UNAUTHORIZED);
}
