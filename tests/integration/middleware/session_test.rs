//! Session persistence tests

use std::time::Duration;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use crate::common::*;

#[tokio::test]
async fn test_anonymous_requests_get_no_cookie() {
    let app = TestApp::new().await;

    for path in ["/api", "/api/health", "/chat"] {
        let response = app.send(get(path, None)).await;
        assert!(
            response.session_set_cookie().is_none(),
            "{} should not start a session",
            path
        );
    }

    let stored: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM sessions")
        .fetch_one(&app.state.db)
        .await
        .unwrap();
    assert_eq!(stored.0, 0);
}

#[tokio::test]
async fn test_session_cookie_attributes() {
    let app = TestApp::new().await;
    create_test_user(&app.state.db, "hedy", TEST_PASSWORD).await;

    let response = app
        .send(post_form(
            "/auth/login",
            &format!("username=hedy&password={}", TEST_PASSWORD),
            None,
        ))
        .await;

    let set_cookie = response.session_set_cookie().unwrap();
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Lax"));
    assert!(set_cookie.contains("Path=/"));
    assert!(!set_cookie.contains("Max-Age"));
}

#[tokio::test]
async fn test_authenticated_requests_do_not_reissue_cookie() {
    let app = TestApp::new().await;
    let (_user, cookie) = login_test_user(&app, "katherine").await;

    let response = app.send(get("/api/me", Some(&cookie))).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.session_set_cookie().is_none());
}

#[tokio::test]
async fn test_tampered_cookie_is_ignored() {
    let app = TestApp::new().await;
    let (_user, cookie) = login_test_user(&app, "annie").await;

    let mut tampered = cookie.clone().into_bytes();
    let last = tampered.len() - 1;
    tampered[last] = if tampered[last] == b'A' { b'B' } else { b'A' };
    let tampered = String::from_utf8(tampered).unwrap();

    let response = app.send(get("/api/me", Some(&tampered))).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_sessions_survive_restart() {
    let app = TestApp::new().await;
    let (_user, cookie) = login_test_user(&app, "frances").await;

    let restarted = app.restarted_with_secret(TEST_SECRET);
    let response = send_to(&restarted, get("/api/me", Some(&cookie))).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["username"], "frances");
}

#[tokio::test]
async fn test_changed_secret_invalidates_cookies() {
    let app = TestApp::new().await;
    let (_user, cookie) = login_test_user(&app, "radia").await;

    let restarted = app.restarted_with_secret("a-different-secret");
    let response = send_to(&restarted, get("/api/me", Some(&cookie))).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_session_expires_after_ttl() {
    let app = TestApp::with_vars(&[("SESSION_TTL_SECS", "1")]).await;
    let (_user, cookie) = login_test_user(&app, "sophie").await;

    let fresh = app.send(get("/api/me", Some(&cookie))).await;
    assert_eq!(fresh.status, StatusCode::OK);

    tokio::time::sleep(Duration::from_millis(1500)).await;

    let expired = app.send(get("/api/me", Some(&cookie))).await;
    assert_eq!(expired.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_relogin_issues_new_session_id() {
    let app = TestApp::new().await;
    let (_user, first) = login_test_user(&app, "john").await;

    let response = app
        .send(post_form(
            "/auth/login",
            &format!("username=john&password={}", TEST_PASSWORD),
            Some(&first),
        ))
        .await;
    let second = response.session_cookie().unwrap();
    assert_ne!(first, second);

    let old = app.send(get("/api/me", Some(&first))).await;
    assert_eq!(old.status, StatusCode::UNAUTHORIZED);

    let new = app.send(get("/api/me", Some(&second))).await;
    assert_eq!(new.status, StatusCode::OK);
}
