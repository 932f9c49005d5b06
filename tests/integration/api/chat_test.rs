//! Chat API integration tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use uuid::Uuid;

use crate::common::*;

#[tokio::test]
async fn test_chat_requires_login() {
    let app = TestApp::new().await;

    let response = app.send(get("/chat", None)).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_chat_overview_lists_rooms() {
    let app = TestApp::new().await;
    let (_user, cookie) = login_test_user(&app, "ken").await;

    let empty = app.send(get("/chat", Some(&cookie))).await;
    assert_eq!(empty.status, StatusCode::OK);
    assert_eq!(empty.json()["user"]["username"], "ken");
    assert_eq!(empty.json()["rooms"], json!([]));

    app.state.rooms.join("lobby", Uuid::new_v4()).await;
    app.state.rooms.join("lobby", Uuid::new_v4()).await;
    app.state.rooms.join("attic", Uuid::new_v4()).await;

    let overview = app.send(get("/chat", Some(&cookie))).await;
    assert_eq!(
        overview.json()["rooms"],
        json!([
            { "name": "attic", "members": 1 },
            { "name": "lobby", "members": 2 },
        ])
    );
}

#[tokio::test]
async fn test_room_detail() {
    let app = TestApp::new().await;
    let (_user, cookie) = login_test_user(&app, "dennis").await;
    app.state.rooms.join("lobby", Uuid::new_v4()).await;

    let found = app.send(get("/chat/rooms/lobby", Some(&cookie))).await;
    assert_eq!(found.status, StatusCode::OK);
    assert_eq!(found.json(), json!({ "name": "lobby", "members": 1 }));

    let missing = app.send(get("/chat/rooms/cellar", Some(&cookie))).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.json()["error"], "Room not found: cellar");
}
