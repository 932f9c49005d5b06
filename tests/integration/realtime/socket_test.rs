//! WebSocket room tests against a live listener

use std::net::SocketAddr;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};

use crate::common::*;

type Client = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

async fn serve(app: &TestApp) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = app.router.clone();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

async fn connect(addr: SocketAddr) -> Client {
    let (client, _) = connect_async(format!("ws://{}/socket", addr)).await.unwrap();
    client
}

async fn join(client: &mut Client, room: &str) {
    let frame = json!({ "event": "connectToRoom", "data": room }).to_string();
    client.send(Message::Text(frame.into())).await.unwrap();
}

async fn next_event(client: &mut Client) -> Value {
    let msg = tokio::time::timeout(Duration::from_secs(5), client.next())
        .await
        .expect("timed out waiting for a frame")
        .unwrap()
        .unwrap();
    serde_json::from_str(msg.to_text().unwrap()).unwrap()
}

async fn assert_silent(client: &mut Client) {
    let received = tokio::time::timeout(Duration::from_millis(200), client.next()).await;
    assert!(received.is_err(), "unexpected frame: {:?}", received);
}

#[tokio::test]
async fn test_join_greets_the_emitter() {
    let app = TestApp::new().await;
    let addr = serve(&app).await;
    let mut client = connect(addr).await;

    join(&mut client, "lobby").await;

    assert_eq!(
        next_event(&mut client).await,
        json!({ "event": "newMessage", "data": "Hello World" })
    );
}

#[tokio::test]
async fn test_greeting_is_not_broadcast() {
    let app = TestApp::new().await;
    let addr = serve(&app).await;
    let mut first = connect(addr).await;
    let mut second = connect(addr).await;

    join(&mut second, "lobby").await;
    assert_eq!(next_event(&mut second).await["data"], "Hello World");

    join(&mut first, "lobby").await;
    assert_eq!(next_event(&mut first).await["data"], "Hello World");

    assert_silent(&mut second).await;
}

#[tokio::test]
async fn test_rejoining_is_acknowledged_again() {
    let app = TestApp::new().await;
    let addr = serve(&app).await;
    let mut client = connect(addr).await;

    join(&mut client, "lobby").await;
    next_event(&mut client).await;
    join(&mut client, "lobby").await;

    assert_eq!(next_event(&mut client).await["event"], "newMessage");
    assert_eq!(app.state.rooms.summary("lobby").await.unwrap().members, 1);
}

#[tokio::test]
async fn test_malformed_frames_are_ignored() {
    let app = TestApp::new().await;
    let addr = serve(&app).await;
    let mut client = connect(addr).await;

    client
        .send(Message::Text("not json".into()))
        .await
        .unwrap();
    client
        .send(Message::Text(json!({ "event": "shout", "data": 1 }).to_string().into()))
        .await
        .unwrap();
    assert_silent(&mut client).await;

    join(&mut client, "lobby").await;
    assert_eq!(next_event(&mut client).await["data"], "Hello World");
}

#[tokio::test]
async fn test_disconnect_leaves_rooms() {
    let app = TestApp::new().await;
    let addr = serve(&app).await;
    let mut client = connect(addr).await;

    join(&mut client, "lobby").await;
    next_event(&mut client).await;
    assert_eq!(app.state.rooms.summary("lobby").await.unwrap().members, 1);

    client.close(None).await.unwrap();

    let mut left = false;
    for _ in 0..50 {
        if app.state.rooms.summary("lobby").await.is_none() {
            left = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert!(left, "connection still listed in lobby");
}

#[tokio::test]
async fn test_socket_bypasses_session_middleware() {
    let app = TestApp::new().await;

    let response = app.send(get("/socket", None)).await;

    assert!(response.session_set_cookie().is_none());
    assert_ne!(response.status, axum::http::StatusCode::NOT_FOUND);
}
