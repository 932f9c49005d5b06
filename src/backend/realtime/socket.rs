/**
 * WebSocket Endpoint
 *
 * `GET /socket` upgrades to a WebSocket and runs one receive loop per
 * connection. Each text frame goes through the connection's
 * [`ConnectionHandler`]; its replies are written back on the same socket,
 * so nothing a connection triggers is ever seen by another connection.
 *
 * The endpoint sits outside the HTTP middleware chain: no body parsing,
 * session or authentication applies to it.
 */

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures_util::{sink::SinkExt, stream::StreamExt};

use crate::backend::realtime::connection::ConnectionHandler;
use crate::backend::realtime::rooms::RoomRegistry;

pub async fn socket_handler(
    ws: WebSocketUpgrade,
    State(rooms): State<Arc<RoomRegistry>>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, rooms))
}

async fn handle_socket(socket: WebSocket, rooms: Arc<RoomRegistry>) {
    let mut handler = ConnectionHandler::new(rooms);
    tracing::debug!(connection = %handler.id(), "Socket connected");

    let (mut sender, mut receiver) = socket.split();

    'frames: while let Some(msg) = receiver.next().await {
        let msg = match msg {
            Ok(msg) => msg,
            Err(e) => {
                tracing::warn!(connection = %handler.id(), "WebSocket error: {}", e);
                break;
            }
        };

        match msg {
            Message::Text(text) => {
                for event in handler.handle_text(text.as_str()).await {
                    let json = match serde_json::to_string(&event) {
                        Ok(json) => json,
                        Err(e) => {
                            tracing::error!("Failed to encode socket event: {}", e);
                            continue;
                        }
                    };
                    if sender.send(Message::Text(json.into())).await.is_err() {
                        break 'frames;
                    }
                }
            }
            Message::Close(_) => break,
            _ => {}
        }
    }

    handler.close().await;
}
