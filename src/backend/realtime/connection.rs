/**
 * Connection Handler
 *
 * One `ConnectionHandler` per socket connection. It owns the connection's
 * id and the set of rooms it has joined, turns incoming events into the
 * events to send back, and releases its memberships when the socket closes.
 *
 * The handler is transport-agnostic: the socket task feeds it frames and
 * writes out whatever it returns.
 */

use std::collections::HashSet;
use std::sync::Arc;

use uuid::Uuid;

use crate::backend::realtime::rooms::{ConnectionId, RoomRegistry};
use crate::shared::event::{ClientEvent, ServerEvent};

#[derive(Debug)]
pub struct ConnectionHandler {
    id: ConnectionId,
    rooms: Arc<RoomRegistry>,
    joined: HashSet<String>,
}

impl ConnectionHandler {
    pub fn new(rooms: Arc<RoomRegistry>) -> Self {
        Self {
            id: Uuid::new_v4(),
            rooms,
            joined: HashSet::new(),
        }
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub fn joined_rooms(&self) -> &HashSet<String> {
        &self.joined
    }

    /// Handle one decoded event, returning the replies for this connection
    pub async fn handle(&mut self, event: ClientEvent) -> Vec<ServerEvent> {
        match event {
            ClientEvent::ConnectToRoom(room) => {
                self.rooms.join(&room, self.id).await;
                tracing::info!(connection = %self.id, "{}", room);
                self.joined.insert(room);
                vec![ServerEvent::join_greeting()]
            }
        }
    }

    /// Handle one text frame; frames that are not a known event are ignored
    pub async fn handle_text(&mut self, text: &str) -> Vec<ServerEvent> {
        match ClientEvent::decode(text) {
            Ok(event) => self.handle(event).await,
            Err(e) => {
                tracing::debug!(connection = %self.id, "Ignoring frame: {}", e);
                Vec::new()
            }
        }
    }

    /// Leave every joined room
    pub async fn close(self) {
        self.rooms.leave_all(self.id, &self.joined).await;
        tracing::debug!(connection = %self.id, "Connection closed");
    }
}
