/**
 * Real-time Socket Events
 *
 * This module defines the JSON frames exchanged over the `/socket`
 * WebSocket channel. Every frame is a text message of the form
 * `{"event": <name>, "data": <payload>}`.
 *
 * # Client → Server
 *
 * - `connectToRoom` - join the room named by the string payload
 *
 * # Server → Client
 *
 * - `newMessage` - a text message addressed to this connection
 */
use serde::{Deserialize, Serialize};

use super::error::SharedError;

/// Acknowledgement text sent back to a connection after it joins a room
pub const JOIN_GREETING: &str = "Hello World";

/// Event sent by a client over the socket
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ClientEvent {
    /// Join the named room. The name is opaque and never validated.
    ConnectToRoom(String),
}

/// Event sent by the server to a single connection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ServerEvent {
    /// A text message for the receiving connection
    NewMessage(String),
}

impl ClientEvent {
    /// Decode one text frame
    pub fn decode(frame: &str) -> Result<Self, SharedError> {
        Ok(serde_json::from_str(frame)?)
    }
}

impl ServerEvent {
    /// The acknowledgement emitted after a successful room join
    pub fn join_greeting() -> Self {
        Self::NewMessage(JOIN_GREETING.to_string())
    }
}
