/**
 * Room Registry
 *
 * In-memory membership of socket connections in named rooms. A room exists
 * exactly as long as it has at least one member; nothing is persisted.
 *
 * # Thread Safety
 *
 * The registry is shared across every socket task behind an `Arc` and
 * guards its map with a `tokio::sync::RwLock`. Lock scopes never span I/O.
 */

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Identifier assigned to each socket connection
pub type ConnectionId = Uuid;

/// Name and size of a room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSummary {
    pub name: String,
    pub members: usize,
}

#[derive(Debug, Default)]
pub struct RoomRegistry {
    rooms: RwLock<HashMap<String, HashSet<ConnectionId>>>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a connection to a room, creating the room if needed
    ///
    /// Returns `false` when the connection was already a member.
    pub async fn join(&self, room: &str, connection: ConnectionId) -> bool {
        self.rooms
            .write()
            .await
            .entry(room.to_string())
            .or_default()
            .insert(connection)
    }

    /// Remove a connection from the given rooms, dropping rooms left empty
    pub async fn leave_all<'a, I>(&self, connection: ConnectionId, rooms: I)
    where
        I: IntoIterator<Item = &'a String>,
    {
        let mut map = self.rooms.write().await;
        for room in rooms {
            if let Some(members) = map.get_mut(room) {
                members.remove(&connection);
                if members.is_empty() {
                    map.remove(room);
                }
            }
        }
    }

    pub async fn members(&self, room: &str) -> HashSet<ConnectionId> {
        self.rooms
            .read()
            .await
            .get(room)
            .cloned()
            .unwrap_or_default()
    }

    pub async fn summary(&self, room: &str) -> Option<RoomSummary> {
        self.rooms.read().await.get(room).map(|members| RoomSummary {
            name: room.to_string(),
            members: members.len(),
        })
    }

    /// Every live room, ordered by name
    pub async fn summaries(&self) -> Vec<RoomSummary> {
        let mut summaries: Vec<RoomSummary> = self
            .rooms
            .read()
            .await
            .iter()
            .map(|(name, members)| RoomSummary {
                name: name.clone(),
                members: members.len(),
            })
            .collect();
        summaries.sort_by(|a, b| a.name.cmp(&b.name));
        summaries
    }
}
