//! Real-time Channel Module
//!
//! WebSocket endpoint for chat rooms. Clients join rooms by name and get an
//! acknowledgement back on their own connection.
//!
//! # Module Structure
//!
//! ```text
//! realtime/
//! ├── mod.rs        - Module exports and documentation
//! ├── rooms.rs      - Shared room membership registry
//! ├── connection.rs - Per-connection event handler
//! └── socket.rs     - WebSocket upgrade and receive loop
//! ```
//!
//! # Protocol
//!
//! Frames are JSON text messages `{"event": <name>, "data": <payload>}`:
//!
//! ```text
//! client → {"event":"connectToRoom","data":"lobby"}
//! server → {"event":"newMessage","data":"Hello World"}
//! ```
//!
//! Unknown events and malformed frames are ignored. Closing the socket
//! removes the connection from every room it joined.

pub mod connection;
pub mod rooms;
pub mod socket;

pub use connection::ConnectionHandler;
pub use rooms::{ConnectionId, RoomRegistry, RoomSummary};
pub use socket::socket_handler;
