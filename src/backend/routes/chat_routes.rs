/**
 * Chat Route Handlers
 *
 * HTTP view of the chat rooms kept by the socket server. Every route here
 * requires an authenticated user.
 *
 * # Routes
 *
 * - `GET /chat` - Current user and every live room
 * - `GET /chat/rooms/{room}` - One room, 404 when nobody is in it
 */

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Serialize;

use crate::backend::auth::handlers::types::UserResponse;
use crate::backend::error::BackendError;
use crate::backend::middleware::auth::AuthUser;
use crate::backend::realtime::rooms::{RoomRegistry, RoomSummary};
use crate::backend::server::state::AppState;

/// Response of `GET /chat`
#[derive(Debug, Serialize)]
pub struct ChatOverview {
    pub user: UserResponse,
    pub rooms: Vec<RoomSummary>,
}

/// Configure chat-related routes
///
/// Mounts the chat collection under `/chat` on the given router.
pub fn configure_chat_routes(router: Router<AppState>) -> Router<AppState> {
    router.nest("/chat", chat_routes())
}

fn chat_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(chat_index))
        .route("/rooms/{room}", get(room_detail))
}

async fn chat_index(
    AuthUser(user): AuthUser,
    State(rooms): State<Arc<RoomRegistry>>,
) -> Json<ChatOverview> {
    Json(ChatOverview {
        user: UserResponse::from(&user),
        rooms: rooms.summaries().await,
    })
}

async fn room_detail(
    AuthUser(_user): AuthUser,
    Path(room): Path<String>,
    State(rooms): State<Arc<RoomRegistry>>,
) -> Result<Json<RoomSummary>, BackendError> {
    rooms
        .summary(&room)
        .await
        .map(Json)
        .ok_or_else(|| BackendError::not_found(format!("Room not found: {}", room)))
}
