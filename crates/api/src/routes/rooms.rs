//! Route definitions for the `/rooms` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::rooms;
use crate::state::AppState;

/// Routes mounted at `/rooms`.
///
/// ```text
/// GET  /                         -> list_rooms
/// POST /                         -> create_room
/// GET  /available                -> available_rooms
/// GET  /{room_ref}/availability  -> room_availability
/// PUT  /{room_ref}/status        -> update_room_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(rooms::list_rooms).post(rooms::create_room))
        .route("/available", get(rooms::available_rooms))
        .route("/{room_ref}/availability", get(rooms::room_availability))
        .route("/{room_ref}/status", put(rooms::update_room_status))
}
