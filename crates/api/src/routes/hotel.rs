//! Route definitions for the `/hotel` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::hotel;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(hotel::own_hotel))
        .route("/{id}", get(hotel::get_hotel))
}
