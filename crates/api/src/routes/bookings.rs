//! Route definitions for the `/bookings` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::bookings;
use crate::state::AppState;

/// Routes mounted at `/bookings`.
///
/// ```text
/// POST /                           -> create_booking
/// GET  /customers/lookup           -> lookup_customer
/// GET  /customer/{id}              -> customer_history
/// GET  /room/{room_ref}/current    -> current_booking
/// POST /room/{room_ref}/checkout   -> checkout_room
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(bookings::create_booking))
        .route("/customers/lookup", get(bookings::lookup_customer))
        .route("/customer/{id}", get(bookings::customer_history))
        .route("/room/{room_ref}/current", get(bookings::current_booking))
        .route("/room/{room_ref}/checkout", post(bookings::checkout_room))
}
