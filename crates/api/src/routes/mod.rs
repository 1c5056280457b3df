pub mod auth;
pub mod billing;
pub mod bookings;
pub mod customers;
pub mod health;
pub mod hotel;
pub mod operations;
pub mod rooms;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                   login (public)
/// /auth/register                                hotel + owner + rooms (public)
/// /auth/password-reset                          issue reset token (public)
/// /auth/password-reset/confirm                  set new password (public)
///
/// /users/me                                     current user
/// /users                                        create user in own hotel
/// /users/{id}                                   get user
///
/// /hotel                                        own hotel
/// /hotel/{id}                                   get hotel (own only)
///
/// /rooms                                        list, create
/// /rooms/available                              free rooms for a window
/// /rooms/{room_ref}/availability                point check for one room
/// /rooms/{room_ref}/status                      set housekeeping status (PUT)
///
/// /customers                                    register customer
///
/// /bookings                                     create booking
/// /bookings/customers/lookup                    lookup by gov ID
/// /bookings/customer/{id}                       stay history
/// /bookings/room/{room_ref}/current             current stay in room
/// /bookings/room/{room_ref}/checkout            check out the room's stay
///
/// /operations/check-in                          book + occupy room
/// /operations/check-out/{booking_id}            check out by booking
///
/// /billing/webhook                              signed payment events (public)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/hotel", hotel::router())
        .nest("/rooms", rooms::router())
        .nest("/customers", customers::router())
        .nest("/bookings", bookings::router())
        .nest("/operations", operations::router())
        .nest("/billing", billing::router())
}
