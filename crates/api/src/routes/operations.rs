//! Route definitions for front-desk `/operations`.

use axum::routing::post;
use axum::Router;

use crate::handlers::operations;
use crate::state::AppState;

/// Routes mounted at `/operations`.
///
/// ```text
/// POST /check-in                -> check_in
/// POST /check-out/{booking_id}  -> check_out
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/check-in", post(operations::check_in))
        .route("/check-out/{booking_id}", post(operations::check_out))
}
