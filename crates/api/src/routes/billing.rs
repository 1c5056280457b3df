//! Route definitions for the `/billing` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::billing;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/webhook", post(billing::webhook))
}
