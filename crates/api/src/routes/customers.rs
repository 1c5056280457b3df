//! Route definitions for the `/customers` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::customers;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(customers::register_customer))
}
