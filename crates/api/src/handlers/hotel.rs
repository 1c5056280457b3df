//! Handlers for the `/hotel` resource.

use axum::extract::{Path, State};
use axum::Json;
use innkeep_core::types::DbId;

use crate::engine::identity::{self, HotelProfile};
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/hotel
pub async fn own_hotel(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<HotelProfile>>> {
    let mut conn = state.pool.acquire().await?;
    let hotel = identity::get_hotel(&mut conn, auth.actor(), auth.hotel_id).await?;
    Ok(Json(DataResponse { data: hotel }))
}

/// GET /api/v1/hotel/{id}
pub async fn get_hotel(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<HotelProfile>>> {
    let mut conn = state.pool.acquire().await?;
    let hotel = identity::get_hotel(&mut conn, auth.actor(), id).await?;
    Ok(Json(DataResponse { data: hotel }))
}
