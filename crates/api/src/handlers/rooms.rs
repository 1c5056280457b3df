//! Handlers for the `/rooms` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use innkeep_core::room::RoomRef;
use innkeep_db::models::room::Room;
use innkeep_db::UnitOfWork;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::engine::rooms;
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::query::StayWindowParams;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateRoomRequest {
    pub room_number: String,
    pub room_type: Option<String>,
    pub rate: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRoomStatusRequest {
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct RoomAvailability {
    pub room_ref: String,
    pub available: bool,
}

/// GET /api/v1/rooms
pub async fn list_rooms(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Room>>>> {
    let mut conn = state.pool.acquire().await?;
    let rooms = rooms::list_rooms(&mut conn, auth.actor()).await?;
    Ok(Json(DataResponse { data: rooms }))
}

/// POST /api/v1/rooms
pub async fn create_room(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateRoomRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Room>>)> {
    let mut uow = UnitOfWork::begin(&state.pool).await?;
    let room = rooms::add_room(&mut uow, auth.actor(), &input.room_number, input.room_type, input.rate).await?;
    uow.commit().await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: room })))
}

/// GET /api/v1/rooms/available?check_in_at=&expected_check_out_at=
pub async fn available_rooms(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(window): Query<StayWindowParams>,
) -> AppResult<Json<DataResponse<Vec<Room>>>> {
    let mut conn = state.pool.acquire().await?;
    let rooms = rooms::find_available_rooms(
        &mut conn,
        auth.actor(),
        window.check_in_at,
        window.expected_check_out_at,
    )
    .await?;
    Ok(Json(DataResponse { data: rooms }))
}

/// GET /api/v1/rooms/{room_ref}/availability?check_in_at=&expected_check_out_at=
pub async fn room_availability(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(room_ref): Path<String>,
    Query(window): Query<StayWindowParams>,
) -> AppResult<Json<DataResponse<RoomAvailability>>> {
    let parsed = RoomRef::parse(&room_ref)?;
    let mut conn = state.pool.acquire().await?;
    let available = rooms::is_room_available(
        &mut conn,
        auth.actor(),
        &parsed,
        window.check_in_at,
        window.expected_check_out_at,
    )
    .await?;
    Ok(Json(DataResponse {
        data: RoomAvailability {
            room_ref: parsed.to_string(),
            available,
        },
    }))
}

/// PUT /api/v1/rooms/{room_ref}/status
pub async fn update_room_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(room_ref): Path<String>,
    Json(input): Json<UpdateRoomStatusRequest>,
) -> AppResult<Json<DataResponse<Room>>> {
    let room_ref = RoomRef::parse(&room_ref)?;
    let mut uow = UnitOfWork::begin(&state.pool).await?;
    let room = rooms::set_room_status(&mut uow, auth.actor(), &room_ref, &input.status).await?;
    uow.commit().await?;
    Ok(Json(DataResponse { data: room }))
}
