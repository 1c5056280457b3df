//! Front-desk operations: check-in and check-out by booking id.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use innkeep_core::types::DbId;
use innkeep_db::models::booking::Booking;
use innkeep_db::UnitOfWork;
use validator::Validate;

use super::bookings::{CheckoutBody, CreateBookingRequest};
use crate::engine::booking;
use crate::engine::checkout::{self, CheckoutOutcome, CheckoutTarget};
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/operations/check-in
pub async fn check_in(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateBookingRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Booking>>)> {
    input.validate()?;
    let request = input.into_engine()?;

    let mut uow = UnitOfWork::begin(&state.pool).await?;
    let booking = booking::check_in(&mut uow, auth.actor(), request).await?;
    uow.commit().await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: booking })))
}

/// POST /api/v1/operations/check-out/{booking_id}
pub async fn check_out(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(booking_id): Path<DbId>,
    body: Option<Json<CheckoutBody>>,
) -> AppResult<Json<DataResponse<CheckoutOutcome>>> {
    let body = body.map(|Json(b)| b).unwrap_or_default();

    let mut uow = UnitOfWork::begin(&state.pool).await?;
    let outcome =
        checkout::check_out(&mut uow, auth.actor(), CheckoutTarget::Booking(booking_id), body.into()).await?;
    uow.commit().await?;
    Ok(Json(DataResponse { data: outcome }))
}
