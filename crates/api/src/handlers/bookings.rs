//! Handlers for the `/bookings` resource: booking creation, customer lookup
//! and history, current stay, and check-out by room.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use innkeep_core::customer::{CustomerRef, GuestInput};
use innkeep_core::error::CoreError;
use innkeep_core::room::RoomRef;
use innkeep_core::types::{DbId, Timestamp};
use innkeep_db::models::booking::{Booking, CurrentStay};
use innkeep_db::UnitOfWork;
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use crate::engine::booking::{self, BookingRequest};
use crate::engine::checkout::{self, CheckoutOutcome, CheckoutRequest, CheckoutTarget};
use crate::engine::customers::{self, CustomerLookup};
use crate::engine::history::{self, CustomerHistory};
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::query::{GovIdParams, PaginationParams};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// A room given either as a JSON number (id) or string (id or room number).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RoomRefInput {
    Id(DbId),
    Number(String),
}

impl RoomRefInput {
    pub fn into_ref(self) -> Result<RoomRef, CoreError> {
        match self {
            Self::Id(id) => Ok(RoomRef::from_id(id)),
            Self::Number(s) => RoomRef::parse(&s),
        }
    }
}

/// Request body for `POST /bookings` and `POST /operations/check-in`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBookingRequest {
    #[serde(alias = "room_id")]
    pub room: RoomRefInput,
    pub customer_id: Option<DbId>,
    pub guest_name: Option<String>,
    pub guest_gov_id: Option<String>,
    pub guest_phone: Option<String>,
    pub guest_address: Option<String>,
    pub guest_city: Option<String>,
    pub guest_state: Option<String>,
    pub guest_zip_code: Option<String>,
    pub check_in_at: Option<Timestamp>,
    pub expected_check_out_at: Timestamp,
    #[validate(range(min = 1))]
    pub num_guests: Option<i32>,
    pub notes: Option<String>,
    pub total_amount: Option<Decimal>,
    pub cash_amount: Option<Decimal>,
    pub card_amount: Option<Decimal>,
    pub status: Option<String>,
}

impl CreateBookingRequest {
    pub fn into_engine(self) -> Result<BookingRequest, CoreError> {
        let customer = CustomerRef::from_request(
            self.customer_id,
            GuestInput {
                name: self.guest_name,
                gov_id: self.guest_gov_id,
                phone: self.guest_phone,
                address: self.guest_address,
                city: self.guest_city,
                state: self.guest_state,
                zip_code: self.guest_zip_code,
            },
        )?;
        Ok(BookingRequest {
            room: self.room.into_ref()?,
            customer,
            check_in_at: self.check_in_at,
            expected_check_out_at: self.expected_check_out_at,
            num_guests: self.num_guests,
            notes: self.notes,
            total_amount: self.total_amount,
            cash_amount: self.cash_amount,
            card_amount: self.card_amount,
            status: self.status,
        })
    }
}

/// Request body for both check-out endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct CheckoutBody {
    pub total_amount: Option<Decimal>,
    pub cash_amount: Option<Decimal>,
    pub card_amount: Option<Decimal>,
    pub status: Option<String>,
    pub actual_check_out_at: Option<Timestamp>,
    pub rating: Option<i16>,
    #[serde(alias = "notes")]
    pub feedback_notes: Option<String>,
}

impl From<CheckoutBody> for CheckoutRequest {
    fn from(body: CheckoutBody) -> Self {
        Self {
            total_amount: body.total_amount,
            cash_amount: body.cash_amount,
            card_amount: body.card_amount,
            status: body.status,
            actual_check_out_at: body.actual_check_out_at,
            rating: body.rating,
            feedback_notes: body.feedback_notes,
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/bookings
pub async fn create_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateBookingRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Booking>>)> {
    input.validate()?;
    let request = input.into_engine()?;

    let mut uow = UnitOfWork::begin(&state.pool).await?;
    let booking = booking::create_booking(&mut uow, auth.actor(), request).await?;
    uow.commit().await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: booking })))
}

/// GET /api/v1/bookings/customers/lookup?gov_id=
pub async fn lookup_customer(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(params): Query<GovIdParams>,
) -> AppResult<Json<DataResponse<CustomerLookup>>> {
    let mut conn = state.pool.acquire().await?;
    let lookup = customers::lookup_customer(&mut conn, &params.gov_id).await?;
    Ok(Json(DataResponse { data: lookup }))
}

/// GET /api/v1/bookings/customer/{id}?limit=&offset=
pub async fn customer_history(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(customer_id): Path<DbId>,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<CustomerHistory>>> {
    let mut conn = state.pool.acquire().await?;
    let history =
        history::customer_history(&mut conn, auth.actor(), customer_id, page.limit, page.offset).await?;
    Ok(Json(DataResponse { data: history }))
}

/// GET /api/v1/bookings/room/{room_ref}/current
pub async fn current_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(room_ref): Path<String>,
) -> AppResult<Json<DataResponse<CurrentStay>>> {
    let room_ref = RoomRef::parse(&room_ref)?;
    let mut conn = state.pool.acquire().await?;
    let stay = booking::current_booking_for_room(&mut conn, auth.actor(), &room_ref).await?;
    Ok(Json(DataResponse { data: stay }))
}

/// POST /api/v1/bookings/room/{room_ref}/checkout
pub async fn checkout_room(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(room_ref): Path<String>,
    body: Option<Json<CheckoutBody>>,
) -> AppResult<Json<DataResponse<CheckoutOutcome>>> {
    let target = CheckoutTarget::Room(RoomRef::parse(&room_ref)?);
    let body = body.map(|Json(b)| b).unwrap_or_default();

    let mut uow = UnitOfWork::begin(&state.pool).await?;
    let outcome = checkout::check_out(&mut uow, auth.actor(), target, body.into()).await?;
    uow.commit().await?;
    Ok(Json(DataResponse { data: outcome }))
}
