//! Booking creation and check-in.
//!
//! Both run the same pipeline inside one unit of work: resolve the room
//! within the tenant, resolve the customer, take the per-room advisory lock,
//! re-run the overlap check, insert. The exclusion constraint on `bookings`
//! backs the lock; a violation there surfaces as `Conflict` too.

use chrono::Utc;
use innkeep_core::availability::StayInterval;
use innkeep_core::booking::{initial_status, DEFAULT_NUM_GUESTS};
use innkeep_core::customer::CustomerRef;
use innkeep_core::error::CoreError;
use innkeep_core::money::validate_optional_amount;
use innkeep_core::room::{RoomRef, RoomStatus};
use innkeep_core::types::Timestamp;
use innkeep_db::models::booking::{Booking, CreateBooking, CurrentStay};
use innkeep_db::repositories::{BookingRepo, RoomRepo};
use innkeep_db::UnitOfWork;
use rust_decimal::Decimal;
use sqlx::PgConnection;

use super::customers::resolve_customer;
use super::rooms::resolve_room;
use super::Actor;
use crate::error::AppResult;

/// Everything needed to place a booking.
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub room: RoomRef,
    pub customer: CustomerRef,
    /// Defaults to now.
    pub check_in_at: Option<Timestamp>,
    pub expected_check_out_at: Timestamp,
    pub num_guests: Option<i32>,
    pub notes: Option<String>,
    pub total_amount: Option<Decimal>,
    pub cash_amount: Option<Decimal>,
    pub card_amount: Option<Decimal>,
    /// Only `Active` is accepted.
    pub status: Option<String>,
}

/// Place a booking (a reservation; the room's status flag is untouched).
pub async fn create_booking(uow: &mut UnitOfWork, actor: Actor, req: BookingRequest) -> AppResult<Booking> {
    let booking = place(uow, actor, req).await?;
    tracing::info!(
        booking_id = booking.id,
        hotel_id = booking.hotel_id,
        room_id = booking.room_id,
        customer_id = booking.customer_id,
        "Booking created"
    );
    Ok(booking)
}

/// Check a guest in: place the booking and mark the room `Occupied`.
pub async fn check_in(uow: &mut UnitOfWork, actor: Actor, req: BookingRequest) -> AppResult<Booking> {
    let booking = place(uow, actor, req).await?;
    RoomRepo::set_status(uow.conn(), booking.room_id, RoomStatus::Occupied.as_str()).await?;
    tracing::info!(
        booking_id = booking.id,
        hotel_id = booking.hotel_id,
        room_id = booking.room_id,
        "Guest checked in"
    );
    Ok(booking)
}

async fn place(uow: &mut UnitOfWork, actor: Actor, req: BookingRequest) -> AppResult<Booking> {
    let status = initial_status(req.status.as_deref())?;
    let stay = StayInterval::new(req.check_in_at.unwrap_or_else(Utc::now), req.expected_check_out_at)?;
    let num_guests = req.num_guests.unwrap_or(DEFAULT_NUM_GUESTS);
    if num_guests < 1 {
        return Err(CoreError::Validation("num_guests must be at least 1".into()).into());
    }
    let total_amount = validate_optional_amount("total_amount", req.total_amount)?.unwrap_or(Decimal::ZERO);
    let cash_amount = validate_optional_amount("cash_amount", req.cash_amount)?.unwrap_or(Decimal::ZERO);
    let card_amount = validate_optional_amount("card_amount", req.card_amount)?.unwrap_or(Decimal::ZERO);

    let room = resolve_room(uow.conn(), actor.hotel_id, &req.room).await?;
    let customer_id = resolve_customer(uow.conn(), &req.customer).await?;

    BookingRepo::lock_room(uow.conn(), room.id).await?;
    if !BookingRepo::is_room_available(uow.conn(), room.id, &stay).await? {
        tracing::warn!(
            room_id = room.id,
            check_in_at = %stay.check_in(),
            check_out_at = %stay.check_out(),
            "Rejected overlapping booking"
        );
        return Err(CoreError::Conflict(format!(
            "Room {} is not available for the requested period",
            room.room_number
        ))
        .into());
    }

    let booking = BookingRepo::create(
        uow.conn(),
        &CreateBooking {
            hotel_id: actor.hotel_id,
            customer_id,
            room_id: room.id,
            created_by_user_id: actor.user_id,
            check_in_at: stay.check_in(),
            expected_check_out_at: stay.check_out(),
            num_guests,
            notes: req.notes,
            total_amount,
            cash_amount,
            card_amount,
            status: status.as_str().to_string(),
        },
    )
    .await?;
    Ok(booking)
}

/// The Active booking currently holding a room, with guest details.
pub async fn current_booking_for_room(
    conn: &mut PgConnection,
    actor: Actor,
    room_ref: &RoomRef,
) -> AppResult<CurrentStay> {
    let room = resolve_room(&mut *conn, actor.hotel_id, room_ref).await?;
    BookingRepo::find_current_stay(&mut *conn, room.id)
        .await?
        .ok_or_else(|| CoreError::not_found("Active booking for room", &room.room_number).into())
}
