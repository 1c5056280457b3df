//! Check-out: close the Active booking, free the room, record feedback.
//!
//! All writes happen in the caller's unit of work, so a failure anywhere
//! (for example a duplicate feedback row) leaves the booking Active.

use chrono::Utc;
use innkeep_core::booking::{checkout_status, BookingStatus};
use innkeep_core::error::CoreError;
use innkeep_core::feedback::validate_rating;
use innkeep_core::money::validate_optional_amount;
use innkeep_core::room::{RoomRef, RoomStatus};
use innkeep_core::types::{DbId, Timestamp};
use innkeep_db::models::booking::{Booking, CompleteBooking};
use innkeep_db::models::feedback::{CreateFeedback, Feedback};
use innkeep_db::models::room::Room;
use innkeep_db::repositories::{BookingRepo, CustomerRepo, FeedbackRepo, RoomRepo};
use innkeep_db::UnitOfWork;
use rust_decimal::Decimal;
use serde::Serialize;

use super::rooms::resolve_room;
use super::Actor;
use crate::error::AppResult;

/// Which booking to close.
#[derive(Debug, Clone)]
pub enum CheckoutTarget {
    Booking(DbId),
    /// The room's Active booking; the latest check-in wins if several exist.
    Room(RoomRef),
}

#[derive(Debug, Clone, Default)]
pub struct CheckoutRequest {
    /// `None` keeps the amount recorded at booking time.
    pub total_amount: Option<Decimal>,
    pub cash_amount: Option<Decimal>,
    pub card_amount: Option<Decimal>,
    /// Defaults to `Completed`.
    pub status: Option<String>,
    /// Defaults to now.
    pub actual_check_out_at: Option<Timestamp>,
    /// Feedback is recorded only when a rating is given.
    pub rating: Option<i16>,
    pub feedback_notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CheckoutOutcome {
    pub booking: Booking,
    pub room: Room,
    pub feedback: Option<Feedback>,
}

pub async fn check_out(
    uow: &mut UnitOfWork,
    actor: Actor,
    target: CheckoutTarget,
    req: CheckoutRequest,
) -> AppResult<CheckoutOutcome> {
    let status = checkout_status(req.status.as_deref())?;
    let rating = req.rating.map(validate_rating).transpose()?;
    let total_amount = validate_optional_amount("total_amount", req.total_amount)?;
    let cash_amount = validate_optional_amount("cash_amount", req.cash_amount)?;
    let card_amount = validate_optional_amount("card_amount", req.card_amount)?;

    let booking = locate_active(uow, actor, &target).await?;

    let booking = BookingRepo::complete(
        uow.conn(),
        booking.id,
        &CompleteBooking {
            status: status.as_str().to_string(),
            actual_check_out_at: req.actual_check_out_at.unwrap_or_else(Utc::now),
            total_amount,
            cash_amount,
            card_amount,
        },
    )
    .await?
    .ok_or_else(|| CoreError::not_found("Active booking", booking.id))?;

    let room = RoomRepo::set_status(uow.conn(), booking.room_id, RoomStatus::Available.as_str()).await?;

    let feedback = match rating {
        Some(rating) => {
            let feedback = FeedbackRepo::create(
                uow.conn(),
                &CreateFeedback {
                    booking_id: booking.id,
                    customer_id: booking.customer_id,
                    hotel_id: booking.hotel_id,
                    rating,
                    notes: req.feedback_notes,
                },
            )
            .await?;
            CustomerRepo::refresh_average_rating(uow.conn(), booking.customer_id).await?;
            Some(feedback)
        }
        None => None,
    };

    tracing::info!(
        booking_id = booking.id,
        room_id = room.id,
        rated = feedback.is_some(),
        "Guest checked out"
    );
    Ok(CheckoutOutcome {
        booking,
        room,
        feedback,
    })
}

/// Find and lock the Active booking for `target` within the actor's hotel.
async fn locate_active(uow: &mut UnitOfWork, actor: Actor, target: &CheckoutTarget) -> AppResult<Booking> {
    match target {
        CheckoutTarget::Booking(id) => {
            let booking = BookingRepo::find_by_id_for_update(uow.conn(), *id)
                .await?
                .ok_or_else(|| CoreError::not_found("Booking", id))?;
            actor.ensure_hotel("Booking", booking.hotel_id)?;
            if BookingStatus::parse(&booking.status)?.is_terminal() {
                return Err(CoreError::not_found("Active booking", id).into());
            }
            Ok(booking)
        }
        CheckoutTarget::Room(room_ref) => {
            let room = resolve_room(uow.conn(), actor.hotel_id, room_ref).await?;
            let booking = BookingRepo::find_active_for_room_for_update(uow.conn(), room.id)
                .await?
                .ok_or_else(|| CoreError::not_found("Active booking for room", &room.room_number))?;
            Ok(booking)
        }
    }
}
