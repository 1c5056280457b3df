//! Booking model, insert/complete DTOs, and the joined current-stay view.

use innkeep_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `bookings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Booking {
    pub id: DbId,
    pub hotel_id: DbId,
    pub customer_id: DbId,
    pub room_id: DbId,
    pub created_by_user_id: Option<DbId>,
    pub check_in_at: Timestamp,
    pub expected_check_out_at: Timestamp,
    pub actual_check_out_at: Option<Timestamp>,
    pub num_guests: i32,
    pub notes: Option<String>,
    pub total_amount: Decimal,
    pub cash_amount: Decimal,
    pub card_amount: Decimal,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct CreateBooking {
    pub hotel_id: DbId,
    pub customer_id: DbId,
    pub room_id: DbId,
    pub created_by_user_id: DbId,
    pub check_in_at: Timestamp,
    pub expected_check_out_at: Timestamp,
    pub num_guests: i32,
    pub notes: Option<String>,
    pub total_amount: Decimal,
    pub cash_amount: Decimal,
    pub card_amount: Decimal,
    pub status: String,
}

/// Final figures written when a booking is closed.
#[derive(Debug, Clone)]
pub struct CompleteBooking {
    pub status: String,
    pub actual_check_out_at: Timestamp,
    /// `None` keeps the amount recorded at booking time.
    pub total_amount: Option<Decimal>,
    pub cash_amount: Option<Decimal>,
    pub card_amount: Option<Decimal>,
}

/// The Active booking currently holding a room, joined with its guest.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CurrentStay {
    pub booking_id: DbId,
    pub room_id: DbId,
    pub room_number: String,
    pub customer_id: DbId,
    pub guest_name: String,
    pub phone: Option<String>,
    pub check_in_at: Timestamp,
    pub expected_check_out_at: Timestamp,
    pub num_guests: i32,
    pub total_amount: Decimal,
    pub status: String,
}
