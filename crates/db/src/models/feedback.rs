//! Checkout feedback model.

use innkeep_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `customer_feedback` table. One per completed booking.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Feedback {
    pub id: DbId,
    pub booking_id: DbId,
    pub customer_id: DbId,
    pub hotel_id: DbId,
    pub rating: i16,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct CreateFeedback {
    pub booking_id: DbId,
    pub customer_id: DbId,
    pub hotel_id: DbId,
    pub rating: i16,
    pub notes: Option<String>,
}
