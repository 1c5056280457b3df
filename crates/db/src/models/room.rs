//! Room model and DTOs.

use innkeep_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `rooms` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Room {
    pub id: DbId,
    pub hotel_id: DbId,
    pub room_number: String,
    pub room_type: Option<String>,
    pub rate: Decimal,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct CreateRoom {
    pub hotel_id: DbId,
    pub room_number: String,
    pub room_type: Option<String>,
    pub rate: Decimal,
}
