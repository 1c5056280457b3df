//! Hotel staff account model and DTOs.

use innkeep_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full row from the `hotel_users` table.
///
/// Contains the password hash and reset token hash. Never serialize this
/// directly; use [`HotelUserResponse`].
#[derive(Debug, Clone, FromRow)]
pub struct HotelUser {
    pub id: DbId,
    pub hotel_id: DbId,
    pub username: String,
    pub full_name: Option<String>,
    pub password_hash: String,
    pub is_active: bool,
    pub reset_token_hash: Option<String>,
    pub reset_token_expires_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct HotelUserResponse {
    pub id: DbId,
    pub hotel_id: DbId,
    pub username: String,
    pub full_name: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
}

impl From<HotelUser> for HotelUserResponse {
    fn from(user: HotelUser) -> Self {
        Self {
            id: user.id,
            hotel_id: user.hotel_id,
            username: user.username,
            full_name: user.full_name,
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateHotelUser {
    pub hotel_id: DbId,
    pub username: String,
    pub full_name: Option<String>,
    pub password_hash: String,
}
