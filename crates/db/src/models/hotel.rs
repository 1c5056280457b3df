//! Hotel (tenant root) model and DTOs.

use innkeep_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `hotels` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Hotel {
    pub id: DbId,
    pub name: String,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub terms_and_conditions: Option<String>,
    pub subscription_valid: bool,
    pub valid_from: Option<Timestamp>,
    pub valid_to: Option<Timestamp>,
    pub layout_json: Option<serde_json::Value>,
    pub receipt_settings_json: Option<serde_json::Value>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Insert DTO used by registration.
#[derive(Debug, Clone)]
pub struct CreateHotel {
    pub name: String,
    pub address: String,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub terms_and_conditions: String,
    pub valid_from: Timestamp,
    pub layout_json: serde_json::Value,
    pub receipt_settings_json: Option<serde_json::Value>,
}
