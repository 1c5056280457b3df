//! Hotel onboarding: one hotel, its owner account, and a room per layout
//! entry, all in one unit of work.
//!
//! The layout is validated before the first write. Any store-level
//! violation after that aborts the whole unit of work, so a failed
//! registration leaves no hotel, user, or room behind.

use chrono::Utc;
use innkeep_core::error::CoreError;
use innkeep_core::identity::validate_password;
use innkeep_core::money::validate_amount;
use innkeep_core::registration::{compose_address, validate_room_numbers, DEFAULT_TERMS};
use innkeep_core::types::DbId;
use innkeep_db::models::hotel::CreateHotel;
use innkeep_db::models::room::CreateRoom;
use innkeep_db::models::user::CreateHotelUser;
use innkeep_db::repositories::{HotelRepo, RoomRepo, UserRepo};
use innkeep_db::UnitOfWork;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};

/// One room on a floor plan. Position fields are kept for the front-end
/// layout editor and stored verbatim.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RoomLayout {
    #[serde(default)]
    pub id: Option<String>,
    pub number: String,
    #[serde(rename = "type", default)]
    pub room_type: Option<String>,
    #[serde(default)]
    pub rate: Decimal,
    #[serde(default)]
    pub x: Option<i32>,
    #[serde(default)]
    pub y: Option<i32>,
    #[serde(default)]
    pub width: Option<i32>,
    #[serde(default)]
    pub height: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FloorLayout {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    pub rooms: Vec<RoomLayout>,
}

#[derive(Debug, Clone)]
pub struct Registration {
    pub hotel_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub street_address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub owner_name: Option<String>,
    pub owner_email: String,
    pub password: String,
    pub floors: Vec<FloorLayout>,
    pub receipt_settings: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct RegistrationOutcome {
    pub hotel_id: DbId,
    pub owner_user_id: DbId,
    pub rooms_created: usize,
}

pub async fn register_hotel(uow: &mut UnitOfWork, reg: Registration) -> AppResult<RegistrationOutcome> {
    let room_numbers =
        validate_room_numbers(reg.floors.iter().flat_map(|f| f.rooms.iter()).map(|r| r.number.as_str()))?;
    for layout in reg.floors.iter().flat_map(|f| f.rooms.iter()) {
        validate_amount(&format!("Rate of room {}", layout.number.trim()), layout.rate)?;
    }
    validate_password(&reg.password)?;

    let username = reg.owner_email.trim().to_string();
    if UserRepo::find_by_username(uow.conn(), &username).await?.is_some() {
        return Err(CoreError::Conflict("User with this email already exists".into()).into());
    }

    let password_hash = hash_password(&reg.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    let layout_json = serde_json::to_value(&reg.floors)
        .map_err(|e| AppError::InternalError(format!("Layout serialization error: {e}")))?;

    let hotel = HotelRepo::create(
        uow.conn(),
        &CreateHotel {
            name: reg.hotel_name.trim().to_string(),
            address: compose_address(&reg.street_address, &reg.city, &reg.state, &reg.zip_code, &reg.country),
            phone_number: reg.phone,
            email: Some(reg.email.trim().to_string()),
            terms_and_conditions: DEFAULT_TERMS.to_string(),
            valid_from: Utc::now(),
            layout_json,
            receipt_settings_json: reg.receipt_settings,
        },
    )
    .await?;

    let owner = UserRepo::create(
        uow.conn(),
        &CreateHotelUser {
            hotel_id: hotel.id,
            username,
            full_name: reg.owner_name,
            password_hash,
        },
    )
    .await?;

    let rooms_created = room_numbers.len();
    let layout_rooms = reg.floors.into_iter().flat_map(|f| f.rooms);
    for (room_number, layout) in room_numbers.into_iter().zip(layout_rooms) {
        RoomRepo::create(
            uow.conn(),
            &CreateRoom {
                hotel_id: hotel.id,
                room_number,
                room_type: layout.room_type,
                rate: layout.rate,
            },
        )
        .await?;
    }

    tracing::info!(hotel_id = hotel.id, owner_user_id = owner.id, rooms_created, "Hotel registered");
    Ok(RegistrationOutcome {
        hotel_id: hotel.id,
        owner_user_id: owner.id,
        rooms_created,
    })
}
