//! Room resolution, inventory, and availability.

use std::collections::HashSet;

use innkeep_core::availability::{free_rooms, StayInterval};
use innkeep_core::error::CoreError;
use innkeep_core::money::validate_optional_amount;
use innkeep_core::room::{RoomRef, RoomStatus};
use innkeep_core::types::{DbId, Timestamp};
use innkeep_db::models::room::{CreateRoom, Room};
use innkeep_db::repositories::{BookingRepo, RoomRepo};
use innkeep_db::UnitOfWork;
use rust_decimal::Decimal;
use sqlx::PgConnection;

use super::Actor;
use crate::error::AppResult;

/// Resolve a room reference to a room of `hotel_id`.
///
/// An id that names a room of this hotel wins. Otherwise the reference is
/// tried as a room number within the hotel. If neither matches but the id
/// names a room of another hotel, the result is `Forbidden`; if nothing
/// matches at all, `NotFound`.
pub async fn resolve_room(
    conn: &mut PgConnection,
    hotel_id: DbId,
    room_ref: &RoomRef,
) -> AppResult<Room> {
    let mut foreign = false;
    if let Some(id) = room_ref.as_id() {
        if let Some(room) = RoomRepo::find_by_id(&mut *conn, id).await? {
            if room.hotel_id == hotel_id {
                return Ok(room);
            }
            foreign = true;
        }
    }

    if let Some(room) = RoomRepo::find_by_number(&mut *conn, hotel_id, room_ref.as_number()).await? {
        return Ok(room);
    }

    if foreign {
        return Err(CoreError::Forbidden(format!("Room {room_ref} belongs to another hotel")).into());
    }
    Err(CoreError::not_found("Room", room_ref).into())
}

/// Point check: is the room free for `[check_in, check_out)`?
pub async fn is_room_available(
    conn: &mut PgConnection,
    actor: Actor,
    room_ref: &RoomRef,
    check_in: Timestamp,
    check_out: Timestamp,
) -> AppResult<bool> {
    let stay = StayInterval::new(check_in, check_out)?;
    let room = resolve_room(&mut *conn, actor.hotel_id, room_ref).await?;
    Ok(BookingRepo::is_room_available(&mut *conn, room.id, &stay).await?)
}

/// Bulk search: the hotel's rooms with no overlapping Active booking.
pub async fn find_available_rooms(
    conn: &mut PgConnection,
    actor: Actor,
    check_in: Timestamp,
    check_out: Timestamp,
) -> AppResult<Vec<Room>> {
    let stay = StayInterval::new(check_in, check_out)?;
    let rooms = RoomRepo::list_for_hotel(&mut *conn, actor.hotel_id).await?;
    let booked: HashSet<DbId> = BookingRepo::booked_room_ids(&mut *conn, actor.hotel_id, &stay)
        .await?
        .into_iter()
        .collect();
    Ok(free_rooms(rooms, &booked, |room| room.id))
}

pub async fn list_rooms(conn: &mut PgConnection, actor: Actor) -> AppResult<Vec<Room>> {
    Ok(RoomRepo::list_for_hotel(conn, actor.hotel_id).await?)
}

/// Add a room to the actor's hotel.
pub async fn add_room(
    uow: &mut UnitOfWork,
    actor: Actor,
    room_number: &str,
    room_type: Option<String>,
    rate: Option<Decimal>,
) -> AppResult<Room> {
    let room_number = room_number.trim();
    if room_number.is_empty() {
        return Err(CoreError::Validation("Room number must not be empty".into()).into());
    }
    let rate = validate_optional_amount("rate", rate)?.unwrap_or(Decimal::ZERO);
    if RoomRepo::find_by_number(uow.conn(), actor.hotel_id, room_number)
        .await?
        .is_some()
    {
        return Err(CoreError::Conflict(format!("Room number {room_number} already exists")).into());
    }

    let room = RoomRepo::create(
        uow.conn(),
        &CreateRoom {
            hotel_id: actor.hotel_id,
            room_number: room_number.to_string(),
            room_type,
            rate,
        },
    )
    .await?;
    tracing::info!(hotel_id = actor.hotel_id, room_id = room.id, room_number, "Room added");
    Ok(room)
}

/// Set the housekeeping status of one of the actor's rooms.
pub async fn set_room_status(
    uow: &mut UnitOfWork,
    actor: Actor,
    room_ref: &RoomRef,
    status: &str,
) -> AppResult<Room> {
    let status = RoomStatus::parse(status.trim())?;
    let room = resolve_room(uow.conn(), actor.hotel_id, room_ref).await?;
    let room = RoomRepo::set_status(uow.conn(), room.id, status.as_str()).await?;
    tracing::info!(room_id = room.id, status = status.as_str(), "Room status changed");
    Ok(room)
}
