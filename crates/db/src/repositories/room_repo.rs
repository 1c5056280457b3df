//! Repository for the `rooms` table.

use innkeep_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::room::{CreateRoom, Room};

const COLUMNS: &str = "id, hotel_id, room_number, room_type, rate, status, created_at, updated_at";

pub struct RoomRepo;

impl RoomRepo {
    /// Insert a room. Fails with `uq_rooms_hotel_room_number` on a duplicate
    /// number within the hotel.
    pub async fn create<'e>(db: impl PgExecutor<'e>, input: &CreateRoom) -> Result<Room, sqlx::Error> {
        let query = format!(
            "INSERT INTO rooms (hotel_id, room_number, room_type, rate)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Room>(&query)
            .bind(input.hotel_id)
            .bind(&input.room_number)
            .bind(&input.room_type)
            .bind(input.rate)
            .fetch_one(db)
            .await
    }

    /// Find a room by id regardless of hotel. Callers check ownership.
    pub async fn find_by_id<'e>(db: impl PgExecutor<'e>, id: DbId) -> Result<Option<Room>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM rooms WHERE id = $1");
        sqlx::query_as::<_, Room>(&query)
            .bind(id)
            .fetch_optional(db)
            .await
    }

    pub async fn find_by_number<'e>(
        db: impl PgExecutor<'e>,
        hotel_id: DbId,
        room_number: &str,
    ) -> Result<Option<Room>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM rooms WHERE hotel_id = $1 AND room_number = $2");
        sqlx::query_as::<_, Room>(&query)
            .bind(hotel_id)
            .bind(room_number)
            .fetch_optional(db)
            .await
    }

    pub async fn list_for_hotel<'e>(db: impl PgExecutor<'e>, hotel_id: DbId) -> Result<Vec<Room>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM rooms WHERE hotel_id = $1 ORDER BY id");
        sqlx::query_as::<_, Room>(&query)
            .bind(hotel_id)
            .fetch_all(db)
            .await
    }

    pub async fn set_status<'e>(
        db: impl PgExecutor<'e>,
        id: DbId,
        status: &str,
    ) -> Result<Room, sqlx::Error> {
        let query = format!("UPDATE rooms SET status = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Room>(&query)
            .bind(id)
            .bind(status)
            .fetch_one(db)
            .await
    }
}
