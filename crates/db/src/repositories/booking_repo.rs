//! Repository for the `bookings` table, including the availability queries.
//!
//! The point check and the bulk search share [`ACTIVE_OVERLAP`], so both are
//! driven by one predicate. Callers that check and then insert must hold
//! [`BookingRepo::lock_room`] for the room first.

use innkeep_core::availability::{StayInterval, ROOM_LOCK_NAMESPACE};
use innkeep_core::booking::STATUS_ACTIVE;
use innkeep_core::types::{DbId, Timestamp};
use sqlx::PgExecutor;

use crate::models::booking::{Booking, CompleteBooking, CreateBooking, CurrentStay};

const COLUMNS: &str = "id, hotel_id, customer_id, room_id, created_by_user_id, check_in_at, \
                       expected_check_out_at, actual_check_out_at, num_guests, notes, \
                       total_amount, cash_amount, card_amount, status, created_at, updated_at";

/// Active bookings whose `[check_in_at, expected_check_out_at)` overlaps
/// the requested `[$2, $3)`.
const ACTIVE_OVERLAP: &str =
    "status = 'Active' AND check_in_at < $3 AND expected_check_out_at > $2";

pub struct BookingRepo;

impl BookingRepo {
    // -- Availability ------------------------------------------------------

    /// Take the per-room transaction-scoped advisory lock. Released on
    /// commit or rollback.
    pub async fn lock_room<'e>(db: impl PgExecutor<'e>, room_id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT pg_advisory_xact_lock($1, ($2::bigint % 2147483647)::int)")
            .bind(ROOM_LOCK_NAMESPACE)
            .bind(room_id)
            .execute(db)
            .await?;
        Ok(())
    }

    /// `true` when no Active booking on the room overlaps `stay`.
    pub async fn is_room_available<'e>(
        db: impl PgExecutor<'e>,
        room_id: DbId,
        stay: &StayInterval,
    ) -> Result<bool, sqlx::Error> {
        let query = format!(
            "SELECT NOT EXISTS (SELECT 1 FROM bookings WHERE room_id = $1 AND {ACTIVE_OVERLAP})"
        );
        sqlx::query_scalar(&query)
            .bind(room_id)
            .bind(stay.check_in())
            .bind(stay.check_out())
            .fetch_one(db)
            .await
    }

    /// Ids of the hotel's rooms that have an Active booking overlapping `stay`.
    pub async fn booked_room_ids<'e>(
        db: impl PgExecutor<'e>,
        hotel_id: DbId,
        stay: &StayInterval,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        let query =
            format!("SELECT DISTINCT room_id FROM bookings WHERE hotel_id = $1 AND {ACTIVE_OVERLAP}");
        sqlx::query_scalar(&query)
            .bind(hotel_id)
            .bind(stay.check_in())
            .bind(stay.check_out())
            .fetch_all(db)
            .await
    }

    // -- Lifecycle ---------------------------------------------------------

    pub async fn create<'e>(db: impl PgExecutor<'e>, input: &CreateBooking) -> Result<Booking, sqlx::Error> {
        let query = format!(
            "INSERT INTO bookings
                (hotel_id, customer_id, room_id, created_by_user_id, check_in_at,
                 expected_check_out_at, num_guests, notes, total_amount, cash_amount,
                 card_amount, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(input.hotel_id)
            .bind(input.customer_id)
            .bind(input.room_id)
            .bind(input.created_by_user_id)
            .bind(input.check_in_at)
            .bind(input.expected_check_out_at)
            .bind(input.num_guests)
            .bind(&input.notes)
            .bind(input.total_amount)
            .bind(input.cash_amount)
            .bind(input.card_amount)
            .bind(&input.status)
            .fetch_one(db)
            .await
    }

    pub async fn find_by_id<'e>(db: impl PgExecutor<'e>, id: DbId) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bookings WHERE id = $1");
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .fetch_optional(db)
            .await
    }

    /// Same as [`find_by_id`](Self::find_by_id), locking the row.
    pub async fn find_by_id_for_update<'e>(
        db: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bookings WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .fetch_optional(db)
            .await
    }

    /// The room's Active booking with the latest check-in, locked.
    pub async fn find_active_for_room_for_update<'e>(
        db: impl PgExecutor<'e>,
        room_id: DbId,
    ) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM bookings
             WHERE room_id = $1 AND status = $2
             ORDER BY check_in_at DESC, id DESC
             LIMIT 1
             FOR UPDATE"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(room_id)
            .bind(STATUS_ACTIVE)
            .fetch_optional(db)
            .await
    }

    /// The room's current stay joined with guest and room details.
    pub async fn find_current_stay<'e>(
        db: impl PgExecutor<'e>,
        room_id: DbId,
    ) -> Result<Option<CurrentStay>, sqlx::Error> {
        sqlx::query_as::<_, CurrentStay>(
            "SELECT b.id AS booking_id, b.room_id, r.room_number, b.customer_id,
                    TRIM(c.first_name || ' ' || c.last_name) AS guest_name, c.phone,
                    b.check_in_at, b.expected_check_out_at, b.num_guests,
                    b.total_amount, b.status
             FROM bookings b
             JOIN rooms r ON r.id = b.room_id
             JOIN customers c ON c.id = b.customer_id
             WHERE b.room_id = $1 AND b.status = $2
             ORDER BY b.check_in_at DESC, b.id DESC
             LIMIT 1",
        )
        .bind(room_id)
        .bind(STATUS_ACTIVE)
        .fetch_optional(db)
        .await
    }

    /// Close an Active booking. Returns `None` if it is no longer Active.
    pub async fn complete<'e>(
        db: impl PgExecutor<'e>,
        id: DbId,
        input: &CompleteBooking,
    ) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!(
            "UPDATE bookings SET
                status = $2,
                actual_check_out_at = $3,
                total_amount = COALESCE($4, total_amount),
                cash_amount = COALESCE($5, cash_amount),
                card_amount = COALESCE($6, card_amount)
             WHERE id = $1 AND status = 'Active'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .bind(&input.status)
            .bind(input.actual_check_out_at)
            .bind(input.total_amount)
            .bind(input.cash_amount)
            .bind(input.card_amount)
            .fetch_optional(db)
            .await
    }

    // -- Customer history --------------------------------------------------

    /// A customer's bookings at one hotel, newest id first.
    pub async fn list_for_customer_at_hotel<'e>(
        db: impl PgExecutor<'e>,
        customer_id: DbId,
        hotel_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Booking>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM bookings
             WHERE customer_id = $1 AND hotel_id = $2
             ORDER BY id DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(customer_id)
            .bind(hotel_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(db)
            .await
    }

    /// Stays across every hotel.
    pub async fn count_for_customer<'e>(db: impl PgExecutor<'e>, customer_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM bookings WHERE customer_id = $1")
            .bind(customer_id)
            .fetch_one(db)
            .await
    }

    pub async fn count_for_customer_at_hotel<'e>(
        db: impl PgExecutor<'e>,
        customer_id: DbId,
        hotel_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM bookings WHERE customer_id = $1 AND hotel_id = $2")
            .bind(customer_id)
            .bind(hotel_id)
            .fetch_one(db)
            .await
    }

    /// Latest check-in across every hotel.
    pub async fn last_check_in_for_customer<'e>(
        db: impl PgExecutor<'e>,
        customer_id: DbId,
    ) -> Result<Option<Timestamp>, sqlx::Error> {
        sqlx::query_scalar("SELECT MAX(check_in_at) FROM bookings WHERE customer_id = $1")
            .bind(customer_id)
            .fetch_one(db)
            .await
    }
}
