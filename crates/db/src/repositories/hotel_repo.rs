//! Repository for the `hotels` table.

use innkeep_core::types::{DbId, Timestamp};
use sqlx::PgExecutor;

use crate::models::hotel::{CreateHotel, Hotel};

const COLUMNS: &str = "id, name, address, phone_number, email, terms_and_conditions, \
                       subscription_valid, valid_from, valid_to, layout_json, \
                       receipt_settings_json, created_at, updated_at";

pub struct HotelRepo;

impl HotelRepo {
    /// Insert a newly registered hotel with a valid subscription.
    pub async fn create<'e>(db: impl PgExecutor<'e>, input: &CreateHotel) -> Result<Hotel, sqlx::Error> {
        let query = format!(
            "INSERT INTO hotels
                (name, address, phone_number, email, terms_and_conditions,
                 subscription_valid, valid_from, layout_json, receipt_settings_json)
             VALUES ($1, $2, $3, $4, $5, true, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Hotel>(&query)
            .bind(&input.name)
            .bind(&input.address)
            .bind(&input.phone_number)
            .bind(&input.email)
            .bind(&input.terms_and_conditions)
            .bind(input.valid_from)
            .bind(&input.layout_json)
            .bind(&input.receipt_settings_json)
            .fetch_one(db)
            .await
    }

    pub async fn find_by_id<'e>(db: impl PgExecutor<'e>, id: DbId) -> Result<Option<Hotel>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM hotels WHERE id = $1");
        sqlx::query_as::<_, Hotel>(&query)
            .bind(id)
            .fetch_optional(db)
            .await
    }

    /// Find the billable hotel for an email, locking the row for the
    /// subscription update. The oldest hotel wins if several share it.
    pub async fn find_by_email_for_update<'e>(
        db: impl PgExecutor<'e>,
        email: &str,
    ) -> Result<Option<Hotel>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM hotels WHERE email = $1 ORDER BY id LIMIT 1 FOR UPDATE"
        );
        sqlx::query_as::<_, Hotel>(&query)
            .bind(email)
            .fetch_optional(db)
            .await
    }

    /// Set a new `valid_to` and mark the subscription valid.
    pub async fn extend_subscription<'e>(
        db: impl PgExecutor<'e>,
        id: DbId,
        valid_to: Timestamp,
    ) -> Result<Hotel, sqlx::Error> {
        let query = format!(
            "UPDATE hotels SET valid_to = $2, subscription_valid = true
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Hotel>(&query)
            .bind(id)
            .bind(valid_to)
            .fetch_one(db)
            .await
    }
}
