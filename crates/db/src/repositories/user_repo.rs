//! Repository for the `hotel_users` table.

use innkeep_core::types::{DbId, Timestamp};
use sqlx::PgExecutor;

use crate::models::user::{CreateHotelUser, HotelUser};

const COLUMNS: &str = "id, hotel_id, username, full_name, password_hash, is_active, \
                       reset_token_hash, reset_token_expires_at, created_at, updated_at";

pub struct UserRepo;

impl UserRepo {
    /// Insert a new user. Fails with `uq_hotel_users_username` on a
    /// duplicate username.
    pub async fn create<'e>(
        db: impl PgExecutor<'e>,
        input: &CreateHotelUser,
    ) -> Result<HotelUser, sqlx::Error> {
        let query = format!(
            "INSERT INTO hotel_users (hotel_id, username, full_name, password_hash)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, HotelUser>(&query)
            .bind(input.hotel_id)
            .bind(&input.username)
            .bind(&input.full_name)
            .bind(&input.password_hash)
            .fetch_one(db)
            .await
    }

    pub async fn find_by_id<'e>(db: impl PgExecutor<'e>, id: DbId) -> Result<Option<HotelUser>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM hotel_users WHERE id = $1");
        sqlx::query_as::<_, HotelUser>(&query)
            .bind(id)
            .fetch_optional(db)
            .await
    }

    /// Find a user by username (case-sensitive).
    pub async fn find_by_username<'e>(
        db: impl PgExecutor<'e>,
        username: &str,
    ) -> Result<Option<HotelUser>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM hotel_users WHERE username = $1");
        sqlx::query_as::<_, HotelUser>(&query)
            .bind(username)
            .fetch_optional(db)
            .await
    }

    /// Store a reset token hash, replacing any earlier one.
    pub async fn set_reset_token<'e>(
        db: impl PgExecutor<'e>,
        id: DbId,
        token_hash: &str,
        expires_at: Timestamp,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE hotel_users SET reset_token_hash = $2, reset_token_expires_at = $3 WHERE id = $1",
        )
        .bind(id)
        .bind(token_hash)
        .bind(expires_at)
        .execute(db)
        .await?;
        Ok(())
    }

    /// Find the user holding a reset token, locking the row.
    pub async fn find_by_reset_token_for_update<'e>(
        db: impl PgExecutor<'e>,
        token_hash: &str,
    ) -> Result<Option<HotelUser>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM hotel_users WHERE reset_token_hash = $1 FOR UPDATE");
        sqlx::query_as::<_, HotelUser>(&query)
            .bind(token_hash)
            .fetch_optional(db)
            .await
    }

    /// Replace the password hash and clear any reset token.
    pub async fn update_password<'e>(
        db: impl PgExecutor<'e>,
        id: DbId,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE hotel_users SET
                password_hash = $2,
                reset_token_hash = NULL,
                reset_token_expires_at = NULL
             WHERE id = $1",
        )
        .bind(id)
        .bind(password_hash)
        .execute(db)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
