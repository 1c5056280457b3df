//! Repository for the global `customers` table.
//!
//! Every gov ID passed in here must already be normalized; see
//! [`innkeep_core::customer::normalize_gov_id`].

use innkeep_core::customer::{NewGuest, DEFAULT_CUSTOMER_RATING};
use innkeep_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::customer::Customer;

const COLUMNS: &str = "id, gov_id, first_name, last_name, phone, address, city, state, \
                       zip_code, average_rating, created_at, updated_at";

pub struct CustomerRepo;

impl CustomerRepo {
    /// Insert a customer. Fails with `uq_customers_gov_id` if the gov ID is
    /// already registered.
    pub async fn create<'e>(db: impl PgExecutor<'e>, guest: &NewGuest) -> Result<Customer, sqlx::Error> {
        let query = format!(
            "INSERT INTO customers
                (gov_id, first_name, last_name, phone, address, city, state, zip_code, average_rating)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Customer>(&query)
            .bind(&guest.gov_id)
            .bind(&guest.first_name)
            .bind(&guest.last_name)
            .bind(&guest.phone)
            .bind(&guest.address)
            .bind(&guest.city)
            .bind(&guest.state)
            .bind(&guest.zip_code)
            .bind(DEFAULT_CUSTOMER_RATING)
            .fetch_one(db)
            .await
    }

    /// Insert unless the gov ID already exists. Returns `None` on conflict;
    /// the existing row is left untouched.
    pub async fn insert_if_absent<'e>(
        db: impl PgExecutor<'e>,
        guest: &NewGuest,
    ) -> Result<Option<Customer>, sqlx::Error> {
        let query = format!(
            "INSERT INTO customers
                (gov_id, first_name, last_name, phone, address, city, state, zip_code, average_rating)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             ON CONFLICT (gov_id) DO NOTHING
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Customer>(&query)
            .bind(&guest.gov_id)
            .bind(&guest.first_name)
            .bind(&guest.last_name)
            .bind(&guest.phone)
            .bind(&guest.address)
            .bind(&guest.city)
            .bind(&guest.state)
            .bind(&guest.zip_code)
            .bind(DEFAULT_CUSTOMER_RATING)
            .fetch_optional(db)
            .await
    }

    pub async fn find_by_id<'e>(db: impl PgExecutor<'e>, id: DbId) -> Result<Option<Customer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM customers WHERE id = $1");
        sqlx::query_as::<_, Customer>(&query)
            .bind(id)
            .fetch_optional(db)
            .await
    }

    pub async fn find_by_gov_id<'e>(
        db: impl PgExecutor<'e>,
        normalized_gov_id: &str,
    ) -> Result<Option<Customer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM customers WHERE gov_id = $1");
        sqlx::query_as::<_, Customer>(&query)
            .bind(normalized_gov_id)
            .fetch_optional(db)
            .await
    }

    /// Recompute the rolling average from all of the customer's feedback.
    pub async fn refresh_average_rating<'e>(
        db: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<f64>, sqlx::Error> {
        sqlx::query_scalar(
            "UPDATE customers SET average_rating = COALESCE(
                (SELECT AVG(rating)::float8 FROM customer_feedback WHERE customer_id = $1),
                average_rating)
             WHERE id = $1
             RETURNING average_rating",
        )
        .bind(id)
        .fetch_one(db)
        .await
    }
}
