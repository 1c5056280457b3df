//! Customer directory: identity resolution by normalized gov ID, explicit
//! registration, and lookup insights.
//!
//! The directory owns normalization. Callers pass raw gov IDs or
//! [`NewGuest`] values (already normalized by construction).

use innkeep_core::customer::{normalize_gov_id, reported_rating, CustomerRef, GuestStatus, NewGuest};
use innkeep_core::error::CoreError;
use innkeep_core::types::{DbId, Timestamp};
use innkeep_db::models::customer::Customer;
use innkeep_db::repositories::{BookingRepo, CustomerRepo};
use innkeep_db::UnitOfWork;
use serde::Serialize;
use sqlx::PgConnection;

use crate::error::{AppError, AppResult};

/// Turn a booking's customer reference into a customer id.
///
/// An explicit id is trusted as-is; a bad one surfaces as a foreign-key
/// violation on insert. Guest details reuse the customer with the same gov
/// ID, or create one. Contact details of an existing customer are never
/// updated.
pub async fn resolve_customer(conn: &mut PgConnection, customer: &CustomerRef) -> AppResult<DbId> {
    let guest = match customer {
        CustomerRef::Existing(id) => return Ok(*id),
        CustomerRef::Guest(guest) => guest,
    };

    if let Some(existing) = CustomerRepo::find_by_gov_id(&mut *conn, &guest.gov_id).await? {
        return Ok(existing.id);
    }

    if let Some(created) = CustomerRepo::insert_if_absent(&mut *conn, guest).await? {
        tracing::info!(customer_id = created.id, "Customer created");
        return Ok(created.id);
    }

    // Lost an insert race to a concurrent request; the winner's row is visible now.
    CustomerRepo::find_by_gov_id(&mut *conn, &guest.gov_id)
        .await?
        .map(|c| c.id)
        .ok_or_else(|| AppError::InternalError(format!("Customer {} vanished after conflict", guest.gov_id)))
}

/// Register a customer explicitly. `Conflict` if the gov ID is taken.
pub async fn register_customer(uow: &mut UnitOfWork, guest: NewGuest) -> AppResult<Customer> {
    if CustomerRepo::find_by_gov_id(uow.conn(), &guest.gov_id)
        .await?
        .is_some()
    {
        return Err(CoreError::Conflict(
            "A customer with this government ID already exists".into(),
        )
        .into());
    }
    let customer = CustomerRepo::create(uow.conn(), &guest).await?;
    tracing::info!(customer_id = customer.id, "Customer registered");
    Ok(customer)
}

/// Derived fields shown when a guest is looked up at the front desk.
#[derive(Debug, Serialize)]
pub struct CustomerInsights {
    /// Stays across every hotel.
    pub previous_stays: i64,
    pub last_visit: Option<Timestamp>,
    pub global_rating: f64,
    pub guest_status: GuestStatus,
}

#[derive(Debug, Serialize)]
pub struct CustomerLookup {
    pub customer: Customer,
    pub insights: CustomerInsights,
}

/// Look up a customer by gov ID (normalized here) with insights.
pub async fn lookup_customer(conn: &mut PgConnection, raw_gov_id: &str) -> AppResult<CustomerLookup> {
    let gov_id = normalize_gov_id(raw_gov_id)?;
    let customer = CustomerRepo::find_by_gov_id(&mut *conn, &gov_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Customer", &gov_id))?;

    let previous_stays = BookingRepo::count_for_customer(&mut *conn, customer.id).await?;
    let last_visit = BookingRepo::last_check_in_for_customer(&mut *conn, customer.id).await?;

    let insights = CustomerInsights {
        previous_stays,
        last_visit,
        global_rating: reported_rating(customer.average_rating),
        guest_status: GuestStatus::from_stay_count(previous_stays),
    };
    Ok(CustomerLookup { customer, insights })
}
