//! Handlers for the `/customers` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use innkeep_core::customer::{GuestInput, NewGuest};
use innkeep_db::models::customer::Customer;
use innkeep_db::UnitOfWork;
use serde::Deserialize;

use crate::engine::customers;
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterCustomerRequest {
    pub name: String,
    pub gov_id: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
}

/// POST /api/v1/customers
pub async fn register_customer(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(input): Json<RegisterCustomerRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Customer>>)> {
    let guest = NewGuest::from_input(GuestInput {
        name: Some(input.name),
        gov_id: Some(input.gov_id),
        phone: input.phone,
        address: input.address,
        city: input.city,
        state: input.state,
        zip_code: input.zip_code,
    })?;

    let mut uow = UnitOfWork::begin(&state.pool).await?;
    let customer = customers::register_customer(&mut uow, guest).await?;
    uow.commit().await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: customer })))
}
