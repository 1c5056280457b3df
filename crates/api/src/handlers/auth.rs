//! Handlers for the public `/auth` resource: login, hotel registration,
//! password reset.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use innkeep_db::UnitOfWork;
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use crate::engine::identity::{self, LoginOutcome};
use crate::engine::registration::{self, FloorLayout, Registration, RegistrationOutcome};
use crate::error::AppResult;
use crate::notify::ResetNotice;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 200))]
    pub hotel_name: String,
    #[validate(email)]
    pub email: String,
    pub phone: Option<String>,
    pub street_address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub owner_name: Option<String>,
    #[validate(email)]
    pub owner_email: String,
    pub password: String,
    pub floors: Vec<FloorLayout>,
    pub receipt_settings: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct PasswordResetRequest {
    pub username: String,
}

#[derive(Debug, Deserialize)]
pub struct PasswordResetConfirm {
    pub token: String,
    pub new_password: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<LoginOutcome>> {
    let mut conn = state.pool.acquire().await?;
    let outcome = identity::login(&mut conn, &input.username, &input.password, &state.config.jwt).await?;
    Ok(Json(outcome))
}

/// POST /api/v1/auth/register
///
/// Create a hotel, its owner account, and its rooms in one transaction.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<RegistrationOutcome>>)> {
    input.validate()?;
    let reg = Registration {
        hotel_name: input.hotel_name,
        email: input.email,
        phone: input.phone,
        street_address: input.street_address,
        city: input.city,
        state: input.state,
        zip_code: input.zip_code,
        country: input.country,
        owner_name: input.owner_name,
        owner_email: input.owner_email,
        password: input.password,
        floors: input.floors,
        receipt_settings: input.receipt_settings,
    };

    let mut uow = UnitOfWork::begin(&state.pool).await?;
    let outcome = registration::register_hotel(&mut uow, reg).await?;
    uow.commit().await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: outcome })))
}

/// POST /api/v1/auth/password-reset
///
/// Always 202, whether or not the user exists.
pub async fn request_password_reset(
    State(state): State<AppState>,
    Json(input): Json<PasswordResetRequest>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    let mut uow = UnitOfWork::begin(&state.pool).await?;
    let issued = identity::request_password_reset(&mut uow, &input.username, Utc::now()).await?;
    uow.commit().await?;

    if let Some(token) = issued {
        state.reset_notifier.deliver(ResetNotice {
            username: input.username.trim().to_string(),
            plaintext: token.plaintext,
            expires_at: token.expires_at,
        });
    }
    Ok((StatusCode::ACCEPTED, Json(json!({ "status": "accepted" }))))
}

/// POST /api/v1/auth/password-reset/confirm
pub async fn confirm_password_reset(
    State(state): State<AppState>,
    Json(input): Json<PasswordResetConfirm>,
) -> AppResult<StatusCode> {
    let mut uow = UnitOfWork::begin(&state.pool).await?;
    identity::confirm_password_reset(&mut uow, &input.token, &input.new_password, Utc::now()).await?;
    uow.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}
