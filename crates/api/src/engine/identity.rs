//! Staff identity: login, user management, password reset, hotel profile.

use chrono::Utc;
use innkeep_core::billing::is_subscription_active;
use innkeep_core::error::CoreError;
use innkeep_core::identity::{generate_reset_token, hash_reset_token, validate_password, ResetToken};
use innkeep_core::types::{DbId, Timestamp};
use innkeep_db::models::hotel::Hotel;
use innkeep_db::models::user::{CreateHotelUser, HotelUserResponse};
use innkeep_db::repositories::{HotelRepo, UserRepo};
use innkeep_db::UnitOfWork;
use serde::Serialize;
use sqlx::PgConnection;

use super::Actor;
use crate::auth::jwt::{generate_access_token, JwtConfig};
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};

const INVALID_CREDENTIALS: &str = "Invalid username or password";
const INVALID_RESET_TOKEN: &str = "Invalid or expired reset token";

#[derive(Debug, Serialize)]
pub struct LoginOutcome {
    pub access_token: String,
    pub token_type: &'static str,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub hotel_id: DbId,
    pub user: HotelUserResponse,
}

/// Verify credentials and issue an access token.
///
/// Unknown users and wrong passwords are indistinguishable (`Unauthorized`).
/// A deactivated account with the right password is `Inactive`.
pub async fn login(
    conn: &mut PgConnection,
    username: &str,
    password: &str,
    jwt: &JwtConfig,
) -> AppResult<LoginOutcome> {
    let user = UserRepo::find_by_username(conn, username.trim())
        .await?
        .ok_or_else(|| CoreError::Unauthorized(INVALID_CREDENTIALS.into()))?;

    let password_valid = verify_password(password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(CoreError::Unauthorized(INVALID_CREDENTIALS.into()).into());
    }

    if !user.is_active {
        return Err(CoreError::Inactive("Account is deactivated".into()).into());
    }

    let access_token = generate_access_token(user.id, user.hotel_id, jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = user.id, hotel_id = user.hotel_id, "User logged in");
    Ok(LoginOutcome {
        access_token,
        token_type: "bearer",
        expires_in: jwt.access_token_expiry_mins * 60,
        hotel_id: user.hotel_id,
        user: user.into(),
    })
}

/// Fetch a user of the actor's hotel.
pub async fn get_user(conn: &mut PgConnection, actor: Actor, id: DbId) -> AppResult<HotelUserResponse> {
    let user = UserRepo::find_by_id(conn, id)
        .await?
        .ok_or_else(|| CoreError::not_found("User", id))?;
    actor.ensure_hotel("User", user.hotel_id)?;
    Ok(user.into())
}

pub async fn me(conn: &mut PgConnection, actor: Actor) -> AppResult<HotelUserResponse> {
    get_user(conn, actor, actor.user_id).await
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub full_name: Option<String>,
    pub password: String,
}

/// Create a staff account in the actor's hotel.
pub async fn create_user(uow: &mut UnitOfWork, actor: Actor, input: NewUser) -> AppResult<HotelUserResponse> {
    let username = input.username.trim().to_string();
    if username.is_empty() {
        return Err(CoreError::Validation("Username must not be empty".into()).into());
    }
    validate_password(&input.password)?;

    if UserRepo::find_by_username(uow.conn(), &username).await?.is_some() {
        return Err(CoreError::Conflict(format!("Username '{username}' is already taken")).into());
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    let user = UserRepo::create(
        uow.conn(),
        &CreateHotelUser {
            hotel_id: actor.hotel_id,
            username,
            full_name: input.full_name,
            password_hash,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, hotel_id = user.hotel_id, created_by = actor.user_id, "User created");
    Ok(user.into())
}

/// Issue a reset token for `username`, replacing any earlier one.
///
/// Returns `None` for an unknown user so callers can answer identically
/// either way. The plaintext token goes to the user, never to storage.
pub async fn request_password_reset(
    uow: &mut UnitOfWork,
    username: &str,
    now: Timestamp,
) -> AppResult<Option<ResetToken>> {
    let Some(user) = UserRepo::find_by_username(uow.conn(), username.trim()).await? else {
        tracing::info!("Password reset requested for unknown user");
        return Ok(None);
    };

    let token = generate_reset_token(now);
    UserRepo::set_reset_token(uow.conn(), user.id, &token.hash, token.expires_at).await?;
    tracing::info!(user_id = user.id, "Password reset token issued");
    Ok(Some(token))
}

/// Replace the password of the user holding an unexpired reset token.
pub async fn confirm_password_reset(
    uow: &mut UnitOfWork,
    token: &str,
    new_password: &str,
    now: Timestamp,
) -> AppResult<()> {
    validate_password(new_password)?;

    let user = UserRepo::find_by_reset_token_for_update(uow.conn(), &hash_reset_token(token))
        .await?
        .ok_or_else(|| CoreError::Unauthorized(INVALID_RESET_TOKEN.into()))?;
    if !user.reset_token_expires_at.is_some_and(|expires| expires > now) {
        return Err(CoreError::Unauthorized(INVALID_RESET_TOKEN.into()).into());
    }

    let password_hash = hash_password(new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    UserRepo::update_password(uow.conn(), user.id, &password_hash).await?;
    tracing::info!(user_id = user.id, "Password reset completed");
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct HotelProfile {
    #[serde(flatten)]
    pub hotel: Hotel,
    /// `valid_to` lies in the future.
    pub subscription_paid_up: bool,
}

/// Fetch a hotel profile. Only the actor's own hotel is visible.
pub async fn get_hotel(conn: &mut PgConnection, actor: Actor, id: DbId) -> AppResult<HotelProfile> {
    actor.ensure_hotel("Hotel", id)?;
    let hotel = HotelRepo::find_by_id(conn, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Hotel", id))?;
    let subscription_paid_up = is_subscription_active(Utc::now(), hotel.valid_to);
    Ok(HotelProfile {
        hotel,
        subscription_paid_up,
    })
}
