//! Handlers for the `/users` resource (tenant-scoped).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use innkeep_core::types::DbId;
use innkeep_db::models::user::HotelUserResponse;
use innkeep_db::UnitOfWork;
use serde::Deserialize;
use validator::Validate;

use crate::engine::identity::{self, NewUser};
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 200))]
    pub username: String,
    pub full_name: Option<String>,
    pub password: String,
}

/// GET /api/v1/users/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<HotelUserResponse>>> {
    let mut conn = state.pool.acquire().await?;
    let user = identity::me(&mut conn, auth.actor()).await?;
    Ok(Json(DataResponse { data: user }))
}

/// GET /api/v1/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<HotelUserResponse>>> {
    let mut conn = state.pool.acquire().await?;
    let user = identity::get_user(&mut conn, auth.actor(), id).await?;
    Ok(Json(DataResponse { data: user }))
}

/// POST /api/v1/users
///
/// The new user joins the caller's hotel.
pub async fn create_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<HotelUserResponse>>)> {
    input.validate()?;
    let mut uow = UnitOfWork::begin(&state.pool).await?;
    let user = identity::create_user(
        &mut uow,
        auth.actor(),
        NewUser {
            username: input.username,
            full_name: input.full_name,
            password: input.password,
        },
    )
    .await?;
    uow.commit().await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: user })))
}
