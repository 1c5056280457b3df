//! HTTP-level integration tests for registration, login, users, hotel
//! profile, and password reset.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{body_json, get_auth, post_json, post_json_auth, seed_hotel, TEST_PASSWORD};
use innkeep_api::engine::identity;
use innkeep_db::UnitOfWork;
use serde_json::json;
use sqlx::PgPool;

fn register_body(owner_email: &str, rooms: &[&str]) -> serde_json::Value {
    json!({
        "hotel_name": "Harbour View",
        "email": owner_email,
        "street_address": "1 Quay Rd",
        "city": "Portsmouth",
        "state": "NH",
        "zip_code": "03801",
        "country": "USA",
        "owner_name": "Pat Owner",
        "owner_email": owner_email,
        "password": TEST_PASSWORD,
        "floors": [{
            "name": "Ground",
            "rooms": rooms.iter().map(|n| json!({"number": n, "type": "Double", "rate": 120.0})).collect::<Vec<_>>(),
        }],
    })
}

async fn login(app: axum::Router, username: &str, password: &str) -> axum::response::Response {
    post_json(
        app,
        "/api/v1/auth/login",
        json!({ "username": username, "password": password }),
    )
    .await
}

// ---------------------------------------------------------------------------
// Registration and login
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_then_login(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(app.clone(), "/api/v1/auth/register", register_body("pat@harbour.test", &["101", "102"])).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["rooms_created"], 2);
    let hotel_id = json["data"]["hotel_id"].clone();

    let response = login(app.clone(), "pat@harbour.test", TEST_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["access_token"].is_string());
    assert_eq!(json["token_type"], "bearer");
    assert_eq!(json["expires_in"], 1800);
    assert_eq!(json["hotel_id"], hotel_id);
    assert_eq!(json["user"]["username"], "pat@harbour.test");
    assert!(json["user"].get("password_hash").is_none());

    let token = json["access_token"].as_str().unwrap().to_string();
    let response = get_auth(app.clone(), "/api/v1/hotel", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["terms_and_conditions"], "Standard Terms Applied.");
    assert_eq!(json["data"]["address"], "1 Quay Rd, Portsmouth, NH 03801, USA");
    assert_eq!(json["data"]["subscription_paid_up"], false);

    let response = get_auth(app, "/api/v1/rooms", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_with_duplicate_room_numbers_is_409(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    let response =
        post_json(app, "/api/v1/auth/register", register_body("dup@harbour.test", &["101", "101"])).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let hotels: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM hotels").fetch_one(&pool).await.unwrap();
    assert_eq!(hotels, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_twice_with_same_owner_is_409(pool: PgPool) {
    let app = common::build_test_app(pool);

    let first = post_json(app.clone(), "/api/v1/auth/register", register_body("same@harbour.test", &["1"])).await;
    assert_eq!(first.status(), StatusCode::CREATED);
    let second = post_json(app, "/api/v1/auth/register", register_body("same@harbour.test", &["1"])).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_with_bad_email_is_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/auth/register", register_body("not-an-email", &["1"])).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_with_wrong_password_is_401(pool: PgPool) {
    seed_hotel(&pool, "owner@login.test", &["1"]).await;
    let app = common::build_test_app(pool);

    let response = login(app.clone(), "owner@login.test", "wrong-password").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = login(app, "nobody@login.test", TEST_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deactivated_user_login_is_403_inactive(pool: PgPool) {
    let hotel = seed_hotel(&pool, "owner@inactive.test", &["1"]).await;
    sqlx::query("UPDATE hotel_users SET is_active = false WHERE id = $1")
        .bind(hotel.outcome.owner_user_id)
        .execute(&pool)
        .await
        .unwrap();
    let app = common::build_test_app(pool);

    let response = login(app, "owner@inactive.test", TEST_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INACTIVE");
}

// ---------------------------------------------------------------------------
// Users and hotel scope
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn owner_creates_staff_in_own_hotel(pool: PgPool) {
    let hotel = seed_hotel(&pool, "owner@staff.test", &["1"]).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app.clone(),
        "/api/v1/users",
        json!({ "username": "frontdesk", "full_name": "Front Desk", "password": "desk-password" }),
        &hotel.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["hotel_id"], hotel.outcome.hotel_id);

    let response = login(app.clone(), "frontdesk", "desk-password").await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post_json_auth(
        app,
        "/api/v1/users",
        json!({ "username": "frontdesk", "password": "another-password" }),
        &hotel.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn me_returns_current_user(pool: PgPool) {
    let hotel = seed_hotel(&pool, "owner@me.test", &["1"]).await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/users/me", &hotel.token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["id"], hotel.outcome.owner_user_id);
    assert_eq!(json["data"]["is_active"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn other_hotels_users_and_profile_are_forbidden(pool: PgPool) {
    let north = seed_hotel(&pool, "owner@north-users.test", &["1"]).await;
    let south = seed_hotel(&pool, "owner@south-users.test", &["1"]).await;
    let app = common::build_test_app(pool);

    let uri = format!("/api/v1/users/{}", north.outcome.owner_user_id);
    let response = get_auth(app.clone(), &uri, &south.token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let uri = format!("/api/v1/hotel/{}", north.outcome.hotel_id);
    let response = get_auth(app.clone(), &uri, &south.token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get_auth(app, "/api/v1/users/999999", &south.token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Password reset
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn password_reset_round_trip(pool: PgPool) {
    seed_hotel(&pool, "owner@reset.test", &["1"]).await;
    let (app, resets) = common::build_test_app_with_resets(pool);

    let request = json!({ "username": " owner@reset.test " });
    let response = post_json(app.clone(), "/api/v1/auth/password-reset", request.clone()).await;
    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let first = resets.last().expect("known user is notified");
    assert_eq!(first.username, "owner@reset.test");
    assert!(first.expires_at > Utc::now());

    // A second request replaces the first token.
    post_json(app.clone(), "/api/v1/auth/password-reset", request).await;
    let token = resets.last().unwrap().plaintext;
    assert_ne!(token, first.plaintext);

    let response = post_json(
        app.clone(),
        "/api/v1/auth/password-reset/confirm",
        json!({ "token": first.plaintext, "new_password": "brand-new-password" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = post_json(
        app.clone(),
        "/api/v1/auth/password-reset/confirm",
        json!({ "token": token, "new_password": "brand-new-password" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    assert_eq!(login(app.clone(), "owner@reset.test", TEST_PASSWORD).await.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(login(app.clone(), "owner@reset.test", "brand-new-password").await.status(), StatusCode::OK);

    // The token is single-use.
    let response = post_json(
        app,
        "/api/v1/auth/password-reset/confirm",
        json!({ "token": token, "new_password": "yet-another-password" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn expired_reset_token_is_rejected(pool: PgPool) {
    seed_hotel(&pool, "owner@expired.test", &["1"]).await;

    let mut uow = UnitOfWork::begin(&pool).await.unwrap();
    let issued_at = Utc::now() - Duration::hours(2);
    let token = identity::request_password_reset(&mut uow, "owner@expired.test", issued_at)
        .await
        .unwrap()
        .unwrap();
    uow.commit().await.unwrap();

    let mut uow = UnitOfWork::begin(&pool).await.unwrap();
    let result = identity::confirm_password_reset(&mut uow, &token.plaintext, "brand-new-password", Utc::now()).await;
    assert!(result.is_err());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn reset_request_is_accepted_for_unknown_users(pool: PgPool) {
    let (app, resets) = common::build_test_app_with_resets(pool);
    let response = post_json(app, "/api/v1/auth/password-reset", json!({ "username": "ghost@nowhere.test" })).await;
    assert_eq!(response.status(), StatusCode::ACCEPTED);
    assert_eq!(resets.count(), 0);
}
