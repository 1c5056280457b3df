#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use innkeep_api::auth::jwt::{generate_access_token, JwtConfig};
use innkeep_api::config::ServerConfig;
use innkeep_api::engine::registration::{
    register_hotel, FloorLayout, Registration, RegistrationOutcome, RoomLayout,
};
use innkeep_api::engine::Actor;
use innkeep_api::notify::{ResetNotice, ResetNotifier};
use innkeep_api::router::build_app_router;
use innkeep_api::state::AppState;
use innkeep_db::UnitOfWork;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tower::ServiceExt;

pub const TEST_PASSWORD: &str = "correct-horse-battery";
pub const TEST_BILLING_SECRET: &str = "whsec_test_secret";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: test_jwt_config(),
        billing_webhook_secret: Some(TEST_BILLING_SECRET.to_string()),
    }
}

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test-secret-that-is-long-enough-for-hs256".to_string(),
        access_token_expiry_mins: 30,
    }
}

/// Keeps every reset notice so tests can read the token back.
#[derive(Default)]
pub struct CapturedResets(Mutex<Vec<ResetNotice>>);

impl CapturedResets {
    pub fn last(&self) -> Option<ResetNotice> {
        self.0.lock().unwrap().last().cloned()
    }

    pub fn count(&self) -> usize {
        self.0.lock().unwrap().len()
    }
}

impl ResetNotifier for CapturedResets {
    fn deliver(&self, notice: ResetNotice) {
        self.0.lock().unwrap().push(notice);
    }
}

/// Build the full application router, same middleware stack as `main.rs`.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_resets(pool).0
}

/// [`build_test_app`], also returning the reset notices it delivers.
pub fn build_test_app_with_resets(pool: PgPool) -> (Router, Arc<CapturedResets>) {
    let resets = Arc::new(CapturedResets::default());
    let state = AppState {
        pool,
        config: Arc::new(test_config()),
        reset_notifier: resets.clone(),
    };
    (build_app_router(state), resets)
}

// ---------------------------------------------------------------------------
// Seeding
// ---------------------------------------------------------------------------

/// A registered hotel with its owner's actor and bearer token.
pub struct SeededHotel {
    pub outcome: RegistrationOutcome,
    pub actor: Actor,
    pub token: String,
}

pub fn registration(owner_email: &str, rooms: &[&str]) -> Registration {
    Registration {
        hotel_name: format!("Hotel {owner_email}"),
        email: owner_email.to_string(),
        phone: None,
        street_address: "1 Main St".to_string(),
        city: "Springfield".to_string(),
        state: "IL".to_string(),
        zip_code: "62701".to_string(),
        country: "USA".to_string(),
        owner_name: Some("Owner".to_string()),
        owner_email: owner_email.to_string(),
        password: TEST_PASSWORD.to_string(),
        floors: vec![FloorLayout {
            id: None,
            name: Some("Ground".to_string()),
            rooms: rooms
                .iter()
                .map(|number| RoomLayout {
                    id: None,
                    number: number.to_string(),
                    room_type: Some("Double".to_string()),
                    rate: Decimal::new(12000, 2),
                    x: None,
                    y: None,
                    width: None,
                    height: None,
                })
                .collect(),
        }],
        receipt_settings: None,
    }
}

/// Register a hotel with the given rooms through the engine.
pub async fn seed_hotel(pool: &PgPool, owner_email: &str, rooms: &[&str]) -> SeededHotel {
    let mut uow = UnitOfWork::begin(pool).await.unwrap();
    let outcome = register_hotel(&mut uow, registration(owner_email, rooms))
        .await
        .expect("registration should succeed");
    uow.commit().await.unwrap();

    let token =
        generate_access_token(outcome.owner_user_id, outcome.hotel_id, &test_jwt_config()).unwrap();
    SeededHotel {
        actor: Actor {
            user_id: outcome.owner_user_id,
            hotel_id: outcome.hotel_id,
        },
        outcome,
        token,
    }
}

// ---------------------------------------------------------------------------
// HTTP helpers
// ---------------------------------------------------------------------------

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .header("Authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: serde_json::Value, token: &str) -> Response {
    json_auth(app, Method::POST, uri, body, token).await
}

pub async fn put_json_auth(app: Router, uri: &str, body: serde_json::Value, token: &str) -> Response {
    json_auth(app, Method::PUT, uri, body, token).await
}

async fn json_auth(
    app: Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .header("Authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_raw(app: Router, uri: &str, body: Vec<u8>, headers: &[(&str, &str)]) -> Response {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Content-Type", "application/json");
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    send(app, builder.body(Body::from(body)).unwrap()).await
}
