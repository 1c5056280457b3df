//! Engine-level integration tests: booking, check-in, check-out, customer
//! resolution, availability, tenancy, and registration atomicity.

mod common;

use assert_matches::assert_matches;
use chrono::{Duration, TimeZone, Utc};
use common::seed_hotel;
use innkeep_api::engine::booking::{self, BookingRequest};
use innkeep_api::engine::checkout::{self, CheckoutRequest, CheckoutTarget};
use innkeep_api::engine::registration::register_hotel;
use innkeep_api::engine::{customers, history, rooms, Actor};
use innkeep_api::error::AppError;
use innkeep_core::customer::{CustomerRef, GuestInput};
use innkeep_core::error::CoreError;
use innkeep_core::room::RoomRef;
use innkeep_core::types::{DbId, Timestamp};
use innkeep_db::models::booking::Booking;
use innkeep_db::repositories::{FeedbackRepo, RoomRepo};
use innkeep_db::UnitOfWork;
use rust_decimal::Decimal;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn at(hour: i64) -> Timestamp {
    Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap() + Duration::hours(hour)
}

fn guest(name: &str, gov_id: &str) -> CustomerRef {
    CustomerRef::from_request(
        None,
        GuestInput {
            name: Some(name.to_string()),
            gov_id: Some(gov_id.to_string()),
            phone: Some("555-0100".to_string()),
            ..Default::default()
        },
    )
    .unwrap()
}

fn request(room: &str, customer: CustomerRef, from: i64, to: i64) -> BookingRequest {
    BookingRequest {
        room: RoomRef::parse(room).unwrap(),
        customer,
        check_in_at: Some(at(from)),
        expected_check_out_at: at(to),
        num_guests: None,
        notes: None,
        total_amount: None,
        cash_amount: None,
        card_amount: None,
        status: None,
    }
}

async fn create(pool: &PgPool, actor: Actor, req: BookingRequest) -> Result<Booking, AppError> {
    let mut uow = UnitOfWork::begin(pool).await.unwrap();
    let booking = booking::create_booking(&mut uow, actor, req).await?;
    uow.commit().await.unwrap();
    Ok(booking)
}

async fn checkout(
    pool: &PgPool,
    actor: Actor,
    target: CheckoutTarget,
    req: CheckoutRequest,
) -> Result<checkout::CheckoutOutcome, AppError> {
    let mut uow = UnitOfWork::begin(pool).await.unwrap();
    let outcome = checkout::check_out(&mut uow, actor, target, req).await?;
    uow.commit().await.unwrap();
    Ok(outcome)
}

async fn room_id(pool: &PgPool, hotel_id: DbId, number: &str) -> DbId {
    RoomRepo::find_by_number(pool, hotel_id, number)
        .await
        .unwrap()
        .expect("room should exist")
        .id
}

// ---------------------------------------------------------------------------
// Booking lifecycle
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn booking_then_checkout_with_rating(pool: PgPool) {
    let hotel = seed_hotel(&pool, "owner@seaside.test", &["5", "6"]).await;

    let booking = create(&pool, hotel.actor, request("5", guest("Grace Hopper", " x1 "), 10, 34))
        .await
        .unwrap();
    assert_eq!(booking.status, "Active");
    assert_eq!(booking.num_guests, 1);
    assert_eq!(booking.created_by_user_id, Some(hotel.actor.user_id));

    let mut conn = pool.acquire().await.unwrap();
    let lookup = customers::lookup_customer(&mut conn, "X1").await.unwrap();
    assert_eq!(lookup.customer.id, booking.customer_id);
    assert_eq!(lookup.customer.first_name, "Grace");
    assert_eq!(lookup.customer.last_name, "Hopper");
    assert_eq!(lookup.insights.previous_stays, 1);

    let outcome = checkout(
        &pool,
        hotel.actor,
        CheckoutTarget::Room(RoomRef::parse("5").unwrap()),
        CheckoutRequest {
            rating: Some(8),
            feedback_notes: Some("Quiet guest".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(outcome.booking.status, "Completed");
    assert!(outcome.booking.actual_check_out_at.is_some());
    assert_eq!(outcome.room.status, "Available");
    let feedback = outcome.feedback.expect("feedback should be recorded");
    assert_eq!(feedback.rating, 8);

    let stored = FeedbackRepo::list_for_customer(&pool, booking.customer_id, 50, 0)
        .await
        .unwrap();
    assert_eq!(stored.len(), 1);

    let hist = history::customer_history(&mut conn, hotel.actor, booking.customer_id, None, None)
        .await
        .unwrap();
    assert_eq!(hist.bookings.len(), 1);
    assert_eq!(hist.global_average_rating, 8.0);
    assert_eq!(hist.limit, 50);
    assert_eq!(hist.offset, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn check_in_marks_room_occupied(pool: PgPool) {
    let hotel = seed_hotel(&pool, "owner@occupied.test", &["12"]).await;

    let mut uow = UnitOfWork::begin(&pool).await.unwrap();
    let booking = booking::check_in(&mut uow, hotel.actor, request("12", guest("Ada", "A1"), 0, 24))
        .await
        .unwrap();
    uow.commit().await.unwrap();

    let room = RoomRepo::find_by_id(&pool, booking.room_id).await.unwrap().unwrap();
    assert_eq!(room.status, "Occupied");

    let mut conn = pool.acquire().await.unwrap();
    let stay = booking::current_booking_for_room(&mut conn, hotel.actor, &RoomRef::parse("12").unwrap())
        .await
        .unwrap();
    assert_eq!(stay.booking_id, booking.id);
    assert_eq!(stay.guest_name, "Ada");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn check_in_without_time_starts_now(pool: PgPool) {
    let hotel = seed_hotel(&pool, "owner@walkin.test", &["14"]).await;
    let mut req = request("14", guest("Walk In", "W1"), 0, 0);
    req.check_in_at = None;
    req.expected_check_out_at = Utc::now() + Duration::days(1);

    // The store keeps microseconds; allow for rounding at either end.
    let before = Utc::now() - Duration::milliseconds(1);
    let mut uow = UnitOfWork::begin(&pool).await.unwrap();
    let booking = booking::check_in(&mut uow, hotel.actor, req).await.unwrap();
    uow.commit().await.unwrap();
    let after = Utc::now() + Duration::milliseconds(1);

    assert!(before <= booking.check_in_at && booking.check_in_at <= after);
    let room = RoomRepo::find_by_id(&pool, booking.room_id).await.unwrap().unwrap();
    assert_eq!(room.status, "Occupied");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn overlapping_booking_is_conflict_touching_is_fine(pool: PgPool) {
    let hotel = seed_hotel(&pool, "owner@overlap.test", &["7"]).await;

    create(&pool, hotel.actor, request("7", guest("Ada", "A1"), 10, 12)).await.unwrap();

    let overlapping = create(&pool, hotel.actor, request("7", guest("Bob", "B1"), 11, 14)).await;
    assert_matches!(overlapping, Err(AppError::Core(CoreError::Conflict(_))));

    // Checking in exactly at the previous expected check-out.
    create(&pool, hotel.actor, request("7", guest("Bob", "B1"), 12, 14)).await.unwrap();
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn concurrent_double_booking_admits_exactly_one(pool: PgPool) {
    let hotel = seed_hotel(&pool, "owner@race.test", &["9"]).await;
    let first = create(&pool, hotel.actor, request("9", guest("Ada", "A1"), 0, 1)).await.unwrap();
    let customer = CustomerRef::Existing(first.customer_id);

    let (a, b) = futures::join!(
        create(&pool, hotel.actor, request("9", customer.clone(), 10, 20)),
        create(&pool, hotel.actor, request("9", customer.clone(), 15, 25)),
    );

    let successes = [&a, &b].iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1, "exactly one overlapping booking must win: {a:?} / {b:?}");
    let loser = if a.is_ok() { b } else { a };
    assert_matches!(loser, Err(AppError::Core(CoreError::Conflict(_))));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn double_checkout_is_not_found(pool: PgPool) {
    let hotel = seed_hotel(&pool, "owner@twice.test", &["3"]).await;
    let booking = create(&pool, hotel.actor, request("3", guest("Ada", "A1"), 0, 24)).await.unwrap();

    checkout(&pool, hotel.actor, CheckoutTarget::Booking(booking.id), CheckoutRequest::default())
        .await
        .unwrap();
    let again =
        checkout(&pool, hotel.actor, CheckoutTarget::Booking(booking.id), CheckoutRequest::default()).await;
    assert_matches!(again, Err(AppError::Core(CoreError::NotFound { .. })));

    let by_room = checkout(
        &pool,
        hotel.actor,
        CheckoutTarget::Room(RoomRef::parse("3").unwrap()),
        CheckoutRequest::default(),
    )
    .await;
    assert_matches!(by_room, Err(AppError::Core(CoreError::NotFound { .. })));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_rating_rejected_before_any_write(pool: PgPool) {
    let hotel = seed_hotel(&pool, "owner@rating.test", &["4"]).await;
    let booking = create(&pool, hotel.actor, request("4", guest("Ada", "A1"), 0, 24)).await.unwrap();

    let result = checkout(
        &pool,
        hotel.actor,
        CheckoutTarget::Booking(booking.id),
        CheckoutRequest {
            rating: Some(11),
            ..Default::default()
        },
    )
    .await;
    assert_matches!(result, Err(AppError::Core(CoreError::Validation(_))));

    let mut conn = pool.acquire().await.unwrap();
    let stay = booking::current_booking_for_room(&mut conn, hotel.actor, &RoomRef::parse("4").unwrap())
        .await
        .unwrap();
    assert_eq!(stay.booking_id, booking.id);
    assert_eq!(stay.status, "Active");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn inverted_interval_and_non_active_status_rejected(pool: PgPool) {
    let hotel = seed_hotel(&pool, "owner@invalid.test", &["1"]).await;

    let inverted = create(&pool, hotel.actor, request("1", guest("Ada", "A1"), 12, 10)).await;
    assert_matches!(inverted, Err(AppError::Core(CoreError::Validation(_))));

    let mut completed = request("1", guest("Ada", "A1"), 10, 12);
    completed.status = Some("Completed".to_string());
    let result = create(&pool, hotel.actor, completed).await;
    assert_matches!(result, Err(AppError::Core(CoreError::Validation(_))));
}

// ---------------------------------------------------------------------------
// Customers
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn repeat_guest_reuses_customer_across_hotels(pool: PgPool) {
    let north = seed_hotel(&pool, "owner@north.test", &["1"]).await;
    let south = seed_hotel(&pool, "owner@south.test", &["1"]).await;

    let a = create(&pool, north.actor, request("1", guest("Ada Lovelace", " ab-123 "), 0, 24))
        .await
        .unwrap();
    let b = create(&pool, south.actor, request("1", guest("Someone Else", "AB-123"), 0, 24))
        .await
        .unwrap();
    assert_eq!(a.customer_id, b.customer_id);

    let mut conn = pool.acquire().await.unwrap();
    let lookup = customers::lookup_customer(&mut conn, "ab-123").await.unwrap();
    // Contact details from the first sighting are kept.
    assert_eq!(lookup.customer.first_name, "Ada");
    assert_eq!(lookup.insights.previous_stays, 2);

    // Each hotel sees only its own bookings, but global counts span both.
    let hist = history::customer_history(&mut conn, north.actor, a.customer_id, None, None)
        .await
        .unwrap();
    assert_eq!(hist.bookings.len(), 1);
    assert_eq!(hist.hotel_stay_count, 1);
    assert_eq!(hist.global_stay_count, 2);
    assert_eq!(hist.global_average_rating, 0.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn lookup_of_unknown_gov_id_is_not_found(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let result = customers::lookup_customer(&mut conn, "NOPE").await;
    assert_matches!(result, Err(AppError::Core(CoreError::NotFound { .. })));
}

// ---------------------------------------------------------------------------
// Tenancy
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn foreign_room_id_is_forbidden(pool: PgPool) {
    let north = seed_hotel(&pool, "owner@n.test", &["101"]).await;
    let south = seed_hotel(&pool, "owner@s.test", &["201"]).await;
    let foreign_id = room_id(&pool, north.outcome.hotel_id, "101").await;

    let result = create(
        &pool,
        south.actor,
        BookingRequest {
            room: RoomRef::from_id(foreign_id),
            ..request("201", guest("Ada", "A1"), 0, 24)
        },
    )
    .await;
    assert_matches!(result, Err(AppError::Core(CoreError::Forbidden(_))));

    let booking = create(&pool, north.actor, request("101", guest("Ada", "A1"), 0, 24)).await.unwrap();
    let foreign_checkout =
        checkout(&pool, south.actor, CheckoutTarget::Booking(booking.id), CheckoutRequest::default()).await;
    assert_matches!(foreign_checkout, Err(AppError::Core(CoreError::Forbidden(_))));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn room_numbers_resolve_within_own_hotel(pool: PgPool) {
    let north = seed_hotel(&pool, "owner@n2.test", &["101"]).await;
    let south = seed_hotel(&pool, "owner@s2.test", &["101"]).await;

    let booking = create(&pool, south.actor, request("101", guest("Ada", "A1"), 0, 24)).await.unwrap();
    assert_eq!(booking.room_id, room_id(&pool, south.outcome.hotel_id, "101").await);

    // North's room 101 is untouched by south's booking.
    create(&pool, north.actor, request("101", guest("Bob", "B1"), 0, 24)).await.unwrap();

    let missing = create(&pool, north.actor, request("999", guest("Ada", "A1"), 0, 24)).await;
    assert_matches!(missing, Err(AppError::Core(CoreError::NotFound { .. })));
}

// ---------------------------------------------------------------------------
// Availability
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn bulk_search_agrees_with_point_checks(pool: PgPool) {
    let hotel = seed_hotel(&pool, "owner@grid.test", &["1", "2", "3"]).await;
    create(&pool, hotel.actor, request("1", guest("Ada", "A1"), 10, 12)).await.unwrap();
    create(&pool, hotel.actor, request("2", guest("Bob", "B1"), 8, 20)).await.unwrap();

    let mut conn = pool.acquire().await.unwrap();
    for (from, to) in [(0, 8), (9, 11), (12, 14), (11, 13), (20, 22), (5, 25)] {
        let free = rooms::find_available_rooms(&mut conn, hotel.actor, at(from), at(to))
            .await
            .unwrap();
        for number in ["1", "2", "3"] {
            let point = rooms::is_room_available(
                &mut conn,
                hotel.actor,
                &RoomRef::parse(number).unwrap(),
                at(from),
                at(to),
            )
            .await
            .unwrap();
            let listed = free.iter().any(|r| r.room_number == number);
            assert_eq!(point, listed, "room {number} for {from}..{to}");
        }
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn completed_booking_frees_the_room(pool: PgPool) {
    let hotel = seed_hotel(&pool, "owner@free.test", &["8"]).await;
    let booking = create(&pool, hotel.actor, request("8", guest("Ada", "A1"), 0, 48)).await.unwrap();
    checkout(&pool, hotel.actor, CheckoutTarget::Booking(booking.id), CheckoutRequest::default())
        .await
        .unwrap();

    create(&pool, hotel.actor, request("8", guest("Bob", "B1"), 10, 20)).await.unwrap();
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_room_in_layout_leaves_nothing_behind(pool: PgPool) {
    let mut uow = UnitOfWork::begin(&pool).await.unwrap();
    let result = register_hotel(&mut uow, common::registration("owner@dup.test", &["101", "102", "101"])).await;
    assert_matches!(result, Err(AppError::Core(CoreError::Conflict(msg))) if msg.contains("101"));
    uow.rollback().await.unwrap();

    let hotels: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM hotels").fetch_one(&pool).await.unwrap();
    let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM hotel_users").fetch_one(&pool).await.unwrap();
    let rooms: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM rooms").fetch_one(&pool).await.unwrap();
    assert_eq!((hotels, users, rooms), (0, 0, 0));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn negative_layout_rate_rejected_before_any_write(pool: PgPool) {
    let mut reg = common::registration("owner@rate.test", &["101", "102"]);
    reg.floors[0].rooms[1].rate = Decimal::new(-5000, 2);

    let mut uow = UnitOfWork::begin(&pool).await.unwrap();
    let result = register_hotel(&mut uow, reg).await;
    assert_matches!(result, Err(AppError::Core(CoreError::Validation(msg))) if msg.contains("102"));
    uow.rollback().await.unwrap();

    let hotels: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM hotels").fetch_one(&pool).await.unwrap();
    assert_eq!(hotels, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn registration_creates_every_layout_room(pool: PgPool) {
    let hotel = seed_hotel(&pool, "owner@layout.test", &["101", "102", "201"]).await;
    assert_eq!(hotel.outcome.rooms_created, 3);

    let listed = RoomRepo::list_for_hotel(&pool, hotel.outcome.hotel_id).await.unwrap();
    let mut numbers: Vec<_> = listed.iter().map(|r| r.room_number.as_str()).collect();
    numbers.sort_unstable();
    assert_eq!(numbers, ["101", "102", "201"]);
    assert!(listed.iter().all(|r| r.status == "Available"));
}
