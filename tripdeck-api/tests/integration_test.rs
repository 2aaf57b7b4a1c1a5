/// Integration tests for the Tripdeck API
///
/// These tests verify the system end-to-end against a real database:
/// - Entity creation and read-back
/// - Partial update semantics (untouched fields survive)
/// - Booking lifecycle: type-checked cancellation, hydrated reads
/// - Login paths for local and federated identities

mod common;

use axum::http::StatusCode;
use common::{send_json, TestContext};
use serde_json::json;
use tripdeck_shared::models::booking::Booking;
use uuid::Uuid;

#[tokio::test]
async fn test_health_check() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = send_json(&ctx.app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_create_hotel_returns_all_supplied_fields() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = send_json(
        &ctx.app,
        "POST",
        "/v1/hotels",
        Some(json!({
            "name": "Grand Plaza",
            "location": "Paris",
            "price": 150,
            "available_rooms": 12,
            "check_in_date": "2025-06-22",
            "check_out_date": "2025-06-25",
            "overall_rating": 4.5,
            "amenities": ["wifi", "pool"],
            "images": [{"thumbnail": "https://example.com/1.jpg"}]
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["id"].is_i64());
    assert_eq!(body["name"], "Grand Plaza");
    assert_eq!(body["location"], "Paris");
    assert_eq!(body["price"], 150);
    assert_eq!(body["overall_rating"], 4.5);
    assert_eq!(body["amenities"], json!(["wifi", "pool"]));
    assert_eq!(body["images"][0]["thumbnail"], "https://example.com/1.jpg");

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_partial_update_leaves_other_fields_unchanged() {
    let ctx = TestContext::new().await.unwrap();

    let (_, hotel) = send_json(
        &ctx.app,
        "POST",
        "/v1/hotels",
        Some(json!({
            "name": "Budget Inn",
            "location": "Lyon",
            "price": 80,
            "available_rooms": 4,
            "check_in_date": "2025-07-01",
            "check_out_date": "2025-07-03",
            "link": "https://example.com/budget-inn",
            "reviews": 37
        })),
    )
    .await;
    let hotel_id = hotel["id"].as_i64().unwrap();

    // Patch only the price
    let (status, updated) = send_json(
        &ctx.app,
        "PUT",
        &format!("/v1/hotels/{}", hotel_id),
        Some(json!({"price": 150})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["price"], 150);
    assert_eq!(updated["name"], "Budget Inn");
    assert_eq!(updated["location"], "Lyon");
    assert_eq!(updated["available_rooms"], 4);
    assert_eq!(updated["link"], "https://example.com/budget-inn");
    assert_eq!(updated["reviews"], 37);

    // Explicit null clears a nullable field; unmentioned fields stay
    let (status, cleared) = send_json(
        &ctx.app,
        "PUT",
        &format!("/v1/hotels/{}", hotel_id),
        Some(json!({"link": null})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(cleared["link"].is_null());
    assert_eq!(cleared["reviews"], 37);
    assert_eq!(cleared["price"], 150);

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_update_missing_hotel_is_not_found() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = send_json(
        &ctx.app,
        "PUT",
        "/v1/hotels/999999999",
        Some(json!({"price": 1})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_booking_lifecycle_with_type_checked_cancellation() {
    let ctx = TestContext::new().await.unwrap();

    let (_, flight) = send_json(
        &ctx.app,
        "POST",
        "/v1/flights",
        Some(json!({
            "departure_id": "JFK",
            "arrival_id": "CDG",
            "outbound_date": "2025-06-22",
            "return_date": "2025-06-29",
            "price": 640,
            "airline": "Delta"
        })),
    )
    .await;
    let flight_id = flight["id"].as_i64().unwrap();

    // Book the flight
    let (status, booking) = send_json(
        &ctx.app,
        "POST",
        "/v1/bookings/flights",
        Some(json!({"user_id": ctx.user.id, "flight_id": flight_id})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let booking_id = booking["id"].as_i64().unwrap();

    // The hydrated response embeds the flight and no hotel
    assert_eq!(booking["flight_id"], flight_id);
    assert!(booking["hotel_id"].is_null());
    assert_eq!(booking["flight"]["airline"], "Delta");
    assert!(booking["hotel"].is_null());

    // Cancelling it as a hotel booking misses and deletes nothing
    let (status, body) = send_json(
        &ctx.app,
        "DELETE",
        &format!("/v1/bookings/hotels/{}", booking_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
    assert!(Booking::find_by_id(&ctx.db, booking_id)
        .await
        .unwrap()
        .is_some());

    // The matching cancellation succeeds and the booking is gone
    let (status, body) = send_json(
        &ctx.app,
        "DELETE",
        &format!("/v1/bookings/flights/{}", booking_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Flight booking deleted successfully");
    assert!(Booking::find_by_id(&ctx.db, booking_id)
        .await
        .unwrap()
        .is_none());

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_user_bookings_are_hydrated() {
    let ctx = TestContext::new().await.unwrap();

    let (_, hotel) = send_json(
        &ctx.app,
        "POST",
        "/v1/hotels",
        Some(json!({
            "name": "Harbor View",
            "location": "Nice",
            "price": 210,
            "available_rooms": 2,
            "check_in_date": "2025-08-10",
            "check_out_date": "2025-08-14"
        })),
    )
    .await;
    let hotel_id = hotel["id"].as_i64().unwrap();

    let (status, _) = send_json(
        &ctx.app,
        "POST",
        "/v1/bookings/hotels",
        Some(json!({"user_id": ctx.user.id, "hotel_id": hotel_id})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, bookings) = send_json(
        &ctx.app,
        "GET",
        &format!("/v1/bookings/{}", ctx.user.id),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let bookings = bookings.as_array().unwrap();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0]["hotel"]["name"], "Harbor View");
    assert!(bookings[0]["flight"].is_null());
    assert!(bookings[0]["flight_id"].is_null());

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_booking_unknown_flight_is_rejected() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = send_json(
        &ctx.app,
        "POST",
        "/v1/bookings/flights",
        Some(json!({"user_id": ctx.user.id, "flight_id": 999999999})),
    )
    .await;

    // Foreign key violation surfaces as a client error
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_register_and_login() {
    let ctx = TestContext::new().await.unwrap();

    let suffix = Uuid::new_v4();
    let email = format!("register-{}@example.com", suffix);

    let (status, registered) = send_json(
        &ctx.app,
        "POST",
        "/v1/auth/register",
        Some(json!({
            "username": format!("register-{}", suffix),
            "email": email,
            "password": "Sup3r-Secret!"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let user_id = registered["user_id"].as_str().unwrap().to_string();
    assert_eq!(registered["is_active"], true);

    let (status, logged_in) = send_json(
        &ctx.app,
        "POST",
        "/v1/auth/login",
        Some(json!({"email": email, "password": "Sup3r-Secret!"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(logged_in["user_id"], user_id.as_str());

    let (status, _) = send_json(
        &ctx.app,
        "POST",
        "/v1/auth/login",
        Some(json!({"email": email, "password": "wrong-password"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(&user_id)
        .execute(&ctx.db)
        .await
        .unwrap();
    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_register_rejects_invalid_email() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = send_json(
        &ctx.app,
        "POST",
        "/v1/auth/register",
        Some(json!({
            "username": "bad-email-user",
            "email": "not-an-email",
            "password": "Sup3r-Secret!"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "validation_error");
    assert_eq!(body["details"][0]["field"], "email");

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_federated_login_upserts_once() {
    let ctx = TestContext::new().await.unwrap();

    let external_id = format!("google-{}", Uuid::new_v4());
    let payload = json!({
        "id": external_id,
        "email": format!("{}@example.com", external_id),
        "name": format!("Fed User {}", external_id)
    });

    // First login creates the account with the provider-issued id
    let (status, first) = send_json(&ctx.app, "POST", "/v1/auth/federated", Some(payload.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["user_id"], external_id.as_str());

    // Second login returns the same account
    let (status, second) = send_json(&ctx.app, "POST", "/v1/auth/federated", Some(payload)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["user_id"], external_id.as_str());

    // A federated account cannot log in with credentials
    let (status, _) = send_json(
        &ctx.app,
        "POST",
        "/v1/auth/login",
        Some(json!({
            "email": format!("{}@example.com", external_id),
            "password": "anything-at-all"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(&external_id)
        .execute(&ctx.db)
        .await
        .unwrap();
    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_search_without_api_key_is_service_unavailable() {
    // Only meaningful when the environment has no key configured
    if std::env::var("SERPAPI_API_KEY").map_or(false, |k| !k.is_empty()) {
        return;
    }

    let ctx = TestContext::new().await.unwrap();

    let (status, body) = send_json(
        &ctx.app,
        "GET",
        "/v1/search/flights?origin=JFK&destination=CDG&departure_date=2025-06-22",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "upstream_unavailable");

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_hotel_search_rejects_malformed_date_before_upstream() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = send_json(
        &ctx.app,
        "GET",
        "/v1/search/hotels?destination=Paris&check_in=junk&check_out=25/06/2025",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");

    ctx.cleanup().await.unwrap();
}
