/// Booking endpoints
///
/// - `POST /v1/bookings/flights` - Book a flight for a user
/// - `POST /v1/bookings/hotels` - Book a hotel for a user
/// - `DELETE /v1/bookings/flights/{id}` - Cancel a flight booking
/// - `DELETE /v1/bookings/hotels/{id}` - Cancel a hotel booking
/// - `GET /v1/bookings/{user_id}?limit&offset` - A user's bookings, hydrated
///
/// Cancellation is type-checked: the flight cancellation only matches
/// bookings with a flight reference, so passing a hotel booking's id
/// reports not-found and deletes nothing.

use crate::{app::AppState, error::{ApiError, ApiResult}};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tripdeck_shared::models::booking::{Booking, BookingTarget, HydratedBooking};

use super::hotels::Pagination;

/// Request to book a flight
#[derive(Debug, Deserialize)]
pub struct BookFlightRequest {
    /// Owning user id
    pub user_id: String,

    /// Existing flight id
    pub flight_id: i64,
}

/// Request to book a hotel
#[derive(Debug, Deserialize)]
pub struct BookHotelRequest {
    /// Owning user id
    pub user_id: String,

    /// Existing hotel id
    pub hotel_id: i64,
}

/// Cancellation outcome
#[derive(Debug, Serialize)]
pub struct CancelResponse {
    /// Human-readable outcome
    pub message: String,
}

/// Book a flight
///
/// Returns the hydrated booking so the caller sees the flight details
/// without a second request.
///
/// # Errors
///
/// - `400 Bad Request`: unknown user or flight id (foreign key)
pub async fn book_flight(
    State(state): State<AppState>,
    Json(req): Json<BookFlightRequest>,
) -> ApiResult<Json<HydratedBooking>> {
    let booking =
        Booking::create(&state.db, &req.user_id, BookingTarget::Flight(req.flight_id)).await?;
    Ok(Json(booking.hydrate(&state.db).await?))
}

/// Book a hotel
pub async fn book_hotel(
    State(state): State<AppState>,
    Json(req): Json<BookHotelRequest>,
) -> ApiResult<Json<HydratedBooking>> {
    let booking =
        Booking::create(&state.db, &req.user_id, BookingTarget::Hotel(req.hotel_id)).await?;
    Ok(Json(booking.hydrate(&state.db).await?))
}

/// Cancel a flight booking
///
/// # Errors
///
/// - `404 Not Found`: the id does not belong to a flight booking
pub async fn cancel_flight_booking(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<CancelResponse>> {
    if Booking::cancel_flight(&state.db, id).await? {
        Ok(Json(CancelResponse {
            message: "Flight booking deleted successfully".to_string(),
        }))
    } else {
        Err(ApiError::NotFound("Flight booking not found".to_string()))
    }
}

/// Cancel a hotel booking
///
/// # Errors
///
/// - `404 Not Found`: the id does not belong to a hotel booking
pub async fn cancel_hotel_booking(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<CancelResponse>> {
    if Booking::cancel_hotel(&state.db, id).await? {
        Ok(Json(CancelResponse {
            message: "Hotel booking deleted successfully".to_string(),
        }))
    } else {
        Err(ApiError::NotFound("Hotel booking not found".to_string()))
    }
}

/// List a user's bookings, hydrated
pub async fn list_user_bookings(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(page): Query<Pagination>,
) -> ApiResult<Json<Vec<HydratedBooking>>> {
    let bookings = Booking::list_for_user(&state.db, &user_id, page.limit, page.offset).await?;
    Ok(Json(bookings))
}
