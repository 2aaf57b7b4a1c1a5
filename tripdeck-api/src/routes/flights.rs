/// Flight endpoints
///
/// - `POST /v1/flights` - Create a flight
/// - `GET /v1/flights?limit&offset` - List flights in insertion order
/// - `PUT /v1/flights/{id}` - Partial update (only supplied fields change)

use crate::{app::AppState, error::{ApiError, ApiResult}};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use tripdeck_shared::models::flight::{CreateFlight, Flight, UpdateFlight};

use super::hotels::Pagination;

/// Create a flight
pub async fn create_flight(
    State(state): State<AppState>,
    Json(req): Json<CreateFlight>,
) -> ApiResult<Json<Flight>> {
    let flight = Flight::create(&state.db, req).await?;
    tracing::info!(flight_id = flight.id, "Flight created");
    Ok(Json(flight))
}

/// List flights
pub async fn list_flights(
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> ApiResult<Json<Vec<Flight>>> {
    let flights = Flight::list(&state.db, page.limit, page.offset).await?;
    Ok(Json(flights))
}

/// Partially update a flight
///
/// # Errors
///
/// - `404 Not Found`: no flight with the given id
pub async fn update_flight(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateFlight>,
) -> ApiResult<Json<Flight>> {
    let flight = Flight::update(&state.db, id, req)
        .await?
        .ok_or_else(|| ApiError::NotFound("Flight not found".to_string()))?;

    Ok(Json(flight))
}
