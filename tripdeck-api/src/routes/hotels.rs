/// Hotel endpoints
///
/// - `POST /v1/hotels` - Create a hotel
/// - `GET /v1/hotels?limit&offset` - List hotels in insertion order
/// - `PUT /v1/hotels/{id}` - Partial update (only supplied fields change)

use crate::{app::AppState, error::{ApiError, ApiResult}};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use tripdeck_shared::models::hotel::{CreateHotel, Hotel, UpdateHotel};

/// Pagination query parameters
#[derive(Debug, Deserialize)]
pub struct Pagination {
    /// Maximum records to return
    #[serde(default = "default_limit")]
    pub limit: i64,

    /// Records to skip
    #[serde(default)]
    pub offset: i64,
}

pub(crate) fn default_limit() -> i64 {
    10
}

/// Create a hotel
pub async fn create_hotel(
    State(state): State<AppState>,
    Json(req): Json<CreateHotel>,
) -> ApiResult<Json<Hotel>> {
    let hotel = Hotel::create(&state.db, req).await?;
    tracing::info!(hotel_id = hotel.id, "Hotel created");
    Ok(Json(hotel))
}

/// List hotels
pub async fn list_hotels(
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> ApiResult<Json<Vec<Hotel>>> {
    let hotels = Hotel::list(&state.db, page.limit, page.offset).await?;
    Ok(Json(hotels))
}

/// Partially update a hotel
///
/// # Errors
///
/// - `404 Not Found`: no hotel with the given id
pub async fn update_hotel(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateHotel>,
) -> ApiResult<Json<Hotel>> {
    let hotel = Hotel::update(&state.db, id, req)
        .await?
        .ok_or_else(|| ApiError::NotFound("Hotel not found".to_string()))?;

    Ok(Json(hotel))
}
