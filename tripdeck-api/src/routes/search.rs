/// Upstream search endpoints
///
/// - `GET /v1/search/flights` - Round-trip flight search
/// - `GET /v1/search/hotels` - Hotel search (dates accepted in any
///   supported format, normalized before the upstream call)
/// - `GET /v1/weather` - 5-day forecast for a city

use crate::{app::AppState, error::ApiResult, upstream};
use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Flight search query parameters
#[derive(Debug, Deserialize)]
pub struct FlightSearchQuery {
    /// Departure airport IATA code
    pub origin: String,

    /// Arrival airport IATA code
    pub destination: String,

    /// Departure date (YYYY-MM-DD)
    pub departure_date: String,

    /// Return date (YYYY-MM-DD) - optional
    #[serde(default)]
    pub return_date: Option<String>,
}

/// Flight search response
#[derive(Debug, Serialize)]
pub struct FlightSearchResponse {
    /// Normalized results, best options first
    pub flights: Vec<upstream::FlightResult>,
}

/// Hotel search query parameters
#[derive(Debug, Deserialize)]
pub struct HotelSearchQuery {
    /// Free-text destination query
    pub destination: String,

    /// Check-in date (any supported format)
    pub check_in: String,

    /// Check-out date (any supported format)
    pub check_out: String,

    /// Number of adults
    #[serde(default = "default_adults")]
    pub adults: u32,

    /// Price currency
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_adults() -> u32 {
    2
}

fn default_currency() -> String {
    "USD".to_string()
}

/// Hotel search response: raw upstream properties
#[derive(Debug, Serialize)]
pub struct HotelSearchResponse {
    /// Upstream `properties` collection, unfiltered
    pub hotels: Vec<Value>,
}

/// Weather query parameters
#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    /// City name
    pub city_name: String,
}

/// Search for flights
pub async fn search_flights(
    State(state): State<AppState>,
    Query(query): Query<FlightSearchQuery>,
) -> ApiResult<Json<FlightSearchResponse>> {
    let flights = upstream::search_flights(
        &state.http,
        state.serpapi_key(),
        &query.origin,
        &query.destination,
        &query.departure_date,
        query.return_date.as_deref(),
    )
    .await?;

    Ok(Json(FlightSearchResponse { flights }))
}

/// Search for hotels
pub async fn search_hotels(
    State(state): State<AppState>,
    Query(query): Query<HotelSearchQuery>,
) -> ApiResult<Json<HotelSearchResponse>> {
    let hotels = upstream::search_hotels(
        &state.http,
        state.serpapi_key(),
        &query.destination,
        &query.check_in,
        &query.check_out,
        query.adults,
        &query.currency,
    )
    .await?;

    Ok(Json(HotelSearchResponse { hotels }))
}

/// Fetch a 5-day forecast
pub async fn weather(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> ApiResult<Json<Vec<upstream::ForecastEntry>>> {
    let forecast = upstream::get_weather(&state.http, state.weather_key(), &query.city_name).await?;
    Ok(Json(forecast))
}
