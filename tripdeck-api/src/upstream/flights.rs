/// Flight search via SerpAPI's Google Flights engine
///
/// The upstream splits results into `best_flights` and `other_flights`;
/// both are flattened into one ordered sequence, best first. Each option
/// is reduced to a single normalized record: the airline, flight number,
/// and departure time come from the first segment, the arrival time from
/// the last segment, and missing fields fall back to `"N/A"` /
/// `"Unknown Airline"` rather than failing the whole search.

use serde::{Deserialize, Serialize};

use super::{SearchError, SERPAPI_URL};

/// Normalized flight search result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightResult {
    /// Total travel time in minutes, or "N/A"
    pub total_duration: String,

    /// Price in USD, or "N/A"
    pub price: String,

    /// Operating airline of the first segment
    pub airline: String,

    /// Flight number of the first segment, or "N/A"
    pub flight_number: String,

    /// Departure time of the first segment, or "N/A"
    pub departure_time: String,

    /// Arrival time of the last segment, or "N/A"
    pub arrival_time: String,

    /// Deep link back to the upstream search
    pub deep_link: String,
}

/// Upstream response shape (only the fields we consume)
#[derive(Debug, Deserialize)]
struct FlightSearchResponse {
    search_metadata: Option<SearchMetadata>,

    #[serde(default)]
    best_flights: Vec<FlightOption>,

    #[serde(default)]
    other_flights: Vec<FlightOption>,
}

#[derive(Debug, Deserialize)]
struct SearchMetadata {
    status: Option<String>,

    #[serde(default)]
    google_flights_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FlightOption {
    total_duration: Option<i64>,

    price: Option<f64>,

    #[serde(default)]
    flights: Vec<FlightSegment>,
}

#[derive(Debug, Deserialize)]
struct FlightSegment {
    airline: Option<String>,

    flight_number: Option<String>,

    departure_airport: Option<AirportStop>,

    arrival_airport: Option<AirportStop>,
}

#[derive(Debug, Deserialize)]
struct AirportStop {
    time: Option<String>,
}

/// Builds the outbound query parameters for a flight search.
///
/// Fixed policy parameters: round-trip (`type=1`), price-sorted
/// (`sort_by=2`), deep search, cache bypassed. A missing return date is
/// sent as an empty string, matching what the upstream expects.
pub fn flight_search_params(
    api_key: &str,
    origin: &str,
    destination: &str,
    departure_date: &str,
    return_date: Option<&str>,
) -> Vec<(&'static str, String)> {
    vec![
        ("engine", "google_flights".to_string()),
        ("departure_id", origin.to_string()),
        ("arrival_id", destination.to_string()),
        ("outbound_date", departure_date.to_string()),
        ("return_date", return_date.unwrap_or_default().to_string()),
        ("api_key", api_key.to_string()),
        ("hl", "en".to_string()),
        ("currency", "USD".to_string()),
        ("gl", "us".to_string()),
        ("type", "1".to_string()),
        ("sort_by", "2".to_string()),
        ("deep_search", "true".to_string()),
        ("no_cache", "true".to_string()),
    ]
}

/// Searches for round-trip flights.
///
/// Fails with [`SearchError::MissingApiKey`] before any network I/O when
/// no key is configured.
///
/// # Errors
///
/// - `MissingApiKey`: no SerpAPI key configured
/// - `Network`: upstream unreachable or timed out
/// - `Upstream`: non-success HTTP status or error payload
/// - `Decode`: response body did not match the expected shape
/// - `NoResults`: upstream succeeded but found nothing
pub async fn search_flights(
    client: &reqwest::Client,
    api_key: Option<&str>,
    origin: &str,
    destination: &str,
    departure_date: &str,
    return_date: Option<&str>,
) -> Result<Vec<FlightResult>, SearchError> {
    let api_key = api_key.ok_or(SearchError::MissingApiKey("SerpAPI"))?;

    let params = flight_search_params(api_key, origin, destination, departure_date, return_date);

    tracing::debug!(origin, destination, departure_date, "Searching flights");

    let response = client
        .get(SERPAPI_URL)
        .query(&params)
        .send()
        .await
        .map_err(SearchError::Network)?;

    let status = response.status();
    if !status.is_success() {
        return Err(SearchError::Upstream(format!(
            "flight search returned HTTP {}",
            status
        )));
    }

    let results: FlightSearchResponse = response
        .json()
        .await
        .map_err(|e| SearchError::Decode(e.to_string()))?;

    let metadata_status = results
        .search_metadata
        .as_ref()
        .and_then(|m| m.status.as_deref());
    if metadata_status != Some("Success") {
        return Err(SearchError::Upstream(format!(
            "flight search reported status {:?}",
            metadata_status.unwrap_or("missing")
        )));
    }

    if results.best_flights.is_empty() && results.other_flights.is_empty() {
        return Err(SearchError::NoResults(format!(
            "No flights found for {} to {} on {}",
            origin, destination, departure_date
        )));
    }

    Ok(flatten_flights(results))
}

/// Flattens best-then-other flight options into normalized records.
///
/// Options without any segments are skipped; they carry nothing to show.
fn flatten_flights(results: FlightSearchResponse) -> Vec<FlightResult> {
    let deep_link = results
        .search_metadata
        .as_ref()
        .and_then(|m| m.google_flights_url.clone())
        .unwrap_or_default();

    results
        .best_flights
        .into_iter()
        .chain(results.other_flights)
        .filter_map(|option| {
            let first = option.flights.first()?;
            let last = option.flights.last()?;

            Some(FlightResult {
                total_duration: option
                    .total_duration
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "N/A".to_string()),
                price: option
                    .price
                    .map(|p| p.to_string())
                    .unwrap_or_else(|| "N/A".to_string()),
                airline: first
                    .airline
                    .clone()
                    .unwrap_or_else(|| "Unknown Airline".to_string()),
                flight_number: first
                    .flight_number
                    .clone()
                    .unwrap_or_else(|| "N/A".to_string()),
                departure_time: first
                    .departure_airport
                    .as_ref()
                    .and_then(|a| a.time.clone())
                    .unwrap_or_else(|| "N/A".to_string()),
                arrival_time: last
                    .arrival_airport
                    .as_ref()
                    .and_then(|a| a.time.clone())
                    .unwrap_or_else(|| "N/A".to_string()),
                deep_link: deep_link.clone(),
            })
        })
        .collect()
}
