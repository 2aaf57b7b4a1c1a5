/// External search gateway
///
/// Wraps the two third-party HTTP APIs the system depends on: SerpAPI
/// (Google Flights / Google Hotels engines) and the OpenWeather forecast
/// endpoint. Each wrapper translates the upstream response shape into the
/// system's normalized result shape and maps failures onto
/// [`SearchError`], which the API layer turns into distinct client-facing
/// statuses.
///
/// All calls share one reqwest client with a uniform request timeout; no
/// upstream call runs without a deadline.
///
/// - `flights`: round-trip flight search
/// - `hotels`: hotel search (dates normalized before the request is built)
/// - `weather`: 5-day forecast

pub mod flights;
pub mod hotels;
pub mod weather;

pub use flights::{search_flights, FlightResult};
pub use hotels::search_hotels;
pub use weather::{get_weather, ForecastEntry};

use tripdeck_shared::dates::DateError;

/// SerpAPI search endpoint (flights and hotels engines)
pub const SERPAPI_URL: &str = "https://serpapi.com/search.json";

/// OpenWeather 5-day forecast endpoint
pub const WEATHER_URL: &str = "http://api.openweathermap.org/data/2.5/forecast";

/// Error type for upstream search operations
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Required API key is not configured; checked before any network I/O
    #[error("{0} API key is missing")]
    MissingApiKey(&'static str),

    /// Upstream reported success but returned no results
    #[error("{0}")]
    NoResults(String),

    /// Upstream returned an HTTP error or an error payload
    #[error("upstream error: {0}")]
    Upstream(String),

    /// Upstream was unreachable (connect, timeout, TLS)
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// Upstream response did not decode into the expected shape
    #[error("decode error: {0}")]
    Decode(String),

    /// A user-supplied date failed normalization
    #[error(transparent)]
    Date(#[from] DateError),
}
