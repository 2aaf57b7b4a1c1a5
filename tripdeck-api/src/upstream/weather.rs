/// Weather forecast via the OpenWeather 5-day forecast API
///
/// Each forecast entry is mapped to a flat record; missing upstream
/// fields default to `"N/A"` (numeric/time fields) or `"Unknown"`
/// (condition description) so one sparse entry never fails the whole
/// forecast.

use serde::{Deserialize, Serialize};

use super::{SearchError, WEATHER_URL};

/// Normalized forecast entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastEntry {
    /// Forecast timestamp, or "N/A"
    pub datetime: String,

    /// Temperature in °C, or "N/A"
    pub temperature: String,

    /// Condition description, or "Unknown"
    pub weather: String,

    /// Wind speed in m/s, or "N/A"
    pub wind_speed: String,

    /// Relative humidity in percent, or "N/A"
    pub humidity: String,
}

/// Upstream response shape (only the fields we consume)
#[derive(Debug, Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    list: Vec<ForecastItem>,
}

#[derive(Debug, Deserialize)]
struct ForecastItem {
    dt_txt: Option<String>,

    main: Option<MainBlock>,

    #[serde(default)]
    weather: Vec<WeatherBlock>,

    wind: Option<WindBlock>,
}

#[derive(Debug, Deserialize)]
struct MainBlock {
    temp: Option<f64>,

    humidity: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct WeatherBlock {
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WindBlock {
    speed: Option<f64>,
}

/// Fetches a 5-day forecast for a city.
///
/// # Errors
///
/// - `MissingApiKey`: no OpenWeather key configured
/// - `Network`: upstream unreachable or timed out
/// - `Upstream`: non-200 upstream status
/// - `Decode`: response body did not match the expected shape
pub async fn get_weather(
    client: &reqwest::Client,
    api_key: Option<&str>,
    city: &str,
) -> Result<Vec<ForecastEntry>, SearchError> {
    let api_key = api_key.ok_or(SearchError::MissingApiKey("OpenWeather"))?;

    tracing::debug!(city, "Fetching weather forecast");

    let response = client
        .get(WEATHER_URL)
        .query(&[("q", city), ("appid", api_key), ("units", "metric")])
        .send()
        .await
        .map_err(SearchError::Network)?;

    let status = response.status();
    if !status.is_success() {
        return Err(SearchError::Upstream(format!(
            "weather forecast returned HTTP {}",
            status
        )));
    }

    let results: ForecastResponse = response
        .json()
        .await
        .map_err(|e| SearchError::Decode(e.to_string()))?;

    Ok(map_forecast(results))
}

fn map_forecast(results: ForecastResponse) -> Vec<ForecastEntry> {
    results
        .list
        .into_iter()
        .map(|item| ForecastEntry {
            datetime: item.dt_txt.unwrap_or_else(|| "N/A".to_string()),
            temperature: item
                .main
                .as_ref()
                .and_then(|m| m.temp)
                .map(|t| t.to_string())
                .unwrap_or_else(|| "N/A".to_string()),
            weather: item
                .weather
                .first()
                .and_then(|w| w.description.clone())
                .unwrap_or_else(|| "Unknown".to_string()),
            wind_speed: item
                .wind
                .as_ref()
                .and_then(|w| w.speed)
                .map(|s| s.to_string())
                .unwrap_or_else(|| "N/A".to_string()),
            humidity: item
                .main
                .as_ref()
                .and_then(|m| m.humidity)
                .map(|h| h.to_string())
                .unwrap_or_else(|| "N/A".to_string()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_missing_api_key_fails_before_network() {
        let client = reqwest::Client::new();

        let err = get_weather(&client, None, "Paris").await.unwrap_err();
        assert!(matches!(err, SearchError::MissingApiKey("OpenWeather")));
    }

    #[test]
    fn test_map_forecast_complete_entry() {
        let response: ForecastResponse = serde_json::from_value(json!({
            "list": [{
                "dt_txt": "2025-06-22 12:00:00",
                "main": {"temp": 24.3, "humidity": 61.0},
                "weather": [{"description": "scattered clouds"}],
                "wind": {"speed": 4.2}
            }]
        }))
        .unwrap();

        let forecast = map_forecast(response);
        assert_eq!(forecast.len(), 1);
        assert_eq!(forecast[0].datetime, "2025-06-22 12:00:00");
        assert_eq!(forecast[0].temperature, "24.3");
        assert_eq!(forecast[0].weather, "scattered clouds");
        assert_eq!(forecast[0].wind_speed, "4.2");
        assert_eq!(forecast[0].humidity, "61");
    }

    #[test]
    fn test_map_forecast_sparse_entry_defaults() {
        let response: ForecastResponse = serde_json::from_value(json!({
            "list": [{}]
        }))
        .unwrap();

        let forecast = map_forecast(response);
        assert_eq!(forecast[0].datetime, "N/A");
        assert_eq!(forecast[0].temperature, "N/A");
        assert_eq!(forecast[0].weather, "Unknown");
        assert_eq!(forecast[0].wind_speed, "N/A");
        assert_eq!(forecast[0].humidity, "N/A");
    }

    #[test]
    fn test_map_forecast_empty_list() {
        let response: ForecastResponse = serde_json::from_value(json!({})).unwrap();
        assert!(map_forecast(response).is_empty());
    }
}
