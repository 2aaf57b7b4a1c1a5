/// Hotel search via SerpAPI's Google Hotels engine
///
/// Both check-in and check-out dates go through the date normalizer
/// before the request is built, so the upstream always receives ISO
/// `YYYY-MM-DD` regardless of what the user typed. The upstream
/// `properties` collection is returned untouched: its shape is an opaque
/// external contract and the frontend consumes it directly.

use serde::Deserialize;
use serde_json::Value;
use tripdeck_shared::dates;

use super::{SearchError, SERPAPI_URL};

/// Upstream response shape (only the collection we pass through)
#[derive(Debug, Deserialize)]
struct HotelSearchResponse {
    #[serde(default)]
    properties: Vec<Value>,
}

/// Builds the outbound query parameters for a hotel search.
///
/// Dates must already be normalized to ISO form.
pub fn hotel_search_params(
    api_key: &str,
    query: &str,
    check_in: &str,
    check_out: &str,
    adults: u32,
    currency: &str,
) -> Vec<(&'static str, String)> {
    vec![
        ("engine", "google_hotels".to_string()),
        ("q", query.to_string()),
        ("check_in_date", check_in.to_string()),
        ("check_out_date", check_out.to_string()),
        ("adults", adults.to_string()),
        ("currency", currency.to_string()),
        ("gl", "us".to_string()),
        ("hl", "en".to_string()),
        ("api_key", api_key.to_string()),
    ]
}

/// Searches for hotels.
///
/// # Errors
///
/// - `Date`: a supplied date failed normalization (client error)
/// - `MissingApiKey`: no SerpAPI key configured
/// - `Network`: upstream unreachable or timed out
/// - `Upstream`: non-success HTTP status
/// - `Decode`: response body did not match the expected shape
pub async fn search_hotels(
    client: &reqwest::Client,
    api_key: Option<&str>,
    query: &str,
    check_in: &str,
    check_out: &str,
    adults: u32,
    currency: &str,
) -> Result<Vec<Value>, SearchError> {
    // Normalize before touching the key or the network so a bad date is
    // always reported as the client error it is
    let check_in = dates::normalize(check_in)?;
    let check_out = dates::normalize(check_out)?;

    let api_key = api_key.ok_or(SearchError::MissingApiKey("SerpAPI"))?;

    let params = hotel_search_params(api_key, query, &check_in, &check_out, adults, currency);

    tracing::debug!(query, %check_in, %check_out, "Searching hotels");

    let response = client
        .get(SERPAPI_URL)
        .query(&params)
        .send()
        .await
        .map_err(SearchError::Network)?;

    let status = response.status();
    if !status.is_success() {
        return Err(SearchError::Upstream(format!(
            "hotel search returned HTTP {}",
            status
        )));
    }

    let results: HotelSearchResponse = response
        .json()
        .await
        .map_err(|e| SearchError::Decode(e.to_string()))?;

    Ok(results.properties)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hotel_search_params_shape() {
        let params = hotel_search_params("key123", "Paris hotel", "2025-06-22", "2025-06-25", 2, "USD");

        let get = |name: &str| {
            params
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.as_str())
                .unwrap()
        };

        assert_eq!(get("engine"), "google_hotels");
        assert_eq!(get("q"), "Paris hotel");
        assert_eq!(get("adults"), "2");
        assert_eq!(get("currency"), "USD");
        assert_eq!(get("gl"), "us");
        assert_eq!(get("hl"), "en");
    }

    #[tokio::test]
    async fn test_dates_normalized_before_request() {
        // An invalid date short-circuits with a client error even though
        // no key is configured, proving normalization happens first
        let client = reqwest::Client::new();

        let err = search_hotels(&client, None, "Paris hotel", "junk", "25/06/2025", 2, "USD")
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::Date(_)));

        // With valid non-ISO dates the next failure is the missing key
        let err = search_hotels(
            &client,
            None,
            "Paris hotel",
            "22/06/2025",
            "25/06/2025",
            2,
            "USD",
        )
        .await
        .unwrap_err();
        assert!(matches!(err, SearchError::MissingApiKey(_)));
    }

    #[test]
    fn test_normalized_dates_reach_params_in_iso() {
        let check_in = dates::normalize("22/06/2025").unwrap();
        let check_out = dates::normalize("25/06/2025").unwrap();
        let params = hotel_search_params("key123", "Paris hotel", &check_in, &check_out, 2, "USD");

        let get = |name: &str| {
            params
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.as_str())
                .unwrap()
        };

        assert_eq!(get("check_in_date"), "2025-06-22");
        assert_eq!(get("check_out_date"), "2025-06-25");
    }
}
