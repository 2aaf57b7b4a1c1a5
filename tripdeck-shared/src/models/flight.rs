/// Flight model and database operations
///
/// Same lifecycle as hotels: created by operator actions, updated
/// field-by-field, never deleted. Times are stored as the display strings
/// the upstream search returns; only the travel dates are typed.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE flights (
///     id BIGSERIAL PRIMARY KEY,
///     departure_id TEXT NOT NULL,
///     arrival_id TEXT NOT NULL,
///     outbound_date DATE NOT NULL,
///     return_date DATE NOT NULL,
///     price INTEGER NOT NULL,
///     airline TEXT,
///     flight_number TEXT,
///     departure_time TEXT,
///     arrival_time TEXT,
///     total_duration INTEGER,
///     deep_link TEXT
/// );
/// ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::serde_util::double_option;

/// Flight inventory row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Flight {
    /// Unique flight ID
    pub id: i64,

    /// Departure airport IATA code
    pub departure_id: String,

    /// Arrival airport IATA code
    pub arrival_id: String,

    /// Outbound travel date
    pub outbound_date: NaiveDate,

    /// Return travel date
    pub return_date: NaiveDate,

    /// Total price
    pub price: i32,

    /// Optional operating airline
    pub airline: Option<String>,

    /// Optional flight number
    pub flight_number: Option<String>,

    /// Departure time as reported upstream
    pub departure_time: Option<String>,

    /// Arrival time as reported upstream
    pub arrival_time: Option<String>,

    /// Total duration in minutes
    pub total_duration: Option<i32>,

    /// Deep link to the upstream search result
    pub deep_link: Option<String>,
}

/// Input for creating a flight
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFlight {
    /// Departure airport IATA code
    pub departure_id: String,

    /// Arrival airport IATA code
    pub arrival_id: String,

    /// Outbound travel date
    pub outbound_date: NaiveDate,

    /// Return travel date
    pub return_date: NaiveDate,

    /// Total price
    pub price: i32,

    /// Optional operating airline
    #[serde(default)]
    pub airline: Option<String>,

    /// Optional flight number
    #[serde(default)]
    pub flight_number: Option<String>,

    /// Optional departure time string
    #[serde(default)]
    pub departure_time: Option<String>,

    /// Optional arrival time string
    #[serde(default)]
    pub arrival_time: Option<String>,

    /// Optional total duration in minutes
    #[serde(default)]
    pub total_duration: Option<i32>,

    /// Optional deep link to the upstream search result
    #[serde(default)]
    pub deep_link: Option<String>,
}

/// Input for partially updating a flight
///
/// `None` means "leave the field alone"; nullable columns clear on
/// `Some(None)` (JSON `null`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateFlight {
    /// New departure airport code
    pub departure_id: Option<String>,

    /// New arrival airport code
    pub arrival_id: Option<String>,

    /// New outbound date
    pub outbound_date: Option<NaiveDate>,

    /// New return date
    pub return_date: Option<NaiveDate>,

    /// New price
    pub price: Option<i32>,

    /// New airline (JSON null clears)
    #[serde(default, deserialize_with = "double_option")]
    pub airline: Option<Option<String>>,

    /// New flight number (JSON null clears)
    #[serde(default, deserialize_with = "double_option")]
    pub flight_number: Option<Option<String>>,
}

impl Flight {
    /// Creates a new flight and returns the stored row with its generated id.
    pub async fn create(pool: &PgPool, data: CreateFlight) -> Result<Self, sqlx::Error> {
        let flight = sqlx::query_as::<_, Flight>(
            r#"
            INSERT INTO flights (departure_id, arrival_id, outbound_date, return_date, price,
                                 airline, flight_number, departure_time, arrival_time,
                                 total_duration, deep_link)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id, departure_id, arrival_id, outbound_date, return_date, price,
                      airline, flight_number, departure_time, arrival_time,
                      total_duration, deep_link
            "#,
        )
        .bind(data.departure_id)
        .bind(data.arrival_id)
        .bind(data.outbound_date)
        .bind(data.return_date)
        .bind(data.price)
        .bind(data.airline)
        .bind(data.flight_number)
        .bind(data.departure_time)
        .bind(data.arrival_time)
        .bind(data.total_duration)
        .bind(data.deep_link)
        .fetch_one(pool)
        .await?;

        Ok(flight)
    }

    /// Finds a flight by id.
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let flight = sqlx::query_as::<_, Flight>(
            r#"
            SELECT id, departure_id, arrival_id, outbound_date, return_date, price,
                   airline, flight_number, departure_time, arrival_time,
                   total_duration, deep_link
            FROM flights
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(flight)
    }

    /// Lists flights in insertion order with pagination.
    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Self>, sqlx::Error> {
        let flights = sqlx::query_as::<_, Flight>(
            r#"
            SELECT id, departure_id, arrival_id, outbound_date, return_date, price,
                   airline, flight_number, departure_time, arrival_time,
                   total_duration, deep_link
            FROM flights
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        Ok(flights)
    }

    /// Partially updates a flight; only supplied fields are written.
    ///
    /// # Returns
    ///
    /// The updated row, or `None` if the id does not exist.
    pub async fn update(
        pool: &PgPool,
        id: i64,
        data: UpdateFlight,
    ) -> Result<Option<Self>, sqlx::Error> {
        let mut assignments = Vec::new();
        let mut bind_count = 1;

        if data.departure_id.is_some() {
            bind_count += 1;
            assignments.push(format!("departure_id = ${}", bind_count));
        }
        if data.arrival_id.is_some() {
            bind_count += 1;
            assignments.push(format!("arrival_id = ${}", bind_count));
        }
        if data.outbound_date.is_some() {
            bind_count += 1;
            assignments.push(format!("outbound_date = ${}", bind_count));
        }
        if data.return_date.is_some() {
            bind_count += 1;
            assignments.push(format!("return_date = ${}", bind_count));
        }
        if data.price.is_some() {
            bind_count += 1;
            assignments.push(format!("price = ${}", bind_count));
        }
        if data.airline.is_some() {
            bind_count += 1;
            assignments.push(format!("airline = ${}", bind_count));
        }
        if data.flight_number.is_some() {
            bind_count += 1;
            assignments.push(format!("flight_number = ${}", bind_count));
        }

        if assignments.is_empty() {
            return Self::find_by_id(pool, id).await;
        }

        let query = format!(
            "UPDATE flights SET {} WHERE id = $1 \
             RETURNING id, departure_id, arrival_id, outbound_date, return_date, price, \
                       airline, flight_number, departure_time, arrival_time, \
                       total_duration, deep_link",
            assignments.join(", ")
        );

        let mut q = sqlx::query_as::<_, Flight>(&query).bind(id);

        if let Some(departure_id) = data.departure_id {
            q = q.bind(departure_id);
        }
        if let Some(arrival_id) = data.arrival_id {
            q = q.bind(arrival_id);
        }
        if let Some(outbound_date) = data.outbound_date {
            q = q.bind(outbound_date);
        }
        if let Some(return_date) = data.return_date {
            q = q.bind(return_date);
        }
        if let Some(price) = data.price {
            q = q.bind(price);
        }
        if let Some(airline) = data.airline {
            q = q.bind(airline);
        }
        if let Some(flight_number) = data.flight_number {
            q = q.bind(flight_number);
        }

        let flight = q.fetch_optional(pool).await?;

        Ok(flight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_flight_default_is_empty_patch() {
        let update = UpdateFlight::default();
        assert!(update.departure_id.is_none());
        assert!(update.price.is_none());
        assert!(update.airline.is_none());
    }

    #[test]
    fn test_update_flight_null_clears_airline() {
        let patch: UpdateFlight =
            serde_json::from_str(r#"{"airline": null, "price": 420}"#).unwrap();

        assert_eq!(patch.airline, Some(None));
        assert_eq!(patch.price, Some(420));
        assert_eq!(patch.flight_number, None);
    }

    #[test]
    fn test_create_flight_minimal_payload() {
        let create: CreateFlight = serde_json::from_str(
            r#"{
                "departure_id": "JFK",
                "arrival_id": "CDG",
                "outbound_date": "2025-06-22",
                "return_date": "2025-06-29",
                "price": 640
            }"#,
        )
        .unwrap();

        assert_eq!(create.departure_id, "JFK");
        assert!(create.airline.is_none());
        assert!(create.deep_link.is_none());
    }

    // Integration tests for database operations are in tripdeck-api/tests/
}
