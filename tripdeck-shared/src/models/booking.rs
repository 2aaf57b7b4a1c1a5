/// Booking model and orchestration
///
/// A booking ties a user to exactly one hotel or one flight. The schema
/// only enforces that the referenced rows exist (foreign keys); the
/// exactly-one invariant is enforced here by construction:
/// [`BookingTarget`] cannot express "both" or "neither".
///
/// Cancellation is type-checked. Cancelling a flight booking only matches
/// rows whose `flight_id` is set, so a hotel booking id passed to the
/// flight cancellation never deletes anything; the miss is reported as a
/// normal not-found outcome, not an error.
///
/// Booking creation performs no capacity check and decrements no room or
/// seat counts. Two concurrent bookings against the same hotel both
/// insert; whether that is acceptable is an open product question, so the
/// behavior is kept as-is.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE bookings (
///     id BIGSERIAL PRIMARY KEY,
///     user_id TEXT NOT NULL REFERENCES users (id),
///     hotel_id BIGINT REFERENCES hotels (id),
///     flight_id BIGINT REFERENCES flights (id),
///     booking_date DATE NOT NULL
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use tripdeck_shared::models::booking::{Booking, BookingTarget};
/// # use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
/// let booking = Booking::create(&pool, "user-1", BookingTarget::Flight(42)).await?;
///
/// // Wrong-type cancellation is a no-op miss, not an error
/// assert!(!Booking::cancel_hotel(&pool, booking.id).await?);
/// assert!(Booking::cancel_flight(&pool, booking.id).await?);
/// # Ok(())
/// # }
/// ```

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::models::flight::Flight;
use crate::models::hotel::Hotel;

/// Booking row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Booking {
    /// Unique booking ID
    pub id: i64,

    /// Owning user
    pub user_id: String,

    /// Booked hotel, when this is a hotel booking
    pub hotel_id: Option<i64>,

    /// Booked flight, when this is a flight booking
    pub flight_id: Option<i64>,

    /// Date the booking was made
    pub booking_date: NaiveDate,
}

/// What a booking references: exactly one hotel or one flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingTarget {
    /// Hotel booking by hotel id
    Hotel(i64),

    /// Flight booking by flight id
    Flight(i64),
}

/// A booking with its referenced hotel or flight resolved.
///
/// Exactly one of `hotel`/`flight` is populated, matching the non-null
/// reference on the row, so callers get a complete view in one read.
#[derive(Debug, Clone, Serialize)]
pub struct HydratedBooking {
    /// Unique booking ID
    pub id: i64,

    /// Owning user
    pub user_id: String,

    /// Booked hotel id, when this is a hotel booking
    pub hotel_id: Option<i64>,

    /// Booked flight id, when this is a flight booking
    pub flight_id: Option<i64>,

    /// Date the booking was made
    pub booking_date: NaiveDate,

    /// Resolved hotel record for hotel bookings
    pub hotel: Option<Hotel>,

    /// Resolved flight record for flight bookings
    pub flight: Option<Flight>,
}

impl Booking {
    /// Creates a booking for the given user and target.
    ///
    /// The booking date defaults to today (UTC). Referential integrity is
    /// enforced by the foreign keys: a nonexistent user, hotel, or flight
    /// id fails the insert.
    pub async fn create(
        pool: &PgPool,
        user_id: &str,
        target: BookingTarget,
    ) -> Result<Self, sqlx::Error> {
        let (hotel_id, flight_id) = match target {
            BookingTarget::Hotel(id) => (Some(id), None),
            BookingTarget::Flight(id) => (None, Some(id)),
        };

        let booking = sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings (user_id, hotel_id, flight_id, booking_date)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, hotel_id, flight_id, booking_date
            "#,
        )
        .bind(user_id)
        .bind(hotel_id)
        .bind(flight_id)
        .bind(Utc::now().date_naive())
        .fetch_one(pool)
        .await?;

        tracing::info!(
            booking_id = booking.id,
            user_id = %booking.user_id,
            hotel_id = ?booking.hotel_id,
            flight_id = ?booking.flight_id,
            "Booking created"
        );

        Ok(booking)
    }

    /// Finds a booking by id.
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let booking = sqlx::query_as::<_, Booking>(
            r#"
            SELECT id, user_id, hotel_id, flight_id, booking_date
            FROM bookings
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(booking)
    }

    /// Cancels a flight booking.
    ///
    /// Matches only bookings whose flight reference is set, so an id that
    /// belongs to a hotel booking (or to nothing) is left alone.
    ///
    /// # Returns
    ///
    /// `true` if a flight booking was deleted, `false` if no matching
    /// booking exists. Both are normal outcomes.
    pub async fn cancel_flight(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1 AND flight_id IS NOT NULL")
            .bind(id)
            .execute(pool)
            .await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            tracing::info!(booking_id = id, "Flight booking cancelled");
        }
        Ok(deleted)
    }

    /// Cancels a hotel booking; symmetric to [`Booking::cancel_flight`].
    pub async fn cancel_hotel(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1 AND hotel_id IS NOT NULL")
            .bind(id)
            .execute(pool)
            .await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            tracing::info!(booking_id = id, "Hotel booking cancelled");
        }
        Ok(deleted)
    }

    /// Lists a user's bookings, hydrated, in insertion order.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<HydratedBooking>, sqlx::Error> {
        let bookings = sqlx::query_as::<_, Booking>(
            r#"
            SELECT id, user_id, hotel_id, flight_id, booking_date
            FROM bookings
            WHERE user_id = $1
            ORDER BY id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        let mut hydrated = Vec::with_capacity(bookings.len());
        for booking in bookings {
            hydrated.push(booking.hydrate(pool).await?);
        }

        Ok(hydrated)
    }

    /// Resolves this booking's hotel or flight reference into a
    /// [`HydratedBooking`].
    pub async fn hydrate(self, pool: &PgPool) -> Result<HydratedBooking, sqlx::Error> {
        let hotel = match self.hotel_id {
            Some(hotel_id) => Hotel::find_by_id(pool, hotel_id).await?,
            None => None,
        };
        let flight = match self.flight_id {
            Some(flight_id) => Flight::find_by_id(pool, flight_id).await?,
            None => None,
        };

        Ok(HydratedBooking {
            id: self.id,
            user_id: self.user_id,
            hotel_id: self.hotel_id,
            flight_id: self.flight_id,
            booking_date: self.booking_date,
            hotel,
            flight,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_maps_to_exactly_one_reference() {
        let hotel = BookingTarget::Hotel(7);
        let flight = BookingTarget::Flight(9);

        match hotel {
            BookingTarget::Hotel(id) => assert_eq!(id, 7),
            BookingTarget::Flight(_) => panic!("wrong variant"),
        }
        match flight {
            BookingTarget::Flight(id) => assert_eq!(id, 9),
            BookingTarget::Hotel(_) => panic!("wrong variant"),
        }
    }

    #[test]
    fn test_hydrated_booking_serializes_nested_objects() {
        let hydrated = HydratedBooking {
            id: 1,
            user_id: "user-1".to_string(),
            hotel_id: None,
            flight_id: Some(9),
            booking_date: NaiveDate::from_ymd_opt(2025, 6, 22).unwrap(),
            hotel: None,
            flight: None,
        };

        let json = serde_json::to_value(&hydrated).unwrap();
        assert_eq!(json["flight_id"], 9);
        assert!(json["hotel_id"].is_null());
        assert!(json["hotel"].is_null());
    }

    // Integration tests for the booking lifecycle are in tripdeck-api/tests/
}
