/// Hotel model and database operations
///
/// Hotels are created by operator actions (often seeded from upstream
/// search results) and updated field-by-field. Updates carry only the
/// fields the caller wants changed; everything else is left untouched.
/// Nullable columns distinguish "leave alone" from "clear" via the
/// double-option convention in [`crate::serde_util`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::PgPool;
use std::collections::HashMap;

use crate::serde_util::double_option;

/// Hotel inventory row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Hotel {
    /// Unique hotel ID
    pub id: i64,

    /// Hotel name
    pub name: String,

    /// Human-readable location
    pub location: String,

    /// Nightly price
    pub price: i32,

    /// Number of rooms still available
    pub available_rooms: i32,

    /// Check-in date
    pub check_in_date: NaiveDate,

    /// Check-out date
    pub check_out_date: NaiveDate,

    /// Optional booking link
    pub link: Option<String>,

    /// Optional overall rating
    pub overall_rating: Option<f64>,

    /// Optional review count
    pub reviews: Option<i32>,

    /// Ordered amenity names, stored as JSONB
    pub amenities: Option<Json<Vec<String>>>,

    /// Ordered label→URL image mappings, stored as JSONB
    pub images: Option<Json<Vec<HashMap<String, String>>>>,
}

/// Input for creating a hotel
#[derive(Debug, Clone, Deserialize)]
pub struct CreateHotel {
    /// Hotel name
    pub name: String,

    /// Human-readable location
    pub location: String,

    /// Nightly price
    pub price: i32,

    /// Number of rooms available
    pub available_rooms: i32,

    /// Check-in date
    pub check_in_date: NaiveDate,

    /// Check-out date
    pub check_out_date: NaiveDate,

    /// Optional booking link
    #[serde(default)]
    pub link: Option<String>,

    /// Optional overall rating
    #[serde(default)]
    pub overall_rating: Option<f64>,

    /// Optional review count
    #[serde(default)]
    pub reviews: Option<i32>,

    /// Ordered amenity names
    #[serde(default)]
    pub amenities: Option<Vec<String>>,

    /// Ordered label→URL image mappings
    #[serde(default)]
    pub images: Option<Vec<HashMap<String, String>>>,
}

/// Input for partially updating a hotel
///
/// `None` means "leave the field alone". Nullable columns take
/// `Some(None)` (JSON `null`) to clear.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateHotel {
    /// New name
    pub name: Option<String>,

    /// New location
    pub location: Option<String>,

    /// New nightly price
    pub price: Option<i32>,

    /// New room availability
    pub available_rooms: Option<i32>,

    /// New check-in date
    pub check_in_date: Option<NaiveDate>,

    /// New check-out date
    pub check_out_date: Option<NaiveDate>,

    /// New booking link (JSON null clears)
    #[serde(default, deserialize_with = "double_option")]
    pub link: Option<Option<String>>,

    /// New overall rating (JSON null clears)
    #[serde(default, deserialize_with = "double_option")]
    pub overall_rating: Option<Option<f64>>,

    /// New review count (JSON null clears)
    #[serde(default, deserialize_with = "double_option")]
    pub reviews: Option<Option<i32>>,
}

impl Hotel {
    /// Creates a new hotel and returns the stored row with its generated id.
    pub async fn create(pool: &PgPool, data: CreateHotel) -> Result<Self, sqlx::Error> {
        let hotel = sqlx::query_as::<_, Hotel>(
            r#"
            INSERT INTO hotels (name, location, price, available_rooms, check_in_date,
                                check_out_date, link, overall_rating, reviews, amenities, images)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id, name, location, price, available_rooms, check_in_date,
                      check_out_date, link, overall_rating, reviews, amenities, images
            "#,
        )
        .bind(data.name)
        .bind(data.location)
        .bind(data.price)
        .bind(data.available_rooms)
        .bind(data.check_in_date)
        .bind(data.check_out_date)
        .bind(data.link)
        .bind(data.overall_rating)
        .bind(data.reviews)
        .bind(data.amenities.map(Json))
        .bind(data.images.map(Json))
        .fetch_one(pool)
        .await?;

        Ok(hotel)
    }

    /// Finds a hotel by id.
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let hotel = sqlx::query_as::<_, Hotel>(
            r#"
            SELECT id, name, location, price, available_rooms, check_in_date,
                   check_out_date, link, overall_rating, reviews, amenities, images
            FROM hotels
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(hotel)
    }

    /// Lists hotels in insertion order with pagination.
    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Self>, sqlx::Error> {
        let hotels = sqlx::query_as::<_, Hotel>(
            r#"
            SELECT id, name, location, price, available_rooms, check_in_date,
                   check_out_date, link, overall_rating, reviews, amenities, images
            FROM hotels
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        Ok(hotels)
    }

    /// Partially updates a hotel.
    ///
    /// The UPDATE statement is built dynamically so only the supplied
    /// fields appear in it; unmentioned columns are never written.
    ///
    /// # Returns
    ///
    /// The updated row, or `None` if the id does not exist.
    pub async fn update(
        pool: &PgPool,
        id: i64,
        data: UpdateHotel,
    ) -> Result<Option<Self>, sqlx::Error> {
        let mut assignments = Vec::new();
        let mut bind_count = 1;

        if data.name.is_some() {
            bind_count += 1;
            assignments.push(format!("name = ${}", bind_count));
        }
        if data.location.is_some() {
            bind_count += 1;
            assignments.push(format!("location = ${}", bind_count));
        }
        if data.price.is_some() {
            bind_count += 1;
            assignments.push(format!("price = ${}", bind_count));
        }
        if data.available_rooms.is_some() {
            bind_count += 1;
            assignments.push(format!("available_rooms = ${}", bind_count));
        }
        if data.check_in_date.is_some() {
            bind_count += 1;
            assignments.push(format!("check_in_date = ${}", bind_count));
        }
        if data.check_out_date.is_some() {
            bind_count += 1;
            assignments.push(format!("check_out_date = ${}", bind_count));
        }
        if data.link.is_some() {
            bind_count += 1;
            assignments.push(format!("link = ${}", bind_count));
        }
        if data.overall_rating.is_some() {
            bind_count += 1;
            assignments.push(format!("overall_rating = ${}", bind_count));
        }
        if data.reviews.is_some() {
            bind_count += 1;
            assignments.push(format!("reviews = ${}", bind_count));
        }

        if assignments.is_empty() {
            // Nothing to change; an empty patch is a read
            return Self::find_by_id(pool, id).await;
        }

        let query = format!(
            "UPDATE hotels SET {} WHERE id = $1 \
             RETURNING id, name, location, price, available_rooms, check_in_date, \
                       check_out_date, link, overall_rating, reviews, amenities, images",
            assignments.join(", ")
        );

        let mut q = sqlx::query_as::<_, Hotel>(&query).bind(id);

        if let Some(name) = data.name {
            q = q.bind(name);
        }
        if let Some(location) = data.location {
            q = q.bind(location);
        }
        if let Some(price) = data.price {
            q = q.bind(price);
        }
        if let Some(available_rooms) = data.available_rooms {
            q = q.bind(available_rooms);
        }
        if let Some(check_in_date) = data.check_in_date {
            q = q.bind(check_in_date);
        }
        if let Some(check_out_date) = data.check_out_date {
            q = q.bind(check_out_date);
        }
        if let Some(link) = data.link {
            q = q.bind(link);
        }
        if let Some(overall_rating) = data.overall_rating {
            q = q.bind(overall_rating);
        }
        if let Some(reviews) = data.reviews {
            q = q.bind(reviews);
        }

        let hotel = q.fetch_optional(pool).await?;

        Ok(hotel)
    }
}
