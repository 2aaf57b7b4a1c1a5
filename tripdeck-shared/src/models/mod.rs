/// Database models for Tripdeck
///
/// Each model owns its CRUD operations as inherent async methods taking a
/// `&PgPool`. Every mutation commits before returning; there is no
/// deferred or batched write path.
///
/// # Models
///
/// - `user`: User accounts (local and federated identities)
/// - `hotel`: Hotel inventory records
/// - `flight`: Flight inventory records
/// - `booking`: Bookings tying a user to exactly one hotel or flight
///
/// # Example
///
/// ```no_run
/// use tripdeck_shared::models::hotel::{Hotel, CreateHotel};
/// use tripdeck_shared::db::pool::{create_pool, DatabaseConfig};
/// use chrono::NaiveDate;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let hotel = Hotel::create(
///     &pool,
///     CreateHotel {
///         name: "Grand Plaza".to_string(),
///         location: "Paris".to_string(),
///         price: 150,
///         available_rooms: 12,
///         check_in_date: NaiveDate::from_ymd_opt(2025, 6, 22).unwrap(),
///         check_out_date: NaiveDate::from_ymd_opt(2025, 6, 25).unwrap(),
///         link: None,
///         overall_rating: None,
///         reviews: None,
///         amenities: None,
///         images: None,
///     },
/// )
/// .await?;
/// println!("Created hotel {}", hotel.id);
/// # Ok(())
/// # }
/// ```

pub mod booking;
pub mod flight;
pub mod hotel;
pub mod user;
