/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Registration and login (local and federated)
/// - `hotels`: Hotel create/list/update
/// - `flights`: Flight create/list/update
/// - `bookings`: Booking creation, cancellation, and hydrated listing
/// - `search`: Upstream flight/hotel search and weather forecast

pub mod auth;
pub mod bookings;
pub mod flights;
pub mod health;
pub mod hotels;
pub mod search;
