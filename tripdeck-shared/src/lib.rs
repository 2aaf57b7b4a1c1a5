//! # Tripdeck Shared Library
//!
//! This crate contains the persistence layer, booking orchestration, and
//! shared utilities used by the Tripdeck API server.
//!
//! ## Module Organization
//!
//! - `models`: Database models (users, hotels, flights, bookings) and their CRUD operations
//! - `db`: Connection pool and migration runner
//! - `auth`: Password hashing for locally-created accounts
//! - `dates`: Normalization of user-supplied date strings
//! - `serde_util`: Serde helpers for partial-update payloads

pub mod auth;
pub mod dates;
pub mod db;
pub mod models;
pub mod serde_util;

/// Current version of the Tripdeck shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
