/// Application state and router builder
///
/// This module defines the shared application state and provides a
/// function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use tripdeck_api::{app::AppState, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(pool, config)?;
/// let app = tripdeck_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor; the
/// pool, config, and HTTP client are all cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,

    /// Shared HTTP client for all upstream calls, with a uniform request
    /// timeout so no upstream call runs without a deadline
    pub http: reqwest::Client,
}

impl AppState {
    /// Creates new application state
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(db: PgPool, config: Config) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.upstream.timeout_seconds))
            .build()?;

        Ok(Self {
            db,
            config: Arc::new(config),
            http,
        })
    }

    /// Returns the configured SerpAPI key, if any
    pub fn serpapi_key(&self) -> Option<&str> {
        self.config.upstream.serpapi_key.as_deref()
    }

    /// Returns the configured OpenWeather key, if any
    pub fn weather_key(&self) -> Option<&str> {
        self.config.upstream.weather_key.as_deref()
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                       # Health check
/// └── /v1/                          # API v1 (versioned)
///     ├── /auth/
///     │   ├── POST /register        # Local registration
///     │   ├── POST /login           # Credential login
///     │   └── POST /federated       # Federated login / first-login upsert
///     ├── /hotels/
///     │   ├── POST /                # Create hotel
///     │   ├── GET  /                # List hotels (paged)
///     │   └── PUT  /:id             # Partial update
///     ├── /flights/                 # Same shape as /hotels
///     ├── /bookings/
///     │   ├── POST   /flights       # Book a flight
///     │   ├── POST   /hotels        # Book a hotel
///     │   ├── DELETE /flights/:id   # Cancel a flight booking
///     │   ├── DELETE /hotels/:id    # Cancel a hotel booking
///     │   └── GET    /:user_id      # Hydrated bookings for a user
///     ├── /search/
///     │   ├── GET /flights          # Upstream flight search
///     │   └── GET /hotels           # Upstream hotel search
///     └── GET /weather              # Upstream forecast
/// ```
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login))
        .route("/federated", post(routes::auth::federated));

    let hotel_routes = Router::new()
        .route("/", post(routes::hotels::create_hotel).get(routes::hotels::list_hotels))
        .route("/:id", put(routes::hotels::update_hotel));

    let flight_routes = Router::new()
        .route("/", post(routes::flights::create_flight).get(routes::flights::list_flights))
        .route("/:id", put(routes::flights::update_flight));

    let booking_routes = Router::new()
        .route("/flights", post(routes::bookings::book_flight))
        .route("/hotels", post(routes::bookings::book_hotel))
        .route("/flights/:id", delete(routes::bookings::cancel_flight_booking))
        .route("/hotels/:id", delete(routes::bookings::cancel_hotel_booking))
        .route("/:user_id", get(routes::bookings::list_user_bookings));

    let search_routes = Router::new()
        .route("/flights", get(routes::search::search_flights))
        .route("/hotels", get(routes::search::search_hotels));

    let v1_routes = Router::new()
        .nest("/auth", auth_routes)
        .nest("/hotels", hotel_routes)
        .nest("/flights", flight_routes)
        .nest("/bookings", booking_routes)
        .nest("/search", search_routes)
        .route("/weather", get(routes::search::weather));

    Router::new()
        .merge(health_routes)
        .nest("/v1", v1_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // The frontend is served from another origin; the original system
        // allowed all origins and nothing here needs credentials
        .layer(CorsLayer::permissive())
        .with_state(state)
}
