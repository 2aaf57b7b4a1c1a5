//! # Tripdeck API Server
//!
//! Booking backend: flight/hotel search via third-party aggregator APIs,
//! persistence for users, hotels, flights, and bookings, and a booking
//! lifecycle tying a user to exactly one hotel or flight.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tripdeck_api::{
    app::{build_router, AppState},
    config::Config,
};
use tripdeck_shared::db::{migrations, pool};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tripdeck_api=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Tripdeck API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;

    let db = pool::create_pool(pool::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;

    migrations::run_migrations(&db).await?;

    if config.upstream.serpapi_key.is_none() {
        tracing::warn!("SERPAPI_API_KEY not set; search endpoints will return 503");
    }
    if config.upstream.weather_key.is_none() {
        tracing::warn!("WEATHER_API_KEY not set; weather endpoint will return 503");
    }

    let bind_address = config.bind_address();
    let state = AppState::new(db.clone(), config)?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app).await?;

    pool::close_pool(db).await;

    Ok(())
}
