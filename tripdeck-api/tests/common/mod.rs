/// Common test utilities for integration tests
///
/// These tests need a running PostgreSQL instance reachable through
/// `DATABASE_URL`. Each context creates its own user so tests can run
/// concurrently without colliding on unique constraints.

use sqlx::PgPool;
use tripdeck_api::app::{build_router, AppState};
use tripdeck_api::config::Config;
use tripdeck_shared::auth::password::hash_password;
use tripdeck_shared::db::migrations::run_migrations;
use tripdeck_shared::models::user::{CreateUser, User};
use uuid::Uuid;

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: PgPool,
    pub app: axum::Router,
    pub user: User,
}

impl TestContext {
    /// Creates a new test context with a migrated database and fresh user
    pub async fn new() -> anyhow::Result<Self> {
        let config = Config::from_env()?;

        let db = PgPool::connect(&config.database.url).await?;
        run_migrations(&db).await?;

        let suffix = Uuid::new_v4();
        let user = User::create(
            &db,
            CreateUser {
                username: format!("test-user-{}", suffix),
                email: format!("test-{}@example.com", suffix),
                password_hash: hash_password("Test-Password-123")?,
            },
        )
        .await?;

        let state = AppState::new(db.clone(), config)?;
        let app = build_router(state);

        Ok(Self { db, app, user })
    }

    /// Removes rows created by this context
    pub async fn cleanup(&self) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM bookings WHERE user_id = $1")
            .bind(&self.user.id)
            .execute(&self.db)
            .await?;
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(&self.user.id)
            .execute(&self.db)
            .await?;
        Ok(())
    }
}

/// Sends a request through the router and returns (status, JSON body)
pub async fn send_json(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (axum::http::StatusCode, serde_json::Value) {
    use axum::body::Body;
    use axum::http::Request;
    use tower::Service as _;

    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    let request = match body {
        Some(json) => builder.body(Body::from(json.to_string())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().call(request).await.unwrap();
    let status = response.status();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };

    (status, json)
}
