/// Authentication endpoints
///
/// - `POST /v1/auth/register` - Register a local user
/// - `POST /v1/auth/login` - Credential login
/// - `POST /v1/auth/federated` - Federated login (first login creates the account)
///
/// Login returns a user summary rather than a token; session management
/// lives with the identity provider / frontend.

use crate::{
    app::AppState,
    error::{validation_error, ApiError, ApiResult},
};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tripdeck_shared::{
    auth::password,
    models::user::{CreateUser, FederatedUser, User, UserIdentity},
};
use validator::Validate;

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Unique username
    #[validate(length(min = 3, max = 50, message = "Username must be 3-50 characters"))]
    pub username: String,

    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    pub password: String,
}

/// Federated login request
///
/// The id is issued by the external identity provider.
#[derive(Debug, Deserialize, Validate)]
pub struct FederatedRequest {
    /// Provider-issued user identifier
    #[validate(length(min = 1, message = "Identifier must not be empty"))]
    pub id: String,

    /// Email address reported by the provider
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Display name reported by the provider
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
}

/// Login response: the authenticated user's public fields
#[derive(Debug, Serialize)]
pub struct UserResponse {
    /// User ID
    pub user_id: String,

    /// Username
    pub username: String,

    /// Email address
    pub email: String,

    /// Whether the account is active
    pub is_active: bool,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id,
            username: user.username,
            email: user.email,
            is_active: user.is_active,
        }
    }
}

/// Register a new local user
///
/// # Errors
///
/// - `422 Unprocessable Entity`: validation failed
/// - `409 Conflict`: username or email already exists
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<Json<UserResponse>> {
    req.validate().map_err(validation_error)?;

    let password_hash = password::hash_password(&req.password)?;

    let user = User::create(
        &state.db,
        CreateUser {
            username: req.username,
            email: req.email,
            password_hash,
        },
    )
    .await?;

    tracing::info!(user_id = %user.id, "User registered");

    Ok(Json(user.into()))
}

/// Credential login
///
/// Looks the user up by email and verifies the password. Federated
/// accounts have no credentials and fail this path the same way a wrong
/// password does, without revealing which case occurred.
///
/// # Errors
///
/// - `401 Unauthorized`: unknown email, wrong password, or federated account
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<UserResponse>> {
    req.validate().map_err(validation_error)?;

    let user = User::find_by_email(&state.db, &req.email)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid credentials".to_string()))?;

    match user.identity() {
        UserIdentity::Local { password_hash } => {
            if !password::verify_password(&req.password, password_hash)? {
                return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
            }
        }
        UserIdentity::Federated => {
            return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
        }
    }

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Json(user.into()))
}

/// Federated login
///
/// Accepts the provider-issued identity and returns the matching account,
/// creating it on first login.
pub async fn federated(
    State(state): State<AppState>,
    Json(req): Json<FederatedRequest>,
) -> ApiResult<Json<UserResponse>> {
    req.validate().map_err(validation_error)?;

    let user = User::federated_login(
        &state.db,
        FederatedUser {
            id: req.id,
            email: req.email,
            name: req.name,
        },
    )
    .await?;

    tracing::info!(user_id = %user.id, "Federated login");

    Ok(Json(user.into()))
}
