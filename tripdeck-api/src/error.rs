/// Error handling for the API server
///
/// This module provides a unified error type that maps to HTTP responses.
/// All handlers return `Result<T, ApiError>` which converts automatically
/// to the appropriate status code.
///
/// The taxonomy follows the system's contract: malformed input is a 4xx,
/// a missing entity is a 404, a missing upstream credential is a 503, and
/// an upstream HTTP/decode failure is a 502 carrying the upstream
/// diagnostic text for operator debugging. Local persistence failures are
/// generic 500s with details logged, never exposed.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use tripdeck_shared::auth::password::PasswordError;
use tripdeck_shared::dates::DateError;

use crate::upstream::SearchError;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Bad request (400)
    BadRequest(String),

    /// Unauthorized (401) - failed credential check
    Unauthorized(String),

    /// Not found (404)
    NotFound(String),

    /// Conflict (409) - e.g., duplicate email or username
    Conflict(String),

    /// Unprocessable entity (422) - validation errors
    ValidationError(Vec<ValidationErrorDetail>),

    /// Bad gateway (502) - upstream HTTP or decode failure
    UpstreamError(String),

    /// Service unavailable (503) - upstream credentials missing
    UpstreamUnavailable(String),

    /// Internal server error (500)
    InternalError(String),
}

/// Validation error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationErrorDetail {
    /// Field that failed validation
    pub field: String,

    /// Error message
    pub message: String,
}

/// Error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code (e.g., "bad_request", "not_found")
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Optional validation errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<ValidationErrorDetail>>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::ValidationError(errors) => {
                write!(f, "Validation failed: {} errors", errors.len())
            }
            ApiError::UpstreamError(msg) => write!(f, "Upstream error: {}", msg),
            ApiError::UpstreamUnavailable(msg) => write!(f, "Upstream unavailable: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message, details) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg, None),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg, None),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg, None),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg, None),
            ApiError::ValidationError(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error",
                "Request validation failed".to_string(),
                Some(errors),
            ),
            ApiError::UpstreamError(msg) => {
                // Keep the upstream diagnostic text in the body; it is
                // useful to operators and carries no local secrets
                tracing::error!("Upstream error: {}", msg);
                (StatusCode::BAD_GATEWAY, "upstream_error", msg, None)
            }
            ApiError::UpstreamUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "upstream_unavailable",
                msg,
                None,
            ),
            ApiError::InternalError(msg) => {
                // Log internal errors but don't expose details to clients
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_code.to_string(),
            message,
            details,
        });

        (status, body).into_response()
    }
}

/// Convert sqlx errors to API errors
impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Resource not found".to_string()),
            sqlx::Error::Database(db_err) => {
                if db_err.is_unique_violation() {
                    let field = db_err
                        .constraint()
                        .map(|c| {
                            if c.contains("email") {
                                "email"
                            } else if c.contains("username") {
                                "username"
                            } else {
                                "value"
                            }
                        })
                        .unwrap_or("value");
                    return ApiError::Conflict(format!("{} already exists", field));
                }

                if db_err.is_foreign_key_violation() {
                    return ApiError::BadRequest(
                        "Referenced entity does not exist".to_string(),
                    );
                }

                ApiError::InternalError(format!("Database error: {}", db_err))
            }
            _ => ApiError::InternalError(format!("Database error: {}", err)),
        }
    }
}

/// Convert date normalization errors to API errors
impl From<DateError> for ApiError {
    fn from(err: DateError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

/// Convert password errors to API errors
impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        ApiError::InternalError(format!("Password operation failed: {}", err))
    }
}

/// Convert search gateway errors to API errors
impl From<SearchError> for ApiError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::MissingApiKey(service) => ApiError::UpstreamUnavailable(format!(
                "{} API key is missing. Please configure your environment variables.",
                service
            )),
            SearchError::NoResults(msg) => ApiError::NotFound(msg),
            SearchError::Upstream(msg) => ApiError::UpstreamError(msg),
            SearchError::Network(e) => {
                ApiError::UpstreamError(format!("Upstream unreachable: {}", e))
            }
            SearchError::Decode(msg) => {
                ApiError::UpstreamError(format!("Upstream response decode failed: {}", msg))
            }
            SearchError::Date(e) => ApiError::BadRequest(e.to_string()),
        }
    }
}

/// Convert validator failures into per-field validation details
pub fn validation_error(errors: validator::ValidationErrors) -> ApiError {
    let details: Vec<ValidationErrorDetail> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| ValidationErrorDetail {
                field: field.to_string(),
                message: error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "Validation failed".to_string()),
            })
        })
        .collect();
    ApiError::ValidationError(details)
}
