//! Centralized error handling.
//!
//! Provides a unified error type for the entire application,
//! with automatic HTTP response conversion.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::SqlErr;
use serde::Serialize;
use thiserror::Error;

/// Application error types
/// SOLID - Open/Closed: Extend via new variants without modifying behavior
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication & Authorization
    #[error("Authentication required")]
    Unauthorized,

    #[error("The user doesn't have enough privileges")]
    Forbidden,

    // User service errors
    #[error("The user with this username already exists in the system")]
    UserAlreadyExists,

    #[error("The user with this username does not exist in the system")]
    UserNotFound,

    #[error("Inactive user")]
    UserInactive,

    #[error("Invalid token")]
    InvalidToken,

    // Item service errors
    #[error("Item not found")]
    ItemNotFound,

    #[error("Not enough permissions")]
    ItemPermission,

    // Validation
    #[error("{0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    BadRequest(String),

    // External service errors
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    #[error("Authentication error")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

impl AppError {
    /// Get error code for client
    fn code(&self) -> &'static str {
        match self {
            AppError::Unauthorized => "UNAUTHORIZED",
            AppError::Forbidden => "FORBIDDEN",
            AppError::UserAlreadyExists => "USER_ALREADY_EXISTS",
            AppError::UserNotFound => "USER_NOT_FOUND",
            AppError::UserInactive => "USER_INACTIVE",
            AppError::InvalidToken => "INVALID_TOKEN",
            AppError::ItemNotFound => "ITEM_NOT_FOUND",
            AppError::ItemPermission => "ITEM_PERMISSION",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Jwt(_) => "AUTH_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code
    fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized | AppError::Jwt(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden | AppError::ItemPermission => StatusCode::FORBIDDEN,
            AppError::UserNotFound | AppError::ItemNotFound => StatusCode::NOT_FOUND,
            AppError::UserAlreadyExists => StatusCode::CONFLICT,
            AppError::UserInactive
            | AppError::InvalidToken
            | AppError::Validation(_)
            | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message (hides internal details)
    fn user_message(&self) -> String {
        match self {
            // Show the full message for client errors
            AppError::Validation(msg) | AppError::BadRequest(msg) => msg.clone(),

            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            AppError::Jwt(e) => {
                tracing::error!("JWT error: {:?}", e);
                "Could not validate credentials".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }
            _ => self.to_string(),
        }
    }

    /// Whether this error wraps a store-level unique constraint violation.
    ///
    /// Concurrent user creation can race past the email pre-check; the
    /// store's uniqueness guarantee is the authoritative signal.
    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            AppError::Database(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code().to_string(),
                message: self.user_message(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
