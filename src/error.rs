//! Error types for HireStock server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Stable numeric error codes exposed in API responses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Success = 0,
    Failure = 1,
    NotAuthorized = 2,
    DbFailure = 3,
    NoSuchEntity = 4,
    InsufficientQuantity = 5,
    InvalidQuantity = 6,
    CapacityExceeded = 7,
    PaymentIncomplete = 8,
    Duplicate = 9,
    BadValue = 10,
    Contention = 11,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Authorization failed: {0}")]
    Authorization(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Insufficient quantity: {0}")]
    InsufficientQuantity(String),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error("Capacity exceeded: {0}")]
    CapacityExceeded(String),

    #[error("Payment incomplete: {0}")]
    PaymentIncomplete(String),

    #[error("Contention: {0}")]
    Contention(String),

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            // 55P03 = lock_not_available (lock_timeout expired while waiting
            // on a row lock held by a concurrent transaction)
            match db_err.code().as_deref() {
                Some("55P03") => {
                    return AppError::Contention(
                        "row lock wait timed out, try again".to_string(),
                    )
                }
                Some("23503") => {
                    return AppError::Conflict(
                        "operation violates a foreign key reference".to_string(),
                    )
                }
                Some("23505") => {
                    return AppError::Conflict("duplicate value".to_string())
                }
                _ => {}
            }
        }
        AppError::Database(err)
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Authentication(msg) => {
                (StatusCode::UNAUTHORIZED, ErrorCode::NotAuthorized, msg.clone())
            }
            AppError::Authorization(msg) => {
                (StatusCode::FORBIDDEN, ErrorCode::NotAuthorized, msg.clone())
            }
            AppError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, ErrorCode::NoSuchEntity, msg.clone())
            }
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone())
            }
            AppError::InsufficientQuantity(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorCode::InsufficientQuantity,
                msg.clone(),
            ),
            AppError::InvalidQuantity(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::InvalidQuantity, msg.clone())
            }
            AppError::CapacityExceeded(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorCode::CapacityExceeded,
                msg.clone(),
            ),
            AppError::PaymentIncomplete(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorCode::PaymentIncomplete,
                msg.clone(),
            ),
            AppError::Contention(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, ErrorCode::Contention, msg.clone())
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::DbFailure,
                    "Database error".to_string(),
                )
            }
            AppError::Conflict(msg) => {
                (StatusCode::CONFLICT, ErrorCode::Duplicate, msg.clone())
            }
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone())
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::Failure,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
