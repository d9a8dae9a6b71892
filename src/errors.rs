//! Centralized error handling.
//!
//! Provides a unified error type for the entire application,
//! with automatic HTTP response conversion.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use domain::{DomainError, FieldErrors};

use crate::config::{MSG_INVALID_CREDENTIALS, MSG_LOGIN_REQUIRED};
use crate::infra::StorageError;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication
    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid credentials")]
    InvalidCredentials,

    // Resource errors
    #[error("Resource not found")]
    NotFound,

    // Validation
    #[error("Form has {} invalid field(s)", .0.len())]
    InvalidForm(FieldErrors),

    #[error("{0}")]
    Validation(String),

    // Infrastructure errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    #[error("Authentication error")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error(transparent)]
    Domain(#[from] DomainError),

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
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<FieldErrors>,
}

impl AppError {
    /// Get error code for client
    fn code(&self) -> &'static str {
        match self {
            AppError::Unauthorized => "UNAUTHORIZED",
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            AppError::NotFound => "NOT_FOUND",
            AppError::InvalidForm(_) => "INVALID_FORM",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Storage(StorageError::NotFound) => "NOT_FOUND",
            AppError::Storage(StorageError::Conflict(_)) => "CONFLICT",
            AppError::Storage(_) | AppError::Database(_) => "DATABASE_ERROR",
            AppError::Jwt(_) => "AUTH_ERROR",
            AppError::Domain(_) | AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized | AppError::InvalidCredentials | AppError::Jwt(_) => {
                StatusCode::UNAUTHORIZED
            }
            AppError::NotFound | AppError::Storage(StorageError::NotFound) => {
                StatusCode::NOT_FOUND
            }
            AppError::Storage(StorageError::Conflict(_)) => StatusCode::CONFLICT,
            AppError::InvalidForm(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Storage(_)
            | AppError::Database(_)
            | AppError::Domain(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message (hides internal details)
    fn user_message(&self) -> String {
        match self {
            AppError::Unauthorized | AppError::Jwt(_) => MSG_LOGIN_REQUIRED.to_string(),
            AppError::InvalidCredentials => MSG_INVALID_CREDENTIALS.to_string(),
            AppError::Validation(msg) => msg.clone(),
            AppError::Storage(StorageError::Conflict(what)) => format!("{} already exists", what),

            AppError::Storage(e) => {
                tracing::error!("Storage error: {:?}", e);
                "A database error occurred".to_string()
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            AppError::Domain(e) => {
                tracing::error!("Domain error: {}", e);
                "An internal error occurred".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }

            _ => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code().to_string(),
                message: self.user_message(),
                fields: match self {
                    AppError::InvalidForm(fields) => Some(fields),
                    _ => None,
                },
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::NotFound)
    }
}

/// Convenience constructors
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::InvalidCredentials.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::InvalidForm(FieldErrors::new()).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::from(StorageError::NotFound).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::from(StorageError::Conflict("login".into())).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::internal("boom").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let message = AppError::internal("connection string leaked").user_message();
        assert!(!message.contains("leaked"));
    }

    #[test]
    fn test_login_required_message() {
        assert_eq!(AppError::Unauthorized.user_message(), MSG_LOGIN_REQUIRED);
        assert_eq!(
            AppError::InvalidCredentials.user_message(),
            MSG_INVALID_CREDENTIALS
        );
    }

    #[test]
    fn test_option_ext() {
        assert!(matches!(None::<i32>.ok_or_not_found(), Err(AppError::NotFound)));
        assert!(matches!(Some(1).ok_or_not_found(), Ok(1)));
    }
}
