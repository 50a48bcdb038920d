//! Error types for the school site backend.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Application result type.
pub type AppResult<T> = Result<T, AppError>;

/// Application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // === Client Errors ===
    #[error("{0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    // === Server Errors ===
    #[error("Invalid JSON data: {0}")]
    InvalidData(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            // 4xx Client Errors
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,

            // 5xx Server Errors
            Self::InvalidData(_)
            | Self::Database(_)
            | Self::Storage(_)
            | Self::Config(_)
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            Self::InvalidData(_) => "INVALID_DATA",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns whether this error should be logged at error level.
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }

    /// Message safe to hand to the caller.
    ///
    /// Database, storage and internal failures are reported generically; the
    /// detail only goes to the server log.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::Database(_) => "Database error".to_string(),
            Self::Storage(_) => "Failed to store uploaded file".to_string(),
            Self::Config(_) | Self::Internal(_) => "Internal server error".to_string(),
            Self::InvalidData(_) => "Invalid JSON data".to_string(),
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code();

        // Log server errors
        if self.is_server_error() {
            tracing::error!(error = %self, code = code, "Server error occurred");
        } else {
            tracing::debug!(error = %self, code = code, "Client error occurred");
        }

        let body = Json(json!({
            "status": "error",
            "code": code,
            "message": self.public_message(),
        }));

        (status, body).into_response()
    }
}

// === From implementations ===

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        match err {
            sea_orm::DbErr::RecordNotFound(what) => Self::NotFound(what),
            sea_orm::DbErr::RecordNotUpdated => Self::NotFound("record not updated".to_string()),
            other => match other.sql_err() {
                Some(sea_orm::SqlErr::UniqueConstraintViolation(detail)) => Self::Conflict(detail),
                _ => Self::Database(other.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_follow_taxonomy() {
        assert_eq!(
            AppError::Validation("name is required".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::NotFound("principal 5".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Conflict("post_1".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::InvalidData("eof".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Database("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_database_detail_is_not_exposed() {
        let err = AppError::Database("SQLSTATE[42S02]: table missing".into());
        assert_eq!(err.public_message(), "Database error");
        assert!(err.to_string().contains("SQLSTATE"));
    }

    #[test]
    fn test_validation_message_is_passed_through() {
        let err = AppError::Validation("title is required".into());
        assert_eq!(err.public_message(), "title is required");
    }

    #[test]
    fn test_payload_too_large_is_client_error() {
        let err = AppError::PayloadTooLarge("length limit exceeded".into());
        assert_eq!(err.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
        assert!(!err.is_server_error());
    }

    #[test]
    fn test_record_not_updated_maps_to_not_found() {
        let err: AppError = sea_orm::DbErr::RecordNotUpdated.into();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
