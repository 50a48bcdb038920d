//! API response envelope.

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Standard response envelope: `{status, data?, message?, count?}`.
///
/// Errors use the same `status` field and are produced by
/// [`sekolah_common::AppError`].
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a success response.
    pub const fn ok(data: T) -> Self {
        Self {
            status: "success",
            data: Some(data),
            message: None,
            count: None,
        }
    }

    /// Attach a human-readable message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Attach a row count.
    #[must_use]
    pub const fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }
}

impl ApiResponse<()> {
    /// Success response carrying only a message.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            status: "success",
            data: None,
            message: Some(message.into()),
            count: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
