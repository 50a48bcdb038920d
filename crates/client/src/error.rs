//! Client error type.

use sekolah_common::AppError;
use thiserror::Error;

/// Client result type.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors surfaced to managers and views.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Rejected locally before any request was made.
    #[error("{0}")]
    Validation(String),

    /// The API answered with `status: "error"`.
    #[error("{message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },

    /// Transport failure.
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The response did not match the envelope.
    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Invalid base URL: {0}")]
    Url(#[from] url::ParseError),

    /// Operation not valid in the current state.
    #[error("{0}")]
    State(String),
}

impl ClientError {
    /// Whether the server reported the target as missing.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }
}

impl From<AppError> for ClientError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Validation(msg) => Self::Validation(msg),
            other => Self::State(other.to_string()),
        }
    }
}
