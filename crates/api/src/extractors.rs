//! Request extractors.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::StatusCode,
};
use sekolah_common::{AppError, AppResult, id::deserialize_optional_id};
use serde::{Deserialize, de::DeserializeOwned};

/// JSON body extractor that ignores `Content-Type` and reports malformed
/// payloads as [`AppError::InvalidData`].
///
/// Bodies cut off by the size limit surface as [`AppError::PayloadTooLarge`].
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| {
                if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                    AppError::PayloadTooLarge(e.body_text())
                } else {
                    AppError::InvalidData(e.body_text())
                }
            })?;

        serde_json::from_slice(&bytes)
            .map(JsonBody)
            .map_err(|e| AppError::InvalidData(e.to_string()))
    }
}

/// Entity fields plus the optional target id.
///
/// Used for update bodies, and for post creation where the id may be chosen
/// by the client.
#[derive(Debug, Deserialize)]
pub struct WithId<T> {
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub fields: T,
}

/// `?id=` query parameter.
#[derive(Debug, Default, Deserialize)]
pub struct IdQuery {
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub id: Option<String>,
}

/// Unwrap a target id or fail with a validation error.
pub fn require_id(id: Option<String>) -> AppResult<String> {
    id.ok_or_else(|| AppError::Validation("ID is required".to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sekolah_core::PrincipalInput;

    #[test]
    fn test_with_id_accepts_numeric_id() {
        let body: WithId<PrincipalInput> =
            serde_json::from_str(r#"{"id":5,"nama":"Ahmad","tahun_jabatan":"2010-2015"}"#)
                .unwrap();
        assert_eq!(body.id.as_deref(), Some("5"));
        assert_eq!(body.fields.nama.as_deref(), Some("Ahmad"));
    }

    #[test]
    fn test_require_id() {
        assert!(matches!(require_id(None), Err(AppError::Validation(_))));
        assert_eq!(require_id(Some("x".into())).unwrap(), "x");
    }
}
