//! HTTP backend over `reqwest`.

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};
use serde::{Deserialize, de::DeserializeOwned};
use url::Url;

use crate::{
    api::EntityApi,
    error::{ClientError, ClientResult},
    models::Entity,
};

/// Response envelope shared by every endpoint.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    status: String,
    data: Option<T>,
    message: Option<String>,
    code: Option<String>,
}

/// Client for the entity endpoints.
#[derive(Debug, Clone)]
pub struct HttpClient {
    http: reqwest::Client,
    base_url: Url,
    admin_token: Option<String>,
}

impl HttpClient {
    /// Create a client for the API rooted at `base_url`.
    pub fn new(base_url: &str) -> ClientResult<Self> {
        // Keep the last path segment when joining entity paths.
        let mut base = base_url.trim_end_matches('/').to_string();
        base.push('/');

        Ok(Self {
            http: reqwest::Client::new(),
            base_url: Url::parse(&base)?,
            admin_token: None,
        })
    }

    /// Send this bearer token with every write.
    #[must_use]
    pub fn with_admin_token(mut self, token: impl Into<String>) -> Self {
        self.admin_token = Some(token.into());
        self
    }

    fn request(&self, method: Method, path: &str) -> ClientResult<RequestBuilder> {
        let url = self.base_url.join(path)?;
        let is_write = method != Method::GET;
        let mut builder = self.http.request(method, url);

        if let Some(token) = self.admin_token.as_deref().filter(|_| is_write) {
            builder = builder.bearer_auth(token);
        }
        Ok(builder)
    }

    async fn send<T: DeserializeOwned>(builder: RequestBuilder) -> ClientResult<Envelope<T>> {
        let response: Response = builder.send().await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;

        let envelope: Envelope<T> = serde_json::from_slice(&bytes)
            .map_err(|e| ClientError::Decode(format!("HTTP {status}: {e}")))?;

        if envelope.status != "success" {
            return Err(ClientError::Api {
                status,
                code: envelope.code,
                message: envelope
                    .message
                    .unwrap_or_else(|| format!("Request failed with HTTP {status}")),
            });
        }
        Ok(envelope)
    }

    async fn send_data<T: DeserializeOwned>(builder: RequestBuilder) -> ClientResult<T> {
        Self::send::<T>(builder)
            .await?
            .data
            .ok_or_else(|| ClientError::Decode("response has no data".to_string()))
    }
}

#[async_trait]
impl<E: Entity> EntityApi<E> for HttpClient {
    async fn list(&self) -> ClientResult<Vec<E>> {
        Self::send_data(self.request(Method::GET, E::PATH)?).await
    }

    async fn create(&self, draft: &E::Draft) -> ClientResult<E> {
        let created: E = Self::send_data(self.request(Method::POST, E::PATH)?.json(draft)).await?;
        tracing::info!(entity = E::PATH, id = created.id(), "Created");
        Ok(created)
    }

    async fn update(&self, id: &str, draft: &E::Draft) -> ClientResult<E> {
        let mut body =
            serde_json::to_value(draft).map_err(|e| ClientError::Decode(e.to_string()))?;
        if let Some(fields) = body.as_object_mut() {
            fields.insert("id".to_string(), id.into());
        }

        let updated: E = Self::send_data(self.request(Method::PUT, E::PATH)?.json(&body)).await?;
        tracing::info!(entity = E::PATH, id = updated.id(), "Updated");
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> ClientResult<()> {
        let builder = self
            .request(Method::DELETE, E::PATH)?
            .query(&[("id", id)]);
        Self::send::<serde_json::Value>(builder).await?;
        tracing::info!(entity = E::PATH, id, "Deleted");
        Ok(())
    }
}
