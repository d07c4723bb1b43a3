//! JSON API client

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use skyplan_core::{ApiError, ApiResult};

use crate::transport::{ApiRequest, Method, Transport};

/// Supplies the bearer token for outgoing requests
pub trait TokenSource: Send + Sync {
    fn token(&self) -> Option<String>;
}

/// A fixed token, or none
#[derive(Debug, Clone, Default)]
pub struct StaticToken(Option<String>);

impl StaticToken {
    pub fn new(token: Option<String>) -> Self {
        Self(token.filter(|t| !t.is_empty()))
    }
}

impl TokenSource for StaticToken {
    fn token(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Issues JSON requests and classifies failed responses into [`ApiError`]
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    tokens: Arc<dyn TokenSource>,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>, tokens: Arc<dyn TokenSource>) -> Self {
        Self { transport, tokens }
    }

    /// Client without authentication
    pub fn anonymous(transport: Arc<dyn Transport>) -> Self {
        Self::new(transport, Arc::new(StaticToken::default()))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let body = self.send(Method::Get, path, None).await?;
        decode(&body)
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let body = self
            .send(Method::Post, path, Some(serde_json::to_value(body)?))
            .await?;
        decode(&body)
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let body = self
            .send(Method::Put, path, Some(serde_json::to_value(body)?))
            .await?;
        decode(&body)
    }

    /// DELETE `path`. Any response body is ignored.
    pub async fn delete(&self, path: &str) -> ApiResult<()> {
        self.send(Method::Delete, path, None).await?;
        Ok(())
    }

    #[tracing::instrument(skip(self, method, body), fields(method = method.as_str()))]
    async fn send(&self, method: Method, path: &str, body: Option<Value>) -> ApiResult<Vec<u8>> {
        let request = ApiRequest {
            method,
            path: path.to_string(),
            body,
            bearer: self.tokens.token(),
        };

        let response = self.transport.send(request).await.map_err(|e| {
            tracing::warn!(error = %e, "request failed without a response");
            e
        })?;

        if response.is_success() {
            tracing::debug!(status = response.status, "request succeeded");
            Ok(response.body)
        } else {
            let error = ApiError::from_response(response.status, &response.body);
            tracing::debug!(status = response.status, error = %error, "request rejected");
            Err(error)
        }
    }
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> ApiResult<T> {
    // Empty bodies decode as null, e.g. for `()` or `Option<T>`
    let body = if body.is_empty() { b"null".as_slice() } else { body };
    Ok(serde_json::from_slice(body)?)
}
