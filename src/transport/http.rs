//! reqwest-backed transport
//!
//! Direct HTTP client for the roadmap server. A single `reqwest::Client` is
//! shared by every call (connection pooling).

use crate::config::TransportConfig;
use crate::transport::{ByteStream, Transport, TransportError};
use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::{Client, Response};
use serde_json::Value;
use std::time::Duration;

/// HTTP implementation of [`Transport`]
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
    request_timeout: Duration,
}

impl HttpTransport {
    /// Build a transport from configuration
    ///
    /// # Errors
    /// * Returns `TransportError::Connection` if the HTTP client cannot be built
    pub fn new(config: &TransportConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(|e| TransportError::Connection(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self::with_client(
            client,
            &config.base_url,
            config.request_timeout(),
        ))
    }

    /// Build a transport around an existing client
    pub fn with_client(client: Client, base_url: &str, request_timeout: Duration) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            request_timeout,
        }
    }

    /// Base URL requests are resolved against
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Turn a non-success response into `TransportError::Status`
async fn ensure_success(response: Response) -> Result<Response, TransportError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let status_code = status.as_u16();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unable to read error body".to_string());

    tracing::error!(
        status_code = status_code,
        error_body = %body,
        "Roadmap server returned error status"
    );

    Err(TransportError::Status {
        status: status_code,
        body,
    })
}

async fn read_json(response: Response) -> Result<Value, TransportError> {
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| {
        TransportError::Decode(format!("{} - Response body: {}", e, body))
    })
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_stream(&self, path: &str, body: &Value) -> Result<ByteStream, TransportError> {
        let url = self.url(path);
        tracing::debug!(url = %url, "Opening progress stream");

        // No total timeout here: the stream lives as long as the computation.
        let response = self.client.post(&url).json(body).send().await?;
        let response = ensure_success(response).await?;

        let chunks = response.bytes_stream().map(|chunk| {
            chunk
                .map(|bytes| bytes.to_vec())
                .map_err(|e| TransportError::Stream(e.to_string()))
        });
        Ok(Box::pin(chunks))
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<Value, TransportError> {
        let url = self.url(path);
        tracing::debug!(url = %url, "POST");

        let response = self
            .client
            .post(&url)
            .timeout(self.request_timeout)
            .json(body)
            .send()
            .await?;
        read_json(ensure_success(response).await?).await
    }

    async fn get_json(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Value, TransportError> {
        let url = self.url(path);
        tracing::debug!(url = %url, query = ?query, "GET");

        let response = self
            .client
            .get(&url)
            .timeout(self.request_timeout)
            .query(query)
            .send()
            .await?;
        read_json(ensure_success(response).await?).await
    }

    async fn delete(&self, path: &str) -> Result<(), TransportError> {
        let url = self.url(path);
        tracing::debug!(url = %url, "DELETE");

        let response = self
            .client
            .delete(&url)
            .timeout(self.request_timeout)
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }
}
