use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// Transport-level failure of a single GET
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request did not complete within its timeout
    #[error("request timed out")]
    Timeout,
    /// Any other failure: DNS, connection, non-2xx status, body decoding
    #[error("{0}")]
    Failed(String),
}

/// Minimal HTTP GET capability the fetcher depends on
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch `url` and return its body, failing if it takes longer than `timeout`
    async fn get(&self, url: &str, timeout: Duration) -> Result<String, TransportError>;
}

/// `reqwest`-backed transport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Wrap an existing client, sharing its connection pool and user agent
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

fn classify_error(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Failed(error.to_string())
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str, timeout: Duration) -> Result<String, TransportError> {
        ::log::trace!("GET {} (timeout {:?})", url, timeout);
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(classify_error)?
            .error_for_status()
            .map_err(classify_error)?;

        let body = response.text().await.map_err(classify_error)?;
        ::log::trace!("Received {} bytes from {}", body.len(), url);
        Ok(body)
    }
}
