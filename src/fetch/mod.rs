pub mod transport;

pub use transport::{HttpTransport, Transport, TransportError};

use crate::results::FetchResult;
use std::sync::Arc;
use std::time::Duration;

/// Failure reason once every attempt has timed out
pub const TIMEOUT_REASON: &str = "Request Timed Out after retries";

/// Timeout and retry settings for job page requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Per-attempt request timeout
    pub timeout: Duration,
    /// Total attempts, including the first
    pub max_attempts: u32,
    /// Pause between a timed-out attempt and the next one
    pub retry_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(20),
            max_attempts: 3,
            retry_delay: Duration::from_secs(5),
        }
    }
}

/// Retrieves job pages, retrying only on timeouts
#[derive(Clone)]
pub struct Fetcher {
    transport: Arc<dyn Transport>,
    policy: RetryPolicy,
}

impl Fetcher {
    pub fn new(transport: Arc<dyn Transport>, policy: RetryPolicy) -> Self {
        Self { transport, policy }
    }

    /// Fetch a single URL. Never fails: every outcome is a [`FetchResult`].
    pub async fn fetch(&self, url: &str) -> FetchResult {
        let attempts = self.policy.max_attempts.max(1);

        for attempt in 1..=attempts {
            match self.transport.get(url, self.policy.timeout).await {
                Ok(body) => {
                    ::log::debug!("Fetched {} on attempt {}", url, attempt);
                    return FetchResult::Content(body);
                }
                Err(TransportError::Timeout) => {
                    ::log::warn!("Timeout on attempt {}: {}", attempt, url);
                    if attempt < attempts {
                        tokio::time::sleep(self.policy.retry_delay).await;
                    }
                }
                Err(TransportError::Failed(detail)) => {
                    ::log::error!("Request failed for {}: {}", url, detail);
                    return FetchResult::Failure {
                        reason: format!("Request Failed: {detail}"),
                        attempts: attempt,
                    };
                }
            }
        }

        FetchResult::Failure {
            reason: TIMEOUT_REASON.to_string(),
            attempts,
        }
    }
}
