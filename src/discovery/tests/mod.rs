
use crate::discovery::Discovery;
use crate::extract::{ExtractOptions, Extractor};
use crate::fetch::{Fetcher, RetryPolicy, Transport, TransportError};
use crate::search::StaticSearch;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

/// How a scripted URL responds to every request
#[derive(Clone)]
pub(super) enum Reply {
    Page(String),
    Timeout,
    Refused,
}

/// In-memory transport keyed by URL, recording every request
#[derive(Default)]
pub(super) struct FakeWeb {
    pages: HashMap<String, Reply>,
    requests: Mutex<Vec<String>>,
}

impl FakeWeb {
    pub(super) fn with(mut self, url: &str, reply: Reply) -> Self {
        self.pages.insert(url.to_string(), reply);
        self
    }

    pub(super) fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub(super) fn requests_for(&self, url: &str) -> usize {
        self.requests().iter().filter(|u| u.as_str() == url).count()
    }
}

#[async_trait]
impl Transport for FakeWeb {
    async fn get(&self, url: &str, _timeout: Duration) -> Result<String, TransportError> {
        self.requests.lock().unwrap().push(url.to_string());
        match self.pages.get(url) {
            Some(Reply::Page(body)) => Ok(body.clone()),
            Some(Reply::Timeout) => Err(TransportError::Timeout),
            Some(Reply::Refused) | None => {
                Err(TransportError::Failed("connection refused".to_string()))
            }
        }
    }
}

/// A job page whose head carries the given `og:title`
pub(super) fn job_page(title: &str) -> Reply {
    Reply::Page(format!(
        concat!(
            r#"<html><head><meta property="og:title" content="{title}">"#,
            r#"<meta property="og:image" content="https://img.example.com/{title}.png">"#,
            "</head><body></body></html>",
        ),
        title = title
    ))
}

pub(super) fn discovery(results: &[&str], web: Arc<FakeWeb>, options: ExtractOptions) -> Discovery {
    let policy = RetryPolicy {
        retry_delay: Duration::ZERO,
        ..RetryPolicy::default()
    };
    Discovery::new(
        Arc::new(StaticSearch::new(results.iter().copied())),
        Fetcher::new(web, policy),
        Extractor::new(options),
    )
}
