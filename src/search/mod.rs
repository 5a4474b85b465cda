pub mod google;

pub use google::GoogleSearch;

use crate::sites::JobSite;
use async_trait::async_trait;
use thiserror::Error;

/// Errors raised by a search provider
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("search provider returned status {0}")]
    Status(u16),
    #[error("invalid search URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Web search collaborator: a query in, an ordered list of result URLs out
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Run `query`, returning at most `max_results` URLs (possibly none)
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<String>, SearchError>;
}

/// Combine a keyword with an OR of `site:` restrictions
pub fn build_query(keyword: &str, sites: &[JobSite]) -> String {
    let mut scopes: Vec<String> = Vec::with_capacity(sites.len());
    for site in sites {
        let scope = format!("site:{}", site.scope());
        if !scopes.contains(&scope) {
            scopes.push(scope);
        }
    }

    let keyword = keyword.trim();
    match (keyword.is_empty(), scopes.is_empty()) {
        (true, _) => scopes.join(" OR "),
        (false, true) => keyword.to_string(),
        (false, false) => format!("{} {}", keyword, scopes.join(" OR ")),
    }
}

/// Provider that always answers with a fixed list of URLs
#[derive(Debug, Clone, Default)]
pub struct StaticSearch {
    urls: Vec<String>,
}

impl StaticSearch {
    pub fn new<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            urls: urls.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl SearchProvider for StaticSearch {
    async fn search(&self, _query: &str, max_results: usize) -> Result<Vec<String>, SearchError> {
        Ok(self.urls.iter().take(max_results).cloned().collect())
    }
}
