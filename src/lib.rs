// Re-export modules
pub mod config;
pub mod discovery;
pub mod extract;
pub mod fetch;
pub mod filter;
pub mod parsers;
pub mod report;
pub mod results;
pub mod search;
pub mod sites;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::SearchConfig;
pub use discovery::Discovery;
pub use results::{FetchResult, JobRecord, JobStatus};
pub use sites::{JobSite, TimeRange};

use extract::{ExtractOptions, Extractor};
use fetch::{Fetcher, HttpTransport, RetryPolicy};
use search::{GoogleSearch, SearchError};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Environment variable overriding the search endpoint
pub const SEARCH_URL_ENV: &str = "JOB_SCOUT_SEARCH_URL";

/// Errors that stop a run before any job page is processed
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] config::ConfigError),
    #[error(transparent)]
    Search(#[from] SearchError),
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Main builder for a job search run
pub struct JobSearch {
    config: SearchConfig,
}

impl JobSearch {
    /// Create a new builder searching for `keyword` with default settings
    pub fn new(keyword: &str) -> Self {
        Self {
            config: SearchConfig::new(keyword),
        }
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    /// Load configuration from a JSON file
    pub fn with_config_file(mut self, path: impl AsRef<Path>) -> Result<Self, Error> {
        self.config = SearchConfig::from_file(path)?;
        Ok(self)
    }

    /// Load configuration from a JSON string
    pub fn with_config_str(mut self, json: &str) -> Result<Self, Error> {
        self.config = SearchConfig::from_json(json)?;
        Ok(self)
    }

    /// Set the job-board families to search
    pub fn with_sites(mut self, sites: Vec<JobSite>) -> Self {
        self.config.sites = sites;
        self
    }

    /// Set the number of search results requested
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.config.max_results = max_results;
        self
    }

    /// Restrict results by recency
    pub fn with_time_range(mut self, time_range: Option<TimeRange>) -> Self {
        self.config.time_range = time_range;
        self
    }

    /// Set the number of job pages processed at once
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.config.max_concurrency = max_concurrency;
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Build the discovery pipeline for the current configuration
    pub fn build(&self) -> Result<Discovery, Error> {
        let config = &self.config;

        let search_url = match std::env::var(SEARCH_URL_ENV) {
            Ok(url) if !url.is_empty() => url,
            _ => config.search_base_url.clone(),
        };

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()?;
        let search = GoogleSearch::new(client.clone())?
            .with_base_url(&search_url)?
            .with_time_range(config.time_range)
            .with_page_delay(Duration::from_millis(config.search_page_delay_ms));

        let policy = RetryPolicy {
            timeout: Duration::from_secs(config.request_timeout_secs),
            max_attempts: config.max_attempts,
            retry_delay: Duration::from_secs(config.retry_delay_secs),
        };
        let fetcher = Fetcher::new(Arc::new(HttpTransport::with_client(client)), policy);

        let extractor = Extractor::new(ExtractOptions {
            role_keywords: config.role_keywords.clone(),
            preserve_filtered_title: config.preserve_filtered_title,
        });

        Ok(Discovery::new(Arc::new(search), fetcher, extractor)
            .with_max_concurrency(config.max_concurrency)
            .with_dedupe(config.dedupe))
    }

    /// Run the search and process every matching job link
    pub async fn run(self) -> Result<Vec<JobRecord>, Error> {
        let discovery = self.build()?;
        let records = discovery
            .discover(&self.config.keyword, &self.config.sites, self.config.max_results)
            .await?;
        Ok(records)
    }
}
