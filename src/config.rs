use crate::extract::default_role_keywords;
use crate::search::google::DEFAULT_SEARCH_URL;
use crate::sites::{JobSite, TimeRange};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration for a job search run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Search keyword
    #[serde(default = "default_keyword")]
    pub keyword: String,

    /// Job-board families to search
    #[serde(default = "default_sites")]
    pub sites: Vec<JobSite>,

    /// Upper bound on search results requested
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Optional recency filter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_range: Option<TimeRange>,

    /// Per-attempt timeout for job pages, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Total attempts per job page when requests time out
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Pause between timed-out attempts, in seconds
    #[serde(default = "default_retry_delay_secs")]
    pub retry_delay_secs: u64,

    /// Job pages processed at once
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// Fetch each canonical job URL only once
    #[serde(default = "default_true")]
    pub dedupe: bool,

    /// Keep the page title on filtered records
    #[serde(default = "default_true")]
    pub preserve_filtered_title: bool,

    /// Title substrings that mark a matching role
    #[serde(default = "default_role_keywords")]
    pub role_keywords: Vec<String>,

    /// User agent for search and job page requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Search endpoint
    #[serde(default = "default_search_base_url")]
    pub search_base_url: String,

    /// Pause between search result pages, in milliseconds
    #[serde(default)]
    pub search_page_delay_ms: u64,
}

impl SearchConfig {
    /// Create a configuration with default values for the given keyword
    pub fn new(keyword: &str) -> Self {
        Self {
            keyword: keyword.to_string(),
            sites: default_sites(),
            max_results: default_max_results(),
            time_range: None,
            request_timeout_secs: default_request_timeout_secs(),
            max_attempts: default_max_attempts(),
            retry_delay_secs: default_retry_delay_secs(),
            max_concurrency: default_max_concurrency(),
            dedupe: true,
            preserve_filtered_title: true,
            role_keywords: default_role_keywords(),
            user_agent: default_user_agent(),
            search_base_url: default_search_base_url(),
            search_page_delay_ms: 0,
        }
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::new(&default_keyword())
    }
}

fn default_keyword() -> String {
    "Software Engineer".to_string()
}

fn default_sites() -> Vec<JobSite> {
    vec![JobSite::Greenhouse]
}

fn default_max_results() -> usize {
    50
}

fn default_request_timeout_secs() -> u64 {
    20
}

fn default_max_attempts() -> u32 {
    3
}

fn default_retry_delay_secs() -> u64 {
    5
}

fn default_max_concurrency() -> usize {
    1
}

fn default_true() -> bool {
    true
}

fn default_user_agent() -> String {
    concat!(
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) ",
        "AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36"
    )
    .to_string()
}

fn default_search_base_url() -> String {
    DEFAULT_SEARCH_URL.to_string()
}
