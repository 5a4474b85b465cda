use crate::search::{SearchError, SearchProvider};
use crate::sites::TimeRange;
use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use std::collections::HashSet;
use std::sync::OnceLock;
use std::time::Duration;
use url::Url;

pub const DEFAULT_SEARCH_URL: &str = "https://www.google.com/search";

/// Results requested per page
const PAGE_SIZE: usize = 10;

/// Scrapes result links from Google's HTML search page
#[derive(Debug, Clone)]
pub struct GoogleSearch {
    client: Client,
    base_url: Url,
    time_range: Option<TimeRange>,
    page_delay: Duration,
}

impl GoogleSearch {
    pub fn new(client: Client) -> Result<Self, SearchError> {
        Ok(Self {
            client,
            base_url: Url::parse(DEFAULT_SEARCH_URL)?,
            time_range: None,
            page_delay: Duration::ZERO,
        })
    }

    /// Point the provider at a different search endpoint
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, SearchError> {
        self.base_url = Url::parse(base_url)?;
        Ok(self)
    }

    /// Restrict results by recency
    pub fn with_time_range(mut self, time_range: Option<TimeRange>) -> Self {
        self.time_range = time_range;
        self
    }

    /// Pause between page requests
    pub fn with_page_delay(mut self, delay: Duration) -> Self {
        self.page_delay = delay;
        self
    }

    fn page_url(&self, query: &str, start: usize) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("q", query)
                .append_pair("num", &PAGE_SIZE.to_string())
                .append_pair("hl", "en")
                .append_pair("start", &start.to_string())
                .append_pair("safe", "active");
            if let Some(range) = self.time_range {
                pairs.append_pair("tbs", range.as_param());
            }
        }
        url
    }
}

#[async_trait]
impl SearchProvider for GoogleSearch {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<String>, SearchError> {
        let mut results = Vec::new();
        let mut seen = HashSet::new();
        let mut start = 0;

        while results.len() < max_results {
            if start > 0 && !self.page_delay.is_zero() {
                tokio::time::sleep(self.page_delay).await;
            }

            let url = self.page_url(query, start);
            ::log::debug!("Requesting search page at offset {}", start);
            let response = self.client.get(url).send().await?;
            let status = response.status();
            if !status.is_success() {
                ::log::error!("Search provider answered with status {}", status);
                return Err(SearchError::Status(status.as_u16()));
            }
            let body = response.text().await?;

            let mut fresh = 0;
            for link in extract_result_links(&body) {
                if results.len() >= max_results {
                    break;
                }
                if seen.insert(link.clone()) {
                    results.push(link);
                    fresh += 1;
                }
            }

            ::log::debug!("Search page at offset {} added {} results", start, fresh);
            if fresh == 0 {
                break;
            }
            start += PAGE_SIZE;
        }

        Ok(results)
    }
}

/// Extract outbound result links from a search results page.
///
/// Resolves `/url?q=` redirect links and drops links back to Google itself.
pub fn extract_result_links(html: &str) -> Vec<String> {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    let selector = SELECTOR.get_or_init(|| Selector::parse("a[href]").unwrap());

    let doc = Html::parse_document(html);
    let mut links = Vec::new();
    for href in doc.select(selector).filter_map(|a| a.value().attr("href")) {
        let Some(target) = resolve_target(href) else {
            continue;
        };
        if !links.contains(&target) {
            links.push(target);
        }
    }
    links
}

fn resolve_target(href: &str) -> Option<String> {
    let target = if href.starts_with("/url?") {
        let redirect = Url::parse("https://www.google.com").ok()?.join(href).ok()?;
        redirect
            .query_pairs()
            .find(|(key, _)| key == "q" || key == "url")
            .map(|(_, value)| value.into_owned())?
    } else {
        href.to_string()
    };

    let parsed = Url::parse(&target).ok()?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return None;
    }
    if parsed.host_str().is_none_or(is_google_host) {
        return None;
    }
    Some(target)
}

fn is_google_host(host: &str) -> bool {
    host.split('.')
        .any(|label| matches!(label, "google" | "googleusercontent" | "gstatic"))
}
