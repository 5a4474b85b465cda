use crate::extract::Extractor;
use crate::fetch::Fetcher;
use crate::filter::{JobUrlFilter, SiteMatch};
use crate::results::JobRecord;
use crate::search::{SearchError, SearchProvider, build_query};
use crate::sites::JobSite;
use std::sync::Arc;
use tokio::sync::Semaphore;

#[cfg(test)]
mod tests;

/// Search → classify → fetch → extract pipeline
pub struct Discovery {
    search: Arc<dyn SearchProvider>,
    fetcher: Arc<Fetcher>,
    extractor: Arc<Extractor>,
    max_concurrency: usize,
    dedupe: bool,
}

impl Discovery {
    pub fn new(search: Arc<dyn SearchProvider>, fetcher: Fetcher, extractor: Extractor) -> Self {
        Self {
            search,
            fetcher: Arc::new(fetcher),
            extractor: Arc::new(extractor),
            max_concurrency: 1,
            dedupe: true,
        }
    }

    /// Number of job pages processed at once. 1 keeps processing fully sequential.
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    /// Whether links sharing a canonical URL are fetched only once
    pub fn with_dedupe(mut self, dedupe: bool) -> Self {
        self.dedupe = dedupe;
        self
    }

    /// Runs a discovery.
    ///
    /// Returns one record per accepted job link, in search-result order, including
    /// failed and filtered ones. URLs that match no job board are dropped silently.
    /// Only a failing search provider is an error; zero results is an empty list.
    pub async fn discover(
        &self,
        keyword: &str,
        sites: &[JobSite],
        max_results: usize,
    ) -> Result<Vec<JobRecord>, SearchError> {
        let query = build_query(keyword, sites);
        ::log::info!("Searching for: {}", query);

        let raw = self.search.search(&query, max_results).await?;
        ::log::info!("Search returned {} results", raw.len());
        ::log::debug!("Raw search results: {:?}", raw);

        let mut filter = JobUrlFilter::new(sites, self.dedupe);
        let matches = filter.filter_all(&raw);
        ::log::info!("{} job links accepted by URL filter", matches.len());

        if matches.is_empty() {
            return Ok(Vec::new());
        }

        Ok(self.process_all(matches).await)
    }

    /// Fetch and extract every match, keeping input order in the output
    async fn process_all(&self, matches: Vec<SiteMatch>) -> Vec<JobRecord> {
        if self.max_concurrency == 1 {
            let mut records = Vec::with_capacity(matches.len());
            for found in &matches {
                records.push(process_link(&self.fetcher, &self.extractor, found).await);
            }
            return records;
        }

        let semaphore = Arc::new(Semaphore::new(self.max_concurrency));
        let mut handles = Vec::with_capacity(matches.len());

        for found in matches {
            let semaphore = Arc::clone(&semaphore);
            let fetcher = Arc::clone(&self.fetcher);
            let extractor = Arc::clone(&self.extractor);
            let company = found.organization_id.clone();
            let url = found.canonical_url.clone();

            let handle = tokio::spawn(async move {
                let _permit = semaphore.acquire_owned().await.ok();
                process_link(&fetcher, &extractor, &found).await
            });
            handles.push((company, url, handle));
        }

        let mut records = Vec::with_capacity(handles.len());
        for (company, url, handle) in handles {
            let record = match handle.await {
                Ok(record) => record,
                Err(e) => {
                    ::log::error!("Worker for {} failed: {}", url, e);
                    JobRecord::failed(company, None, url, format!("Worker failed: {e}"))
                }
            };
            records.push(record);
        }
        records
    }
}

/// Fetch one job link and turn the outcome into a record
async fn process_link(fetcher: &Fetcher, extractor: &Extractor, found: &SiteMatch) -> JobRecord {
    let fetch_result = fetcher.fetch(&found.canonical_url).await;
    let record = extractor.extract(&found.organization_id, &found.canonical_url, &fetch_result);
    ::log::info!(
        "{} {} ({})",
        record.status(),
        record.source_url(),
        record.title().unwrap_or("-")
    );
    record
}
