use crate::sites::JobSite;
use std::collections::HashSet;

/// Company reported when a URL has no recognizable organization segment
pub const UNKNOWN_COMPANY: &str = "Unknown";

/// A raw search result that matched a known job-board family
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteMatch {
    /// Family the URL belongs to
    pub site: JobSite,
    /// Organization segment following the board host
    pub organization_id: String,
    /// Job link with query string and fragment removed
    pub canonical_url: String,
}

/// Classify a raw URL against every known job-board family.
///
/// This is a structural pattern test on the string, so trailing query strings and
/// fragments (as found in search-engine output) are tolerated. `None` means the URL
/// should be filtered out; it is not an error.
pub fn classify(url: &str) -> Option<SiteMatch> {
    classify_within(url, JobSite::ALL)
}

/// Classify a raw URL against a restricted set of families
pub fn classify_within(url: &str, sites: &[JobSite]) -> Option<SiteMatch> {
    sites.iter().find_map(|site| {
        if !site.link_pattern().is_match(url) {
            return None;
        }
        let canonical_url = canonicalize(url);
        let organization_id = site
            .organization_pattern()
            .captures(&canonical_url)
            .map(|caps| caps[1].to_string())?;

        ::log::trace!("Classified {} as {} ({})", url, site.name(), organization_id);
        Some(SiteMatch {
            site: *site,
            organization_id,
            canonical_url,
        })
    })
}

/// Strip the query string and fragment from a URL
pub fn canonicalize(url: &str) -> String {
    match url.find(['?', '#']) {
        Some(idx) => url[..idx].to_string(),
        None => url.to_string(),
    }
}

/// Derive the company name from a job URL, falling back to [`UNKNOWN_COMPANY`]
pub fn company_from_url(url: &str) -> String {
    JobSite::ALL
        .iter()
        .find_map(|site| {
            site.organization_pattern()
                .captures(url)
                .map(|caps| caps[1].to_string())
        })
        .unwrap_or_else(|| UNKNOWN_COMPANY.to_string())
}

/// Filters raw search results down to the job links worth fetching
#[derive(Debug)]
pub struct JobUrlFilter {
    sites: Vec<JobSite>,
    dedupe: bool,
    seen: HashSet<String>,
}

impl JobUrlFilter {
    /// Create a filter restricted to the given families
    pub fn new(sites: &[JobSite], dedupe: bool) -> Self {
        let mut unique = Vec::with_capacity(sites.len());
        for site in sites {
            if !unique.contains(site) {
                unique.push(*site);
            }
        }
        Self {
            sites: unique,
            dedupe,
            seen: HashSet::new(),
        }
    }

    /// Decide whether a raw URL should be fetched, returning its match if so
    pub fn accept(&mut self, url: &str) -> Option<SiteMatch> {
        let Some(found) = classify_within(url, &self.sites) else {
            ::log::debug!("URL filter rejected: {}", url);
            return None;
        };

        if self.dedupe && !self.seen.insert(found.canonical_url.clone()) {
            ::log::debug!("Skipping duplicate job link: {}", found.canonical_url);
            return None;
        }

        ::log::debug!("URL filter accepted: {}", found.canonical_url);
        Some(found)
    }

    /// Apply the filter to a whole result list, preserving order
    pub fn filter_all<I, S>(&mut self, urls: I) -> Vec<SiteMatch>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        urls.into_iter()
            .filter_map(|url| self.accept(url.as_ref()))
            .collect()
    }
}
