use clap::{Parser, ValueEnum};
use job_scout::{JobSite, SearchConfig, TimeRange};

#[derive(Parser, Debug)]
#[command(name = "job-scout")]
#[command(about = "Searches the web for job board postings and classifies each one")]
#[command(version)]
pub struct Args {
    /// Search keyword (defaults to "Software Engineer" or the config file value)
    pub keyword: Option<String>,

    /// Path to a JSON configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Job board to search (repeatable)
    #[arg(short, long = "site", value_enum)]
    pub sites: Vec<SiteArg>,

    /// Number of search results to request
    #[arg(short, long)]
    pub max_results: Option<usize>,

    /// Only return results from this period
    #[arg(short, long, value_enum)]
    pub time_range: Option<TimeRangeArg>,

    /// Number of job pages fetched at once
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Total attempts per job page when requests time out
    #[arg(long)]
    pub attempts: Option<u32>,

    /// Seconds to wait between timed-out attempts
    #[arg(long)]
    pub retry_delay: Option<u64>,

    /// Fetch every result, even when links differ only by query string
    #[arg(long)]
    pub keep_duplicates: bool,

    /// Report filtered postings with the title "Unknown"
    #[arg(long)]
    pub legacy_filtered_title: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = FormatArg::Table)]
    pub format: FormatArg,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SiteArg {
    Greenhouse,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum TimeRangeArg {
    #[value(name = "12h")]
    PastTwelveHours,
    Day,
    Week,
    Month,
    Year,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Table,
    Json,
}

/// Convert from CLI argument site to library site
pub fn convert_site(arg: SiteArg) -> JobSite {
    match arg {
        SiteArg::Greenhouse => JobSite::Greenhouse,
    }
}

/// Convert from CLI argument time range to library time range
pub fn convert_time_range(arg: TimeRangeArg) -> TimeRange {
    match arg {
        TimeRangeArg::PastTwelveHours => TimeRange::PastTwelveHours,
        TimeRangeArg::Day => TimeRange::PastDay,
        TimeRangeArg::Week => TimeRange::PastWeek,
        TimeRangeArg::Month => TimeRange::PastMonth,
        TimeRangeArg::Year => TimeRange::PastYear,
    }
}

impl Args {
    /// Apply command-line overrides on top of a loaded configuration
    pub fn apply(&self, mut config: SearchConfig) -> SearchConfig {
        if let Some(keyword) = &self.keyword {
            config.keyword = keyword.clone();
        }
        if !self.sites.is_empty() {
            config.sites = self.sites.iter().copied().map(convert_site).collect();
        }
        if let Some(max_results) = self.max_results {
            config.max_results = max_results;
        }
        if let Some(range) = self.time_range {
            config.time_range = Some(convert_time_range(range));
        }
        if let Some(concurrency) = self.concurrency {
            config.max_concurrency = concurrency;
        }
        if let Some(timeout) = self.timeout {
            config.request_timeout_secs = timeout;
        }
        if let Some(attempts) = self.attempts {
            config.max_attempts = attempts;
        }
        if let Some(delay) = self.retry_delay {
            config.retry_delay_secs = delay;
        }
        if self.keep_duplicates {
            config.dedupe = false;
        }
        if self.legacy_filtered_title {
            config.preserve_filtered_title = false;
        }
        config
    }
}
