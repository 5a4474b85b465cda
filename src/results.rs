use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of retrieving a single job URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResult {
    /// Response body of a successful request
    Content(String),
    /// Terminal failure after `attempts` tries
    Failure { reason: String, attempts: u32 },
}

impl FetchResult {
    pub fn is_content(&self) -> bool {
        matches!(self, FetchResult::Content(_))
    }
}

/// Classification of a processed job link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobStatus {
    Success,
    Filtered,
    Failed,
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            JobStatus::Success => "Success",
            JobStatus::Filtered => "Filtered",
            JobStatus::Failed => "Failed",
        };
        f.write_str(label)
    }
}

/// One row of output for an accepted job link.
///
/// Only constructed through [`JobRecord::success`], [`JobRecord::filtered`] and
/// [`JobRecord::failed`], so `error` is set exactly when `status` is not `Success`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobRecord {
    company: String,
    title: Option<String>,
    image_url: Option<String>,
    source_url: String,
    status: JobStatus,
    error: Option<String>,
}

impl JobRecord {
    pub fn success(
        company: String,
        title: String,
        image_url: Option<String>,
        source_url: String,
    ) -> Self {
        Self {
            company,
            title: Some(title),
            image_url,
            source_url,
            status: JobStatus::Success,
            error: None,
        }
    }

    pub fn filtered(
        company: String,
        title: Option<String>,
        source_url: String,
        error: impl Into<String>,
    ) -> Self {
        Self {
            company,
            title,
            image_url: None,
            source_url,
            status: JobStatus::Filtered,
            error: Some(error.into()),
        }
    }

    pub fn failed(
        company: String,
        title: Option<String>,
        source_url: String,
        error: impl Into<String>,
    ) -> Self {
        Self {
            company,
            title,
            image_url: None,
            source_url,
            status: JobStatus::Failed,
            error: Some(error.into()),
        }
    }

    pub fn company(&self) -> &str {
        &self.company
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    pub fn status(&self) -> JobStatus {
        self.status
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
