use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static GREENHOUSE_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https://boards\.greenhouse\.io/[^/]+/jobs/[^/]+")
        .expect("valid greenhouse pattern")
});

static GREENHOUSE_ORG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"greenhouse\.io/([^/]+)/jobs").expect("valid greenhouse org pattern")
});

/// Supported job-board families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobSite {
    /// Greenhouse hosted boards (`boards.greenhouse.io/<org>/jobs/<id>`)
    Greenhouse,
}

impl JobSite {
    /// Every known family, in classification order
    pub const ALL: &'static [JobSite] = &[JobSite::Greenhouse];

    /// Site-scope expression used in the search query (`site:<scope>`)
    pub fn scope(&self) -> &'static str {
        match self {
            JobSite::Greenhouse => "boards.greenhouse.io/*/jobs/*",
        }
    }

    /// Pattern a raw URL must contain to belong to this family
    pub fn link_pattern(&self) -> &'static Regex {
        match self {
            JobSite::Greenhouse => &*GREENHOUSE_LINK,
        }
    }

    /// Pattern whose first capture group is the organization segment
    pub fn organization_pattern(&self) -> &'static Regex {
        match self {
            JobSite::Greenhouse => &*GREENHOUSE_ORG,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            JobSite::Greenhouse => "greenhouse",
        }
    }
}

/// Recency filters understood by the search provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeRange {
    PastTwelveHours,
    PastDay,
    PastWeek,
    PastMonth,
    PastYear,
}

impl TimeRange {
    /// Value of the `tbs` query parameter
    pub fn as_param(&self) -> &'static str {
        match self {
            TimeRange::PastTwelveHours => "qdr:h12",
            TimeRange::PastDay => "qdr:d",
            TimeRange::PastWeek => "qdr:w",
            TimeRange::PastMonth => "qdr:m",
            TimeRange::PastYear => "qdr:y",
        }
    }
}
