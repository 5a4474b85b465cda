use crate::filter::company_from_url;
use crate::parsers::parse_metadata;
use crate::results::{FetchResult, JobRecord};

/// Title used when a page carries no `og:title`
pub const UNKNOWN_TITLE: &str = "Unknown";
pub const HEAD_NOT_FOUND_TITLE: &str = "Head not found";
pub const MISSING_HEAD_ERROR: &str = "Missing head section";
pub const ROLE_MISMATCH_ERROR: &str = "Job role does not match criteria";

/// Options controlling record classification
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Lowercase substrings a title must contain one of to be kept
    pub role_keywords: Vec<String>,
    /// Keep the extracted title on filtered records instead of replacing it with "Unknown"
    pub preserve_filtered_title: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            role_keywords: default_role_keywords(),
            preserve_filtered_title: true,
        }
    }
}

pub fn default_role_keywords() -> Vec<String> {
    vec!["engineer".to_string(), "developer".to_string()]
}

/// Turns fetch outcomes into job records
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    options: ExtractOptions,
}

impl Extractor {
    pub fn new(mut options: ExtractOptions) -> Self {
        for keyword in &mut options.role_keywords {
            *keyword = keyword.to_lowercase();
        }
        Self { options }
    }

    /// Builds the record for one job link.
    ///
    /// Deterministic in its inputs: the first applicable branch of
    /// failure, missing head, role mismatch, success wins.
    pub fn extract(&self, company_hint: &str, url: &str, fetch_result: &FetchResult) -> JobRecord {
        let company = if company_hint.is_empty() {
            company_from_url(url)
        } else {
            company_hint.to_string()
        };

        let body = match fetch_result {
            FetchResult::Content(body) => body,
            FetchResult::Failure { reason, .. } => {
                return JobRecord::failed(company, None, url.to_string(), reason.as_str());
            }
        };

        let Some(metadata) = parse_metadata(body) else {
            return JobRecord::failed(
                company,
                Some(HEAD_NOT_FOUND_TITLE.to_string()),
                url.to_string(),
                MISSING_HEAD_ERROR,
            );
        };

        let title = metadata.title.unwrap_or_else(|| UNKNOWN_TITLE.to_string());

        if !self.matches_role(&title) {
            let kept_title = if self.options.preserve_filtered_title {
                title
            } else {
                UNKNOWN_TITLE.to_string()
            };
            return JobRecord::filtered(
                company,
                Some(kept_title),
                url.to_string(),
                ROLE_MISMATCH_ERROR,
            );
        }

        JobRecord::success(company, title, metadata.image, url.to_string())
    }

    /// Case-insensitive role keyword test
    pub fn matches_role(&self, title: &str) -> bool {
        let title = title.to_lowercase();
        self.options
            .role_keywords
            .iter()
            .any(|keyword| title.contains(keyword.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::JobStatus;

    const URL: &str = "https://boards.greenhouse.io/acme/jobs/1";

    fn page(title: Option<&str>, image: Option<&str>) -> FetchResult {
        let mut head = String::new();
        if let Some(title) = title {
            head.push_str(&format!(r#"<meta property="og:title" content="{title}">"#));
        }
        if let Some(image) = image {
            head.push_str(&format!(r#"<meta property="og:image" content="{image}">"#));
        }
        FetchResult::Content(format!("<html><head>{head}</head><body></body></html>"))
    }

    fn legacy() -> Extractor {
        Extractor::new(ExtractOptions {
            preserve_filtered_title: false,
            ..ExtractOptions::default()
        })
    }

    #[test]
    fn test_failure_becomes_failed_record() {
        let result = FetchResult::Failure {
            reason: "Request Timed Out after retries".to_string(),
            attempts: 3,
        };
        let record = Extractor::default().extract("acme", URL, &result);
        assert_eq!(record.status(), JobStatus::Failed);
        assert_eq!(record.title(), None);
        assert_eq!(record.image_url(), None);
        assert_eq!(record.error(), Some("Request Timed Out after retries"));
        assert_eq!(record.company(), "acme");
    }

    #[test]
    fn test_missing_head() {
        let result = FetchResult::Content("<body>Apply now</body>".to_string());
        let record = Extractor::default().extract("acme", URL, &result);
        assert_eq!(record.status(), JobStatus::Failed);
        assert_eq!(record.title(), Some(HEAD_NOT_FOUND_TITLE));
        assert_eq!(record.error(), Some(MISSING_HEAD_ERROR));
    }

    #[test]
    fn test_head_markup_in_script_or_comment_is_missing_head() {
        let bodies = [
            r#"<body><script>var tpl = "<head></head>";</script><p>Apply</p></body>"#,
            "<!-- <head> removed --><html><body><p>Apply</p></body></html>",
        ];
        for body in bodies {
            let result = FetchResult::Content(body.to_string());
            let record = Extractor::default().extract("acme", URL, &result);
            assert_eq!(record.status(), JobStatus::Failed);
            assert_eq!(record.error(), Some(MISSING_HEAD_ERROR));
        }
    }

    #[test]
    fn test_meta_after_stray_body_tag_in_head() {
        let result = FetchResult::Content(
            concat!(
                r#"<head><title>Jobs</title><div id="banner"></div>"#,
                r#"<meta property="og:title" content="Senior Software Engineer"></head>"#,
            )
            .to_string(),
        );
        let record = Extractor::default().extract("acme", URL, &result);
        assert_eq!(record.status(), JobStatus::Success);
        assert_eq!(record.title(), Some("Senior Software Engineer"));
    }

    #[test]
    fn test_success_keeps_title_and_image() {
        let result = page(Some("Senior Software Engineer"), Some("https://img/x.png"));
        let record = Extractor::default().extract("acme", URL, &result);
        assert_eq!(record.status(), JobStatus::Success);
        assert_eq!(record.title(), Some("Senior Software Engineer"));
        assert_eq!(record.image_url(), Some("https://img/x.png"));
        assert_eq!(record.error(), None);
        assert_eq!(record.source_url(), URL);
    }

    #[test]
    fn test_role_match_is_case_insensitive() {
        let result = page(Some("FRONTEND DEVELOPER"), None);
        let record = Extractor::default().extract("acme", URL, &result);
        assert_eq!(record.status(), JobStatus::Success);
        assert_eq!(record.image_url(), None);
    }

    #[test]
    fn test_filtered_legacy_title() {
        let result = page(Some("Marketing Manager"), Some("https://img"));
        let record = legacy().extract("acme", URL, &result);
        assert_eq!(record.status(), JobStatus::Filtered);
        assert_eq!(record.title(), Some(UNKNOWN_TITLE));
        assert_eq!(record.image_url(), None);
        assert_eq!(record.error(), Some(ROLE_MISMATCH_ERROR));
    }

    #[test]
    fn test_filtered_preserves_title() {
        let result = page(Some("Marketing Manager"), None);
        let record = Extractor::default().extract("acme", URL, &result);
        assert_eq!(record.status(), JobStatus::Filtered);
        assert_eq!(record.title(), Some("Marketing Manager"));
        assert_eq!(record.error(), Some(ROLE_MISMATCH_ERROR));
    }

    #[test]
    fn test_missing_title_is_filtered() {
        let record = Extractor::default().extract("acme", URL, &page(None, Some("https://img")));
        assert_eq!(record.status(), JobStatus::Filtered);
        assert_eq!(record.title(), Some(UNKNOWN_TITLE));
    }

    #[test]
    fn test_company_falls_back_to_url() {
        let failure = FetchResult::Failure {
            reason: "Request Failed: dns".to_string(),
            attempts: 1,
        };
        let record = Extractor::default().extract("", URL, &failure);
        assert_eq!(record.company(), "acme");

        let record = Extractor::default().extract("", "https://example.com/x", &failure);
        assert_eq!(record.company(), "Unknown");
    }

    #[test]
    fn test_custom_keywords_are_lowercased() {
        let extractor = Extractor::new(ExtractOptions {
            role_keywords: vec!["Designer".to_string()],
            preserve_filtered_title: true,
        });
        assert!(extractor.matches_role("Product designer"));
        assert!(!extractor.matches_role("Software Engineer"));
    }

    #[test]
    fn test_extract_is_idempotent() {
        let extractor = Extractor::default();
        let inputs = [
            page(Some("Staff Engineer"), Some("https://img")),
            page(Some("Recruiter"), None),
            FetchResult::Content("<p>x</p>".to_string()),
            FetchResult::Failure {
                reason: "Request Failed: refused".to_string(),
                attempts: 1,
            },
        ];
        for input in &inputs {
            let first = extractor.extract("acme", URL, input);
            let second = extractor.extract("acme", URL, input);
            assert_eq!(first, second);
            assert_eq!(first.error().is_none(), first.status() == JobStatus::Success);
        }
    }
}
