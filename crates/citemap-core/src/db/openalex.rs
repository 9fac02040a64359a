//! Blocking OpenAlex client.
//!
//! Calls are strictly sequential: every request is preceded by a fixed
//! courtesy delay, and transient failures (429, 5xx, transport errors)
//! are retried with exponentially doubling backoff. Anything still
//! failing after the retry budget is treated as "no result" for that
//! call only, never as a failure of the whole run.

use std::thread;
use std::time::Duration;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::{Work, WorkSource};

const OPENALEX_BASE: &str = "https://api.openalex.org";
const USER_AGENT: &str = concat!("citemap/", env!("CARGO_PKG_VERSION"));
const SELECT_FIELDS: &str = "id,display_name,publication_year,doi,referenced_works";
const ATTEMPT_TIMEOUT: Duration = Duration::from_secs(30);

pub struct OpenAlex {
    http: reqwest::blocking::Client,
    base_url: String,
    delay: Duration,
    retries: u32,
    mailto: Option<String>,
}

impl OpenAlex {
    /// `delay` is slept before every request (rate-limit courtesy);
    /// `retries` bounds the attempts per call. `mailto` joins the
    /// OpenAlex polite pool when given.
    pub fn new(
        delay: Duration,
        retries: u32,
        mailto: Option<String>,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(ATTEMPT_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: OPENALEX_BASE.to_string(),
            delay,
            retries,
            mailto,
        })
    }

    /// Point the client at a different works endpoint (mirror or test
    /// server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn doi_url(&self, doi: &str) -> String {
        let mut url = format!(
            "{}/works/https://doi.org/{}?select={}",
            self.base_url, doi, SELECT_FIELDS
        );
        if let Some(mailto) = &self.mailto {
            url.push_str(&format!("&mailto={}", urlencoding::encode(mailto)));
        }
        url
    }

    fn search_url(&self, title: &str, year: Option<i32>) -> String {
        let mut url = format!(
            "{}/works?search={}&per-page=5&select={}",
            self.base_url,
            urlencoding::encode(title),
            SELECT_FIELDS
        );
        if let Some(year) = year {
            url.push_str(&format!(
                "&filter=from_publication_date:{year}-01-01,to_publication_date:{year}-12-31"
            ));
        }
        if let Some(mailto) = &self.mailto {
            url.push_str(&format!("&mailto={}", urlencoding::encode(mailto)));
        }
        url
    }

    /// GET a JSON payload with the courtesy delay and bounded retry
    /// loop. Returns `None` on a non-retryable status, a malformed
    /// body, or an exhausted retry budget.
    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Option<T> {
        let mut backoff = Duration::from_secs(1);
        for attempt in 1..=self.retries {
            thread::sleep(self.delay);
            match self.http.get(url).send() {
                Ok(resp) => {
                    let status = resp.status();
                    if status.is_success() {
                        return match resp.json() {
                            Ok(payload) => Some(payload),
                            Err(e) => {
                                tracing::warn!(error = %e, "malformed OpenAlex payload");
                                None
                            }
                        };
                    }
                    if !is_retryable(status.as_u16()) {
                        tracing::debug!(%status, "OpenAlex returned non-retryable status");
                        return None;
                    }
                    tracing::warn!(%status, attempt, "OpenAlex transient failure, backing off");
                }
                Err(e) => {
                    tracing::warn!(error = %e, attempt, "OpenAlex request failed, backing off");
                }
            }
            thread::sleep(backoff);
            backoff *= 2;
        }
        None
    }
}

impl WorkSource for OpenAlex {
    fn name(&self) -> &str {
        "OpenAlex"
    }

    fn lookup_doi(&self, doi: &str) -> Option<Work> {
        let payload: WorkPayload = self.get_json(&self.doi_url(doi))?;
        normalize(payload)
    }

    fn search(&self, title: &str, year: Option<i32>) -> Option<Work> {
        let payload: SearchPayload = self.get_json(&self.search_url(title, year))?;
        payload.results.into_iter().next().and_then(normalize)
    }
}

/// Transient statuses worth retrying: rate limiting and server errors.
fn is_retryable(status: u16) -> bool {
    matches!(status, 429 | 500 | 502 | 503 | 504)
}

#[derive(Debug, Deserialize)]
struct WorkPayload {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    publication_year: Option<i32>,
    #[serde(default)]
    doi: Option<String>,
    #[serde(default)]
    referenced_works: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct SearchPayload {
    #[serde(default)]
    results: Vec<WorkPayload>,
}

/// Turn a raw payload into a canonical [`Work`]. A record without an
/// identity is unusable and yields `None`.
fn normalize(payload: WorkPayload) -> Option<Work> {
    let id = payload.id.unwrap_or_default();
    if id.is_empty() {
        return None;
    }
    Some(Work {
        id,
        title: payload.display_name.unwrap_or_default(),
        year: payload.publication_year,
        doi: payload.doi.map(normalize_doi).filter(|d| !d.is_empty()),
        referenced_works: payload.referenced_works,
    })
}

/// Strip the URL scheme prefix from a DOI field and lower-case it.
fn normalize_doi(doi: String) -> String {
    doi.trim_start_matches("https://doi.org/").to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_statuses() {
        for status in [429, 500, 502, 503, 504] {
            assert!(is_retryable(status), "{status} should be retryable");
        }
        for status in [400, 403, 404, 301] {
            assert!(!is_retryable(status), "{status} should not be retryable");
        }
    }

    #[test]
    fn normalize_strips_doi_prefix_and_lowercases() {
        let payload: WorkPayload = serde_json::from_value(serde_json::json!({
            "id": "https://openalex.org/W123",
            "display_name": "A Paper",
            "publication_year": 2019,
            "doi": "https://doi.org/10.1234/ABC.DEF",
            "referenced_works": ["https://openalex.org/W456"],
        }))
        .unwrap();
        let work = normalize(payload).unwrap();
        assert_eq!(work.id, "https://openalex.org/W123");
        assert_eq!(work.doi.as_deref(), Some("10.1234/abc.def"));
        assert_eq!(work.year, Some(2019));
        assert_eq!(work.referenced_works, vec!["https://openalex.org/W456"]);
    }

    #[test]
    fn normalize_rejects_missing_identity() {
        let payload: WorkPayload = serde_json::from_value(serde_json::json!({
            "display_name": "No id here",
        }))
        .unwrap();
        assert!(normalize(payload).is_none());
    }

    #[test]
    fn normalize_defaults_optional_fields() {
        let payload: WorkPayload = serde_json::from_value(serde_json::json!({
            "id": "https://openalex.org/W9",
        }))
        .unwrap();
        let work = normalize(payload).unwrap();
        assert_eq!(work.title, "");
        assert_eq!(work.year, None);
        assert_eq!(work.doi, None);
        assert!(work.referenced_works.is_empty());
    }

    fn test_client() -> OpenAlex {
        OpenAlex::new(Duration::ZERO, 1, None).unwrap()
    }

    #[test]
    fn search_url_includes_year_window() {
        let client = test_client();
        let url = client.search_url("attention is all you need", Some(2017));
        assert!(url.contains("search=attention%20is%20all%20you%20need"));
        assert!(url.contains("per-page=5"));
        assert!(url.contains("from_publication_date:2017-01-01"));
        assert!(url.contains("to_publication_date:2017-12-31"));
    }

    #[test]
    fn search_url_omits_filter_without_year() {
        let client = test_client();
        let url = client.search_url("some title", None);
        assert!(!url.contains("filter="));
    }

    #[test]
    fn doi_url_embeds_qualified_identifier() {
        let client = test_client().with_base_url("http://localhost:9999");
        let url = client.doi_url("10.1234/abc.def");
        assert!(url.starts_with("http://localhost:9999/works/https://doi.org/10.1234/abc.def"));
        assert!(url.contains("select=id,display_name,publication_year,doi,referenced_works"));
    }

    #[test]
    fn mailto_appended_when_configured() {
        let client = OpenAlex::new(Duration::ZERO, 1, Some("ops@example.org".into())).unwrap();
        assert!(client.search_url("t", None).contains("mailto=ops%40example.org"));
        assert!(client.doi_url("10.1/x").contains("mailto=ops%40example.org"));
    }
}
