//! Mock metadata source for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{Work, WorkSource};

/// A hand-rolled mock implementing [`WorkSource`] for tests.
///
/// Responses are scripted per DOI and per title; anything unscripted is
/// a miss. Call counts are tracked so tests can assert the resolution
/// chain short-circuits.
#[derive(Default)]
pub struct MockSource {
    by_doi: HashMap<String, Work>,
    by_title: HashMap<String, Work>,
    doi_calls: AtomicUsize,
    search_calls: AtomicUsize,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_doi(mut self, doi: &str, work: Work) -> Self {
        self.by_doi.insert(doi.to_string(), work);
        self
    }

    pub fn with_title(mut self, title: &str, work: Work) -> Self {
        self.by_title.insert(title.to_string(), work);
        self
    }

    pub fn doi_calls(&self) -> usize {
        self.doi_calls.load(Ordering::SeqCst)
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }
}

impl WorkSource for MockSource {
    fn name(&self) -> &str {
        "mock"
    }

    fn lookup_doi(&self, doi: &str) -> Option<Work> {
        self.doi_calls.fetch_add(1, Ordering::SeqCst);
        self.by_doi.get(doi).cloned()
    }

    fn search(&self, title: &str, _year: Option<i32>) -> Option<Work> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        self.by_title.get(title).cloned()
    }
}

/// Build a minimal [`Work`] for tests.
pub fn work(id: &str, year: Option<i32>, referenced: &[&str]) -> Work {
    Work {
        id: id.to_string(),
        title: format!("Title of {id}"),
        year,
        doi: None,
        referenced_works: referenced.iter().map(|s| s.to_string()).collect(),
    }
}
