//! Resolution of a raw reference to a canonical work record.

use crate::RawReference;
use crate::db::{Work, WorkSource};

/// Resolve one reference against the metadata source.
///
/// Strategies are tried in order, first usable identity wins:
/// 1. exact DOI lookup, when a DOI was extracted;
/// 2. free-text title search, narrowed to the guessed year when one
///    exists.
///
/// `None` means the reference is unresolved: it still becomes a graph
/// node, but contributes no outgoing citation edges.
pub fn resolve_reference(raw: &RawReference, source: &dyn WorkSource) -> Option<Work> {
    if let Some(doi) = &raw.doi
        && let Some(work) = source.lookup_doi(doi)
    {
        return Some(work);
    }
    source.search(&raw.title, raw.pub_year_guess)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::mock::{MockSource, work};

    fn raw(doi: Option<&str>, title: &str, year: Option<i32>) -> RawReference {
        RawReference {
            ref_no: 1,
            raw_text: title.to_string(),
            doi: doi.map(str::to_string),
            title: title.to_string(),
            pub_year_guess: year,
        }
    }

    #[test]
    fn doi_lookup_short_circuits_search() {
        let source = MockSource::new().with_doi(
            "10.1234/abc",
            work("https://openalex.org/W1", Some(2020), &[]),
        );
        let resolved =
            resolve_reference(&raw(Some("10.1234/abc"), "Some Title", None), &source).unwrap();
        assert_eq!(resolved.id, "https://openalex.org/W1");
        assert_eq!(source.doi_calls(), 1);
        assert_eq!(source.search_calls(), 0);
    }

    #[test]
    fn doi_miss_falls_through_to_search() {
        let source = MockSource::new().with_title(
            "Some Title",
            work("https://openalex.org/W2", Some(2018), &[]),
        );
        let resolved =
            resolve_reference(&raw(Some("10.9999/missing"), "Some Title", None), &source).unwrap();
        assert_eq!(resolved.id, "https://openalex.org/W2");
        assert_eq!(source.doi_calls(), 1);
        assert_eq!(source.search_calls(), 1);
    }

    #[test]
    fn no_doi_goes_straight_to_search() {
        let source = MockSource::new()
            .with_title("Some Title", work("https://openalex.org/W3", None, &[]));
        let resolved = resolve_reference(&raw(None, "Some Title", Some(2015)), &source).unwrap();
        assert_eq!(resolved.id, "https://openalex.org/W3");
        assert_eq!(source.doi_calls(), 0);
    }

    #[test]
    fn both_strategies_missing_is_unresolved() {
        let source = MockSource::new();
        assert!(resolve_reference(&raw(Some("10.1/x"), "Unknown", None), &source).is_none());
        assert_eq!(source.doi_calls(), 1);
        assert_eq!(source.search_calls(), 1);
    }
}
