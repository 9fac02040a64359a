//! Metadata source trait and the OpenAlex implementation.

pub mod mock;
pub mod openalex;

pub use openalex::OpenAlex;

/// A canonical work record from the metadata service.
///
/// `doi` is normalized: URL scheme prefix stripped, lower-cased.
/// `referenced_works` lists the identities of works this work cites,
/// in the order the service returns them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Work {
    pub id: String,
    pub title: String,
    pub year: Option<i32>,
    pub doi: Option<String>,
    pub referenced_works: Vec<String>,
}

/// A bibliographic metadata source that can resolve references.
///
/// Both operations degrade to `None` on any failure: a miss, a
/// malformed payload, or a call that stayed failed after retries.
/// Resolution treats `None` as "try the next strategy".
pub trait WorkSource {
    /// The canonical name of this source (e.g., "OpenAlex").
    fn name(&self) -> &str;

    /// Look up a single work by its DOI.
    fn lookup_doi(&self, doi: &str) -> Option<Work>;

    /// Free-text title search, optionally narrowed to a one-year
    /// publication window. Returns the first ranked result.
    fn search(&self, title: &str, year: Option<i32>) -> Option<Work>;
}
