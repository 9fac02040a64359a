pub mod chronology;
pub mod db;
pub mod export;
pub mod graph;
pub mod resolve;
pub mod selection;

// Re-export for convenience
pub use chronology::{Violation, check_chronology};
pub use db::{Work, WorkSource};
pub use graph::{CitationGraph, GraphNode};
pub use resolve::resolve_reference;
pub use selection::{SelectionError, parse_selection};

/// A numbered bibliography entry as recovered from the document.
///
/// `ref_no` is the number inside the brackets and serves as the stable
/// join key across the whole pipeline. The extracted DOI, title, and
/// year are resolution hints only; canonical values come from OpenAlex
/// once the reference resolves.
#[derive(Debug, Clone, PartialEq)]
pub struct RawReference {
    pub ref_no: u32,
    pub raw_text: String,
    pub doi: Option<String>,
    pub title: String,
    pub pub_year_guess: Option<i32>,
}
