use thiserror::Error;

pub mod fields;
pub mod section;
pub mod text;

pub use fields::{extract_doi, extract_pub_year, extract_title};
pub use section::split_numbered_refs;
pub use text::rtf_to_text;
// Re-export domain types from core (canonical definitions live there)
pub use citemap_core::RawReference;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ExtractError {
    #[error("no numbered references like [1] ... found in the document")]
    NoReferences,
}

/// Extract the numbered bibliography from raw RTF content.
///
/// Pipeline:
/// 1. Recover plain text from the RTF markup (lossy)
/// 2. Segment into `(ref_no, raw_text)` blocks at `[N]` boundaries
/// 3. For each block, extract DOI, a best-guess title, and a
///    best-guess publication year
pub fn extract_references(rtf: &str) -> Result<Vec<RawReference>, ExtractError> {
    let text = text::rtf_to_text(rtf);
    let blocks = section::split_numbered_refs(&text);
    if blocks.is_empty() {
        return Err(ExtractError::NoReferences);
    }
    Ok(blocks
        .into_iter()
        .map(|(ref_no, raw_text)| {
            let doi = fields::extract_doi(&raw_text);
            let title = fields::extract_title(&raw_text);
            let pub_year_guess = fields::extract_pub_year(&raw_text);
            RawReference {
                ref_no,
                raw_text,
                doi,
                title,
                pub_year_guess,
            }
        })
        .collect())
}
