//! Parsing of the user-supplied selection expression.
//!
//! The expression names which reference numbers to process: `all`, or a
//! comma-separated list of single numbers and dashed ranges
//! (`1,3,5-9`). Ranges are order-insensitive, so `9-5` means `5-9`.

use std::collections::BTreeSet;

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SelectionError {
    #[error("invalid selection token: {0:?}")]
    InvalidToken(String),
    #[error("selection matched no references in the document")]
    Empty,
}

/// Resolve a selection expression against the set of available
/// reference numbers.
///
/// Numbers the expression names but the document does not contain are
/// silently dropped; a malformed token is a hard error. The returned
/// list is sorted ascending and never empty.
pub fn parse_selection(
    selection: &str,
    available: &BTreeSet<u32>,
) -> Result<Vec<u32>, SelectionError> {
    let selection = selection.trim().to_lowercase();
    if selection == "all" {
        if available.is_empty() {
            return Err(SelectionError::Empty);
        }
        return Ok(available.iter().copied().collect());
    }

    let mut chosen = BTreeSet::new();
    for part in selection.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        if let Some((a, b)) = part.split_once('-') {
            let a: u32 = parse_number(a.trim(), part)?;
            let b: u32 = parse_number(b.trim(), part)?;
            let (lo, hi) = (a.min(b), a.max(b));
            chosen.extend((lo..=hi).filter(|n| available.contains(n)));
        } else {
            let n = parse_number(part, part)?;
            if available.contains(&n) {
                chosen.insert(n);
            }
        }
    }

    if chosen.is_empty() {
        return Err(SelectionError::Empty);
    }
    Ok(chosen.into_iter().collect())
}

fn parse_number(text: &str, token: &str) -> Result<u32, SelectionError> {
    text.parse()
        .map_err(|_| SelectionError::InvalidToken(token.to_string()))
}
