//! Segmentation of plain text into numbered reference blocks.

use once_cell::sync::Lazy;
use regex::Regex;

/// A `[N]` marker at the start of the text or after a newline,
/// optionally preceded by the lone-backslash line some reference
/// managers emit between entries.
static MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:^|\n\\\n|\n)\[(\d+)\]").unwrap());

/// Split plain text into ordered `(ref_no, raw_text)` pairs.
///
/// Each block runs from its `[N]` marker to the next marker (or end of
/// text). Numbers are taken verbatim from the brackets; they are
/// assumed but not required to be consecutive. Returns an empty vec
/// when no marker exists.
pub fn split_numbered_refs(text: &str) -> Vec<(u32, String)> {
    let mut out = Vec::new();
    let marks: Vec<(u32, usize, usize)> = MARKER
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let ref_no: u32 = caps.get(1)?.as_str().parse().ok()?;
            Some((ref_no, whole.start(), whole.end()))
        })
        .collect();

    for (i, &(ref_no, _, body_start)) in marks.iter().enumerate() {
        let body_end = marks
            .get(i + 1)
            .map(|&(_, next_start, _)| next_start)
            .unwrap_or(text.len());
        let raw_text = text[body_start..body_end].trim().to_string();
        out.push((ref_no, raw_text));
    }
    out
}
