//! Minimal RTF -> plain text conversion, good enough for numbered
//! bibliographies exported by reference managers.
//!
//! Deliberately lossy: styling, tables, and footnotes are discarded.
//! The goal is to recover readable bibliographic prose, nothing more.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// `\u<signed>?` escapes. RTF stores code points as signed 16-bit
/// values, so negative codes are reinterpreted as unsigned.
static UNICODE_ESCAPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\u(-?\d+)\??").unwrap());

/// `\'hh` byte escapes (codepage-dependent); removed, not decoded.
static HEX_ESCAPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\'[0-9a-fA-F]{2}").unwrap());

/// Control words: backslash, letters, optional numeric parameter,
/// optional trailing space.
static CONTROL_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\[a-zA-Z]+\d* ?").unwrap());

static SPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+").unwrap());
static NEWLINE_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s+").unwrap());

/// Convert raw RTF content to plain text.
pub fn rtf_to_text(rtf: &str) -> String {
    // Unicode escapes must be decoded before control-word stripping
    // eats them.
    let s = UNICODE_ESCAPE.replace_all(rtf, |caps: &Captures| {
        let code: i32 = caps[1].parse().unwrap_or(0);
        let code = if code < 0 { 65536 + code } else { code };
        char::from_u32(code as u32)
            .unwrap_or('\u{FFFD}')
            .to_string()
    });
    let s = HEX_ESCAPE.replace_all(&s, "");
    let s = CONTROL_WORD.replace_all(&s, "");
    let s = s.replace(['{', '}'], "");
    let s = SPACE_RUN.replace_all(&s, " ");
    let s = NEWLINE_WS.replace_all(&s, "\n");
    s.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_unicode_escapes() {
        assert_eq!(rtf_to_text(r"caf\u233? au lait"), "café au lait");
    }

    #[test]
    fn negative_code_reinterpreted_as_unsigned() {
        // -10179 + 65536 = 55357, a surrogate: lossy replacement.
        assert_eq!(rtf_to_text(r"x\u-10179?y"), "x\u{FFFD}y");
        // -256 + 65536 = 65280
        assert_eq!(rtf_to_text(r"a\u-256?b"), "a\u{FF00}b");
    }

    #[test]
    fn removes_hex_escapes_without_decoding() {
        assert_eq!(rtf_to_text(r"Sm\'f8rrebr\'f8d"), "Smrrebrd");
    }

    #[test]
    fn strips_control_words_and_parameters() {
        assert_eq!(rtf_to_text(r"\b bold\b0 done\fs24 end"), "bolddoneend");
    }

    #[test]
    fn strips_grouping_braces() {
        assert_eq!(rtf_to_text(r"{\i nested {deep}}"), "nested deep");
    }

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(rtf_to_text("a  \t b"), "a b");
        assert_eq!(rtf_to_text("line one\n   line two"), "line one\nline two");
    }

    #[test]
    fn result_is_trimmed() {
        assert_eq!(rtf_to_text("  padded  "), "padded");
    }
}
