//! Heuristic field extraction from one reference's raw text.
//!
//! These heuristics are tuned to one common bibliography export style
//! and intentionally stay that way; the extracted title and year are
//! only resolution hints.

use once_cell::sync::Lazy;
use regex::Regex;

static DOI_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(10\.\d{4,9}/[^\s,;]+)").unwrap());
static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(19|20)\d{2}\b").unwrap());
static CURLY_QUOTED: Lazy<Regex> = Lazy::new(|| Regex::new("\u{201C}([^\u{201D}]+)\u{201D}").unwrap());
static STRAIGHT_QUOTED: Lazy<Regex> = Lazy::new(|| Regex::new("\"([^\"]+)\"").unwrap());

/// First DOI-shaped substring, trailing periods stripped, lower-cased.
pub fn extract_doi(s: &str) -> Option<String> {
    DOI_RE
        .captures(s)
        .map(|caps| caps[1].trim_end_matches('.').to_lowercase())
}

/// First quoted span (curly quotes win over straight), else the first
/// 160 characters of the text.
pub fn extract_title(s: &str) -> String {
    if let Some(caps) = CURLY_QUOTED.captures(s) {
        return caps[1].trim().to_string();
    }
    if let Some(caps) = STRAIGHT_QUOTED.captures(s) {
        return caps[1].trim().to_string();
    }
    s.chars().take(160).collect::<String>().trim().to_string()
}

/// Last four-digit year token before any "Accessed:" marker, so
/// web-access dates are not mistaken for publication years.
pub fn extract_pub_year(s: &str) -> Option<i32> {
    let cut = s.split("Accessed:").next().unwrap_or(s);
    YEAR_RE
        .find_iter(cut)
        .last()
        .and_then(|m| m.as_str().parse().ok())
}
