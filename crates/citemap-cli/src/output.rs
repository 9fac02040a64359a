use std::io::Write;

use citemap_core::Violation;
use citemap_core::export::ExportPaths;
use owo_colors::OwoColorize;

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

/// Print the extraction summary after RTF parsing.
pub fn print_extraction_summary(
    w: &mut dyn Write,
    total_found: usize,
    chosen: usize,
) -> std::io::Result<()> {
    writeln!(w, "RTF refs found: {} | chosen: {}", total_found, chosen)
}

/// Print the per-reference progress line before querying.
pub fn print_resolving(
    w: &mut dyn Write,
    index: usize,
    total: usize,
    ref_no: u32,
    title: &str,
) -> std::io::Result<()> {
    writeln!(
        w,
        "[{}/{}] Resolving [{}]: \"{}\"",
        index + 1,
        total,
        ref_no,
        truncate(title, 50)
    )
}

/// Print the outcome of one resolution attempt.
pub fn print_resolve_result(
    w: &mut dyn Write,
    index: usize,
    total: usize,
    work_id: Option<&str>,
    color: ColorMode,
) -> std::io::Result<()> {
    let idx = index + 1;
    match work_id {
        Some(id) => {
            if color.enabled() {
                writeln!(w, "[{}/{}] -> {} ({})", idx, total, "RESOLVED".green(), id)
            } else {
                writeln!(w, "[{}/{}] -> RESOLVED ({})", idx, total, id)
            }
        }
        None => {
            if color.enabled() {
                writeln!(w, "[{}/{}] -> {}", idx, total, "UNRESOLVED".red())
            } else {
                writeln!(w, "[{}/{}] -> UNRESOLVED", idx, total)
            }
        }
    }
}

/// Print the resolution tally and the unresolved warning, if any.
pub fn print_resolution_summary(
    w: &mut dyn Write,
    resolved: usize,
    chosen: usize,
    unresolved: &[u32],
    color: ColorMode,
) -> std::io::Result<()> {
    writeln!(w, "Resolved in OpenAlex: {}/{}", resolved, chosen)?;
    if !unresolved.is_empty() {
        let msg = format!(
            "[WARN] Unresolved refs (kept as nodes, but no edges from them): {:?}",
            unresolved
        );
        if color.enabled() {
            writeln!(w, "{}", msg.yellow())?;
        } else {
            writeln!(w, "{}", msg)?;
        }
    }
    Ok(())
}

/// Print graph size and the files written.
pub fn print_graph_summary(
    w: &mut dyn Write,
    nodes: usize,
    edges: usize,
    paths: &ExportPaths,
) -> std::io::Result<()> {
    writeln!(w, "Nodes: {} | Internal edges: {}", nodes, edges)?;
    writeln!(w, "Wrote: {}", paths.graphml.display())?;
    writeln!(w, "Wrote: {}", paths.nodes_csv.display())?;
    writeln!(w, "Wrote: {}", paths.edges_csv.display())
}

/// Print the chronology report: one line per violation, or the
/// all-clear.
pub fn print_chronology(
    w: &mut dyn Write,
    violations: &[Violation],
    color: ColorMode,
) -> std::io::Result<()> {
    if violations.is_empty() {
        writeln!(w)?;
        writeln!(
            w,
            "No time-order violations found among internal citations."
        )?;
        return Ok(());
    }

    writeln!(w)?;
    let header = "[NOTE] Time-order violations (earlier paper citing later paper):";
    if color.enabled() {
        writeln!(w, "{}", header.yellow())?;
    } else {
        writeln!(w, "{}", header)?;
    }
    for v in violations {
        writeln!(
            w,
            "  Ref[{}] ({}) cites Ref[{}] ({})",
            v.citing_ref_no, v.citing_year, v.cited_ref_no, v.cited_year
        )?;
    }
    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        format!("{}...", s.chars().take(max).collect::<String>())
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(f: impl FnOnce(&mut Vec<u8>) -> std::io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn resolution_summary_warns_on_unresolved() {
        let out = rendered(|w| print_resolution_summary(w, 2, 3, &[7], ColorMode(false)));
        assert!(out.contains("Resolved in OpenAlex: 2/3"));
        assert!(out.contains("[WARN] Unresolved refs"));
        assert!(out.contains("[7]"));
    }

    #[test]
    fn resolution_summary_silent_when_all_resolved() {
        let out = rendered(|w| print_resolution_summary(w, 3, 3, &[], ColorMode(false)));
        assert!(!out.contains("[WARN]"));
    }

    #[test]
    fn chronology_lists_each_violation() {
        let violations = vec![Violation {
            citing_ref_no: 1,
            cited_ref_no: 4,
            citing_year: 2010,
            cited_year: 2015,
        }];
        let out = rendered(|w| print_chronology(w, &violations, ColorMode(false)));
        assert!(out.contains("Time-order violations"));
        assert!(out.contains("Ref[1] (2010) cites Ref[4] (2015)"));
    }

    #[test]
    fn chronology_all_clear_message() {
        let out = rendered(|w| print_chronology(w, &[], ColorMode(false)));
        assert!(out.contains("No time-order violations"));
    }

    #[test]
    fn long_titles_are_truncated_on_char_boundaries() {
        let title = "é".repeat(80);
        let out = rendered(|w| print_resolving(w, 0, 1, 3, &title));
        assert!(out.contains(&format!("\"{}...\"", "é".repeat(50))));
    }
}
