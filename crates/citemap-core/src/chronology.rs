//! Chronological sanity check over the citation edges.
//!
//! A work cannot legitimately cite something published after it, so an
//! edge whose citing side is strictly older than its cited side is
//! flagged. Advisory only: violations never remove edges or fail the
//! run.

use crate::graph::CitationGraph;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Violation {
    pub citing_ref_no: u32,
    pub cited_ref_no: u32,
    pub citing_year: i32,
    pub cited_year: i32,
}

/// Scan every edge and report those where both years are known and the
/// citing work predates the cited one.
pub fn check_chronology(graph: &CitationGraph) -> Vec<Violation> {
    graph
        .edges()
        .iter()
        .filter_map(|edge| {
            let citing_year = graph.year_of(edge.citing_ref_no)?;
            let cited_year = graph.year_of(edge.cited_ref_no)?;
            (citing_year < cited_year).then_some(Violation {
                citing_ref_no: edge.citing_ref_no,
                cited_ref_no: edge.cited_ref_no,
                citing_year,
                cited_year,
            })
        })
        .collect()
}
