//! Construction of the internal-only citation graph.
//!
//! Nodes are exactly the selected references, resolved or not. Edges
//! are citation relations that stay inside that node set; a citation
//! pointing at any work outside the selection is dropped, never kept
//! as a dangling edge.

use std::collections::{BTreeMap, HashMap};

use crate::RawReference;
use crate::db::Work;

/// Sort key for nodes without a known publication year: after every
/// real year.
const MISSING_YEAR_SORT: i32 = 999_999;

/// One node per selected reference, attributes merged canonical over
/// guessed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    pub id: String,
    pub ref_no: u32,
    /// Document position; numbered bibliographies make this == ref_no.
    pub rtf_order: u32,
    pub pub_year: Option<i32>,
    pub doi: String,
    pub title: String,
}

/// A directed citation edge between two selected references.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphEdge {
    pub citing_ref_no: u32,
    pub cited_ref_no: u32,
}

#[derive(Debug, Clone)]
pub struct CitationGraph {
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
    id_by_ref: BTreeMap<u32, String>,
    year_by_ref: BTreeMap<u32, i32>,
}

/// Placeholder node identity for an unresolved reference. Stable for a
/// given `ref_no` and collision-free with OpenAlex identities, which
/// are `https://openalex.org/W…` URLs.
pub fn synthetic_id(ref_no: u32) -> String {
    format!("UNRESOLVED_REF_{ref_no}")
}

impl CitationGraph {
    /// Build the induced subgraph over `chosen` (sorted ref numbers).
    ///
    /// `resolved` holds the canonical records for the references that
    /// resolved; everything else becomes a placeholder node with its
    /// locally guessed attributes and no outgoing edges.
    pub fn build(
        chosen: &[u32],
        raw_by_ref: &BTreeMap<u32, RawReference>,
        resolved: &BTreeMap<u32, Work>,
    ) -> Self {
        let mut id_by_ref = BTreeMap::new();
        for &ref_no in chosen {
            let id = resolved
                .get(&ref_no)
                .map(|w| w.id.clone())
                .unwrap_or_else(|| synthetic_id(ref_no));
            id_by_ref.insert(ref_no, id);
        }
        let ref_by_id: HashMap<&str, u32> = id_by_ref
            .iter()
            .map(|(&ref_no, id)| (id.as_str(), ref_no))
            .collect();

        let mut nodes = Vec::with_capacity(chosen.len());
        let mut year_by_ref = BTreeMap::new();
        for &ref_no in chosen {
            let Some(raw) = raw_by_ref.get(&ref_no) else {
                continue;
            };
            let work = resolved.get(&ref_no);
            let pub_year = work.and_then(|w| w.year).or(raw.pub_year_guess);
            let title = work
                .filter(|w| !w.title.is_empty())
                .map(|w| w.title.clone())
                .unwrap_or_else(|| raw.title.clone());
            let doi = work
                .and_then(|w| w.doi.clone())
                .or_else(|| raw.doi.clone())
                .unwrap_or_default();
            if let Some(year) = pub_year {
                year_by_ref.insert(ref_no, year);
            }
            nodes.push(GraphNode {
                id: id_by_ref[&ref_no].clone(),
                ref_no,
                rtf_order: ref_no,
                pub_year,
                doi,
                title,
            });
        }

        // Only resolved references have a known reference list, so a
        // placeholder node can never originate an edge.
        let mut edges = Vec::new();
        for (&ref_no, work) in resolved {
            if !id_by_ref.contains_key(&ref_no) {
                continue;
            }
            for target in &work.referenced_works {
                if let Some(&cited_ref_no) = ref_by_id.get(target.as_str()) {
                    edges.push(GraphEdge {
                        citing_ref_no: ref_no,
                        cited_ref_no,
                    });
                }
            }
        }

        Self {
            nodes,
            edges,
            id_by_ref,
            year_by_ref,
        }
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn node_id(&self, ref_no: u32) -> Option<&str> {
        self.id_by_ref.get(&ref_no).map(String::as_str)
    }

    /// Best-known publication year: canonical when resolved, else the
    /// local guess, else `None`.
    pub fn year_of(&self, ref_no: u32) -> Option<i32> {
        self.year_by_ref.get(&ref_no).copied()
    }

    /// Nodes ordered ascending by best-known year (missing years sort
    /// last), ties broken by document order.
    pub fn sorted_nodes(&self) -> Vec<&GraphNode> {
        let mut sorted: Vec<&GraphNode> = self.nodes.iter().collect();
        sorted.sort_by_key(|n| (n.pub_year.unwrap_or(MISSING_YEAR_SORT), n.rtf_order));
        sorted
    }
}
