//! File exports: GraphML plus the node and edge tables.
//!
//! All three artifacts are rendered to strings before any file is
//! created, so a run never leaves a partial set of outputs behind a
//! rendering problem. Escaping is hand-rolled; the outputs are small
//! and the rules are short.

use std::io::Write;
use std::path::PathBuf;

use thiserror::Error;

use crate::graph::CitationGraph;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// The three files a successful run produces.
#[derive(Debug, Clone)]
pub struct ExportPaths {
    pub graphml: PathBuf,
    pub nodes_csv: PathBuf,
    pub edges_csv: PathBuf,
}

/// Write `<prefix>.graphml`, `<prefix>_nodes.csv`, and
/// `<prefix>_edges.csv`.
pub fn export_graph(graph: &CitationGraph, prefix: &str) -> Result<ExportPaths, ExportError> {
    let paths = ExportPaths {
        graphml: PathBuf::from(format!("{prefix}.graphml")),
        nodes_csv: PathBuf::from(format!("{prefix}_nodes.csv")),
        edges_csv: PathBuf::from(format!("{prefix}_edges.csv")),
    };

    // Render everything up front; only then touch the filesystem.
    let rendered = [
        (&paths.graphml, graphml(graph)),
        (&paths.nodes_csv, nodes_csv(graph)),
        (&paths.edges_csv, edges_csv(graph)),
    ];
    for (path, content) in rendered {
        write_file(path, &content)?;
    }
    Ok(paths)
}

fn write_file(path: &PathBuf, content: &str) -> Result<(), ExportError> {
    let io = |source| ExportError::Io {
        path: path.clone(),
        source,
    };
    let mut file = std::fs::File::create(path).map_err(io)?;
    file.write_all(content.as_bytes()).map_err(io)
}

/// GraphML serialization of the full graph, nodes in document order.
pub fn graphml(graph: &CitationGraph) -> String {
    let mut out = String::with_capacity(4096);
    out.push_str("<?xml version='1.0' encoding='utf-8'?>\n");
    out.push_str(
        "<graphml xmlns=\"http://graphml.graphdrawing.org/xmlns\" \
         xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\" \
         xsi:schemaLocation=\"http://graphml.graphdrawing.org/xmlns \
         http://graphml.graphdrawing.org/xmlns/1.0/graphml.xsd\">\n",
    );
    out.push_str("  <key id=\"d0\" for=\"node\" attr.name=\"ref_no\" attr.type=\"long\" />\n");
    out.push_str("  <key id=\"d1\" for=\"node\" attr.name=\"rtf_order\" attr.type=\"long\" />\n");
    out.push_str("  <key id=\"d2\" for=\"node\" attr.name=\"pub_year\" attr.type=\"string\" />\n");
    out.push_str("  <key id=\"d3\" for=\"node\" attr.name=\"doi\" attr.type=\"string\" />\n");
    out.push_str("  <key id=\"d4\" for=\"node\" attr.name=\"title\" attr.type=\"string\" />\n");
    out.push_str("  <graph edgedefault=\"directed\">\n");

    for node in graph.nodes() {
        out.push_str(&format!("    <node id=\"{}\">\n", xml_escape(&node.id)));
        out.push_str(&format!("      <data key=\"d0\">{}</data>\n", node.ref_no));
        out.push_str(&format!(
            "      <data key=\"d1\">{}</data>\n",
            node.rtf_order
        ));
        out.push_str(&format!(
            "      <data key=\"d2\">{}</data>\n",
            node.pub_year.map(|y| y.to_string()).unwrap_or_default()
        ));
        out.push_str(&format!(
            "      <data key=\"d3\">{}</data>\n",
            xml_escape(&node.doi)
        ));
        out.push_str(&format!(
            "      <data key=\"d4\">{}</data>\n",
            xml_escape(&node.title)
        ));
        out.push_str("    </node>\n");
    }

    for edge in graph.edges() {
        // Endpoints are graph nodes by construction.
        let source = graph.node_id(edge.citing_ref_no).unwrap_or_default();
        let target = graph.node_id(edge.cited_ref_no).unwrap_or_default();
        out.push_str(&format!(
            "    <edge source=\"{}\" target=\"{}\" />\n",
            xml_escape(source),
            xml_escape(target)
        ));
    }

    out.push_str("  </graph>\n</graphml>\n");
    out
}

/// Node table, sorted ascending by best-known year then document
/// order. `pub_year` is empty when unknown.
pub fn nodes_csv(graph: &CitationGraph) -> String {
    let mut out = String::from("node_id,ref_no,rtf_order,pub_year,doi,title\n");
    for node in graph.sorted_nodes() {
        out.push_str(&format!(
            "{},{},{},{},{},{}\n",
            csv_escape(&node.id),
            node.ref_no,
            node.rtf_order,
            node.pub_year.map(|y| y.to_string()).unwrap_or_default(),
            csv_escape(&node.doi),
            csv_escape(&node.title),
        ));
    }
    out
}

/// Edge table; header is always present even when no internal edges
/// exist.
pub fn edges_csv(graph: &CitationGraph) -> String {
    let mut out = String::from("citing_ref_no,cited_ref_no\n");
    for edge in graph.edges() {
        out.push_str(&format!("{},{}\n", edge.citing_ref_no, edge.cited_ref_no));
    }
    out
}

fn csv_escape(s: &str) -> String {
    if s.contains('"') || s.contains(',') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
