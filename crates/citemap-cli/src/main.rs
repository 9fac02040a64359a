use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use citemap_core::db::{OpenAlex, Work, WorkSource};
use citemap_core::{
    CitationGraph, RawReference, check_chronology, export::export_graph, parse_selection,
    resolve_reference,
};
use clap::Parser;

mod output;

use output::ColorMode;

/// Build an internal-only citation network among chosen references in
/// an RTF bibliography.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the RTF file
    rtf: PathBuf,

    /// Refs to include: "all" or e.g. "1-13" or "1,3,5-9"
    #[arg(long, default_value = "all")]
    select: String,

    /// Output file prefix
    #[arg(long, default_value = "network")]
    out_prefix: String,

    /// Sleep between API calls (seconds)
    #[arg(long, default_value_t = 0.15)]
    sleep: f64,

    /// Retry attempts per API call
    #[arg(long, default_value_t = 4)]
    retries: u32,

    /// Contact email for the OpenAlex polite pool
    #[arg(long)]
    mailto: Option<String>,

    /// Override the OpenAlex API base URL
    #[arg(long)]
    api_url: Option<String>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    run(cli)
}

fn run(cli: Cli) -> anyhow::Result<()> {
    if !cli.rtf.exists() {
        anyhow::bail!("File not found: {}", cli.rtf.display());
    }

    let color = ColorMode(!cli.no_color);
    let mut writer = std::io::stdout();

    // Bibliography exports are not always valid UTF-8; decode lossily.
    let bytes = std::fs::read(&cli.rtf)?;
    let rtf = String::from_utf8_lossy(&bytes);

    let refs = citemap_rtf::extract_references(&rtf)?;
    let total_found = refs.len();

    let raw_by_ref: BTreeMap<u32, RawReference> =
        refs.into_iter().map(|r| (r.ref_no, r)).collect();
    let available: BTreeSet<u32> = raw_by_ref.keys().copied().collect();
    let chosen = parse_selection(&cli.select, &available)?;

    output::print_extraction_summary(&mut writer, total_found, chosen.len())?;

    let mailto = cli
        .mailto
        .or_else(|| std::env::var("OPENALEX_MAILTO").ok());
    let mut source = OpenAlex::new(Duration::from_secs_f64(cli.sleep), cli.retries, mailto)?;
    if let Some(api_url) = cli.api_url {
        source = source.with_base_url(api_url);
    }

    let (resolved, unresolved) = resolve_all(&mut writer, &chosen, &raw_by_ref, &source, color)?;

    output::print_resolution_summary(
        &mut writer,
        resolved.len(),
        chosen.len(),
        &unresolved,
        color,
    )?;

    let graph = CitationGraph::build(&chosen, &raw_by_ref, &resolved);
    let paths = export_graph(&graph, &cli.out_prefix)?;

    output::print_graph_summary(&mut writer, graph.node_count(), graph.edge_count(), &paths)?;
    output::print_chronology(&mut writer, &check_chronology(&graph), color)?;

    Ok(())
}

/// Resolve every chosen reference in document order, one at a time.
/// The metadata source owns pacing and retries; a reference that stays
/// unresolved is reported, never fatal.
fn resolve_all(
    writer: &mut dyn Write,
    chosen: &[u32],
    raw_by_ref: &BTreeMap<u32, RawReference>,
    source: &dyn WorkSource,
    color: ColorMode,
) -> anyhow::Result<(BTreeMap<u32, Work>, Vec<u32>)> {
    let mut resolved = BTreeMap::new();
    let mut unresolved = Vec::new();
    let total = chosen.len();

    for (i, &ref_no) in chosen.iter().enumerate() {
        let raw = &raw_by_ref[&ref_no];
        output::print_resolving(writer, i, total, ref_no, &raw.title)?;
        match resolve_reference(raw, source) {
            Some(work) => {
                output::print_resolve_result(writer, i, total, Some(&work.id), color)?;
                resolved.insert(ref_no, work);
            }
            None => {
                output::print_resolve_result(writer, i, total, None, color)?;
                unresolved.push(ref_no);
            }
        }
        writer.flush()?;
    }
    Ok((resolved, unresolved))
}
