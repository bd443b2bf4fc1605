//! Scan command

use serde::Serialize;

use crate::output::{to_json, OutputFormat};
use crate::{AppContext, Cli};
use refgraph_core::ScanStats;

#[derive(Serialize)]
struct ScanReport<'a> {
    root: String,
    started_at: String,
    duration_ms: u128,
    completed: bool,
    nodes: usize,
    edges: usize,
    stats: &'a ScanStats,
}

pub fn run(cli: &Cli, ctx: &AppContext) -> anyhow::Result<()> {
    let result = ctx.scan(cli)?;

    let report = ScanReport {
        root: cli.root.display().to_string(),
        started_at: result.started_at.to_rfc3339(),
        duration_ms: result.duration.as_millis(),
        completed: result.completed,
        nodes: result.graph.len(),
        edges: result.graph.edge_count(),
        stats: &result.stats,
    };

    if cli.quiet {
        return Ok(());
    }

    match cli.output_format() {
        OutputFormat::Json => println!("{}", to_json(&report)),
        OutputFormat::Table => {
            let status = if report.completed { "complete" } else { "partial" };
            println!("Scanned {} ({}) in {}ms", report.root, status, report.duration_ms);
            println!("  Nodes:               {}", report.nodes);
            println!("  Edges:               {}", report.edges);
            println!("  Metadata files:      {}", report.stats.metadata_files);
            println!("  Reference files:     {}", report.stats.reference_files);
            println!("  Orphaned metadata:   {}", report.stats.orphaned_metadata);
            println!("  Missing identifier:  {}", report.stats.missing_identifier);
            println!("  Non-text files:      {}", report.stats.non_text_files);
            println!("  Unreadable files:    {}", report.stats.unreadable_files);
            if report.stats.walk_errors > 0 {
                println!("  Walk errors:         {}", report.stats.walk_errors);
            }
        }
    }

    Ok(())
}
