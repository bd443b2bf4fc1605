//! Graph query commands

use std::path::Path;

use clap::{Args, ValueEnum};
use serde::Serialize;

use crate::output::{render_tree, step_views, to_json, OutputFormat};
use crate::{AppContext, Cli};
use refgraph_core::limits::validate_traversal_depth;
use refgraph_core::{AssetId, Direction, ScanResult, TraversalEngine, TraversalSummary};

#[derive(Args)]
pub struct ShowArgs {
    /// Asset identifier or path relative to the root
    pub asset: String,
}

#[derive(Args)]
pub struct DepthArgs {
    /// Asset identifier or path relative to the root
    pub asset: String,
    /// Maximum depth (defaults to the configured depth)
    #[arg(short, long)]
    pub depth: Option<u32>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum DirectionArg {
    Outgoing,
    Incoming,
}

impl From<DirectionArg> for Direction {
    fn from(d: DirectionArg) -> Self {
        match d {
            DirectionArg::Outgoing => Direction::Outgoing,
            DirectionArg::Incoming => Direction::Incoming,
        }
    }
}

#[derive(Args)]
pub struct TraverseArgs {
    /// Asset identifier or path relative to the root
    pub asset: String,
    /// Direction: outgoing (dependencies) or incoming (dependents)
    #[arg(long, value_enum, default_value = "outgoing")]
    pub direction: DirectionArg,
    /// Maximum depth (defaults to the configured depth)
    #[arg(short, long)]
    pub depth: Option<u32>,
}

/// Resolve a user-supplied asset to an identifier present in the graph
fn resolve_asset(asset: &str, cli: &Cli, result: &ScanResult) -> anyhow::Result<AssetId> {
    let id = result.resolve(asset).or_else(|| {
        Path::new(asset)
            .strip_prefix(&cli.root)
            .ok()
            .and_then(|rel| result.index.id_for_path(rel).cloned())
    });

    match id {
        Some(id) if result.graph.contains(&id) => Ok(id),
        _ => anyhow::bail!(
            "Asset '{}' not found under {}",
            asset,
            cli.root.display()
        ),
    }
}

#[derive(Serialize)]
struct ShowView {
    id: AssetId,
    path: Option<String>,
    outgoing: Vec<NeighborView>,
    incoming: Vec<NeighborView>,
}

#[derive(Serialize)]
struct NeighborView {
    id: AssetId,
    path: Option<String>,
}

pub fn run_show(args: &ShowArgs, cli: &Cli, ctx: &AppContext) -> anyhow::Result<()> {
    let result = ctx.scan(cli)?;
    let id = resolve_asset(&args.asset, cli, &result)?;
    let Some(node) = result.graph.lookup(&id) else {
        anyhow::bail!("Asset '{}' not found", args.asset);
    };

    let path_of = |id: &AssetId| {
        result
            .index
            .path_for_id(id)
            .map(|p| p.display().to_string())
    };
    let neighbors = |ids: &[AssetId]| {
        ids.iter()
            .map(|id| NeighborView {
                id: id.clone(),
                path: path_of(id),
            })
            .collect::<Vec<_>>()
    };

    let view = ShowView {
        id: id.clone(),
        path: path_of(&id),
        outgoing: neighbors(&node.outgoing),
        incoming: neighbors(&node.incoming),
    };

    match cli.output_format() {
        OutputFormat::Json => println!("{}", to_json(&view)),
        OutputFormat::Table => {
            println!("{}", result.index.label(&id));
            println!("  id: {}", id);
            println!("  Depends on ({}):", view.outgoing.len());
            for n in &view.outgoing {
                println!("    {}", result.index.label(&n.id));
            }
            println!("  Depended on by ({}):", view.incoming.len());
            for n in &view.incoming {
                println!("    {}", result.index.label(&n.id));
            }
        }
    }

    Ok(())
}

pub fn run_deps(args: &DepthArgs, cli: &Cli, ctx: &AppContext) -> anyhow::Result<()> {
    run_traversal(&args.asset, Direction::Outgoing, args.depth, cli, ctx)
}

pub fn run_dependents(args: &DepthArgs, cli: &Cli, ctx: &AppContext) -> anyhow::Result<()> {
    run_traversal(&args.asset, Direction::Incoming, args.depth, cli, ctx)
}

pub fn run_traverse(args: &TraverseArgs, cli: &Cli, ctx: &AppContext) -> anyhow::Result<()> {
    run_traversal(&args.asset, args.direction.into(), args.depth, cli, ctx)
}

#[derive(Serialize)]
struct TraversalView<'a> {
    start: AssetId,
    direction: Direction,
    max_depth: u32,
    complete_scan: bool,
    summary: TraversalSummary,
    steps: Vec<crate::output::StepView<'a>>,
}

fn run_traversal(
    asset: &str,
    direction: Direction,
    depth: Option<u32>,
    cli: &Cli,
    ctx: &AppContext,
) -> anyhow::Result<()> {
    let max_depth = depth.unwrap_or(ctx.config.default_depth);
    validate_traversal_depth(max_depth)?;

    let result = ctx.scan(cli)?;
    let start = resolve_asset(asset, cli, &result)?;

    tracing::info!(
        "Traversing from {} (depth: {}, direction: {})",
        start,
        max_depth,
        direction
    );
    let steps = TraversalEngine::traverse_from(&result.graph, &start, direction, max_depth)?;
    let summary = TraversalSummary::from_steps(&steps);

    match cli.output_format() {
        OutputFormat::Json => {
            let view = TraversalView {
                start: start.clone(),
                direction,
                max_depth,
                complete_scan: result.completed,
                summary,
                steps: step_views(&steps, &result.index),
            };
            println!("{}", to_json(&view));
        }
        OutputFormat::Table => {
            let heading = match direction {
                Direction::Outgoing => "depends on",
                Direction::Incoming => "is depended on by",
            };
            println!(
                "{} {} (depth: {}):",
                result.index.label(&start),
                heading,
                max_depth
            );
            if steps.is_empty() {
                println!("  (nothing)");
            } else {
                print!("{}", render_tree(&steps, &result.index));
                println!(
                    "  {} entries, {} unique assets, {} depth limits",
                    summary.node_entries, summary.unique_nodes, summary.depth_limits
                );
            }
            if !result.completed {
                println!("  (partial scan)");
            }
        }
    }

    Ok(())
}
