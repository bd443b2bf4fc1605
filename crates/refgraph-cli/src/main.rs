//! Refgraph CLI - Command line interface for asset reference graphs

use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use commands::{completions, config as config_cmd, query, scan};
use config::Config;
use output::OutputFormat;
use refgraph_core::{GraphBuilder, ScanResult};

#[derive(Parser)]
#[command(name = "refgraph")]
#[command(author, version, about = "Dependency graph explorer for project assets")]
pub struct Cli {
    /// Project root to scan
    #[arg(short, long, default_value = ".", global = true, env = "REFGRAPH_ROOT")]
    pub root: PathBuf,

    /// Output format: table, json
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,

    /// Stop scanning after this many milliseconds and use the partial graph
    #[arg(long, global = true)]
    pub time_budget_ms: Option<u64>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn output_format(&self) -> OutputFormat {
        OutputFormat::from(self.format.as_str())
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan the project and report graph statistics
    Scan,
    /// Show an asset and its immediate references
    Show(query::ShowArgs),
    /// List what an asset depends on
    Deps(query::DepthArgs),
    /// List what depends on an asset
    Dependents(query::DepthArgs),
    /// Traverse the graph in a chosen direction
    Traverse(query::TraverseArgs),
    /// Manage configuration
    Config(config_cmd::ConfigArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Application context with loaded configuration
pub struct AppContext {
    pub config: Config,
}

impl AppContext {
    pub fn new() -> Self {
        let config = Config::load();
        tracing::debug!("Loaded config: {:?}", config);
        Self { config }
    }

    /// Scan the configured root, honouring the time budget
    pub fn scan(&self, cli: &Cli) -> anyhow::Result<ScanResult> {
        let builder = GraphBuilder::new(self.config.scan.clone());
        let budget = cli.time_budget_ms.map(Duration::from_millis);
        let started = Instant::now();

        let result = builder.build(&cli.root, || {
            budget.is_some_and(|limit| started.elapsed() >= limit)
        })?;

        if !result.completed {
            tracing::warn!(
                "Scan stopped after {}ms; results are partial",
                result.duration.as_millis()
            );
        }
        Ok(result)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    tracing::debug!("Starting refgraph CLI");

    let ctx = AppContext::new();

    match &cli.command {
        Commands::Scan => scan::run(&cli, &ctx)?,
        Commands::Show(args) => query::run_show(args, &cli, &ctx)?,
        Commands::Deps(args) => query::run_deps(args, &cli, &ctx)?,
        Commands::Dependents(args) => query::run_dependents(args, &cli, &ctx)?,
        Commands::Traverse(args) => query::run_traverse(args, &cli, &ctx)?,
        Commands::Config(args) => config_cmd::run(args)?,
        Commands::Completions(args) => completions::run(args)?,
    }

    Ok(())
}
