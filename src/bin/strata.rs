// src/bin/strata.rs
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use strata_core::config::StrataConfig;
use strata_core::discovery;
use strata_core::export;
use strata_core::graph::{GraphBuilder, GraphOptions, GraphResult};

#[derive(Parser)]
#[command(name = "strata", version, about = "Source dependency graph engine")]
struct Cli {
    /// Project root to analyse
    #[arg(default_value = ".")]
    root: PathBuf,
    /// Output format
    #[arg(long, short, value_enum, default_value_t = Format::Graph)]
    format: Format,
    /// Node cap for the mermaid diagram (overrides `strata.toml`)
    #[arg(long, value_name = "N")]
    max_nodes: Option<usize>,
    /// Debug logging on stderr
    #[arg(long, short)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Full graph result as JSON
    Graph,
    NodeLink,
    Mermaid,
    Dot,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {e:#}", "error:".red().bold());
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = StrataConfig::load(&cli.root)?;
    let files = discovery::discover(&cli.root)
        .with_context(|| format!("failed to scan {}", cli.root.display()))?;

    let options = GraphOptions::from_config(&cli.root, &config);
    let graph = GraphBuilder::new().build(&files, &options);

    let max_nodes = cli.max_nodes.unwrap_or(config.export.diagram_max_nodes);
    let rendered = match cli.format {
        Format::Graph => graph.to_json()?,
        Format::NodeLink => export::to_node_link(&graph)?,
        Format::Mermaid => export::to_mermaid(&graph, max_nodes),
        Format::Dot => export::to_dot(&graph),
    };
    println!("{rendered}");

    print_summary(&graph);
    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn print_summary(graph: &GraphResult) {
    let stats = &graph.statistics;
    let cycles = if stats.cycle_count == 0 {
        "0 cycles".green()
    } else {
        format!("{} cycles", stats.cycle_count).as_str().yellow()
    };
    eprintln!(
        "{} {} files, {} edges, {} clusters, {cycles}",
        "strata:".cyan().bold(),
        stats.node_count,
        stats.edge_count,
        stats.cluster_count,
    );
}
