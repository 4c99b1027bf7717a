//! CLI entry point for the breachpath analysis engine.
//!
//! Designed for subprocess invocation from a front end: graph
//! snapshots come from JSON files, analysis requests from stdin, and
//! results go to stdout as JSON.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use breachpath_core::config::{clamp_k, clamp_node_penalty};
use breachpath_core::{EngineConfig, GraphSnapshot};
use breachpath_engine::types::AnalysisRequest;
use breachpath_engine::AnalysisEngine;

#[derive(Parser)]
#[command(name = "breachpath")]
#[command(about = "K-shortest attack path analysis over graph snapshots")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Config file prefix (default: breachpath).
    #[arg(short, long, default_value = "breachpath", global = true)]
    config: String,
}

#[derive(Subcommand)]
enum Command {
    /// Rank attack routes (reads a JSON request from stdin).
    Analyze {
        /// Graph snapshot JSON file.
        #[arg(long)]
        graph: PathBuf,
    },
    /// Compute the single cheapest route between two nodes.
    Shortest {
        /// Graph snapshot JSON file.
        #[arg(long)]
        graph: PathBuf,
        /// Start node id.
        #[arg(long)]
        start: String,
        /// Goal node id.
        #[arg(long)]
        goal: String,
        /// Node penalty coefficient, clamped into [0, 2].
        #[arg(long)]
        node_penalty: Option<f64>,
    },
    /// Normalize a snapshot and re-emit it as JSON.
    Export {
        /// Graph snapshot JSON file.
        #[arg(long)]
        graph: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let cli = Cli::parse();

    let config = EngineConfig::load(&cli.config);
    let engine = AnalysisEngine::with_config(config.clone());

    match cli.command {
        Command::Analyze { ref graph } => {
            let snapshot = GraphSnapshot::load(graph)?;
            let input = std::io::read_to_string(std::io::stdin())?;
            let mut request: AnalysisRequest = serde_json::from_str(&input)?;

            // Caller-side clamping: the engine contract only demands
            // non-negative penalties, the CLI keeps user input sane.
            request.node_penalty = Some(clamp_node_penalty(
                request.node_penalty.unwrap_or(config.default_node_penalty),
            ));
            request.k = Some(clamp_k(request.k.unwrap_or(config.default_k)));

            let result = engine.analyze(&snapshot, &request)?;
            println!("{}", serde_json::to_string(&result)?);
        }
        Command::Shortest {
            ref graph,
            ref start,
            ref goal,
            node_penalty,
        } => {
            let snapshot = GraphSnapshot::load(graph)?;
            let penalty =
                clamp_node_penalty(node_penalty.unwrap_or(config.default_node_penalty));
            let result = engine.shortest(&snapshot, start, goal, penalty)?;
            println!("{}", serde_json::to_string(&result)?);
        }
        Command::Export { ref graph } => {
            let mut snapshot = GraphSnapshot::load(graph)?;
            let stats = snapshot.normalize();
            tracing::debug!(
                dropped_nodes = stats.dropped_nodes,
                dropped_edges = stats.dropped_edges,
                "snapshot normalized for export"
            );
            println!("{}", snapshot.to_json_string()?);
        }
    }

    Ok(())
}
