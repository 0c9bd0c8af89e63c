//! neuronet: command-line front end for the neuronet graph engine.
//!
//! Each query subcommand loads the edge list, answers one question and
//! exits. `shell` keeps a single engine alive so repeated queries reuse the
//! loaded store.
#![forbid(unsafe_code)]

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use neuronet_core::{GraphEngine, NodeId};
use tracing_subscriber::EnvFilter;

mod config;
mod degree;
mod load;
mod neighborhood;
mod output;
mod shell;
mod status;
mod subgraph;

use config::Settings;
use output::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "neuronet",
    version,
    about = "Degree and bounded-traversal queries over large directed graphs",
    disable_help_subcommand = true
)]
struct Cli {
    #[command(flatten)]
    settings: Settings,

    #[arg(
        long,
        global = true,
        value_enum,
        default_value_t = OutputFormat::Text,
        help = "Output format for query results"
    )]
    format: OutputFormat,

    #[arg(short, long, global = true, help = "Log debug detail to stderr")]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load a graph and print its size and memory footprint
    Stats {
        #[arg(value_name = "FILE", help = "Edge list path, or - for stdin")]
        file: PathBuf,
    },
    /// Out-degree of one node
    Degree {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        node: NodeId,
    },
    /// Node with the highest out-degree (lowest id on ties)
    MaxDegree {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Nodes ranked by out-degree
    Top {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        #[arg(short, long, default_value_t = 10, help = "How many nodes to list (0 = all)")]
        n: usize,
    },
    /// Out-neighbors of one node
    Neighbors {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        node: NodeId,
    },
    /// Nodes within DEPTH hops of START, in discovery order
    Bfs {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        start: NodeId,
        depth: u32,
    },
    /// Edges of the subgraph induced by the nodes within DEPTH hops of START
    Edges {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        start: NodeId,
        depth: u32,
    },
    /// Nodes and induced edges within DEPTH hops of START
    Subgraph {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        start: NodeId,
        depth: u32,
    },
    /// Interactive session over one loaded graph
    Shell {
        #[arg(value_name = "FILE", help = "Edge list to load before the first prompt")]
        file: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(cli, &mut out)?;
    out.flush()?;
    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli, out: &mut dyn Write) -> Result<()> {
    let Cli {
        settings,
        format,
        command,
        ..
    } = cli;

    match command {
        Command::Stats { file } => {
            let engine = load::open_engine(&file, &settings)?;
            status::run_stats(&engine, format, out)
        }
        Command::Degree { file, node } => {
            let engine = load::open_engine(&file, &settings)?;
            degree::run_degree(&engine, node, format, out)
        }
        Command::MaxDegree { file } => {
            let engine = load::open_engine(&file, &settings)?;
            degree::run_max_degree(&engine, format, out)
        }
        Command::Top { file, n } => {
            let engine = load::open_engine(&file, &settings)?;
            degree::run_top(&engine, n, format, out)
        }
        Command::Neighbors { file, node } => {
            let engine = load::open_engine(&file, &settings)?;
            neighborhood::run_neighbors(&engine, node, format, out)
        }
        Command::Bfs { file, start, depth } => {
            // Reject a bad depth before paying for the load.
            settings.check_depth(depth)?;
            let engine = load::open_engine(&file, &settings)?;
            neighborhood::run_bfs(&engine, &settings, start, depth, format, out)
        }
        Command::Edges { file, start, depth } => {
            settings.check_depth(depth)?;
            let engine = load::open_engine(&file, &settings)?;
            subgraph::run_edges(&engine, &settings, start, depth, format, out)
        }
        Command::Subgraph { file, start, depth } => {
            settings.check_depth(depth)?;
            let engine = load::open_engine(&file, &settings)?;
            subgraph::run_subgraph(&engine, &settings, start, depth, format, out)
        }
        Command::Shell { file } => {
            let mut engine = GraphEngine::with_config(settings.engine_config());
            if let Some(path) = file {
                let summary = load::load_into(&mut engine, &path)?;
                load::write_summary(&summary, format, out)?;
            }
            let stdin = io::stdin();
            let mut stderr = io::stderr();
            let prompt: &mut dyn Write = &mut stderr;
            shell::run_shell(
                &mut engine,
                &settings,
                format,
                stdin.lock(),
                out,
                Some(prompt),
            )
        }
    }
}
