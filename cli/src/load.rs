use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use neuronet_core::{GraphEngine, LoadSummary};

use crate::config::Settings;
use crate::output::{write_json, OutputFormat};

/// Path that selects standard input instead of a file.
pub const STDIN_PATH: &str = "-";

/// Build an engine from `settings` and load `path` into it.
pub fn open_engine(path: &Path, settings: &Settings) -> Result<GraphEngine> {
    let mut engine = GraphEngine::with_config(settings.engine_config());
    load_into(&mut engine, path)?;
    Ok(engine)
}

/// Load `path` (or stdin for `-`), replacing whatever `engine` held.
pub fn load_into(engine: &mut GraphEngine, path: &Path) -> Result<LoadSummary> {
    if path == Path::new(STDIN_PATH) {
        let stdin = io::stdin();
        return engine
            .load_from_reader(stdin.lock(), "<stdin>")
            .context("loading edge list from stdin");
    }
    engine
        .load(path)
        .with_context(|| format!("loading edge list {}", path.display()))
}

pub fn write_summary(
    summary: &LoadSummary,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(out, summary),
        OutputFormat::Text => {
            writeln!(
                out,
                "loaded {} nodes, {} edges in {:.1} ms (generation {})",
                summary.node_count, summary.edge_count, summary.load_time_ms, summary.generation
            )?;
            Ok(())
        }
    }
}
