use std::io::Write;

use anyhow::Result;
use neuronet_core::{GraphEngine, LoadState};

use crate::output::{write_json, OutputFormat};

pub fn run_stats(engine: &GraphEngine, format: OutputFormat, out: &mut dyn Write) -> Result<()> {
    let status = engine.status();
    if format == OutputFormat::Json {
        return write_json(out, &status);
    }

    if status.status == LoadState::NotLoaded {
        writeln!(out, "status:      not_loaded")?;
        return Ok(());
    }
    writeln!(out, "status:      loaded")?;
    writeln!(out, "source:      {}", status.source.as_deref().unwrap_or("-"))?;
    writeln!(out, "nodes:       {}", status.node_count)?;
    writeln!(out, "edges:       {}", status.edge_count)?;
    writeln!(
        out,
        "memory:      {:.2} MB ({} bytes)",
        status.memory_bytes as f64 / 1_048_576.0,
        status.memory_bytes
    )?;
    writeln!(out, "load time:   {:.1} ms", status.load_time_ms)?;
    writeln!(out, "generation:  {}", status.generation)?;
    Ok(())
}
