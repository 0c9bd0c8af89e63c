use std::io::Write;

use anyhow::Result;
use neuronet_core::{GraphEngine, NodeId};
use serde::Serialize;

use crate::config::Settings;
use crate::output::{join_ids, write_json, OutputFormat};

#[derive(Serialize)]
struct NeighborList<'a> {
    node_id: NodeId,
    neighbors: &'a [NodeId],
}

pub fn run_neighbors(
    engine: &GraphEngine,
    node: NodeId,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    let neighbors = engine.neighbors(node)?;
    match format {
        OutputFormat::Json => write_json(
            out,
            &NeighborList {
                node_id: node,
                neighbors,
            },
        ),
        OutputFormat::Text => {
            writeln!(
                out,
                "node {} ({} out-neighbors): {}",
                node,
                neighbors.len(),
                join_ids(neighbors)
            )?;
            Ok(())
        }
    }
}

/// Bounded BFS from `start`; `depth` must pass the configured depth range.
pub fn run_bfs(
    engine: &GraphEngine,
    settings: &Settings,
    start: NodeId,
    depth: u32,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    let depth = settings.check_depth(depth)?;
    let result = engine.bounded_bfs(start, depth)?;
    if format == OutputFormat::Json {
        return write_json(out, &result);
    }

    writeln!(
        out,
        "bfs from {} (depth {}): {} nodes",
        start,
        depth,
        result.len()
    )?;
    writeln!(out, "{:>10} {:>6}", "node", "depth")?;
    writeln!(out, "{:->10} {:->6}", "", "")?;
    for visited in &result.nodes {
        writeln!(out, "{:>10} {:>6}", visited.node_id, visited.depth)?;
    }
    Ok(())
}
