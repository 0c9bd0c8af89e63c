use std::io::Write;

use anyhow::Result;
use neuronet_core::{GraphEngine, NodeId, SubgraphEdge};

use crate::config::Settings;
use crate::output::{join_ids, write_json, OutputFormat};

/// Induced edges among the nodes within `depth` hops of `start`.
pub fn run_edges(
    engine: &GraphEngine,
    settings: &Settings,
    start: NodeId,
    depth: u32,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    let depth = settings.check_depth(depth)?;
    let edges = engine.induced_edges(start, depth)?;
    match format {
        OutputFormat::Json => write_json(out, &edges),
        OutputFormat::Text => write_edges(&edges, out),
    }
}

/// Visited nodes and induced edges from one traversal.
pub fn run_subgraph(
    engine: &GraphEngine,
    settings: &Settings,
    start: NodeId,
    depth: u32,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    let depth = settings.check_depth(depth)?;
    let sub = engine.subgraph(start, depth)?;
    if format == OutputFormat::Json {
        return write_json(out, &sub);
    }

    writeln!(
        out,
        "subgraph from {} (depth {}): {} nodes, {} edges",
        start,
        depth,
        sub.traversal.len(),
        sub.edges.len()
    )?;
    writeln!(out, "nodes: {}", join_ids(sub.traversal.node_ids()))?;
    write_edges(&sub.edges, out)
}

fn write_edges(edges: &[SubgraphEdge], out: &mut dyn Write) -> Result<()> {
    for edge in edges {
        writeln!(out, "{} -> {}", edge.from_id, edge.to_id)?;
    }
    Ok(())
}
