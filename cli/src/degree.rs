use std::io::Write;

use anyhow::Result;
use neuronet_core::{DegreeResult, GraphEngine, NodeId};

use crate::output::{write_json, OutputFormat};

pub fn run_degree(
    engine: &GraphEngine,
    node: NodeId,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    let result = DegreeResult {
        node_id: node,
        out_degree: engine.degree_of(node)?,
    };
    match format {
        OutputFormat::Json => write_json(out, &result),
        OutputFormat::Text => {
            writeln!(out, "node {}: out-degree {}", node, result.out_degree)?;
            Ok(())
        }
    }
}

pub fn run_max_degree(
    engine: &GraphEngine,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    let node = engine.node_of_max_degree()?;
    let result = DegreeResult {
        node_id: node,
        out_degree: engine.degree_of(node)?,
    };
    match format {
        OutputFormat::Json => write_json(out, &result),
        OutputFormat::Text => {
            writeln!(
                out,
                "node {} has the highest out-degree ({})",
                node, result.out_degree
            )?;
            Ok(())
        }
    }
}

pub fn run_top(
    engine: &GraphEngine,
    top_n: usize,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    let results = engine.top_degrees(top_n)?;
    if format == OutputFormat::Json {
        return write_json(out, &results);
    }

    writeln!(out, "{:>10} {:>12}", "node", "out_degree")?;
    writeln!(out, "{:->10} {:->12}", "", "")?;
    for dr in results {
        writeln!(out, "{:>10} {:>12}", dr.node_id, dr.out_degree)?;
    }
    Ok(())
}
