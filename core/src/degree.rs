use serde::Serialize;

use crate::error::{GraphError, Result};
use crate::graph::{CsrGraph, NodeId};

/// Out-degree of a single node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DegreeResult {
    pub node_id: NodeId,
    pub out_degree: usize,
}

/// Out-degree of `node`, read from the row offsets in O(1).
pub fn degree_of(graph: &CsrGraph, node: NodeId) -> Result<usize> {
    graph.check_node(node)?;
    Ok(graph.out_degree_unchecked(node as usize))
}

/// Node with the highest out-degree; ties go to the lowest id.
///
/// Single O(n) scan over adjacent offset pairs.
pub fn node_of_max_degree(graph: &CsrGraph) -> Result<NodeId> {
    let mut best: Option<(usize, usize)> = None;
    for (node, bounds) in graph.row_offsets().windows(2).enumerate() {
        let degree = bounds[1] - bounds[0];
        if best.map_or(true, |(_, top)| degree > top) {
            best = Some((node, degree));
        }
    }
    best.map(|(node, _)| node as NodeId)
        .ok_or(GraphError::EmptyGraph)
}

/// Nodes ranked by out-degree (descending), ties by node id (ascending).
///
/// `top_n == 0` returns every node.
pub fn top_degrees(graph: &CsrGraph, top_n: usize) -> Vec<DegreeResult> {
    let mut results: Vec<DegreeResult> = (0..graph.node_count())
        .map(|node| DegreeResult {
            node_id: node as NodeId,
            out_degree: graph.out_degree_unchecked(node),
        })
        .collect();

    results.sort_by(|a, b| {
        b.out_degree
            .cmp(&a.out_degree)
            .then(a.node_id.cmp(&b.node_id))
    });

    if top_n > 0 && top_n < results.len() {
        results.truncate(top_n);
    }

    results
}
