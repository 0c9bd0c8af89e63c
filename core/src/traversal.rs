use std::collections::hash_map::Entry;
use std::collections::VecDeque;
use std::time::Instant;

use rustc_hash::FxHashMap;
use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::graph::{CsrGraph, NodeId};

/// A node reached by a bounded BFS, with its hop distance from the start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VisitedNode {
    pub node_id: NodeId,
    pub depth: u32,
}

/// A directed edge `from_id -> to_id` of an extracted subgraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SubgraphEdge {
    pub from_id: NodeId,
    pub to_id: NodeId,
}

impl From<SubgraphEdge> for (NodeId, NodeId) {
    fn from(edge: SubgraphEdge) -> Self {
        (edge.from_id, edge.to_id)
    }
}

/// Result of a bounded BFS: visited nodes in discovery order.
///
/// An owned value, never a view into the graph: it stays intact after the
/// engine loads a different dataset. `generation` records which load it was
/// computed against (0 when produced outside a `GraphEngine`).
#[derive(Debug, Clone, Serialize)]
pub struct TraversalResult {
    pub start: NodeId,
    pub max_depth: u32,
    pub generation: u64,
    pub nodes: Vec<VisitedNode>,
    #[serde(skip)]
    depths: FxHashMap<NodeId, u32>,
}

impl TraversalResult {
    /// Discovery depth of `node`, if it was visited.
    pub fn depth_of(&self, node: NodeId) -> Option<u32> {
        self.depths.get(&node).copied()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.depths.contains_key(&node)
    }

    /// Visited node ids in discovery order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().map(|n| n.node_id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl PartialEq for TraversalResult {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start
            && self.max_depth == other.max_depth
            && self.generation == other.generation
            && self.nodes == other.nodes
    }
}

impl Eq for TraversalResult {}

/// Visited nodes plus the induced edges among them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subgraph {
    #[serde(flatten)]
    pub traversal: TraversalResult,
    pub edges: Vec<SubgraphEdge>,
}

/// Layered BFS from `start`, expanding nodes whose depth is below `max_depth`.
///
/// Each node is visited once, at its minimum hop distance. Neighbors are
/// scanned in stored order, so discovery order and depths are deterministic
/// for a given graph. `max_depth == 0` yields only the start node.
pub fn bounded_bfs(graph: &CsrGraph, start: NodeId, max_depth: u32) -> Result<TraversalResult> {
    graph.check_node(start)?;
    let t = Instant::now();

    let mut depths: FxHashMap<NodeId, u32> = FxHashMap::default();
    let mut nodes = vec![VisitedNode {
        node_id: start,
        depth: 0,
    }];
    let mut queue: VecDeque<(NodeId, u32)> = VecDeque::new();

    depths.insert(start, 0);
    queue.push_back((start, 0));

    while let Some((current, depth)) = queue.pop_front() {
        if depth >= max_depth {
            continue;
        }

        for &next in graph.adjacency(current) {
            if let Entry::Vacant(slot) = depths.entry(next) {
                slot.insert(depth + 1);
                nodes.push(VisitedNode {
                    node_id: next,
                    depth: depth + 1,
                });
                queue.push_back((next, depth + 1));
            }
        }
    }

    debug!(
        start,
        max_depth,
        visited = nodes.len(),
        elapsed_us = t.elapsed().as_micros() as u64,
        "bounded bfs"
    );

    Ok(TraversalResult {
        start,
        max_depth,
        generation: 0,
        nodes,
        depths,
    })
}

/// Every edge of `graph` whose endpoints both lie in `traversal`'s node set.
///
/// Second pass over the visited nodes' adjacency slices. Edges come out
/// grouped by source in discovery order, and in stored order within a source.
/// Cross-links and self-loops among visited nodes are included, not only the
/// edges that discovered a node.
///
/// Fails with `NodeOutOfRange` when `traversal` names a node `graph` does not
/// have, e.g. a result taken from a larger graph before a reload.
pub fn induced_edges(graph: &CsrGraph, traversal: &TraversalResult) -> Result<Vec<SubgraphEdge>> {
    let mut edges = Vec::new();
    for from in traversal.node_ids() {
        graph.check_node(from)?;
        for &to in graph.adjacency(from) {
            if traversal.contains(to) {
                edges.push(SubgraphEdge {
                    from_id: from,
                    to_id: to,
                });
            }
        }
    }
    Ok(edges)
}

/// Bounded BFS from `start` followed by induced-edge extraction.
pub fn extract_subgraph(graph: &CsrGraph, start: NodeId, max_depth: u32) -> Result<Subgraph> {
    let traversal = bounded_bfs(graph, start, max_depth)?;
    let edges = induced_edges(graph, &traversal)?;
    Ok(Subgraph { traversal, edges })
}
