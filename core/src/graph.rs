use std::mem::size_of;

use crate::error::{GraphError, Result};

/// Dense node identifier in `[0, node_count)`.
pub type NodeId = u32;

/// Largest node count a `NodeId` can address (ids `0..=NodeId::MAX - 1`).
pub const MAX_NODES: usize = NodeId::MAX as usize;

/// Largest edge count whose column array stays within `isize::MAX` bytes.
pub const MAX_EDGES: usize = isize::MAX as usize / size_of::<NodeId>();

/// Immutable Compressed-Sparse-Row adjacency store.
///
/// `row_offsets` has `node_count + 1` entries; the out-neighbors of `v` are
/// `col_indices[row_offsets[v]..row_offsets[v + 1]]`, in the order the edges
/// were supplied to [`CsrGraph::build`]. Parallel edges and self-loops are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsrGraph {
    row_offsets: Vec<usize>,
    col_indices: Vec<NodeId>,
}

impl CsrGraph {
    /// Graph with no nodes and no edges.
    pub fn empty() -> Self {
        Self {
            row_offsets: vec![0],
            col_indices: Vec::new(),
        }
    }

    /// Two-pass counting construction, O(n + m).
    ///
    /// Pass one counts out-degrees into `row_offsets[u + 1]` and prefix-sums
    /// them. Pass two walks the edge list once more in its original order and
    /// drops each destination into the next free slot of its source's row, so
    /// every edge lands in a distinct slot and per-row order is load order.
    ///
    /// Fails with `Capacity` when `node_count` or the edge count exceed the
    /// addressable range or the backing arrays cannot be allocated, and with
    /// `NodeOutOfRange` when an endpoint is not below `node_count`.
    pub fn build(edges: &[(NodeId, NodeId)], node_count: usize) -> Result<Self> {
        if node_count > MAX_NODES {
            return Err(GraphError::capacity(
                "node count",
                node_count as u64,
                Some(MAX_NODES as u64),
            ));
        }
        if edges.len() > MAX_EDGES {
            return Err(GraphError::capacity(
                "edge count",
                edges.len() as u64,
                Some(MAX_EDGES as u64),
            ));
        }

        let mut row_offsets = try_filled(node_count + 1, 0usize, "row offset entries")?;
        for &(from, to) in edges {
            for endpoint in [from, to] {
                if endpoint as usize >= node_count {
                    return Err(GraphError::NodeOutOfRange {
                        node: endpoint,
                        node_count,
                    });
                }
            }
            row_offsets[from as usize + 1] += 1;
        }

        for i in 1..row_offsets.len() {
            row_offsets[i] += row_offsets[i - 1];
        }

        let mut cursor = try_filled(node_count, 0usize, "placement cursors")?;
        cursor.copy_from_slice(&row_offsets[..node_count]);
        let mut col_indices = try_filled(edges.len(), 0 as NodeId, "column index entries")?;
        for &(from, to) in edges {
            let slot = &mut cursor[from as usize];
            col_indices[*slot] = to;
            *slot += 1;
        }

        debug_assert_eq!(row_offsets[node_count], edges.len());
        Ok(Self {
            row_offsets,
            col_indices,
        })
    }

    /// Bytes the CSR arrays would occupy for a graph of this shape.
    pub fn estimated_bytes(node_count: usize, edge_count: usize) -> u64 {
        (node_count as u64 + 1) * size_of::<usize>() as u64
            + edge_count as u64 * size_of::<NodeId>() as u64
    }

    pub fn node_count(&self) -> usize {
        self.row_offsets.len() - 1
    }

    pub fn edge_count(&self) -> usize {
        self.col_indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_count() == 0
    }

    pub fn contains(&self, node: NodeId) -> bool {
        (node as usize) < self.node_count()
    }

    /// Validate `node` against `[0, node_count)`.
    pub fn check_node(&self, node: NodeId) -> Result<()> {
        if self.contains(node) {
            Ok(())
        } else {
            Err(GraphError::NodeOutOfRange {
                node,
                node_count: self.node_count(),
            })
        }
    }

    /// Out-neighbors of `node` in stored order.
    pub fn neighbors(&self, node: NodeId) -> Result<&[NodeId]> {
        self.check_node(node)?;
        Ok(self.adjacency(node))
    }

    /// Out-neighbors without a range check. Callers must have validated `node`.
    pub(crate) fn adjacency(&self, node: NodeId) -> &[NodeId] {
        let v = node as usize;
        &self.col_indices[self.row_offsets[v]..self.row_offsets[v + 1]]
    }

    /// Out-degree without a range check.
    pub(crate) fn out_degree_unchecked(&self, node: usize) -> usize {
        self.row_offsets[node + 1] - self.row_offsets[node]
    }

    pub fn row_offsets(&self) -> &[usize] {
        &self.row_offsets
    }

    pub fn col_indices(&self) -> &[NodeId] {
        &self.col_indices
    }

    /// Every edge as `(from, to)`, grouped by source in ascending id order.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.row_offsets
            .windows(2)
            .enumerate()
            .flat_map(move |(from, bounds)| {
                self.col_indices[bounds[0]..bounds[1]]
                    .iter()
                    .map(move |&to| (from as NodeId, to))
            })
    }

    /// Bytes held by the CSR arrays.
    pub fn memory_usage(&self) -> usize {
        self.row_offsets.capacity() * size_of::<usize>()
            + self.col_indices.capacity() * size_of::<NodeId>()
    }
}

impl Default for CsrGraph {
    fn default() -> Self {
        Self::empty()
    }
}

/// `vec![value; len]` that reports allocation failure as a capacity error.
fn try_filled<T: Clone>(len: usize, value: T, what: &'static str) -> Result<Vec<T>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| GraphError::capacity(what, len as u64, None))?;
    buf.resize(len, value);
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_offsets_and_columns() {
        let g = CsrGraph::build(&[(0, 1), (1, 2), (2, 3), (0, 3), (3, 3)], 4).unwrap();
        assert_eq!(g.row_offsets(), &[0, 2, 3, 4, 5]);
        assert_eq!(g.col_indices(), &[1, 3, 2, 3, 3]);
        assert_eq!(g.node_count(), 4);
        assert_eq!(g.edge_count(), 5);
    }

    #[test]
    fn test_build_preserves_load_order_within_row() {
        let g = CsrGraph::build(&[(0, 3), (1, 0), (0, 1), (0, 2), (0, 1)], 4).unwrap();
        assert_eq!(g.neighbors(0).unwrap(), &[3, 1, 2, 1]);
        assert_eq!(g.neighbors(1).unwrap(), &[0]);
    }

    #[test]
    fn test_build_keeps_parallel_edges_and_self_loops() {
        let g = CsrGraph::build(&[(2, 2), (2, 2), (1, 2)], 3).unwrap();
        assert_eq!(g.edge_count(), 3);
        assert_eq!(g.neighbors(2).unwrap(), &[2, 2]);
    }

    #[test]
    fn test_build_empty() {
        let g = CsrGraph::build(&[], 0).unwrap();
        assert!(g.is_empty());
        assert_eq!(g.row_offsets(), &[0]);
        assert_eq!(g, CsrGraph::empty());
    }

    #[test]
    fn test_build_isolated_nodes() {
        let g = CsrGraph::build(&[(4, 0)], 5).unwrap();
        assert_eq!(g.row_offsets(), &[0, 0, 0, 0, 0, 1]);
        assert!(g.neighbors(2).unwrap().is_empty());
    }

    #[test]
    fn test_build_rejects_endpoint_out_of_range() {
        let err = CsrGraph::build(&[(0, 5)], 3).unwrap_err();
        assert!(matches!(
            err,
            GraphError::NodeOutOfRange { node: 5, node_count: 3 }
        ));
    }

    #[test]
    fn test_build_rejects_too_many_nodes() {
        let err = CsrGraph::build(&[], MAX_NODES + 1).unwrap_err();
        assert!(matches!(err, GraphError::Capacity { what: "node count", .. }));
    }

    #[test]
    fn test_neighbors_out_of_range() {
        let g = CsrGraph::build(&[(0, 1)], 2).unwrap();
        assert!(matches!(
            g.neighbors(2),
            Err(GraphError::NodeOutOfRange { node: 2, node_count: 2 })
        ));
    }

    #[test]
    fn test_edges_iterates_by_source() {
        let g = CsrGraph::build(&[(2, 0), (0, 1), (2, 1), (1, 1)], 3).unwrap();
        let edges: Vec<_> = g.edges().collect();
        assert_eq!(edges, vec![(0, 1), (1, 1), (2, 0), (2, 1)]);
    }

    #[test]
    fn test_build_is_deterministic() {
        let edges = [(3, 1), (0, 2), (3, 0), (1, 1), (0, 3)];
        assert_eq!(
            CsrGraph::build(&edges, 4).unwrap(),
            CsrGraph::build(&edges, 4).unwrap()
        );
    }

    #[test]
    fn test_memory_usage_nonzero() {
        let g = CsrGraph::build(&[(0, 1), (1, 0)], 2).unwrap();
        assert!(g.memory_usage() >= CsrGraph::estimated_bytes(2, 2) as usize);
    }
}
