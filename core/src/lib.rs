//! neuronet-core: compressed graph store and structural query engine.
//!
//! Ingests a plain-text edge list (`src dst` per line) into an immutable
//! Compressed-Sparse-Row adjacency store and answers degree, max-degree,
//! bounded-depth BFS and induced-subgraph queries over it.
//! No presentation concerns live here; the CLI and benchmark crates consume
//! this library through [`GraphEngine`] or the free functions.

mod degree;
mod engine;
mod error;
mod graph;
mod ingest;
mod traversal;

pub use degree::{degree_of, node_of_max_degree, top_degrees, DegreeResult};
pub use engine::{EngineConfig, GraphEngine, GraphStatus, LoadState, LoadSummary};
pub use error::{GraphError, Result};
pub use graph::{CsrGraph, NodeId, MAX_EDGES, MAX_NODES};
pub use ingest::{parse, parse_reader, EdgeList, IngestOptions};
pub use traversal::{
    bounded_bfs, extract_subgraph, induced_edges, Subgraph, SubgraphEdge, TraversalResult,
    VisitedNode,
};
