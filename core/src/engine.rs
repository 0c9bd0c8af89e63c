//! Query facade: owns at most one loaded graph and routes queries to it.
//!
//! `load` takes `&mut self` and every query takes `&self`, so the borrow
//! checker enforces the load/query phase split: a query can never observe a
//! store mid-construction. Share an engine across threads behind an
//! `RwLock` (loads take the write lock, queries the read lock).

use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::Serialize;
use tracing::{info, warn};

use crate::degree::{self, DegreeResult};
use crate::error::{GraphError, Result};
use crate::graph::{CsrGraph, NodeId};
use crate::ingest::{self, EdgeList, IngestOptions};
use crate::traversal::{self, Subgraph, SubgraphEdge, TraversalResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineConfig {
    /// Reject loads whose CSR arrays would exceed this many MiB.
    pub max_memory_mb: Option<usize>,
    pub ingest: IngestOptions,
}

/// Counts reported by a successful load.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LoadSummary {
    pub node_count: usize,
    pub edge_count: usize,
    pub load_time_ms: f64,
    pub generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadState {
    NotLoaded,
    Loaded,
}

/// Snapshot of the engine's current graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStatus {
    pub status: LoadState,
    pub source: Option<String>,
    pub node_count: usize,
    pub edge_count: usize,
    pub memory_bytes: usize,
    pub load_time_ms: f64,
    pub generation: u64,
}

struct LoadedGraph {
    graph: CsrGraph,
    source: PathBuf,
    load_time_ms: f64,
    generation: u64,
}

/// Holds the current graph (or none) and answers degree and traversal queries.
#[derive(Default)]
pub struct GraphEngine {
    config: EngineConfig,
    state: Option<LoadedGraph>,
    /// Bumped on every successful load; 0 until the first one.
    generation: u64,
}

impl GraphEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Parse the edge list at `path` and replace the current graph with it.
    ///
    /// The new store is built completely before it is swapped in. On any
    /// failure the previously loaded graph (or "no graph") is left untouched.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<LoadSummary> {
        let path = path.as_ref();
        let start = Instant::now();
        let parsed = ingest::parse(path, self.config.ingest);
        self.finish_load(parsed, path, start)
    }

    /// Same as [`GraphEngine::load`] but reads from an already-open source.
    pub fn load_from_reader<R: BufRead>(
        &mut self,
        reader: R,
        source: impl AsRef<Path>,
    ) -> Result<LoadSummary> {
        let source = source.as_ref();
        let start = Instant::now();
        let parsed = ingest::parse_reader(reader, source, self.config.ingest);
        self.finish_load(parsed, source, start)
    }

    fn finish_load(
        &mut self,
        parsed: Result<EdgeList>,
        source: &Path,
        start: Instant,
    ) -> Result<LoadSummary> {
        let graph = parsed.and_then(|list| self.build_store(&list));
        let graph = match graph {
            Ok(graph) => graph,
            Err(e) => {
                warn!(
                    source = %source.display(),
                    error = %e,
                    "load rejected, keeping previous graph"
                );
                return Err(e);
            }
        };

        let load_time_ms = start.elapsed().as_secs_f64() * 1000.0;
        self.generation += 1;
        let summary = LoadSummary {
            node_count: graph.node_count(),
            edge_count: graph.edge_count(),
            load_time_ms,
            generation: self.generation,
        };

        info!(
            source = %source.display(),
            nodes = summary.node_count,
            edges = summary.edge_count,
            memory_bytes = graph.memory_usage(),
            load_time_ms,
            generation = self.generation,
            "graph loaded"
        );

        self.state = Some(LoadedGraph {
            graph,
            source: source.to_path_buf(),
            load_time_ms,
            generation: self.generation,
        });
        Ok(summary)
    }

    fn build_store(&self, list: &EdgeList) -> Result<CsrGraph> {
        if let Some(max_mb) = self.config.max_memory_mb {
            let needed = CsrGraph::estimated_bytes(list.node_count, list.edge_count());
            let needed_mb = needed.div_ceil(1024 * 1024);
            if needed_mb > max_mb as u64 {
                return Err(GraphError::capacity(
                    "estimated memory (MB)",
                    needed_mb,
                    Some(max_mb as u64),
                ));
            }
        }
        CsrGraph::build(&list.edges, list.node_count)
    }

    fn loaded(&self) -> Result<&LoadedGraph> {
        self.state.as_ref().ok_or(GraphError::NoGraphLoaded)
    }

    /// The current store, for callers that need direct CSR access.
    pub fn graph(&self) -> Result<&CsrGraph> {
        self.loaded().map(|lg| &lg.graph)
    }

    pub fn is_loaded(&self) -> bool {
        self.state.is_some()
    }

    /// Generation of the current graph; 0 before the first successful load.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True if `result` was computed against the graph currently loaded.
    pub fn is_current(&self, result: &TraversalResult) -> bool {
        self.state
            .as_ref()
            .is_some_and(|lg| lg.generation == result.generation)
    }

    pub fn node_count(&self) -> Result<usize> {
        self.graph().map(CsrGraph::node_count)
    }

    pub fn edge_count(&self) -> Result<usize> {
        self.graph().map(CsrGraph::edge_count)
    }

    pub fn degree_of(&self, node: NodeId) -> Result<usize> {
        degree::degree_of(self.graph()?, node)
    }

    pub fn node_of_max_degree(&self) -> Result<NodeId> {
        degree::node_of_max_degree(self.graph()?)
    }

    pub fn top_degrees(&self, top_n: usize) -> Result<Vec<DegreeResult>> {
        Ok(degree::top_degrees(self.graph()?, top_n))
    }

    pub fn neighbors(&self, node: NodeId) -> Result<&[NodeId]> {
        self.graph()?.neighbors(node)
    }

    pub fn bounded_bfs(&self, start: NodeId, max_depth: u32) -> Result<TraversalResult> {
        let lg = self.loaded()?;
        let mut result = traversal::bounded_bfs(&lg.graph, start, max_depth)?;
        result.generation = lg.generation;
        Ok(result)
    }

    pub fn induced_edges(&self, start: NodeId, max_depth: u32) -> Result<Vec<SubgraphEdge>> {
        Ok(self.subgraph(start, max_depth)?.edges)
    }

    /// Visited nodes and induced edges from a single traversal.
    pub fn subgraph(&self, start: NodeId, max_depth: u32) -> Result<Subgraph> {
        let lg = self.loaded()?;
        let mut sub = traversal::extract_subgraph(&lg.graph, start, max_depth)?;
        sub.traversal.generation = lg.generation;
        Ok(sub)
    }

    pub fn status(&self) -> GraphStatus {
        match &self.state {
            Some(lg) => GraphStatus {
                status: LoadState::Loaded,
                source: Some(lg.source.display().to_string()),
                node_count: lg.graph.node_count(),
                edge_count: lg.graph.edge_count(),
                memory_bytes: lg.graph.memory_usage(),
                load_time_ms: lg.load_time_ms,
                generation: lg.generation,
            },
            None => GraphStatus {
                status: LoadState::NotLoaded,
                source: None,
                node_count: 0,
                edge_count: 0,
                memory_bytes: 0,
                load_time_ms: 0.0,
                generation: self.generation,
            },
        }
    }
}
