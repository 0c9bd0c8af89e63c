use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::graph::NodeId;

/// Errors raised while loading or querying a graph.
#[derive(Debug, Error)]
pub enum GraphError {
    /// The input path is missing or could not be read.
    #[error("cannot read '{}': {source}", .path.display())]
    ResourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A line of the input is not two whitespace-separated non-negative integers.
    #[error("{}:{line}: {reason} (line: {content:?})", .path.display())]
    MalformedInput {
        path: PathBuf,
        line: usize,
        content: String,
        reason: String,
    },

    /// The graph does not fit the addressable index range or the configured memory cap.
    #[error("capacity exceeded: {what} requires {requested}{}", limit_suffix(.limit))]
    Capacity {
        what: &'static str,
        requested: u64,
        limit: Option<u64>,
    },

    #[error("node {node} out of range (graph has {node_count} nodes)")]
    NodeOutOfRange { node: NodeId, node_count: usize },

    #[error("graph is empty")]
    EmptyGraph,

    #[error("no graph loaded")]
    NoGraphLoaded,
}

pub type Result<T> = std::result::Result<T, GraphError>;

fn limit_suffix(limit: &Option<u64>) -> String {
    match limit {
        Some(max) => format!(", limit is {max}"),
        None => String::new(),
    }
}

impl GraphError {
    pub(crate) fn unavailable(path: impl AsRef<Path>, source: io::Error) -> Self {
        GraphError::ResourceUnavailable {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub(crate) fn malformed(
        path: impl AsRef<Path>,
        line: usize,
        content: &str,
        reason: impl Into<String>,
    ) -> Self {
        GraphError::MalformedInput {
            path: path.as_ref().to_path_buf(),
            line,
            content: content.trim_end_matches(['\r', '\n']).to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn capacity(what: &'static str, requested: u64, limit: Option<u64>) -> Self {
        GraphError::Capacity {
            what,
            requested,
            limit,
        }
    }

    /// True for errors caused by a bad query argument or call order.
    ///
    /// These never change engine state; the caller can fix the request and retry.
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            GraphError::NodeOutOfRange { .. } | GraphError::EmptyGraph | GraphError::NoGraphLoaded
        )
    }
}
