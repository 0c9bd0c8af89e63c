use anyhow::{bail, Result};
use clap::Args;
use neuronet_core::{EngineConfig, IngestOptions};

/// Engine and presentation settings. Every flag can also come from the environment.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    #[arg(
        long,
        global = true,
        env = "NEURONET_MAX_MEMORY_MB",
        value_name = "MB",
        help = "Refuse to load graphs whose CSR arrays exceed this size"
    )]
    pub max_memory_mb: Option<usize>,

    #[arg(
        long,
        global = true,
        env = "NEURONET_SKIP_COMMENTS",
        help = "Skip input lines starting with '#'"
    )]
    pub skip_comments: bool,

    #[arg(
        long,
        global = true,
        env = "NEURONET_MIN_DEPTH",
        default_value_t = 1,
        help = "Smallest traversal depth accepted"
    )]
    pub min_depth: u32,

    #[arg(
        long,
        global = true,
        env = "NEURONET_MAX_DEPTH",
        default_value_t = 5,
        help = "Largest traversal depth accepted"
    )]
    pub max_depth: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_memory_mb: None,
            skip_comments: false,
            min_depth: 1,
            max_depth: 5,
        }
    }
}

impl Settings {
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            max_memory_mb: self.max_memory_mb,
            ingest: IngestOptions {
                skip_comments: self.skip_comments,
            },
        }
    }

    /// Enforce the depth range before a traversal reaches the engine.
    pub fn check_depth(&self, depth: u32) -> Result<u32> {
        if depth < self.min_depth || depth > self.max_depth {
            bail!(
                "depth must be between {} and {}, got {}",
                self.min_depth,
                self.max_depth,
                depth
            );
        }
        Ok(depth)
    }
}
