// src/config/types.rs
use serde::{Deserialize, Serialize};

use crate::graph::pagerank::PageRankParams;
use crate::graph::rankings::DEFAULT_BRIDGE_COUNT;
use crate::graph::resolver::DEFAULT_EXTENSIONS;

/// Contents of `strata.toml`. Every section and field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StrataConfig {
    #[serde(default)]
    pub resolve: ResolveConfig,
    #[serde(default)]
    pub graph: GraphConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolveConfig {
    /// Probed in order when a relative specifier has no extension.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    #[serde(default = "default_true")]
    pub use_tsconfig: bool,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            use_tsconfig: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphConfig {
    #[serde(default = "default_damping")]
    pub damping: f64,
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    #[serde(default = "default_bridge_count")]
    pub bridge_count: usize,
    /// Directory names that never name a cluster domain.
    #[serde(default = "default_generic_segments")]
    pub generic_segments: Vec<String>,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            damping: default_damping(),
            max_iterations: default_max_iterations(),
            tolerance: default_tolerance(),
            bridge_count: default_bridge_count(),
            generic_segments: default_generic_segments(),
        }
    }
}

impl GraphConfig {
    #[must_use]
    pub fn pagerank(&self) -> PageRankParams {
        PageRankParams {
            damping: self.damping,
            max_iterations: self.max_iterations,
            tolerance: self.tolerance,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_diagram_max_nodes")]
    pub diagram_max_nodes: usize,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            diagram_max_nodes: default_diagram_max_nodes(),
        }
    }
}

fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|e| (*e).to_string()).collect()
}
fn default_true() -> bool { true }
fn default_damping() -> f64 { PageRankParams::default().damping }
fn default_max_iterations() -> usize { PageRankParams::default().max_iterations }
fn default_tolerance() -> f64 { PageRankParams::default().tolerance }
fn default_bridge_count() -> usize { DEFAULT_BRIDGE_COUNT }
fn default_diagram_max_nodes() -> usize { 50 }

pub const GENERIC_SEGMENTS: &[&str] = &[
    "src", "lib", "app", "source", "sources", "pkg", "packages", "modules", "internal", "code",
];

fn default_generic_segments() -> Vec<String> {
    GENERIC_SEGMENTS.iter().map(|s| (*s).to_string()).collect()
}
