// src/graph/model.rs
//! The immutable result handed to downstream consumers.
//!
//! Field names serialise in camelCase; callers key off them verbatim.

use serde::{Deserialize, Serialize};

use crate::graph::declarations::ExportDecl;
use crate::types::FileRecord;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeMetrics {
    pub in_degree: usize,
    pub out_degree: usize,
    pub betweenness: f64,
    pub page_rank: f64,
}

impl NodeMetrics {
    #[must_use]
    pub fn degree(&self) -> usize {
        self.in_degree + self.out_degree
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    pub file: FileRecord,
    /// Name of the cluster the node was grouped into.
    pub cluster: String,
    pub exports: Vec<ExportDecl>,
    pub metrics: NodeMetrics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub imported_names: Vec<String>,
    pub is_type_only: bool,
    pub weight: f64,
}

pub const VALUE_WEIGHT: f64 = 1.0;
pub const TYPE_ONLY_WEIGHT: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cluster {
    pub name: String,
    pub nodes: Vec<String>,
    pub internal_edges: usize,
    pub external_edges: usize,
    pub suggested_domain: String,
}

/// Node ids forming one closed import cycle, in DFS discovery order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cycle {
    pub nodes: Vec<String>,
}

impl Cycle {
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.iter().any(|n| n == id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rankings {
    pub by_importance: Vec<String>,
    pub by_connectivity: Vec<String>,
    pub cluster_centers: Vec<String>,
    pub leaf_nodes: Vec<String>,
    pub bridge_nodes: Vec<String>,
    pub orphan_nodes: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub node_count: usize,
    pub edge_count: usize,
    pub avg_degree: f64,
    pub density: f64,
    pub cluster_count: usize,
    pub cycle_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphResult {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub clusters: Vec<Cluster>,
    pub cycles: Vec<Cycle>,
    pub rankings: Rankings,
    pub statistics: Statistics,
}

impl GraphResult {
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Edges leaving `id`.
    pub fn dependencies<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |e| e.source == id)
    }

    /// Edges arriving at `id`.
    pub fn dependents<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |e| e.target == id)
    }

    /// Serialises to the nested map/array JSON document.
    ///
    /// # Errors
    /// Returns error if serialization fails.
    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
