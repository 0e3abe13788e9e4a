// src/export/node_link.rs
//! `{nodes: [{id, group, score}], links: [{source, target, value}]}`, the
//! shape force-directed layouts consume.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::graph::GraphResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeLink {
    pub nodes: Vec<LinkNode>,
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkNode {
    pub id: String,
    /// Cluster name.
    pub group: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub source: String,
    pub target: String,
    /// Edge weight.
    pub value: f64,
}

impl From<&GraphResult> for NodeLink {
    fn from(graph: &GraphResult) -> Self {
        Self {
            nodes: graph
                .nodes
                .iter()
                .map(|n| LinkNode {
                    id: n.id.clone(),
                    group: n.cluster.clone(),
                    score: n.file.score,
                })
                .collect(),
            links: graph
                .edges
                .iter()
                .map(|e| Link {
                    source: e.source.clone(),
                    target: e.target.clone(),
                    value: e.weight,
                })
                .collect(),
        }
    }
}

/// Renders the node/link document as pretty JSON.
///
/// # Errors
/// Returns error if serialization fails.
pub fn to_node_link(graph: &GraphResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(&NodeLink::from(graph))?)
}
