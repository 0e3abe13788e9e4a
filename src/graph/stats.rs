// src/graph/stats.rs
//! Degree counts and whole-graph statistics.

use super::model::{NodeMetrics, Statistics};

/// `(in_degree, out_degree)` per node. A self-loop counts once each way.
#[must_use]
pub fn degrees(node_count: usize, edges: &[(usize, usize)]) -> Vec<(usize, usize)> {
    let mut counts = vec![(0, 0); node_count];
    for &(source, target) in edges {
        if let Some(entry) = counts.get_mut(source) {
            entry.1 += 1;
        }
        if let Some(entry) = counts.get_mut(target) {
            entry.0 += 1;
        }
    }
    counts
}

#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn compute(
    metrics: &[NodeMetrics],
    edge_count: usize,
    cluster_count: usize,
    cycle_count: usize,
) -> Statistics {
    let node_count = metrics.len();
    let total_degree: usize = metrics.iter().map(NodeMetrics::degree).sum();

    let avg_degree = if node_count == 0 {
        0.0
    } else {
        total_degree as f64 / node_count as f64
    };

    let density = if node_count < 2 {
        0.0
    } else {
        let n = node_count as f64;
        edge_count as f64 / (n * (n - 1.0))
    };

    Statistics {
        node_count,
        edge_count,
        avg_degree,
        density,
        cluster_count,
        cycle_count,
    }
}
