// src/graph/pagerank.rs
//! `PageRank` over the import graph.
//!
//! A node passes its mass to its imports in proportion to edge weight, so a
//! type-only import carries half the vote of a value import. Mass held by
//! nodes with no outgoing edges is spread uniformly each iteration, keeping
//! the result a probability distribution.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::topology::Topology;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageRankParams {
    pub damping: f64,
    pub max_iterations: usize,
    pub tolerance: f64,
}

impl Default for PageRankParams {
    fn default() -> Self {
        Self {
            damping: 0.85,
            max_iterations: 100,
            tolerance: 1e-6,
        }
    }
}

/// Computes `PageRank` scores indexed by node id.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn compute(topo: &Topology, params: &PageRankParams) -> Vec<f64> {
    if topo.is_empty() {
        return Vec::new();
    }

    let n = topo.len() as f64;
    let mut ranks = vec![1.0 / n; topo.len()];

    for iteration in 0..params.max_iterations {
        let next = iterate_once(topo, &ranks, params.damping, n);
        let delta = max_delta(&ranks, &next);
        ranks = next;
        trace!(iteration, delta, "pagerank iteration");
        if delta < params.tolerance {
            break;
        }
    }

    normalize(&mut ranks);
    ranks
}

fn iterate_once(topo: &Topology, ranks: &[f64], damping: f64, n: f64) -> Vec<f64> {
    let dangling: f64 = ranks
        .iter()
        .enumerate()
        .filter(|(v, _)| topo.out_weight(*v) <= 0.0)
        .map(|(_, r)| r)
        .sum();

    let base = (1.0 - damping) / n + damping * dangling / n;
    let mut next = vec![base; ranks.len()];

    for (v, &rank) in ranks.iter().enumerate() {
        let total = topo.out_weight(v);
        if total <= 0.0 {
            continue;
        }
        for (target, weight) in topo.weighted_successors(v) {
            if let Some(slot) = next.get_mut(target) {
                *slot += damping * rank * weight / total;
            }
        }
    }

    next
}

fn max_delta(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max)
}

fn normalize(ranks: &mut [f64]) {
    let total: f64 = ranks.iter().sum();
    if total > 0.0 {
        for rank in ranks.iter_mut() {
            *rank /= total;
        }
    }
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn sum(v: &[f64]) -> f64 {
        v.iter().sum()
    }

    #[test]
    fn test_empty_graph() {
        assert!(compute(&Topology::new(0, &[]), &PageRankParams::default()).is_empty());
    }

    #[test]
    fn test_isolated_nodes_are_uniform() {
        let ranks = compute(&Topology::new(4, &[]), &PageRankParams::default());
        assert_eq!(ranks.len(), 4);
        for r in &ranks {
            assert!((r - 0.25).abs() < 1e-9);
        }
    }

    #[test]
    fn test_hub_outranks_spokes() {
        let edges = [(1, 0, 1.0), (2, 0, 1.0), (3, 0, 1.0)];
        let ranks = compute(&Topology::new(4, &edges), &PageRankParams::default());
        assert!((sum(&ranks) - 1.0).abs() < 1e-9);
        assert!(ranks[0] > ranks[1]);
        assert!((ranks[1] - ranks[2]).abs() < 1e-12);
    }

    #[test]
    fn test_type_only_edge_carries_less_mass() {
        // 0 imports 1 as a value and 2 for types only
        let edges = [(0, 1, 1.0), (0, 2, 0.5)];
        let ranks = compute(&Topology::new(3, &edges), &PageRankParams::default());
        assert!(ranks[1] > ranks[2]);
        assert!((sum(&ranks) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_cycle_with_self_loop_sums_to_one() {
        let edges = [(0, 1, 1.0), (1, 0, 1.0), (2, 2, 1.0)];
        let ranks = compute(&Topology::new(3, &edges), &PageRankParams::default());
        assert!((sum(&ranks) - 1.0).abs() < 1e-9);
        assert!(ranks.iter().all(|r| *r > 0.0));
    }
}
