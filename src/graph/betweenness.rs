// src/graph/betweenness.rs
//! Betweenness centrality (Brandes) over directed, unweighted edges.
//!
//! For every ordered pair `(s, t)` each node strictly inside a shortest
//! `s -> t` path gains `1 / sigma(s, t)` per such path. Scores are raw path
//! fractions, not normalised.

use std::collections::VecDeque;

use super::topology::Topology;

#[must_use]
pub fn compute(topo: &Topology) -> Vec<f64> {
    let n = topo.len();
    let mut centrality = vec![0.0; n];

    for source in 0..n {
        accumulate_from(topo, source, &mut centrality);
    }

    centrality
}

#[allow(clippy::indexing_slicing)] // Guarded: every id comes from the topology and is < n
fn accumulate_from(topo: &Topology, source: usize, centrality: &mut [f64]) {
    let n = topo.len();
    let mut order = Vec::with_capacity(n);
    let mut preds: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut sigma = vec![0.0_f64; n];
    let mut dist: Vec<Option<usize>> = vec![None; n];

    sigma[source] = 1.0;
    dist[source] = Some(0);
    let mut queue = VecDeque::from([source]);

    while let Some(v) = queue.pop_front() {
        order.push(v);
        let Some(dv) = dist[v] else { continue };
        for &w in topo.successors(v) {
            if dist[w].is_none() {
                dist[w] = Some(dv + 1);
                queue.push_back(w);
            }
            if dist[w] == Some(dv + 1) {
                sigma[w] += sigma[v];
                preds[w].push(v);
            }
        }
    }

    let mut delta = vec![0.0_f64; n];
    while let Some(w) = order.pop() {
        for &v in &preds[w] {
            delta[v] += sigma[v] / sigma[w] * (1.0 + delta[w]);
        }
        if w != source {
            centrality[w] += delta[w];
        }
    }
}
