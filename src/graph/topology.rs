// src/graph/topology.rs
//! Frozen adjacency over integer node ids.
//!
//! Built once after edge creation; every metric pass reads it and nothing
//! mutates it afterwards.

#[derive(Debug, Clone, Default)]
pub struct Topology {
    successors: Vec<Vec<usize>>,
    weights: Vec<Vec<f64>>,
    predecessors: Vec<Vec<usize>>,
}

impl Topology {
    /// `edges` are `(source, target, weight)` with ids below `node_count`.
    /// Out-of-range ids are dropped.
    #[must_use]
    pub fn new(node_count: usize, edges: &[(usize, usize, f64)]) -> Self {
        let mut topo = Self {
            successors: vec![Vec::new(); node_count],
            weights: vec![Vec::new(); node_count],
            predecessors: vec![Vec::new(); node_count],
        };
        for &(s, t, w) in edges {
            if s >= node_count || t >= node_count {
                continue;
            }
            if let (Some(succ), Some(ws), Some(pred)) = (
                topo.successors.get_mut(s),
                topo.weights.get_mut(s),
                topo.predecessors.get_mut(t),
            ) {
                succ.push(t);
                ws.push(w);
                pred.push(s);
            }
        }
        topo
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.successors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.successors.is_empty()
    }

    #[must_use]
    pub fn successors(&self, v: usize) -> &[usize] {
        self.successors.get(v).map_or(&[][..], Vec::as_slice)
    }

    #[must_use]
    pub fn predecessors(&self, v: usize) -> &[usize] {
        self.predecessors.get(v).map_or(&[][..], Vec::as_slice)
    }

    /// `(target, weight)` pairs leaving `v`.
    pub fn weighted_successors(&self, v: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        let targets = self.successors(v);
        let weights = self.weights.get(v).map_or(&[][..], Vec::as_slice);
        targets.iter().copied().zip(weights.iter().copied())
    }

    #[must_use]
    pub fn out_weight(&self, v: usize) -> f64 {
        self.weights.get(v).map_or(0.0, |ws| ws.iter().sum())
    }

    #[must_use]
    pub fn has_self_loop(&self, v: usize) -> bool {
        self.successors(v).contains(&v)
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.successors.iter().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjacency() {
        let topo = Topology::new(3, &[(0, 1, 1.0), (0, 2, 0.5), (2, 2, 1.0), (5, 0, 1.0)]);
        assert_eq!(topo.len(), 3);
        assert_eq!(topo.successors(0), &[1, 2]);
        assert_eq!(topo.predecessors(2), &[0, 2]);
        assert!((topo.out_weight(0) - 1.5).abs() < f64::EPSILON);
        assert!(topo.has_self_loop(2));
        assert!(!topo.has_self_loop(0));
        assert_eq!(topo.edge_count(), 3);
        assert!(topo.successors(9).is_empty());
    }
}
