// src/graph/cycles.rs
//! Import cycle detection.
//!
//! Tarjan's strongly connected components, run iteratively so deep import
//! chains cannot exhaust the call stack. Every component with two or more
//! members is a cycle, as is a single node importing itself.

use super::topology::Topology;

/// Returns each cycle as node ids sorted by DFS discovery order.
/// Cycles appear in the order their components complete.
#[must_use]
pub fn detect_cycles(topo: &Topology) -> Vec<Vec<usize>> {
    let mut state = TarjanState::new(topo.len());

    for root in 0..topo.len() {
        if state.index[root].is_none() {
            strong_connect(root, topo, &mut state);
        }
    }

    state.cycles
}

struct TarjanState {
    index: Vec<Option<usize>>,
    low_link: Vec<usize>,
    on_stack: Vec<bool>,
    stack: Vec<usize>,
    next_index: usize,
    cycles: Vec<Vec<usize>>,
}

impl TarjanState {
    fn new(n: usize) -> Self {
        Self {
            index: vec![None; n],
            low_link: vec![0; n],
            on_stack: vec![false; n],
            stack: Vec::new(),
            next_index: 0,
            cycles: Vec::new(),
        }
    }

    #[allow(clippy::indexing_slicing)] // Guarded: ids come from the topology
    fn visit(&mut self, v: usize) {
        self.index[v] = Some(self.next_index);
        self.low_link[v] = self.next_index;
        self.next_index += 1;
        self.stack.push(v);
        self.on_stack[v] = true;
    }

    fn discovery(&self, v: usize) -> usize {
        self.index.get(v).copied().flatten().unwrap_or(usize::MAX)
    }
}

#[allow(clippy::indexing_slicing)] // Guarded: ids come from the topology
fn strong_connect(root: usize, topo: &Topology, state: &mut TarjanState) {
    // (node, position of the next successor to explore)
    let mut frames: Vec<(usize, usize)> = vec![(root, 0)];
    state.visit(root);

    while let Some(&(v, pos)) = frames.last() {
        let successors = topo.successors(v);

        if let Some(&w) = successors.get(pos) {
            if let Some(frame) = frames.last_mut() {
                frame.1 += 1;
            }
            if state.index[w].is_none() {
                state.visit(w);
                frames.push((w, 0));
            } else if state.on_stack[w] {
                state.low_link[v] = state.low_link[v].min(state.discovery(w));
            }
            continue;
        }

        frames.pop();
        if let Some(&(parent, _)) = frames.last() {
            state.low_link[parent] = state.low_link[parent].min(state.low_link[v]);
        }
        if Some(state.low_link[v]) == state.index[v] {
            record_component(v, topo, state);
        }
    }
}

fn record_component(v: usize, topo: &Topology, state: &mut TarjanState) {
    let mut component = Vec::new();
    while let Some(w) = state.stack.pop() {
        if let Some(flag) = state.on_stack.get_mut(w) {
            *flag = false;
        }
        component.push(w);
        if w == v {
            break;
        }
    }

    if component.len() >= 2 || topo.has_self_loop(v) {
        component.sort_by_key(|&w| state.discovery(w));
        state.cycles.push(component);
    }
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn topo(n: usize, list: &[(usize, usize)]) -> Topology {
        let edges: Vec<(usize, usize, f64)> = list.iter().map(|&(a, b)| (a, b, 1.0)).collect();
        Topology::new(n, &edges)
    }

    #[test]
    fn test_cycle_detection_logic() {
        let cases = vec![
            (3, vec![(0, 1), (1, 2)], 0, "No cycles"),
            (2, vec![(0, 1), (1, 0)], 1, "Simple cycle"),
            (4, vec![(0, 1), (0, 2), (1, 3), (2, 3)], 0, "Diamond DAG (no cycle)"),
            (1, vec![(0, 0)], 1, "Self loop"),
            (3, vec![(0, 1), (1, 2), (2, 0)], 1, "Three node cycle"),
            (4, vec![(0, 1), (1, 0), (2, 3), (3, 2)], 2, "Disjoint cycles"),
            (3, vec![(0, 1), (1, 0), (1, 2), (2, 1)], 1, "Figure-8 (one component)"),
            (5, vec![(0, 1), (1, 2), (2, 3), (3, 4), (4, 0)], 1, "Long cycle (5 nodes)"),
            (0, vec![], 0, "Empty graph"),
            (2, vec![(0, 1)], 0, "Single edge"),
        ];

        for (n, edge_list, expected_count, desc) in cases {
            let cycles = detect_cycles(&topo(n, &edge_list));
            assert_eq!(cycles.len(), expected_count, "Failed: {desc}");

            if desc == "Simple cycle" {
                assert_eq!(cycles[0].len(), 2, "a->b->a members");
            }
            if desc == "Self loop" {
                assert_eq!(cycles[0], vec![0], "a->a members");
            }
            if desc == "Figure-8 (one component)" {
                assert_eq!(cycles[0], vec![0, 1, 2]);
            }
        }
    }

    #[test]
    fn test_cycle_content_in_discovery_order() {
        let cycles = detect_cycles(&topo(4, &[(3, 0), (0, 1), (1, 2), (2, 0)]));
        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0], vec![0, 1, 2]);
    }

    #[test]
    fn test_deep_chain_does_not_overflow() {
        let n = 50_000;
        let mut list: Vec<(usize, usize)> = (0..n - 1).map(|i| (i, i + 1)).collect();
        list.push((n - 1, 0));
        let cycles = detect_cycles(&topo(n, &list));
        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].len(), n);
    }
}
