// src/graph/rankings.rs
//! Orderings and role lists over finished nodes.

use std::cmp::Ordering;

use super::model::{Cluster, Node, Rankings};

/// Default length of [`Rankings::bridge_nodes`].
pub const DEFAULT_BRIDGE_COUNT: usize = 10;

#[must_use]
pub fn compute(nodes: &[Node], clusters: &[Cluster], bridge_count: usize) -> Rankings {
    let importance = sorted_ids(nodes, by_importance);
    let connectivity = sorted_ids(nodes, by_connectivity);

    let cluster_centers = clusters
        .iter()
        .filter_map(|cluster| {
            importance
                .iter()
                .find(|id| cluster.nodes.contains(id))
                .cloned()
        })
        .collect();

    let mut bridges: Vec<&Node> = nodes.iter().filter(|n| n.metrics.betweenness > 0.0).collect();
    bridges.sort_by(|a, b| {
        desc(a.metrics.betweenness, b.metrics.betweenness).then_with(|| by_importance(a, b))
    });

    Rankings {
        by_importance: importance,
        by_connectivity: connectivity,
        cluster_centers,
        leaf_nodes: ids_where(nodes, |n| n.metrics.out_degree > 0 && n.metrics.in_degree == 0),
        bridge_nodes: bridges
            .into_iter()
            .take(bridge_count)
            .map(|n| n.id.clone())
            .collect(),
        orphan_nodes: ids_where(nodes, |n| n.metrics.degree() == 0),
    }
}

fn sorted_ids(nodes: &[Node], order: fn(&Node, &Node) -> Ordering) -> Vec<String> {
    let mut sorted: Vec<&Node> = nodes.iter().collect();
    sorted.sort_by(|a, b| order(a, b));
    sorted.into_iter().map(|n| n.id.clone()).collect()
}

fn ids_where(nodes: &[Node], keep: impl Fn(&Node) -> bool) -> Vec<String> {
    nodes.iter().filter(|n| keep(n)).map(|n| n.id.clone()).collect()
}

fn desc(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

/// pageRank, betweenness, inDegree, score (all descending), then id.
fn by_importance(a: &Node, b: &Node) -> Ordering {
    desc(a.metrics.page_rank, b.metrics.page_rank)
        .then_with(|| desc(a.metrics.betweenness, b.metrics.betweenness))
        .then_with(|| b.metrics.in_degree.cmp(&a.metrics.in_degree))
        .then_with(|| desc(a.file.score, b.file.score))
        .then_with(|| a.id.cmp(&b.id))
}

/// Total degree, pageRank, score (all descending), then id.
fn by_connectivity(a: &Node, b: &Node) -> Ordering {
    b.metrics
        .degree()
        .cmp(&a.metrics.degree())
        .then_with(|| desc(a.metrics.page_rank, b.metrics.page_rank))
        .then_with(|| desc(a.file.score, b.file.score))
        .then_with(|| a.id.cmp(&b.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::model::NodeMetrics;
    use crate::types::FileRecord;
    use std::path::Path;

    fn node(id: &str, cluster: &str, metrics: NodeMetrics) -> Node {
        Node {
            id: id.to_string(),
            file: FileRecord::new(Path::new("/r"), &Path::new("/r").join(id), 0.0),
            cluster: cluster.to_string(),
            exports: Vec::new(),
            metrics,
        }
    }

    fn metrics(in_degree: usize, out_degree: usize, betweenness: f64, page_rank: f64) -> NodeMetrics {
        NodeMetrics {
            in_degree,
            out_degree,
            betweenness,
            page_rank,
        }
    }

    fn cluster(name: &str, nodes: &[&str]) -> Cluster {
        Cluster {
            name: name.to_string(),
            nodes: nodes.iter().map(|n| (*n).to_string()).collect(),
            internal_edges: 0,
            external_edges: 0,
            suggested_domain: "core".to_string(),
        }
    }

    #[test]
    fn test_role_lists() {
        let nodes = vec![
            node("a.ts", ".", metrics(0, 1, 0.0, 0.2)),
            node("b.ts", ".", metrics(1, 1, 1.0, 0.3)),
            node("c.ts", ".", metrics(1, 0, 0.0, 0.4)),
            node("lonely.ts", ".", metrics(0, 0, 0.0, 0.1)),
        ];
        let r = compute(&nodes, &[cluster(".", &["a.ts", "b.ts", "c.ts", "lonely.ts"])], 10);

        assert_eq!(r.by_importance, vec!["c.ts", "b.ts", "a.ts", "lonely.ts"]);
        assert_eq!(r.by_connectivity, vec!["b.ts", "c.ts", "a.ts", "lonely.ts"]);
        assert_eq!(r.leaf_nodes, vec!["a.ts"]);
        assert_eq!(r.orphan_nodes, vec!["lonely.ts"]);
        assert_eq!(r.bridge_nodes, vec!["b.ts"]);
        assert_eq!(r.cluster_centers, vec!["c.ts"]);
    }

    #[test]
    fn test_ties_fall_back_to_id() {
        let nodes = vec![
            node("z.ts", ".", metrics(0, 0, 0.0, 0.5)),
            node("m.ts", ".", metrics(0, 0, 0.0, 0.5)),
        ];
        let r = compute(&nodes, &[], 10);
        assert_eq!(r.by_importance, vec!["m.ts", "z.ts"]);
        assert!(r.cluster_centers.is_empty());
    }

    #[test]
    fn test_bridge_count_caps_list() {
        let nodes = vec![
            node("a", ".", metrics(1, 1, 3.0, 0.3)),
            node("b", ".", metrics(1, 1, 2.0, 0.3)),
            node("c", ".", metrics(1, 1, 1.0, 0.4)),
        ];
        let r = compute(&nodes, &[], 2);
        assert_eq!(r.bridge_nodes, vec!["a", "b"]);
    }

    #[test]
    fn test_bridge_ties_use_importance_order() {
        let nodes = vec![
            node("a", ".", metrics(1, 1, 2.0, 0.1)),
            node("b", ".", metrics(1, 1, 2.0, 0.4)),
        ];
        let r = compute(&nodes, &[], 10);
        assert_eq!(r.bridge_nodes, vec!["b", "a"]);
    }
}
