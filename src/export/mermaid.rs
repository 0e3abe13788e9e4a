// src/export/mermaid.rs
//! Mermaid flowchart of the most important nodes.

use std::collections::HashMap;
use std::fmt::Write;

use crate::graph::GraphResult;

/// Node cap when the caller does not pick one.
pub const DEFAULT_MAX_NODES: usize = 50;

/// Renders the top `max_nodes` nodes by importance and the edges between
/// them. Type-only edges draw dotted.
///
/// Diagram ids are `n<rank>` (0-based position in byImportance); the file
/// path only appears in the label, so distinct paths never share a box.
#[must_use]
pub fn to_mermaid(graph: &GraphResult, max_nodes: usize) -> String {
    let kept: HashMap<&str, usize> = graph
        .rankings
        .by_importance
        .iter()
        .take(max_nodes)
        .enumerate()
        .map(|(rank, id)| (id.as_str(), rank))
        .collect();

    let mut out = String::from("graph TD\n");
    for (rank, id) in graph.rankings.by_importance.iter().take(max_nodes).enumerate() {
        let _ = writeln!(out, "    {}[\"{}\"]", node_id(rank), escape_label(id));
    }

    for edge in &graph.edges {
        let (Some(&from), Some(&to)) = (kept.get(edge.source.as_str()), kept.get(edge.target.as_str()))
        else {
            continue;
        };
        let arrow = if edge.is_type_only { "-.->" } else { "-->" };
        let _ = writeln!(out, "    {} {arrow} {}", node_id(from), node_id(to));
    }

    out
}

fn node_id(rank: usize) -> String {
    format!("n{rank}")
}

fn escape_label(label: &str) -> String {
    label.replace('"', "#quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_label() {
        assert_eq!(escape_label("plain/a.ts"), "plain/a.ts");
        assert_eq!(escape_label("we\"ird.ts"), "we#quot;ird.ts");
    }

    #[test]
    fn test_empty_graph_is_header_only() {
        assert_eq!(to_mermaid(&GraphResult::default(), 10), "graph TD\n");
    }
}
