// src/export/dot.rs
//! Graphviz `digraph` rendering.

use std::fmt::Write;

use crate::graph::GraphResult;

#[must_use]
pub fn to_dot(graph: &GraphResult) -> String {
    let mut out = String::from("digraph dependencies {\n");
    out.push_str("    rankdir=LR;\n");

    for edge in &graph.edges {
        let style = if edge.is_type_only { " [style=dashed]" } else { "" };
        let _ = writeln!(
            out,
            "    \"{}\" -> \"{}\"{style};",
            escape(&edge.source),
            escape(&edge.target)
        );
    }

    out.push_str("}\n");
    out
}

fn escape(id: &str) -> String {
    id.replace('\\', "\\\\").replace('"', "\\\"")
}
