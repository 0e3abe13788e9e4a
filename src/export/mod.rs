// src/export/mod.rs
//! Text renderings of a finished [`GraphResult`](crate::graph::GraphResult).
//!
//! Every renderer is a pure function of the graph; callers decide where the
//! string goes.

pub mod dot;
pub mod mermaid;
pub mod node_link;

pub use dot::to_dot;
pub use mermaid::{to_mermaid, DEFAULT_MAX_NODES};
pub use node_link::{to_node_link, NodeLink};
