// src/graph/mod.rs
//! Source dependency graph: declaration extraction, import resolution and
//! the metric passes run over the resulting graph.

pub mod betweenness;
pub mod builder;
pub mod clusters;
pub mod comments;
pub mod cycles;
pub mod declarations;
pub mod edges;
pub mod extract;
pub mod model;
pub mod pagerank;
pub mod rankings;
pub mod resolver;
pub mod specifier;
pub mod stats;
pub mod topology;
pub mod tsconfig;

pub use builder::{build, GraphBuilder, GraphOptions};
pub use declarations::{ExportDecl, ExportKind, FileDeclarations, ImportDecl};
pub use extract::{extract_source, DeclarationExtractor};
pub use model::{Cluster, Cycle, Edge, GraphResult, Node, NodeMetrics, Rankings, Statistics};
pub use resolver::{resolve, ImportResolver, ResolveOptions};
