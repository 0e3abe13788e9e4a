// src/graph/builder.rs
//! Orchestrates a full build: extract and resolve every file in parallel,
//! then freeze the edge set and run each metric pass over it.

use std::path::PathBuf;
use std::sync::Arc;

use path_clean::PathClean;
use rayon::prelude::{IntoParallelRefIterator, ParallelIterator};
use tracing::{debug, info};

use super::betweenness;
use super::clusters::{self, Member};
use super::cycles;
use super::declarations::FileDeclarations;
use super::edges::{self, EdgeDraft, Importer, NodeIndex, ResolvedImport};
use super::extract::DeclarationExtractor;
use super::model::{Cycle, Edge, GraphResult, Node, NodeMetrics};
use super::pagerank::{self, PageRankParams};
use super::rankings::{self, DEFAULT_BRIDGE_COUNT};
use super::resolver::{ImportResolver, ResolveOptions};
use super::stats;
use super::topology::Topology;
use crate::config::{StrataConfig, GENERIC_SEGMENTS};
use crate::lang::SyntaxFamily;
use crate::types::FileRecord;

/// Everything a build needs besides the file list.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphOptions {
    pub root_dir: PathBuf,
    pub resolve: ResolveOptions,
    pub pagerank: PageRankParams,
    pub bridge_count: usize,
    pub generic_segments: Vec<String>,
}

impl GraphOptions {
    #[must_use]
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        let root_dir = root_dir.into();
        Self {
            resolve: ResolveOptions::new(root_dir.clone()),
            root_dir,
            pagerank: PageRankParams::default(),
            bridge_count: DEFAULT_BRIDGE_COUNT,
            generic_segments: GENERIC_SEGMENTS.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    #[must_use]
    pub fn from_config(root_dir: impl Into<PathBuf>, config: &StrataConfig) -> Self {
        let root_dir = root_dir.into();
        let mut resolve = ResolveOptions::new(root_dir.clone());
        resolve.extensions.clone_from(&config.resolve.extensions);
        resolve.use_tsconfig = config.resolve.use_tsconfig;

        Self {
            root_dir,
            resolve,
            pagerank: config.graph.pagerank(),
            bridge_count: config.graph.bridge_count,
            generic_segments: config.graph.generic_segments.clone(),
        }
    }
}

/// Builds graphs, reusing one declaration cache across builds.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    extractor: DeclarationExtractor,
}

impl GraphBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_extractor(extractor: DeclarationExtractor) -> Self {
        Self { extractor }
    }

    #[must_use]
    pub fn extractor(&self) -> &DeclarationExtractor {
        &self.extractor
    }

    /// Builds the dependency graph of `files`. Never fails: unreadable or
    /// unsupported files become nodes without outgoing edges.
    #[must_use]
    pub fn build(&self, files: &[FileRecord], options: &GraphOptions) -> GraphResult {
        let index: NodeIndex = files
            .iter()
            .enumerate()
            .map(|(i, f)| (f.absolute_path.clean(), i))
            .collect();
        let resolver = ImportResolver::new(options.resolve.clone());

        // Phase 1: per-file extraction and resolution (parallel)
        let parsed: Vec<(Arc<FileDeclarations>, Vec<ResolvedImport>)> = files
            .par_iter()
            .map(|file| {
                let decls = self.extractor.extract_file(&file.absolute_path);
                if !decls.is_parsed() {
                    debug!(file = file.id(), errors = ?decls.errors, "skipping unparsable file");
                    return (decls, Vec::new());
                }
                let Some(family) = SyntaxFamily::of_file(&file.absolute_path) else {
                    return (decls, Vec::new());
                };
                let importer = Importer {
                    path: &file.absolute_path,
                    family,
                };
                let imports = edges::resolve_imports(importer, &decls, &resolver, &index);
                (decls, imports)
            })
            .collect();

        // Phase 2: graph passes over the frozen edge set (sequential)
        let drafts: Vec<EdgeDraft> = parsed
            .iter()
            .enumerate()
            .flat_map(|(source, (_, imports))| edges::aggregate(source, imports))
            .collect();
        let weighted: Vec<(usize, usize, f64)> =
            drafts.iter().map(|d| (d.source, d.target, d.weight)).collect();
        let pairs: Vec<(usize, usize)> = drafts.iter().map(|d| (d.source, d.target)).collect();
        let topo = Topology::new(files.len(), &weighted);

        let degrees = stats::degrees(files.len(), &pairs);
        let ranks = pagerank::compute(&topo, &options.pagerank);
        let between = betweenness::compute(&topo);
        let cycle_ids = cycles::detect_cycles(&topo);

        let members: Vec<Member<'_>> = files
            .iter()
            .map(|f| Member {
                id: f.id(),
                directory: &f.directory,
            })
            .collect();
        let (clusters, keys) = clusters::build_clusters(&members, &pairs, &options.generic_segments);

        let nodes: Vec<Node> = files
            .iter()
            .zip(parsed)
            .zip(keys)
            .enumerate()
            .map(|(i, ((file, (decls, _)), cluster))| {
                let (in_degree, out_degree) = degrees.get(i).copied().unwrap_or_default();
                Node {
                    id: file.id().to_string(),
                    file: file.clone(),
                    cluster,
                    exports: decls.exports.clone(),
                    metrics: NodeMetrics {
                        in_degree,
                        out_degree,
                        betweenness: between.get(i).copied().unwrap_or_default(),
                        page_rank: ranks.get(i).copied().unwrap_or_default(),
                    },
                }
            })
            .collect();

        let id_of = |i: usize| files.get(i).map(|f| f.id().to_string()).unwrap_or_default();
        let edges: Vec<Edge> = drafts
            .into_iter()
            .map(|d| Edge {
                source: id_of(d.source),
                target: id_of(d.target),
                imported_names: d.imported_names,
                is_type_only: d.is_type_only,
                weight: d.weight,
            })
            .collect();
        let cycles: Vec<Cycle> = cycle_ids
            .into_iter()
            .map(|members| Cycle {
                nodes: members.into_iter().map(id_of).collect(),
            })
            .collect();

        let rankings = rankings::compute(&nodes, &clusters, options.bridge_count);
        let metrics: Vec<NodeMetrics> = nodes.iter().map(|n| n.metrics).collect();
        let statistics = stats::compute(&metrics, edges.len(), clusters.len(), cycles.len());

        info!(
            nodes = statistics.node_count,
            edges = statistics.edge_count,
            cycles = statistics.cycle_count,
            clusters = statistics.cluster_count,
            "dependency graph built"
        );

        GraphResult {
            nodes,
            edges,
            clusters,
            cycles,
            rankings,
            statistics,
        }
    }
}

/// One-shot build with a fresh cache.
#[must_use]
pub fn build(files: &[FileRecord], options: &GraphOptions) -> GraphResult {
    GraphBuilder::new().build(files, options)
}
