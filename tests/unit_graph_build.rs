// tests/unit_graph_build.rs
//! End-to-end graph construction over on-disk fixtures.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use strata_core::graph::{build, GraphBuilder, GraphOptions, GraphResult};
use strata_core::types::FileRecord;
use tempfile::TempDir;

fn project(files: &[(&str, &str)]) -> (TempDir, Vec<FileRecord>) {
    let dir = tempfile::tempdir().unwrap();
    let records = files
        .iter()
        .map(|(rel, content)| {
            let path = dir.path().join(rel);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(&path, content).unwrap();
            FileRecord::new(dir.path(), &path, 0.0)
        })
        .collect();
    (dir, records)
}

fn build_project(files: &[(&str, &str)]) -> GraphResult {
    let (dir, records) = project(files);
    build(&records, &GraphOptions::new(dir.path()))
}

fn metrics(graph: &GraphResult, id: &str) -> (usize, usize) {
    let node = graph.node(id).unwrap();
    (node.metrics.in_degree, node.metrics.out_degree)
}

#[test]
fn test_fan_out_degrees() {
    let graph = build_project(&[
        ("a.ts", "import { b } from './b';\nimport c from './c';\nimport * as d from './d';\n"),
        ("b.ts", "export const b = 1;\n"),
        ("c.ts", "export default function c() {}\n"),
        ("d.ts", "export function d() {}\n"),
    ]);

    assert_eq!(metrics(&graph, "a.ts"), (0, 3));
    for id in ["b.ts", "c.ts", "d.ts"] {
        assert_eq!(metrics(&graph, id), (1, 0), "{id}");
    }
    assert!(graph.cycles.is_empty());
    assert_eq!(graph.statistics.node_count, 4);
    assert_eq!(graph.statistics.edge_count, 3);
    assert_eq!(graph.rankings.leaf_nodes, vec!["a.ts"]);

    let to_c = graph.dependencies("a.ts").find(|e| e.target == "c.ts").unwrap();
    assert_eq!(to_c.imported_names, vec!["default"]);
}

#[test]
fn test_two_node_statistics() {
    let graph = build_project(&[("a.ts", "import './b';\n"), ("b.ts", "")]);
    assert_eq!(graph.statistics.edge_count, 1);
    assert!((graph.statistics.density - 0.5).abs() < 1e-12);
    assert!((graph.statistics.avg_degree - 1.0).abs() < 1e-12);
}

#[test]
fn test_cycles() {
    let pair = build_project(&[
        ("a.ts", "import { b } from './b';\nexport const a = 1;\n"),
        ("b.ts", "import { a } from './a';\nexport const b = 2;\n"),
    ]);
    assert_eq!(pair.cycles.len(), 1);
    assert!(pair.cycles[0].contains("a.ts") && pair.cycles[0].contains("b.ts"));

    let triangle = build_project(&[
        ("a.ts", "import './b';\n"),
        ("b.ts", "import './c';\n"),
        ("c.ts", "import './a';\n"),
    ]);
    assert_eq!(triangle.cycles.len(), 1);
    assert!(triangle.cycles[0].len() >= 3);
    assert_eq!(triangle.statistics.cycle_count, 1);
}

#[test]
fn test_self_import_is_loop_and_cycle() {
    let graph = build_project(&[("a.ts", "import { x } from './a';\nexport const x = 1;\n")]);
    assert_eq!(graph.edges.len(), 1);
    assert_eq!(graph.edges[0].source, graph.edges[0].target);
    assert_eq!(graph.cycles.len(), 1);
    assert_eq!(graph.cycles[0].nodes, vec!["a.ts"]);
}

#[test]
fn test_hub_orphan_and_leaf() {
    let graph = build_project(&[
        ("hub.ts", "export const hub = 1;\n"),
        ("one.ts", "import { hub } from './hub';\n"),
        ("two.ts", "import { hub } from './hub';\n"),
        ("three.ts", "const { hub } = require('./hub');\n"),
        ("lonely.ts", "export const alone = true;\n"),
    ]);

    assert_eq!(metrics(&graph, "hub.ts"), (3, 0));
    assert_eq!(graph.rankings.orphan_nodes, vec!["lonely.ts"]);
    for id in ["one.ts", "two.ts", "three.ts"] {
        assert!(graph.rankings.leaf_nodes.iter().any(|l| l == id), "{id}");
    }
    assert_eq!(graph.rankings.by_importance.first().map(String::as_str), Some("hub.ts"));
}

#[test]
fn test_type_only_edge() {
    let graph = build_project(&[
        ("a.ts", "import type { X } from './t';\n"),
        ("t.ts", "export interface X {}\n"),
    ]);
    assert_eq!(graph.edges.len(), 1);
    assert!(graph.edges[0].is_type_only);
    assert!((graph.edges[0].weight - 0.5).abs() < f64::EPSILON);
}

#[test]
fn test_mixed_imports_make_value_edge() {
    let graph = build_project(&[
        ("a.ts", "import type { X } from './t';\nimport { make } from './t';\n"),
        ("t.ts", "export interface X {}\nexport function make() {}\n"),
    ]);
    assert_eq!(graph.edges.len(), 1);
    let edge = &graph.edges[0];
    assert!(!edge.is_type_only);
    assert!((edge.weight - 1.0).abs() < f64::EPSILON);
    assert_eq!(edge.imported_names, vec!["X", "make"]);
}

#[test]
fn test_external_imports_make_no_edge() {
    let graph = build_project(&[(
        "a.ts",
        "import React from 'react';\nimport fs from 'node:fs';\nimport './missing';\n",
    )]);
    assert!(graph.edges.is_empty());
    assert_eq!(graph.rankings.orphan_nodes, vec!["a.ts"]);
}

#[test]
fn test_esm_js_specifier_finds_ts_source() {
    let graph = build_project(&[
        ("src/index.ts", "export { helper } from './util.js';\n"),
        ("src/util.ts", "export const helper = 1;\n"),
    ]);
    assert_eq!(graph.edges.len(), 1);
    assert_eq!(graph.edges[0].target, "src/util.ts");
}

#[test]
fn test_index_file_resolution() {
    let graph = build_project(&[
        ("main.js", "const api = require('./api');\n"),
        ("api/index.js", "module.exports = { get: 1 };\n"),
    ]);
    assert_eq!(graph.edges.len(), 1);
    assert_eq!(graph.edges[0].target, "api/index.js");
}

#[test]
fn test_python_packages() {
    let graph = build_project(&[
        ("main.py", "import os\nfrom app import models\nimport app\n"),
        ("app/__init__.py", "VERSION = '1'\n"),
        ("app/models.py", "from . import helpers\nclass User:\n    pass\n"),
        ("app/helpers.py", "def slug(x):\n    return x\n"),
    ]);

    let main_targets: Vec<&str> = graph.dependencies("main.py").map(|e| e.target.as_str()).collect();
    assert_eq!(main_targets, vec!["app/models.py", "app/__init__.py"]);

    let models_targets: Vec<&str> = graph
        .dependencies("app/models.py")
        .map(|e| e.target.as_str())
        .collect();
    assert_eq!(models_targets, vec!["app/helpers.py"]);

    let models = graph.node("app/models.py").unwrap();
    assert_eq!(models.exports.len(), 1);
    assert_eq!(models.exports[0].name, "User");
}

#[test]
fn test_shebang_script_resolves_as_python() {
    let graph = build_project(&[
        ("tool", "#!/usr/bin/env python3\nfrom .helpers import slug\nimport helpers\n"),
        ("helpers.py", "def slug(x):\n    return x\n"),
    ]);

    assert_eq!(graph.statistics.edge_count, 1);
    let edge = &graph.edges[0];
    assert_eq!((edge.source.as_str(), edge.target.as_str()), ("tool", "helpers.py"));
    assert_eq!(edge.imported_names, vec!["slug", "*"]);
}

#[test]
fn test_missing_and_unsupported_files_still_nodes() {
    let (dir, mut records) = project(&[("a.ts", "import './b';\n"), ("style.css", "body {}")]);
    let ghost = dir.path().join("ghost.ts");
    records.push(FileRecord::new(dir.path(), &ghost, 0.0));

    let graph = build(&records, &GraphOptions::new(dir.path()));
    assert_eq!(graph.statistics.node_count, 3);
    assert!(graph.edges.is_empty());
    assert_eq!(metrics(&graph, "ghost.ts"), (0, 0));
}

#[test]
fn test_empty_input() {
    let graph = build(&[], &GraphOptions::new(Path::new("/nowhere")));
    assert_eq!(graph.statistics, Default::default());
    assert!(graph.nodes.is_empty());
    assert!(graph.edges.is_empty());
    assert!(graph.cycles.is_empty());
    assert!(graph.clusters.is_empty());
    assert!(graph.rankings.by_importance.is_empty());
}

#[test]
fn test_pagerank_sums_to_one() {
    let graph = build_project(&[
        ("a.ts", "import './b';\nimport './c';\n"),
        ("b.ts", "import './c';\n"),
        ("c.ts", ""),
        ("d.ts", ""),
    ]);
    let total: f64 = graph.nodes.iter().map(|n| n.metrics.page_rank).sum();
    assert!((total - 1.0).abs() < 1e-9);
    let c = graph.node("c.ts").unwrap().metrics.page_rank;
    let d = graph.node("d.ts").unwrap().metrics.page_rank;
    assert!(c > d);
}

#[test]
fn test_bridge_node() {
    let graph = build_project(&[
        ("a.ts", "import './b';\n"),
        ("b.ts", "import './c';\n"),
        ("c.ts", ""),
    ]);
    assert_eq!(graph.rankings.bridge_nodes, vec!["b.ts"]);
    assert!((graph.node("b.ts").unwrap().metrics.betweenness - 1.0).abs() < 1e-12);
}

#[test]
fn test_clusters() {
    let graph = build_project(&[
        ("src/auth/login.ts", "import { session } from './session';\nimport { db } from '../db/client';\n"),
        ("src/auth/session.ts", "export const session = 1;\n"),
        ("src/db/client.ts", "export const db = 1;\n"),
        ("billing/api/invoice.ts", "import { db } from '../../src/db/client';\n"),
        ("index.ts", "import './src/auth/login';\n"),
    ]);

    let names: Vec<&str> = graph.clusters.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec![".", "billing", "src"]);

    let src = &graph.clusters[2];
    assert_eq!(src.nodes.len(), 3);
    assert_eq!(src.internal_edges, 2);
    assert_eq!(src.external_edges, 2);
    assert_eq!(src.suggested_domain, "core");
    assert_eq!(graph.clusters[1].suggested_domain, "api");

    assert_eq!(graph.node("src/db/client.ts").unwrap().cluster, "src");
    assert_eq!(graph.rankings.cluster_centers.len(), 3);
    assert_eq!(graph.statistics.cluster_count, 3);
}

#[test]
fn test_cache_clear_reextracts_equal_content() {
    let (dir, records) = project(&[("a.ts", "import { b } from './b';\nexport const a = 1;\n")]);
    let builder = GraphBuilder::new();
    let path = &records[0].absolute_path;

    let first = builder.extractor().extract_file(path);
    let cached = builder.extractor().extract_file(path);
    assert!(Arc::ptr_eq(&first, &cached));

    builder.extractor().clear_cache();
    assert!(builder.extractor().cache().is_empty());
    let second = builder.extractor().extract_file(path);
    assert_eq!(*first, *second);

    let graph = builder.build(&records, &GraphOptions::new(dir.path()));
    assert_eq!(graph.nodes[0].exports.len(), 1);
}

#[test]
fn test_json_field_names() {
    let graph = build_project(&[("a.ts", "import type { T } from './b';\n"), ("b.ts", "export type T = 1;\n")]);
    let json = graph.to_json().unwrap();
    for key in [
        "\"nodeCount\"",
        "\"avgDegree\"",
        "\"pageRank\"",
        "\"inDegree\"",
        "\"importedNames\"",
        "\"isTypeOnly\"",
        "\"byImportance\"",
        "\"orphanNodes\"",
        "\"suggestedDomain\"",
        "\"relativePath\"",
    ] {
        assert!(json.contains(key), "missing {key}");
    }
}
