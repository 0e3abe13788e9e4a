// src/lib.rs
//! Source dependency graph engine.
//!
//! Recovers import/export declarations from JS/TS and Python sources,
//! resolves them to files, and builds a graph annotated with degree,
//! `PageRank`, betweenness, cycles, clusters and rankings.

pub mod config;
pub mod discovery;
pub mod error;
pub mod export;
pub mod graph;
pub mod lang;
pub mod types;
