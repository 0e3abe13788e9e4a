// src/graph/clusters.rs
//! Directory-based grouping of nodes.
//!
//! A node's cluster is the top-level segment of its directory:
//! `src/auth/session/x.ts` lands in `src`, `billing/x.py` in `billing`, root
//! files in `.`. Generic segments (`src`, `lib`, ...) still group files but
//! never name a domain.

use std::collections::BTreeMap;

use crate::graph::model::Cluster;

pub const ROOT_CLUSTER: &str = ".";
const FALLBACK_DOMAIN: &str = "core";

/// Cluster key for a `/`-separated relative directory.
#[must_use]
pub fn cluster_key(directory: &str) -> String {
    directory
        .split('/')
        .find(|s| !s.is_empty() && *s != ".")
        .unwrap_or(ROOT_CLUSTER)
        .to_string()
}

fn is_generic(segment: &str, generic: &[String]) -> bool {
    generic.iter().any(|g| g.eq_ignore_ascii_case(segment))
}

/// One member of the input: id and relative directory.
pub struct Member<'a> {
    pub id: &'a str,
    pub directory: &'a str,
}

/// Groups members into clusters and counts edges per cluster.
///
/// Returns the clusters (sorted by name) and each member's cluster name,
/// indexed like `members`.
#[must_use]
pub fn build_clusters(
    members: &[Member<'_>],
    edges: &[(usize, usize)],
    generic: &[String],
) -> (Vec<Cluster>, Vec<String>) {
    let keys: Vec<String> = members
        .iter()
        .map(|m| cluster_key(m.directory))
        .collect();

    let mut groups: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (idx, key) in keys.iter().enumerate() {
        groups.entry(key.as_str()).or_default().push(idx);
    }

    let clusters = groups
        .iter()
        .map(|(name, idxs)| {
            let (internal, external) = count_edges(name, &keys, edges);
            let dirs: Vec<&str> = idxs
                .iter()
                .filter_map(|&i| members.get(i).map(|m| m.directory))
                .collect();
            Cluster {
                name: (*name).to_string(),
                nodes: idxs
                    .iter()
                    .filter_map(|&i| members.get(i).map(|m| m.id.to_string()))
                    .collect(),
                internal_edges: internal,
                external_edges: external,
                suggested_domain: suggest_domain(&dirs, name, generic),
            }
        })
        .collect();

    (clusters, keys)
}

fn count_edges(name: &str, keys: &[String], edges: &[(usize, usize)]) -> (usize, usize) {
    let in_cluster = |i: usize| keys.get(i).is_some_and(|k| k == name);
    edges.iter().fold((0, 0), |(internal, external), &(s, t)| {
        match (in_cluster(s), in_cluster(t)) {
            (true, true) => (internal + 1, external),
            (true, false) | (false, true) => (internal, external + 1),
            (false, false) => (internal, external),
        }
    })
}

/// Last meaningful segment of the members' shared directory prefix, then of
/// the cluster key, then a fixed fallback.
#[must_use]
pub fn suggest_domain(directories: &[&str], key: &str, generic: &[String]) -> String {
    let prefix = shared_prefix(directories);
    let from_prefix = prefix.iter().rev().find(|s| !is_generic(s, generic));
    let from_key = key
        .split('/')
        .rev()
        .find(|s| !s.is_empty() && *s != ROOT_CLUSTER && !is_generic(s, generic));

    from_prefix
        .copied()
        .or(from_key)
        .unwrap_or(FALLBACK_DOMAIN)
        .to_string()
}

fn shared_prefix<'a>(directories: &[&'a str]) -> Vec<&'a str> {
    let mut iter = directories.iter();
    let Some(first) = iter.next() else {
        return Vec::new();
    };
    let mut prefix: Vec<&str> = first.split('/').filter(|s| !s.is_empty()).collect();

    for dir in iter {
        let segs: Vec<&str> = dir.split('/').filter(|s| !s.is_empty()).collect();
        let common = prefix
            .iter()
            .zip(&segs)
            .take_while(|(a, b)| a == b)
            .count();
        prefix.truncate(common);
    }

    prefix
}
