// src/graph/tsconfig.rs
//! `compilerOptions.paths` / `baseUrl` aliases from tsconfig.json or jsconfig.json.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::graph::comments;

/// Alias table used to turn non-relative specifiers into on-disk candidates.
#[derive(Debug, Default, Clone)]
pub struct TsConfig {
    pub base_url: Option<PathBuf>,
    /// Pattern -> targets, most specific (longest) pattern first.
    pub paths: Vec<(String, Vec<PathBuf>)>,
}

#[derive(Deserialize)]
struct RawConfig {
    #[serde(rename = "compilerOptions")]
    compiler_options: Option<CompilerOptions>,
}

#[derive(Deserialize)]
struct CompilerOptions {
    #[serde(rename = "baseUrl")]
    base_url: Option<String>,
    paths: Option<HashMap<String, Vec<String>>>,
}

impl TsConfig {
    /// Attempt to load tsconfig.json or jsconfig.json from project root.
    #[must_use]
    pub fn load(root: &Path) -> Option<Self> {
        let candidates = ["tsconfig.json", "jsconfig.json"];
        candidates.iter().find_map(|name| {
            let content = std::fs::read_to_string(root.join(name)).ok()?;
            Self::parse(&content, root)
        })
    }

    /// Parses tsconfig text, tolerating comments.
    #[must_use]
    pub fn parse(content: &str, root: &Path) -> Option<Self> {
        let clean = comments::strip_curly(content);
        let raw: RawConfig = serde_json::from_str(&clean).ok()?;
        let opts = raw.compiler_options?;

        let base_url = opts.base_url.map(|b| root.join(b));
        let base_for_paths = base_url.as_deref().unwrap_or(root);

        let mut paths: Vec<(String, Vec<PathBuf>)> = opts
            .paths
            .unwrap_or_default()
            .into_iter()
            .map(|(pattern, targets)| {
                let resolved = targets.into_iter().map(|t| base_for_paths.join(t)).collect();
                (pattern, resolved)
            })
            .collect();
        paths.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(&b.0)));

        Some(Self { base_url, paths })
    }

    /// Extensionless on-disk candidates for `import`, aliases before baseUrl.
    #[must_use]
    pub fn candidates(&self, import: &str) -> Vec<PathBuf> {
        let mut out: Vec<PathBuf> = self
            .paths
            .iter()
            .filter_map(|(pattern, targets)| {
                match_pattern(pattern, import).map(|matched| expand(targets, matched))
            })
            .flatten()
            .collect();

        if let Some(base) = &self.base_url {
            out.push(base.join(import));
        }
        out
    }
}

fn match_pattern<'a>(pattern: &str, import: &'a str) -> Option<&'a str> {
    match pattern.strip_suffix('*') {
        Some(prefix) => import.strip_prefix(prefix),
        None if pattern == import => Some(""),
        None => None,
    }
}

fn expand(targets: &[PathBuf], matched: &str) -> Vec<PathBuf> {
    targets
        .iter()
        .map(|target| {
            let target_str = target.to_string_lossy();
            if target_str.contains('*') {
                PathBuf::from(target_str.replace('*', matched))
            } else {
                target.clone()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_comments() {
        let input = r#"{ // comment
            "compilerOptions": {
                "baseUrl": "." /* inline */,
                "paths": { "@/*": ["src/*"], "@ui/*": ["src/components/ui/*"] }
            }
        }"#;
        let cfg = TsConfig::parse(input, Path::new("/repo"));
        assert!(cfg.is_some());
        let cfg = cfg.unwrap_or_default();
        assert_eq!(cfg.paths.first().map(|p| p.0.as_str()), Some("@ui/*"));

        let cands = cfg.candidates("@/lib/api");
        assert_eq!(cands.first(), Some(&PathBuf::from("/repo/./src/lib/api")));
        assert_eq!(cands.last(), Some(&PathBuf::from("/repo/./@/lib/api")));
    }

    #[test]
    fn test_match_pattern() {
        assert_eq!(match_pattern("@/*", "@/components/Button"), Some("components/Button"));
        assert_eq!(match_pattern("@/*", "react"), None);
        assert_eq!(match_pattern("utils", "utils"), Some(""));
    }
}
