// src/graph/edges.rs
//! Edge construction: resolve a file's imports, keep those landing inside
//! the analysed set, and fold them into one edge per target.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use path_clean::PathClean;
use tracing::debug;

use super::declarations::{FileDeclarations, ImportDecl};
use super::model::{TYPE_ONLY_WEIGHT, VALUE_WEIGHT};
use super::resolver::ImportResolver;
use crate::lang::SyntaxFamily;

/// Absolute (cleaned) path to node index for every analysed file.
pub type NodeIndex = HashMap<PathBuf, usize>;

/// One import that landed on an analysed file.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedImport {
    pub target: usize,
    pub names: Vec<String>,
    pub is_type_only: bool,
}

/// An aggregated edge between two node indices.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeDraft {
    pub source: usize,
    pub target: usize,
    pub imported_names: Vec<String>,
    pub is_type_only: bool,
    pub weight: f64,
}

/// Which file is importing, and in which syntax family it was parsed.
#[derive(Debug, Clone, Copy)]
pub struct Importer<'a> {
    pub path: &'a Path,
    pub family: SyntaxFamily,
}

/// Resolves every import of `importer` and keeps the internal ones.
#[must_use]
pub fn resolve_imports(
    importer: Importer<'_>,
    decls: &FileDeclarations,
    resolver: &ImportResolver,
    index: &NodeIndex,
) -> Vec<ResolvedImport> {
    let mut out = Vec::new();
    for decl in &decls.imports {
        if decl.is_builtin {
            continue;
        }
        if importer.family == SyntaxFamily::Indentation && !decl.has_namespace {
            resolve_from_import(importer, decl, resolver, index, &mut out);
            continue;
        }
        match lookup(&decl.source, importer, resolver, index) {
            Some(target) => out.push(ResolvedImport {
                target,
                names: decl.imported_names.clone(),
                is_type_only: decl.is_type_only,
            }),
            None if decl.is_relative => {
                debug!(importer = %importer.path.display(), spec = %decl.source, "unresolved relative import");
            }
            None => {}
        }
    }
    out
}

fn lookup(spec: &str, importer: Importer<'_>, resolver: &ImportResolver, index: &NodeIndex) -> Option<usize> {
    let resolved = resolver.resolve_as(spec, importer.path, importer.family)?;
    index.get(&resolved.clean()).copied()
}

/// `from pkg import a, b` may name submodules of `pkg` rather than
/// attributes of `pkg/__init__.py`. Names that resolve as submodules get
/// their own edge; the rest stay on the package edge.
fn resolve_from_import(
    importer: Importer<'_>,
    decl: &ImportDecl,
    resolver: &ImportResolver,
    index: &NodeIndex,
    out: &mut Vec<ResolvedImport>,
) {
    let primary = resolver.resolve_as(&decl.source, importer.path, importer.family);
    let is_package_init = primary
        .as_deref()
        .and_then(Path::file_stem)
        .is_some_and(|stem| stem == SyntaxFamily::Indentation.index_stem());
    let primary = primary.and_then(|p| index.get(&p.clean()).copied());

    let mut leftover = Vec::new();
    for name in &decl.imported_names {
        let submodule = if primary.is_none() || is_package_init {
            lookup(&submodule_spec(&decl.source, name), importer, resolver, index)
        } else {
            None
        };
        match submodule {
            Some(target) => out.push(ResolvedImport {
                target,
                names: vec![name.clone()],
                is_type_only: decl.is_type_only,
            }),
            None => leftover.push(name.clone()),
        }
    }

    if let Some(target) = primary {
        if !leftover.is_empty() || decl.imported_names.is_empty() {
            out.push(ResolvedImport {
                target,
                names: leftover,
                is_type_only: decl.is_type_only,
            });
        }
    } else if decl.is_relative && !leftover.is_empty() {
        debug!(importer = %importer.path.display(), spec = %decl.source, "unresolved relative import");
    }
}

fn submodule_spec(source: &str, name: &str) -> String {
    if source.chars().all(|c| c == '.') {
        format!("{source}{name}")
    } else {
        format!("{source}.{name}")
    }
}

/// Folds the resolved imports of one file into one edge per target, in
/// order of first appearance. Names are deduplicated; the edge is type-only
/// only when every contributing import was.
#[must_use]
pub fn aggregate(source: usize, imports: &[ResolvedImport]) -> Vec<EdgeDraft> {
    let mut drafts: Vec<EdgeDraft> = Vec::new();
    let mut slots: HashMap<usize, usize> = HashMap::new();

    for import in imports {
        let slot = *slots.entry(import.target).or_insert_with(|| {
            drafts.push(EdgeDraft {
                source,
                target: import.target,
                imported_names: Vec::new(),
                is_type_only: true,
                weight: TYPE_ONLY_WEIGHT,
            });
            drafts.len() - 1
        });

        if let Some(draft) = drafts.get_mut(slot) {
            for name in &import.names {
                if !draft.imported_names.contains(name) {
                    draft.imported_names.push(name.clone());
                }
            }
            if !import.is_type_only {
                draft.is_type_only = false;
                draft.weight = VALUE_WEIGHT;
            }
        }
    }

    drafts
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn import(target: usize, names: &[&str], type_only: bool) -> ResolvedImport {
        ResolvedImport {
            target,
            names: names.iter().map(|n| (*n).to_string()).collect(),
            is_type_only: type_only,
        }
    }

    #[test]
    fn test_aggregate_merges_per_target() {
        let drafts = aggregate(
            0,
            &[
                import(2, &["a"], false),
                import(1, &["X"], true),
                import(2, &["b", "a"], true),
            ],
        );

        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[0].target, 2);
        assert_eq!(drafts[0].imported_names, vec!["a", "b"]);
        assert!(!drafts[0].is_type_only);
        assert!((drafts[0].weight - 1.0).abs() < f64::EPSILON);

        assert_eq!(drafts[1].target, 1);
        assert!(drafts[1].is_type_only);
        assert!((drafts[1].weight - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_aggregate_self_loop_and_side_effect() {
        let drafts = aggregate(3, &[import(3, &[], false)]);
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].source, 3);
        assert_eq!(drafts[0].target, 3);
        assert!(drafts[0].imported_names.is_empty());
    }

    #[test]
    fn test_submodule_spec() {
        assert_eq!(submodule_spec(".", "models"), ".models");
        assert_eq!(submodule_spec("..", "x"), "..x");
        assert_eq!(submodule_spec(".pkg", "x"), ".pkg.x");
        assert_eq!(submodule_spec("app.core", "db"), "app.core.db");
    }
}
