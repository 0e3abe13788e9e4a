// src/graph/resolver.rs
//! Maps a module specifier to a file on disk.
//!
//! Relative specifiers resolve against the importing file's directory,
//! probing in a fixed order: the literal path, each configured extension
//! appended, then `<path>/index.<ext>` (`__init__` for Python). Builtins and
//! bare package names resolve to `None` unless a tsconfig alias or, for
//! Python, the base directory places them on disk.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use path_clean::PathClean;
use serde::{Deserialize, Serialize};

use crate::graph::specifier::{self, SpecifierClass};
use crate::graph::tsconfig::TsConfig;
use crate::lang::SyntaxFamily;

pub const DEFAULT_EXTENSIONS: &[&str] = &[
    ".ts", ".tsx", ".js", ".jsx", ".mjs", ".cjs", ".mts", ".cts", ".json", ".py", ".pyi",
];

/// Compiled ESM imports name the emitted `.js` file; sources are `.ts`.
const ESM_SOURCE_SWAPS: &[(&str, &[&str])] = &[
    ("js", &["ts", "tsx"]),
    ("jsx", &["tsx"]),
    ("mjs", &["mts"]),
    ("cjs", &["cts"]),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveOptions {
    pub base_dir: PathBuf,
    pub extensions: Vec<String>,
    pub use_tsconfig: bool,
}

impl ResolveOptions {
    #[must_use]
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| (*e).to_string()).collect(),
            use_tsconfig: true,
        }
    }

    #[must_use]
    pub fn with_extensions(mut self, extensions: &[&str]) -> Self {
        self.extensions = extensions.iter().map(|e| (*e).to_string()).collect();
        self
    }
}

/// Resolver bound to one project root. Loads tsconfig aliases once.
#[derive(Debug, Clone)]
pub struct ImportResolver {
    options: ResolveOptions,
    tsconfig: Option<TsConfig>,
}

impl ImportResolver {
    #[must_use]
    pub fn new(options: ResolveOptions) -> Self {
        let tsconfig = if options.use_tsconfig {
            TsConfig::load(&options.base_dir)
        } else {
            None
        };
        Self { options, tsconfig }
    }

    #[must_use]
    pub fn options(&self) -> &ResolveOptions {
        &self.options
    }

    /// Resolves `spec` as written in `importer` to an absolute path. The
    /// importer's family comes from its extension or, failing that, its
    /// shebang line.
    #[must_use]
    pub fn resolve(&self, spec: &str, importer: &Path) -> Option<PathBuf> {
        let family = SyntaxFamily::of_file(importer).unwrap_or(SyntaxFamily::CurlyBrace);
        self.resolve_as(spec, importer, family)
    }

    /// Resolves `spec` under the rules of an already-detected `family`.
    #[must_use]
    pub fn resolve_as(&self, spec: &str, importer: &Path, family: SyntaxFamily) -> Option<PathBuf> {
        match specifier::classify(spec, family) {
            SpecifierClass::Builtin => None,
            SpecifierClass::Relative => {
                let base = self.relative_base(spec, importer, family)?;
                self.probe(&base, family)
            }
            SpecifierClass::Package => self.resolve_package(spec, family),
        }
    }

    fn relative_base(&self, spec: &str, importer: &Path, family: SyntaxFamily) -> Option<PathBuf> {
        let dir = importer.parent()?;
        match family {
            SyntaxFamily::CurlyBrace => match spec.strip_prefix('/') {
                Some(rooted) => Some(self.options.base_dir.join(rooted)),
                None => Some(dir.join(spec)),
            },
            SyntaxFamily::Indentation => {
                let rest = spec.trim_start_matches('.');
                let levels = spec.len() - rest.len();
                let mut base = dir;
                for _ in 1..levels {
                    base = base.parent()?;
                }
                if rest.is_empty() {
                    Some(base.to_path_buf())
                } else {
                    Some(base.join(rest.replace('.', "/")))
                }
            }
        }
    }

    fn resolve_package(&self, spec: &str, family: SyntaxFamily) -> Option<PathBuf> {
        match family {
            SyntaxFamily::CurlyBrace => self
                .tsconfig
                .as_ref()?
                .candidates(spec)
                .iter()
                .find_map(|candidate| self.probe(candidate, family)),
            SyntaxFamily::Indentation => {
                let base = self.options.base_dir.join(spec.replace('.', "/"));
                self.probe(&base, family)
            }
        }
    }

    fn probe(&self, base: &Path, family: SyntaxFamily) -> Option<PathBuf> {
        let base = base.to_path_buf().clean();
        if base.is_file() {
            return Some(base);
        }

        let exts: Vec<&str> = self
            .options
            .extensions
            .iter()
            .map(|e| e.trim_start_matches('.'))
            .filter(|e| accepts(family, e))
            .collect();

        exts.iter()
            .map(|ext| append_ext(&base, ext))
            .chain(esm_source_swaps(&base, family))
            .chain(
                exts.iter()
                    .map(|ext| base.join(format!("{}.{ext}", family.index_stem()))),
            )
            .find(|candidate| candidate.is_file())
    }
}

/// Resolves `spec` with a throwaway resolver. Prefer [`ImportResolver`] when
/// resolving many specifiers against one root.
#[must_use]
pub fn resolve(spec: &str, importer: &Path, options: &ResolveOptions) -> Option<PathBuf> {
    ImportResolver::new(options.clone()).resolve(spec, importer)
}

/// Python sources only probe Python extensions; curly sources probe their own
/// plus data files such as `.json`.
fn accepts(family: SyntaxFamily, ext: &str) -> bool {
    match SyntaxFamily::from_ext(ext) {
        Some(f) => f == family,
        None => family == SyntaxFamily::CurlyBrace,
    }
}

/// `./foo.service` + `ts` -> `./foo.service.ts` (no extension replacement).
fn append_ext(base: &Path, ext: &str) -> PathBuf {
    let mut s: OsString = base.as_os_str().to_owned();
    s.push(".");
    s.push(ext);
    PathBuf::from(s)
}

fn esm_source_swaps(base: &Path, family: SyntaxFamily) -> Vec<PathBuf> {
    if family != SyntaxFamily::CurlyBrace {
        return Vec::new();
    }
    let Some(ext) = base.extension().and_then(|e| e.to_str()) else {
        return Vec::new();
    };
    ESM_SOURCE_SWAPS
        .iter()
        .filter(|(from, _)| *from == ext)
        .flat_map(|(_, to)| to.iter().map(|t| base.with_extension(t)))
        .collect()
}
