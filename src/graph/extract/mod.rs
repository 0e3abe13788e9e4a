// src/graph/extract/mod.rs
//! Lexical import/export extraction.
//!
//! Each file is dispatched once to the grammar of its [`SyntaxFamily`].
//! Nothing here returns an error: read and dispatch failures are recorded
//! as strings in [`FileDeclarations::errors`].

pub mod cache;
mod curly;
mod indent;

use std::fs;
use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::graph::declarations::FileDeclarations;
use crate::lang::SyntaxFamily;

pub use cache::DeclarationCache;

pub const READ_FAILED: &str = "Failed to read file";
pub const UNSUPPORTED: &str = "Unsupported file type";

/// Extracts declarations from in-memory source. A leading byte order mark
/// is dropped; it never spans a newline so line numbers are unchanged.
#[must_use]
pub fn extract_source(content: &str, family: SyntaxFamily) -> FileDeclarations {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    match family {
        SyntaxFamily::CurlyBrace => curly::extract(content),
        SyntaxFamily::Indentation => indent::extract(content),
    }
}

/// Reads files from disk and memoises their declarations by path.
#[derive(Debug, Default)]
pub struct DeclarationExtractor {
    cache: DeclarationCache,
}

impl DeclarationExtractor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the declarations of `path`, parsing it on a cache miss.
    #[must_use]
    pub fn extract_file(&self, path: &Path) -> Arc<FileDeclarations> {
        if let Some(hit) = self.cache.get(path) {
            return hit;
        }

        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            if SyntaxFamily::from_ext(ext).is_none() {
                return Arc::new(FileDeclarations::failed(UNSUPPORTED));
            }
        }

        let content = match fs::read(path) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "unreadable source file");
                return Arc::new(FileDeclarations::failed(READ_FAILED));
            }
        };

        let decls = match SyntaxFamily::detect(path, &content) {
            Some(family) => extract_source(&content, family),
            None => FileDeclarations::failed(UNSUPPORTED),
        };

        let decls = Arc::new(decls);
        self.cache.insert(path, Arc::clone(&decls));
        decls
    }

    /// Drops every cached entry.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    #[must_use]
    pub fn cache(&self) -> &DeclarationCache {
        &self.cache
    }
}

/// Maps byte offsets to 1-based line numbers.
pub(crate) struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    pub(crate) fn new(text: &str) -> Self {
        let mut starts = vec![0];
        starts.extend(text.match_indices('\n').map(|(i, _)| i + 1));
        Self { starts }
    }

    pub(crate) fn line_of(&self, offset: usize) -> usize {
        self.starts.partition_point(|&s| s <= offset)
    }
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_line_index() {
        let idx = LineIndex::new("a\nbb\n\nc");
        assert_eq!(idx.line_of(0), 1);
        assert_eq!(idx.line_of(2), 2);
        assert_eq!(idx.line_of(5), 3);
        assert_eq!(idx.line_of(6), 4);
    }

    #[test]
    fn test_missing_file_reports_read_error() {
        let ex = DeclarationExtractor::new();
        let decls = ex.extract_file(Path::new("/definitely/not/here.ts"));
        assert_eq!(decls.errors, vec![READ_FAILED.to_string()]);
        assert!(decls.imports.is_empty());
        assert!(ex.cache().is_empty());
    }

    #[test]
    fn test_unsupported_extension() {
        let ex = DeclarationExtractor::new();
        let decls = ex.extract_file(Path::new("/tmp/whatever.rb"));
        assert_eq!(decls.errors, vec![UNSUPPORTED.to_string()]);
    }

    #[test]
    fn test_empty_source_is_clean() {
        let decls = extract_source("", SyntaxFamily::CurlyBrace);
        assert_eq!(decls, FileDeclarations::default());
        let decls = extract_source("", SyntaxFamily::Indentation);
        assert_eq!(decls, FileDeclarations::default());
    }

    #[test]
    fn test_byte_order_mark_is_ignored() {
        let cases = [
            ("\u{feff}import { a } from './a';", SyntaxFamily::CurlyBrace, "./a"),
            ("\u{feff}from .a import b", SyntaxFamily::Indentation, ".a"),
        ];
        for (code, family, source) in cases {
            let decls = extract_source(code, family);
            assert_eq!(decls.imports.len(), 1, "Failed: {source}");
            assert_eq!(decls.imports[0].source, source, "Failed: {source}");
            assert_eq!(decls.imports[0].line, 1, "Failed: {source}");
        }

        let decls = extract_source("\u{feff}def run():\n    pass\n", SyntaxFamily::Indentation);
        assert_eq!(decls.exports.len(), 1);
        assert_eq!(decls.exports[0].name, "run");
    }
}
