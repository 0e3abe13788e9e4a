// src/graph/extract/cache.rs
//! Per-path memo of extraction results.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use crate::graph::declarations::FileDeclarations;

/// Process-local cache keyed by file path. Clearing only costs re-parsing.
#[derive(Debug, Default)]
pub struct DeclarationCache {
    entries: RwLock<HashMap<PathBuf, Arc<FileDeclarations>>>,
}

impl DeclarationCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, path: &Path) -> Option<Arc<FileDeclarations>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(path).cloned()
    }

    pub fn insert(&self, path: &Path, decls: Arc<FileDeclarations>) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(path.to_path_buf(), decls);
    }

    pub fn clear(&self) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
