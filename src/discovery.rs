// src/discovery.rs
//! Source file discovery for the command-line driver.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

use crate::error::{Result, StrataError};
use crate::lang::SyntaxFamily;
use crate::types::FileRecord;

pub const PRUNE_DIRS: &[&str] = &[
    "node_modules",
    ".git",
    "target",
    "dist",
    "build",
    "__pycache__",
    ".venv",
    "venv",
];

#[must_use]
pub fn should_prune(name: &str) -> bool {
    PRUNE_DIRS.contains(&name)
}

/// Walks `root` and returns a record (score `0.0`) for every file either
/// syntax family can read, sorted by relative path.
///
/// # Errors
/// Returns error if `root` is not a readable directory.
pub fn discover(root: &Path) -> Result<Vec<FileRecord>> {
    if !root.is_dir() {
        return Err(StrataError::Walk(format!(
            "{} is not a directory",
            root.display()
        )));
    }

    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !should_prune(&e.file_name().to_string_lossy()));

    let (paths, error_count) = accumulate_walker(walker);
    if error_count > 0 {
        warn!(errors = error_count, "entries skipped during file walk");
    }

    let mut records: Vec<FileRecord> = paths
        .into_iter()
        .filter(|p| is_source(p))
        .map(|p| FileRecord::new(root, &p, 0.0))
        .collect();
    records.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    Ok(records)
}

fn accumulate_walker<I>(walker: I) -> (Vec<PathBuf>, usize)
where
    I: Iterator<Item = walkdir::Result<walkdir::DirEntry>>,
{
    let mut paths = Vec::new();
    let mut errors = 0;
    for item in walker {
        match item {
            Ok(entry) if entry.file_type().is_file() => paths.push(entry.into_path()),
            Ok(_) => {}
            Err(_) => errors += 1,
        }
    }
    (paths, errors)
}

fn is_source(path: &Path) -> bool {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => SyntaxFamily::from_ext(ext).is_some(),
        None => fs::read_to_string(path)
            .ok()
            .and_then(|content| SyntaxFamily::from_shebang(&content))
            .is_some(),
    }
}
