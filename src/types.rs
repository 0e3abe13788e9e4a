// src/types.rs
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One file handed to the graph builder by the walker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    /// Path relative to the analysed root, `/`-separated. Doubles as node id.
    pub relative_path: String,
    pub absolute_path: PathBuf,
    /// Extension without the leading dot.
    pub extension: String,
    /// Directory part of `relative_path` (empty for root files).
    pub directory: String,
    /// Significance score from the scorer; opaque here.
    pub score: f64,
}

impl FileRecord {
    /// Builds a record for `absolute` under `root`, deriving the relative
    /// path, extension and directory.
    #[must_use]
    pub fn new(root: &Path, absolute: &Path, score: f64) -> Self {
        let relative = absolute.strip_prefix(root).unwrap_or(absolute);
        let relative_path = to_slash(relative);
        let directory = relative
            .parent()
            .map(to_slash)
            .unwrap_or_default();
        let extension = absolute
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_string();

        Self {
            relative_path,
            absolute_path: absolute.to_path_buf(),
            extension,
            directory,
            score,
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.relative_path
    }
}

fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
