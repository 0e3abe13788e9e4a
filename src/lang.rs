// src/lang.rs
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// The two grammar families the extractor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SyntaxFamily {
    /// ES modules, CommonJS and dynamic `import()` (JS/TS and friends).
    CurlyBrace,
    /// Python-style `import` / `from ... import`.
    Indentation,
}

impl SyntaxFamily {
    #[must_use]
    pub fn from_ext(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.') {
            "ts" | "tsx" | "js" | "jsx" | "mjs" | "cjs" | "mts" | "cts" => Some(Self::CurlyBrace),
            "py" | "pyi" | "pyw" => Some(Self::Indentation),
            _ => None,
        }
    }

    /// Picks the family from the extension, falling back to the shebang line
    /// for extensionless scripts.
    #[must_use]
    pub fn detect(path: &Path, content: &str) -> Option<Self> {
        match path.extension().and_then(|s| s.to_str()) {
            Some(ext) => Self::from_ext(ext),
            None => Self::from_shebang(content),
        }
    }

    /// Like [`Self::detect`], reading only the first line of an
    /// extensionless file from disk.
    #[must_use]
    pub fn of_file(path: &Path) -> Option<Self> {
        if let Some(ext) = path.extension().and_then(|s| s.to_str()) {
            return Self::from_ext(ext);
        }
        let mut first = String::new();
        BufReader::new(File::open(path).ok()?).read_line(&mut first).ok()?;
        Self::from_shebang(&first)
    }

    #[must_use]
    pub fn from_shebang(content: &str) -> Option<Self> {
        let first = content.trim_start_matches('\u{feff}').lines().next()?;
        if !first.starts_with("#!") {
            return None;
        }
        if first.contains("python") {
            Some(Self::Indentation)
        } else if first.contains("node") || first.contains("deno") || first.contains("bun") {
            Some(Self::CurlyBrace)
        } else {
            None
        }
    }

    /// File stem probed when a specifier names a directory.
    #[must_use]
    pub fn index_stem(self) -> &'static str {
        match self {
            Self::CurlyBrace => "index",
            Self::Indentation => "__init__",
        }
    }
}
