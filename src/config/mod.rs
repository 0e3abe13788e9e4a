// src/config/mod.rs
pub mod types;

pub use self::types::{ExportConfig, GraphConfig, ResolveConfig, StrataConfig, GENERIC_SEGMENTS};

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{Result, StrataError};

pub const CONFIG_FILE: &str = "strata.toml";

impl StrataConfig {
    /// Loads `<root>/strata.toml`, or defaults when the file is absent.
    ///
    /// # Errors
    /// Returns error if the file exists but cannot be read or parsed.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE);
        if !path.is_file() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(|e| StrataError::io(e, &path))?;
        Self::parse(&content).map_err(|source| StrataError::Config { source, path })
    }

    /// Parses TOML text.
    ///
    /// # Errors
    /// Returns the TOML error on malformed input.
    pub fn parse(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
