//! Pipeline configuration.
//!
//! Loaded from `resume-extract.toml`:
//!
//! ```toml
//! # Files larger than this are rejected without being read.
//! max_file_size_bytes = 10485760
//! ```

use crate::{ResumeExtractError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = "resume-extract.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExtractionConfig {
    /// Upper bound on a file's size. `None` means unlimited.
    #[serde(default)]
    pub max_file_size_bytes: Option<u64>,
}

impl ExtractionConfig {
    /// True when a file of `byte_length` bytes exceeds the configured limit.
    pub fn exceeds_size_limit(&self, byte_length: u64) -> bool {
        self.max_file_size_bytes.is_some_and(|limit| byte_length > limit)
    }

    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ResumeExtractError::validation(format!("Failed to read config file {}: {}", path.as_ref().display(), e))
        })?;

        toml::from_str(&content).map_err(|e| {
            ResumeExtractError::validation(format!("Invalid TOML in {}: {}", path.as_ref().display(), e))
        })
    }

    /// Discover configuration file in parent directories.
    ///
    /// Searches for `resume-extract.toml` in the current directory and its parents.
    pub fn discover() -> Result<Option<Self>> {
        let current = std::env::current_dir().map_err(ResumeExtractError::Io)?;
        Self::discover_from(&current)
    }

    /// Same as [`discover`](Self::discover), starting at `start`.
    pub fn discover_from(start: &Path) -> Result<Option<Self>> {
        for dir in start.ancestors() {
            let candidate = dir.join(CONFIG_FILE_NAME);
            if candidate.exists() {
                tracing::debug!(path = %candidate.display(), "Loading configuration");
                return Ok(Some(Self::from_toml_file(candidate)?));
            }
        }

        Ok(None)
    }
}
