//! Reads the Bundler version pinned in an application's `buildpack.yml`
//!
//! ```yaml
//! bundler:
//!   version: 2.1.4
//! ```

use crate::error::{BuildpackError, BuildpackResult};
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Source of a version hint
pub trait VersionParser {
    /// Empty string means the file expresses no opinion
    fn parse_version(&self, path: &Path) -> BuildpackResult<String>;
}

#[derive(Debug, Default, Deserialize)]
struct BuildpackYml {
    #[serde(default)]
    bundler: BundlerSection,
}

#[derive(Debug, Default, Deserialize)]
struct BundlerSection {
    #[serde(default)]
    version: Option<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BuildpackYmlParser;

impl BuildpackYmlParser {
    pub fn new() -> Self {
        Self
    }
}

impl VersionParser for BuildpackYmlParser {
    fn parse_version(&self, path: &Path) -> BuildpackResult<String> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(String::new()),
            Err(e) => {
                return Err(BuildpackError::VersionHint {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                })
            }
        };

        if content.trim().is_empty() {
            return Ok(String::new());
        }

        let parsed: BuildpackYml =
            serde_yaml::from_str(&content).map_err(|e| BuildpackError::VersionHint {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        Ok(parsed.bundler.version.unwrap_or_default())
    }
}
