//! Layer content metadata file
//!
//! Each layer directory `<layers>/<name>/` has a sibling `<name>.toml`
//! recording its flags and the metadata of the last successful install.

use crate::error::{BuildpackError, BuildpackResult};
use crate::plan::Metadata;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Parsed `<name>.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayerManifest {
    #[serde(default)]
    pub launch: bool,

    #[serde(default)]
    pub build: bool,

    #[serde(default)]
    pub cache: bool,

    #[serde(default)]
    pub metadata: Metadata,
}

impl LayerManifest {
    /// Read a manifest; `None` if the file does not exist
    pub fn read(path: &Path) -> BuildpackResult<Option<Self>> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(BuildpackError::io(
                    format!("reading layer metadata {}", path.display()),
                    e,
                ))
            }
        };

        Self::parse(path, &content).map(Some)
    }

    pub fn parse(path: &Path, content: &str) -> BuildpackResult<Self> {
        toml::from_str(content).map_err(|e| BuildpackError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Write through a temporary file and rename so a crash never leaves
    /// a truncated manifest behind.
    pub fn write(&self, path: &Path) -> BuildpackResult<()> {
        let content = toml::to_string(self)?;
        let tmp = path.with_extension("toml.tmp");

        fs::write(&tmp, content)
            .map_err(|e| BuildpackError::io(format!("writing {}", tmp.display()), e))?;
        fs::rename(&tmp, path).map_err(|e| {
            BuildpackError::io(
                format!("renaming {} to {}", tmp.display(), path.display()),
                e,
            )
        })
    }

    /// Remove the manifest; missing is fine
    pub fn remove(path: &Path) -> BuildpackResult<()> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(BuildpackError::io(
                format!("removing layer metadata {}", path.display()),
                e,
            )),
        }
    }
}
