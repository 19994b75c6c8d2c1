//! Cacheable layer directories
//!
//! A layer is a directory the build step owns exclusively, plus the flags
//! and metadata recorded in its manifest. The `dependency-sha` metadata of
//! the last successful install decides whether the layer can be reused.

pub mod manifest;

pub use manifest::LayerManifest;

use crate::constants::DEPENDENCY_SHA_KEY;
use crate::error::{BuildpackError, BuildpackResult};
use crate::plan::Metadata;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// The layers directory handed to the build step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layers {
    pub path: PathBuf,
}

impl Layers {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Open a layer, creating its directory if needed.
    ///
    /// Existing contents are left alone and persisted metadata is loaded.
    /// Flags always start cleared; the caller decides them per build.
    pub fn get(&self, name: &str) -> BuildpackResult<Layer> {
        let path = self.path.join(name);
        fs::create_dir_all(&path)
            .map_err(|e| BuildpackError::io(format!("creating layer {}", path.display()), e))?;

        let metadata = LayerManifest::read(&self.manifest_path(name))?
            .map(|m| m.metadata)
            .unwrap_or_default();

        Ok(Layer {
            name: name.to_string(),
            path,
            build: false,
            launch: false,
            cache: false,
            metadata,
        })
    }

    fn manifest_path(&self, name: &str) -> PathBuf {
        self.path.join(format!("{}.toml", name))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub name: String,
    pub path: PathBuf,
    pub build: bool,
    pub launch: bool,
    pub cache: bool,
    pub metadata: Metadata,
}

impl Layer {
    /// Fingerprint of the dependency installed by the last successful build
    pub fn fingerprint(&self) -> Option<&str> {
        self.metadata.get(DEPENDENCY_SHA_KEY).and_then(|v| v.as_str())
    }

    /// `<layers>/<name>.toml`
    pub fn manifest_path(&self) -> PathBuf {
        let parent = self.path.parent().unwrap_or_else(|| Path::new(""));
        parent.join(format!("{}.toml", self.name))
    }

    /// Empty the layer for a fresh install.
    ///
    /// The manifest goes first: if anything after this fails, no record is
    /// left claiming the directory holds a finished install. Flags are kept.
    pub fn reset(&mut self) -> BuildpackResult<()> {
        debug!("Resetting layer {}", self.path.display());
        LayerManifest::remove(&self.manifest_path())?;

        match fs::remove_dir_all(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                return Err(BuildpackError::io(
                    format!("removing layer {}", self.path.display()),
                    e,
                ))
            }
        }

        fs::create_dir_all(&self.path).map_err(|e| {
            BuildpackError::io(format!("recreating layer {}", self.path.display()), e)
        })?;

        self.metadata = Metadata::new();
        Ok(())
    }

    /// Write the flags and metadata to `<layers>/<name>.toml`
    pub fn persist(&self) -> BuildpackResult<()> {
        LayerManifest {
            launch: self.launch,
            build: self.build,
            cache: self.cache,
            metadata: self.metadata.clone(),
        }
        .write(&self.manifest_path())
    }
}
