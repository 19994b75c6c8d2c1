//! Dependency descriptors and the collaborators that produce and install them
//!
//! The catalog turns a resolved plan entry into a concrete descriptor; the
//! installer places that descriptor's artifact into a layer directory.

pub mod catalog;
pub mod installer;

pub use catalog::{BuildpackCatalog, BuildpackInfo};
pub use installer::CommandInstaller;

use crate::error::BuildpackResult;
use chrono::{DateTime, Utc};
use std::path::Path;

/// A fully specified installable artifact
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dependency {
    pub id: String,
    pub name: String,
    pub version: String,
    pub sha256: String,
    pub uri: String,
    pub stacks: Vec<String>,
    pub deprecation_date: Option<DateTime<Utc>>,
}

/// Looks up the dependency satisfying an id, version constraint and stack
pub trait DependencyCatalog {
    fn resolve(
        &self,
        path: &Path,
        id: &str,
        version: &str,
        stack: &str,
    ) -> BuildpackResult<Dependency>;
}

/// Installs a dependency's artifact into a layer directory
pub trait Installer {
    fn install(
        &self,
        dependency: &Dependency,
        cnb_path: &Path,
        layer_path: &Path,
    ) -> BuildpackResult<()>;
}
