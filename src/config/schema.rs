//! Configuration schema for the Bundler buildpack
//!
//! Configuration is read from `installer.toml` in the buildpack directory
//! unless a path is given on the command line.

use crate::constants::BUILDPACK_YML_SOURCE;
use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Plan entry resolution settings
    pub resolver: ResolverConfig,

    /// External installer settings
    pub installer: InstallerConfig,
}

/// General settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_format: "text".to_string(),
        }
    }
}

/// Version source ranking used when several plan entries compete
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Recognized version sources, highest priority first.
    /// Entries with any other source rank below all of these.
    pub priorities: Vec<String>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            priorities: vec![BUILDPACK_YML_SOURCE.to_string()],
        }
    }
}

/// Program that fetches and unpacks a dependency into a layer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallerConfig {
    /// Command to run; relative paths resolve against the buildpack directory
    pub command: String,

    /// Arguments placed before the source root and layer path
    pub args: Vec<String>,
}

impl Default for InstallerConfig {
    fn default() -> Self {
        Self {
            command: "bin/install-dependency".to_string(),
            args: vec![],
        }
    }
}
