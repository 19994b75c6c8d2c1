//! Error types for the Bundler buildpack
//!
//! All modules use `BuildpackResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for buildpack operations
pub type BuildpackResult<T> = Result<T, BuildpackError>;

/// All errors that can occur while detecting or building
#[derive(Error, Debug)]
pub enum BuildpackError {
    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to parse version from {path}: {reason}")]
    VersionHint { path: PathBuf, reason: String },

    // Resolution errors
    #[error("Buildpack plan has no entries to resolve")]
    EmptyPlan,

    #[error(
        "failed to satisfy {id:?} dependency for stack {stack:?} with version constraint {constraint:?}: no compatible versions. Supported versions are: [{supported}]"
    )]
    DependencyNotFound {
        id: String,
        stack: String,
        constraint: String,
        supported: String,
    },

    #[error("Invalid version constraint {constraint:?}: {reason}")]
    InvalidConstraint { constraint: String, reason: String },

    // Installer errors
    #[error("Failed to start installer {command}: {source}")]
    InstallerSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Installing {id} {version} failed (exit code {code}): {stderr}")]
    InstallFailed {
        id: String,
        version: String,
        code: i32,
        stderr: String,
    },

    // IO errors
    #[error("IO error: {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl BuildpackError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::VersionHint { .. } => {
                Some("Check that buildpack.yml is valid YAML with a `bundler.version` key")
            }
            Self::DependencyNotFound { .. } => {
                Some("Pick a version listed in buildpack.toml or remove the version pin")
            }
            Self::InvalidConstraint { .. } => Some("Use a version like 2.1.4, 2.1.x or 2.*"),
            Self::EmptyPlan => Some("Another buildpack must require bundler during detection"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = BuildpackError::DependencyNotFound {
            id: "bundler".to_string(),
            stack: "io.buildpacks.stacks.bionic".to_string(),
            constraint: "9.x".to_string(),
            supported: "1.17.3, 2.1.4".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("failed to satisfy \"bundler\" dependency"));
        assert!(message.contains("Supported versions are: [1.17.3, 2.1.4]"));
    }

    #[test]
    fn io_error_keeps_os_text() {
        let source = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "permission denied");
        let err = BuildpackError::io("resetting layer /layers/bundler", source);
        assert_eq!(
            err.to_string(),
            "IO error: resetting layer /layers/bundler: permission denied"
        );
    }

    #[test]
    fn installer_spawn_keeps_os_text() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "No such file or directory");
        let err = BuildpackError::InstallerSpawn {
            command: "/cnb/bin/install-dependency".to_string(),
            source,
        };
        assert_eq!(
            err.to_string(),
            "Failed to start installer /cnb/bin/install-dependency: No such file or directory"
        );
    }

    #[test]
    fn error_hint() {
        assert!(BuildpackError::EmptyPlan.hint().is_some());
        let err = BuildpackError::io("x", std::io::Error::other("boom"));
        assert_eq!(err.hint(), None);
    }
}
