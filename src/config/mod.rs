//! Configuration management for the Bundler buildpack

pub mod schema;

pub use schema::Config;

use crate::error::{BuildpackError, BuildpackResult};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name looked up in the buildpack directory
pub const CONFIG_FILE: &str = "installer.toml";

/// Configuration manager
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a config manager for the default file in a buildpack directory
    pub fn for_buildpack(buildpack_dir: &Path) -> Self {
        Self {
            config_path: buildpack_dir.join(CONFIG_FILE),
        }
    }

    /// Create a config manager with a custom path
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Load configuration, falling back to defaults if the file is absent
    pub fn load(&self) -> BuildpackResult<Config> {
        if !self.config_path.exists() {
            debug!(
                "Config file {} not found, using defaults",
                self.config_path.display()
            );
            return Ok(Config::default());
        }

        self.load_from_file(&self.config_path)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(&self, path: &Path) -> BuildpackResult<Config> {
        let content = fs::read_to_string(path)
            .map_err(|e| BuildpackError::io(format!("reading config from {}", path.display()), e))?;

        toml::from_str(&content).map_err(|e| BuildpackError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Get the config file path
    pub fn path(&self) -> &Path {
        &self.config_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn load_default_when_missing() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::for_buildpack(temp.path());

        let config = manager.load().unwrap();
        assert_eq!(config.resolver.priorities, vec!["buildpack.yml"]);
        assert_eq!(manager.path(), temp.path().join("installer.toml"));
    }

    #[test]
    fn load_custom_priorities() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("custom.toml");
        fs::write(
            &path,
            "[resolver]\npriorities = [\"buildpack.yml\", \"Gemfile.lock\"]\n",
        )
        .unwrap();

        let config = ConfigManager::with_path(path).load().unwrap();
        assert_eq!(
            config.resolver.priorities,
            vec!["buildpack.yml", "Gemfile.lock"]
        );
    }

    #[test]
    fn invalid_file_errors() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("installer.toml");
        fs::write(&path, "[resolver\npriorities = 3").unwrap();

        let err = ConfigManager::with_path(path).load().unwrap_err();
        assert!(matches!(err, BuildpackError::ConfigInvalid { .. }));
    }
}
