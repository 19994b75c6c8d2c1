//! Installer that delegates fetching and unpacking to an external program
//!
//! The program receives the source root and layer path as its last two
//! arguments and the dependency descriptor through the environment.
//! Transport and checksum verification are the program's responsibility.

use crate::config::schema::InstallerConfig;
use crate::dependency::{Dependency, Installer};
use crate::error::{BuildpackError, BuildpackResult};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, info};

/// Runs `command args... <cnb-path> <layer-path>`
#[derive(Debug, Clone)]
pub struct CommandInstaller {
    command: String,
    args: Vec<String>,
}

impl CommandInstaller {
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
        }
    }

    pub fn from_config(config: &InstallerConfig) -> Self {
        Self::new(config.command.clone(), config.args.clone())
    }

    /// Bare program names go through `PATH`; relative paths are rooted at
    /// the buildpack directory.
    fn program(&self, cnb_path: &Path) -> PathBuf {
        let command = Path::new(&self.command);
        if command.is_relative() && command.components().count() > 1 {
            cnb_path.join(command)
        } else {
            command.to_path_buf()
        }
    }
}

impl Installer for CommandInstaller {
    fn install(
        &self,
        dependency: &Dependency,
        cnb_path: &Path,
        layer_path: &Path,
    ) -> BuildpackResult<()> {
        let program = self.program(cnb_path);
        debug!(
            "Running installer {} for {} {}",
            program.display(),
            dependency.id,
            dependency.version
        );

        let output = Command::new(&program)
            .args(&self.args)
            .arg(cnb_path)
            .arg(layer_path)
            .env("DEPENDENCY_ID", &dependency.id)
            .env("DEPENDENCY_NAME", &dependency.name)
            .env("DEPENDENCY_VERSION", &dependency.version)
            .env("DEPENDENCY_URI", &dependency.uri)
            .env("DEPENDENCY_SHA256", &dependency.sha256)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| BuildpackError::InstallerSpawn {
                command: program.display().to_string(),
                source: e,
            })?;

        if !output.status.success() {
            return Err(BuildpackError::InstallFailed {
                id: dependency.id.clone(),
                version: dependency.version.clone(),
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        info!(
            "Installed {} {} into {}",
            dependency.id,
            dependency.version,
            layer_path.display()
        );
        Ok(())
    }
}
