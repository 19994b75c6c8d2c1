//! Dependency catalog backed by `buildpack.toml`
//!
//! The buildpack ships a list of installable dependencies under
//! `[[metadata.dependencies]]` plus per-id default constraints under
//! `[metadata.default-versions]`. Resolution filters by id and stack,
//! applies the version constraint and picks the highest match.

use crate::dependency::{Dependency, DependencyCatalog};
use crate::error::{BuildpackError, BuildpackResult};
use chrono::{DateTime, NaiveDate, Utc};
use semver::{Version, VersionReq};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Parsed `buildpack.toml`
#[derive(Debug, Clone, Default, Deserialize)]
struct BuildpackToml {
    #[serde(default)]
    buildpack: BuildpackInfo,

    #[serde(default)]
    metadata: CatalogMetadata,
}

/// `[buildpack]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BuildpackInfo {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub version: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct CatalogMetadata {
    #[serde(default, rename = "default-versions")]
    default_versions: HashMap<String, String>,

    #[serde(default)]
    dependencies: Vec<DependencyEntry>,
}

/// One `[[metadata.dependencies]]` table
#[derive(Debug, Clone, Deserialize)]
struct DependencyEntry {
    id: String,
    #[serde(default)]
    name: String,
    version: String,
    #[serde(default)]
    sha256: String,
    #[serde(default)]
    uri: String,
    #[serde(default)]
    stacks: Vec<String>,
    /// TOML datetime, RFC 3339 string or plain date
    deprecation_date: Option<toml::Value>,
}

/// Catalog reading the dependency list from a `buildpack.toml` file
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildpackCatalog;

impl BuildpackCatalog {
    pub fn new() -> Self {
        Self
    }

    /// Read the `[buildpack]` section (name and version shown in the title)
    pub fn buildpack_info(path: &Path) -> BuildpackResult<BuildpackInfo> {
        Ok(load(path)?.buildpack)
    }
}

fn load(path: &Path) -> BuildpackResult<BuildpackToml> {
    let content = fs::read_to_string(path)
        .map_err(|e| BuildpackError::io(format!("reading {}", path.display()), e))?;

    toml::from_str(&content).map_err(|e| BuildpackError::ConfigInvalid {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Turn a version constraint into a requirement.
///
/// A complete version pins exactly and a bare partial version such as
/// `2.1` only matches its own patch releases (`~2.1`). Anything else uses
/// semver requirement syntax, which accepts `x`, `X` and `*` wildcards.
fn parse_constraint(constraint: &str) -> BuildpackResult<VersionReq> {
    let constraint = constraint.trim();
    let requirement = if Version::parse(constraint).is_ok() {
        VersionReq::parse(&format!("={}", constraint))
    } else if is_partial_version(constraint) {
        VersionReq::parse(&format!("~{}", constraint))
    } else {
        VersionReq::parse(constraint)
    };

    requirement.map_err(|e| BuildpackError::InvalidConstraint {
        constraint: constraint.to_string(),
        reason: e.to_string(),
    })
}

/// `2` or `2.1`: numeric parts only, no operator or wildcard
fn is_partial_version(constraint: &str) -> bool {
    let parts: Vec<&str> = constraint.split('.').collect();
    parts.len() < 3
        && parts
            .iter()
            .all(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()))
}

fn parse_deprecation_date(
    path: &Path,
    value: &toml::Value,
) -> BuildpackResult<Option<DateTime<Utc>>> {
    let text = match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Datetime(d) => d.to_string(),
        other => {
            return Err(BuildpackError::ConfigInvalid {
                path: path.to_path_buf(),
                reason: format!("deprecation_date must be a date, found {}", other.type_str()),
            })
        }
    };

    if text.is_empty() {
        return Ok(None);
    }

    if let Ok(date) = DateTime::parse_from_rfc3339(&text) {
        return Ok(Some(date.with_timezone(&Utc)));
    }

    NaiveDate::parse_from_str(&text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|d| Some(d.and_utc()))
        .ok_or_else(|| BuildpackError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: format!("invalid deprecation_date {:?}", text),
        })
}

impl DependencyCatalog for BuildpackCatalog {
    fn resolve(
        &self,
        path: &Path,
        id: &str,
        version: &str,
        stack: &str,
    ) -> BuildpackResult<Dependency> {
        let buildpack = load(path)?;

        let constraint = if version.is_empty() || version == "default" {
            buildpack
                .metadata
                .default_versions
                .get(id)
                .cloned()
                .unwrap_or_else(|| "*".to_string())
        } else {
            version.to_string()
        };
        let requirement = parse_constraint(&constraint)?;

        let mut supported = Vec::new();
        let mut best: Option<(Version, &DependencyEntry)> = None;

        for entry in &buildpack.metadata.dependencies {
            if entry.id != id || !entry.stacks.iter().any(|s| s == stack) {
                continue;
            }
            supported.push(entry.version.as_str());

            let candidate = match Version::parse(&entry.version) {
                Ok(v) => v,
                Err(e) => {
                    debug!("Skipping {} {}: {}", entry.id, entry.version, e);
                    continue;
                }
            };

            if !requirement.matches(&candidate) {
                continue;
            }

            if best.as_ref().map_or(true, |(current, _)| candidate > *current) {
                best = Some((candidate, entry));
            }
        }

        let Some((_, entry)) = best else {
            supported.sort_unstable();
            return Err(BuildpackError::DependencyNotFound {
                id: id.to_string(),
                stack: stack.to_string(),
                constraint,
                supported: supported.join(", "),
            });
        };

        debug!(
            "Constraint {:?} on stack {} matched {} {}",
            constraint, stack, entry.id, entry.version
        );

        let deprecation_date = match &entry.deprecation_date {
            Some(value) => parse_deprecation_date(path, value)?,
            None => None,
        };

        Ok(Dependency {
            id: entry.id.clone(),
            name: entry.name.clone(),
            version: entry.version.clone(),
            sha256: entry.sha256.clone(),
            uri: entry.uri.clone(),
            stacks: entry.stacks.clone(),
            deprecation_date,
        })
    }
}
