//! Build plan data shared by detection, resolution and the build step
//!
//! The same `PlanEntry` shape is used for the version requests handed to
//! the build step and for the bill of materials it returns.

pub mod refinery;
pub mod resolver;

pub use refinery::{BuildPlanRefinery, PlanRefinery};
pub use resolver::{EntryResolver, PlanEntryResolver};

use crate::constants::{BUILD_KEY, VERSION_SOURCE_KEY};
use serde::{Deserialize, Serialize};

/// Free-form plan entry metadata
pub type Metadata = toml::Table;

/// One party's request for a component, or one bill-of-material entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanEntry {
    pub name: String,

    /// Empty means any version
    #[serde(default)]
    pub version: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl PlanEntry {
    /// The `version-source` tag, if present and a string
    pub fn version_source(&self) -> Option<&str> {
        self.metadata
            .as_ref()
            .and_then(|m| m.get(VERSION_SOURCE_KEY))
            .and_then(|v| v.as_str())
    }

    /// Whether the component is needed at build time (strictly `build = true`)
    pub fn is_build(&self) -> bool {
        self.metadata
            .as_ref()
            .and_then(|m| m.get(BUILD_KEY))
            .and_then(|v| v.as_bool())
            .unwrap_or(false)
    }
}

/// Entries handed to the build step, or the bill of materials it produces
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildpackPlan {
    #[serde(default)]
    pub entries: Vec<PlanEntry>,
}

/// Detection output
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildPlan {
    #[serde(default)]
    pub provides: Vec<Provision>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requires: Vec<Requirement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provision {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Requirement {
    pub name: String,
    pub version: String,
    pub metadata: RequirementMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequirementMetadata {
    #[serde(rename = "version-source")]
    pub version_source: String,
}
