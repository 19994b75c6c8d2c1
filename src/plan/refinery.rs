//! Bill of materials for the installed dependency

use crate::dependency::Dependency;
use crate::plan::{BuildpackPlan, Metadata, PlanEntry};
use toml::Value;

pub trait BuildPlanRefinery {
    fn bill_of_material(&self, dependency: &Dependency) -> BuildpackPlan;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PlanRefinery;

impl PlanRefinery {
    pub fn new() -> Self {
        Self
    }
}

impl BuildPlanRefinery for PlanRefinery {
    fn bill_of_material(&self, dependency: &Dependency) -> BuildpackPlan {
        let mut metadata = Metadata::new();
        metadata.insert("licenses".into(), Value::Array(vec![]));
        metadata.insert("name".into(), Value::String(dependency.name.clone()));
        metadata.insert("sha256".into(), Value::String(dependency.sha256.clone()));
        metadata.insert(
            "stacks".into(),
            Value::Array(
                dependency
                    .stacks
                    .iter()
                    .map(|s| Value::String(s.clone()))
                    .collect(),
            ),
        );
        metadata.insert("uri".into(), Value::String(dependency.uri.clone()));

        BuildpackPlan {
            entries: vec![PlanEntry {
                name: dependency.id.clone(),
                version: dependency.version.clone(),
                metadata: Some(metadata),
            }],
        }
    }
}
