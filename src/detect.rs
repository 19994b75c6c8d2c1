//! Detection: declare that this buildpack provides Bundler and, when the
//! application pins one, require that version.

use crate::buildpack_yml::VersionParser;
use crate::constants::{BUILDPACK_YML_SOURCE, BUNDLER};
use crate::error::BuildpackResult;
use crate::plan::{BuildPlan, Provision, Requirement, RequirementMetadata};
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct DetectContext {
    pub working_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetectResult {
    pub plan: BuildPlan,
}

pub struct Detect<'a> {
    parser: &'a dyn VersionParser,
}

impl<'a> Detect<'a> {
    pub fn new(parser: &'a dyn VersionParser) -> Self {
        Self { parser }
    }

    /// A parser failure fails detection; no version hint is not a failure.
    pub fn run(&self, context: &DetectContext) -> BuildpackResult<DetectResult> {
        let path = context.working_dir.join(BUILDPACK_YML_SOURCE);
        let version = self.parser.parse_version(&path)?;

        let mut requires = Vec::new();
        if version.is_empty() {
            debug!("No {} version in {}", BUNDLER, path.display());
        } else {
            debug!("{} requests {} {}", path.display(), BUNDLER, version);
            requires.push(Requirement {
                name: BUNDLER.to_string(),
                version,
                metadata: RequirementMetadata {
                    version_source: BUILDPACK_YML_SOURCE.to_string(),
                },
            });
        }

        Ok(DetectResult {
            plan: BuildPlan {
                provides: vec![Provision {
                    name: BUNDLER.to_string(),
                }],
                requires,
            },
        })
    }
}
