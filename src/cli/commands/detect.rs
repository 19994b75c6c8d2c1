//! Detect command - write the build plan

use crate::buildpack_yml::BuildpackYmlParser;
use crate::cli::args::DetectArgs;
use crate::detect::{Detect, DetectContext};
use crate::error::{BuildpackError, BuildpackResult};
use std::fs;
use tracing::debug;

/// Execute the detect command
pub fn execute(args: DetectArgs) -> BuildpackResult<()> {
    let working_dir = std::env::current_dir()
        .map_err(|e| BuildpackError::io("getting current directory", e))?;

    let parser = BuildpackYmlParser::new();
    let result = Detect::new(&parser).run(&DetectContext { working_dir })?;

    let content = toml::to_string(&result.plan)?;
    debug!("Writing build plan to {}", args.plan.display());
    fs::write(&args.plan, content)
        .map_err(|e| BuildpackError::io(format!("writing build plan {}", args.plan.display()), e))
}
