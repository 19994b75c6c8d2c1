//! Build command - install Bundler and write the bill of materials

use crate::build::{Build, BuildContext};
use crate::cli::args::BuildArgs;
use crate::clock::SystemClock;
use crate::config::Config;
use crate::constants::BUILDPACK_TOML;
use crate::dependency::{BuildpackCatalog, CommandInstaller};
use crate::error::{BuildpackError, BuildpackResult};
use crate::layer::Layers;
use crate::plan::{BuildpackPlan, PlanEntryResolver, PlanRefinery};
use crate::ui::LogEmitter;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Execute the build command
pub fn execute(args: BuildArgs, buildpack_dir: &Path, config: &Config) -> BuildpackResult<()> {
    let content = fs::read_to_string(&args.plan).map_err(|e| {
        BuildpackError::io(format!("reading buildpack plan {}", args.plan.display()), e)
    })?;
    let plan: BuildpackPlan = toml::from_str(&content)?;
    debug!("Buildpack plan has {} entries", plan.entries.len());

    let buildpack_info = BuildpackCatalog::buildpack_info(&buildpack_dir.join(BUILDPACK_TOML))?;

    let context = BuildContext {
        cnb_path: buildpack_dir.to_path_buf(),
        stack: args.stack,
        buildpack_info,
        plan,
        layers: Layers::new(args.layers),
    };

    let emitter = LogEmitter::new(std::io::stdout());
    let resolver =
        PlanEntryResolver::with_priorities(&emitter, config.resolver.priorities.clone());
    let catalog = BuildpackCatalog::new();
    let installer = CommandInstaller::from_config(&config.installer);
    let refinery = PlanRefinery::new();
    let clock = SystemClock;

    let result = Build::new(
        &resolver,
        &catalog,
        &installer,
        &refinery,
        &emitter,
        &clock,
    )
    .run(&context)?;

    for layer in &result.layers {
        info!("Persisting layer {}", layer.name);
        layer.persist()?;
    }

    let bom = toml::to_string(&result.plan)?;
    fs::write(&args.plan, bom).map_err(|e| {
        BuildpackError::io(format!("writing bill of materials {}", args.plan.display()), e)
    })
}
