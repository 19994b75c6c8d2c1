//! Build: resolve the requested Bundler version and install it into a
//! cacheable layer.
//!
//! The flow is
//!
//! 1. resolve all plan entries into one,
//! 2. ask the catalog for the matching dependency,
//! 3. open the layer and set its flags from the resolved entry,
//! 4. reuse the layer if its recorded `dependency-sha` equals the
//!    dependency's sha256, otherwise reset it and run the installer.
//!
//! Any failure aborts the build and is returned unchanged. A reset layer
//! has no manifest until the caller persists the returned layer, so a
//! failed install is never mistaken for a cached one.

use crate::clock::Clock;
use crate::constants::{
    BUILDPACK_TOML, BUILT_AT_KEY, BUNDLER, BUNDLER_DISPLAY_NAME, DEPENDENCY_SHA_KEY,
};
use crate::dependency::{BuildpackInfo, DependencyCatalog, Installer};
use crate::error::{BuildpackError, BuildpackResult};
use crate::layer::{Layer, Layers};
use crate::plan::{BuildPlanRefinery, BuildpackPlan, EntryResolver};
use crate::ui::Reporter;
use chrono::SecondsFormat;
use std::path::PathBuf;
use tracing::{debug, info};

/// Inputs of one build invocation
#[derive(Debug, Clone)]
pub struct BuildContext {
    /// Buildpack directory holding `buildpack.toml`
    pub cnb_path: PathBuf,
    pub stack: String,
    pub buildpack_info: BuildpackInfo,
    /// Plan entries gathered from every requesting buildpack
    pub plan: BuildpackPlan,
    pub layers: Layers,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BuildResult {
    /// Bill of materials
    pub plan: BuildpackPlan,
    pub layers: Vec<Layer>,
}

pub struct Build<'a> {
    entries: &'a dyn EntryResolver,
    catalog: &'a dyn DependencyCatalog,
    installer: &'a dyn Installer,
    refinery: &'a dyn BuildPlanRefinery,
    reporter: &'a dyn Reporter,
    clock: &'a dyn Clock,
}

impl<'a> Build<'a> {
    pub fn new(
        entries: &'a dyn EntryResolver,
        catalog: &'a dyn DependencyCatalog,
        installer: &'a dyn Installer,
        refinery: &'a dyn BuildPlanRefinery,
        reporter: &'a dyn Reporter,
        clock: &'a dyn Clock,
    ) -> Self {
        Self {
            entries,
            catalog,
            installer,
            refinery,
            reporter,
            clock,
        }
    }

    pub fn run(&self, context: &BuildContext) -> BuildpackResult<BuildResult> {
        self.reporter.title(
            &context.buildpack_info.name,
            &context.buildpack_info.version,
        );
        self.reporter.resolving(BUNDLER_DISPLAY_NAME);

        let entry = self
            .entries
            .resolve(&context.plan.entries)
            .ok_or(BuildpackError::EmptyPlan)?;

        let dependency = self.catalog.resolve(
            &context.cnb_path.join(BUILDPACK_TOML),
            &entry.name,
            &entry.version,
            &context.stack,
        )?;

        self.reporter
            .selected_dependency(&entry, &dependency, self.clock.now());

        let mut layer = context.layers.get(BUNDLER)?;
        layer.launch = true;
        layer.build = entry.is_build();
        layer.cache = entry.is_build();

        let bom = self.refinery.bill_of_material(&dependency);

        debug!(
            "Layer fingerprint {:?}, resolved {} {} ({})",
            layer.fingerprint(),
            dependency.id,
            dependency.version,
            dependency.sha256
        );

        if layer.fingerprint() == Some(dependency.sha256.as_str()) {
            info!("Reusing {} layer for {}", layer.name, dependency.version);
            self.reporter.reusing_layer(&layer.path);

            return Ok(BuildResult {
                plan: bom,
                layers: vec![layer],
            });
        }

        self.reporter.executing_build();

        layer.reset()?;
        layer.metadata.insert(
            DEPENDENCY_SHA_KEY.to_string(),
            toml::Value::String(dependency.sha256.clone()),
        );
        layer.metadata.insert(
            BUILT_AT_KEY.to_string(),
            toml::Value::String(
                self.clock
                    .now()
                    .to_rfc3339_opts(SecondsFormat::Nanos, true),
            ),
        );

        self.reporter.installing(&dependency);
        let then = self.clock.now();
        self.installer
            .install(&dependency, &context.cnb_path, &layer.path)?;
        let elapsed = (self.clock.now() - then).to_std().unwrap_or_default();
        self.reporter.install_completed(elapsed);

        Ok(BuildResult {
            plan: bom,
            layers: vec![layer],
        })
    }
}
