//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Bundler buildpack
///
/// Detects whether an application pins a Bundler version and installs
/// the matching Bundler into a cacheable layer.
#[derive(Parser, Debug)]
#[command(name = "bundler-cnb")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "BUNDLER_CNB_CONFIG")]
    pub config: Option<PathBuf>,

    /// Buildpack directory containing buildpack.toml
    #[arg(long, global = true, env = "CNB_BUILDPACK_DIR", default_value = ".")]
    pub buildpack_dir: PathBuf,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Declare what this buildpack provides and requires
    Detect(DetectArgs),

    /// Install the requested Bundler version into a layer
    Build(BuildArgs),
}

/// Arguments for the detect command
#[derive(Parser, Debug)]
pub struct DetectArgs {
    /// Platform directory
    pub platform: PathBuf,

    /// File the build plan is written to
    pub plan: PathBuf,
}

/// Arguments for the build command
#[derive(Parser, Debug)]
pub struct BuildArgs {
    /// Layers directory
    pub layers: PathBuf,

    /// Platform directory
    pub platform: PathBuf,

    /// Buildpack plan; replaced with the bill of materials on success
    pub plan: PathBuf,

    /// Stack the image is built on
    #[arg(long, env = "CNB_STACK_ID")]
    pub stack: String,
}
