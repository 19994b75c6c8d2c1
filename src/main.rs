//! Bundler buildpack
//!
//! CLI entry point that dispatches to the detect and build phases.

use bundler_cnb::cli::{Cli, Commands};
use bundler_cnb::config::{Config, ConfigManager};
use bundler_cnb::error::BuildpackResult;
use clap::Parser;
use console::style;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> BuildpackResult<()> {
    let cli = Cli::parse();

    let config_manager = match cli.config {
        Some(ref path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::for_buildpack(&cli.buildpack_dir),
    };
    let config = config_manager.load()?;

    init_logging(cli.verbose, &config);
    debug!("Using config {}", config_manager.path().display());

    match cli.command {
        Commands::Detect(args) => bundler_cnb::cli::commands::detect(args),
        Commands::Build(args) => {
            bundler_cnb::cli::commands::build(args, &cli.buildpack_dir, &config)
        }
    }
}

/// 0 = warn, 1 = info, 2+ = debug; diagnostics go to stderr so stdout
/// carries only build progress.
fn init_logging(verbose: u8, config: &Config) {
    let filter = match verbose {
        0 => EnvFilter::new("bundler_cnb=warn"),
        1 => EnvFilter::new("bundler_cnb=info"),
        _ => EnvFilter::new("bundler_cnb=debug"),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();

    if config.general.log_format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}
