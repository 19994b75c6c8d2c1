//! Build progress output
//!
//! `LogEmitter` renders progress as indented text: titles at column 0,
//! process steps at 2, subprocesses at 4 and actions at 6 spaces.

use crate::constants::{ANY_VERSION, DEPRECATION_WINDOW_DAYS, UNKNOWN_SOURCE};
use crate::dependency::Dependency;
use crate::plan::PlanEntry;
use chrono::{DateTime, Duration as TimeDelta, Utc};
use console::style;
use std::cell::RefCell;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

/// Receives progress events from detection and build
pub trait Reporter {
    fn title(&self, name: &str, version: &str);

    /// Plan resolution is about to start
    fn resolving(&self, component: &str);

    /// Candidate entries, already in priority order
    fn candidates(&self, entries: &[PlanEntry]);

    fn selected_dependency(&self, entry: &PlanEntry, dependency: &Dependency, now: DateTime<Utc>);

    fn reusing_layer(&self, path: &Path);

    fn executing_build(&self);

    fn installing(&self, dependency: &Dependency);

    fn install_completed(&self, elapsed: Duration);
}

/// Where a dependency stands relative to its deprecation date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeprecationStatus {
    /// Within the warning window before the date
    Approaching,
    /// On or after the date
    Deprecated,
}

pub fn deprecation_status(date: DateTime<Utc>, now: DateTime<Utc>) -> Option<DeprecationStatus> {
    if now >= date {
        Some(DeprecationStatus::Deprecated)
    } else if now >= date - TimeDelta::days(DEPRECATION_WINDOW_DAYS) {
        Some(DeprecationStatus::Approaching)
    } else {
        None
    }
}

fn format_elapsed(elapsed: Duration) -> String {
    let millis = elapsed.as_millis();
    if millis < 1000 {
        format!("{}ms", millis)
    } else {
        format!("{:.3}s", elapsed.as_millis() as f64 / 1000.0)
    }
}

/// Text reporter writing to any output
pub struct LogEmitter<W: Write> {
    output: RefCell<W>,
}

impl<W: Write> LogEmitter<W> {
    pub fn new(output: W) -> Self {
        Self {
            output: RefCell::new(output),
        }
    }

    /// Consume the emitter and return the underlying output
    pub fn into_inner(self) -> W {
        self.output.into_inner()
    }

    // Progress output is best effort; a closed stdout must not fail a build.
    fn line(&self, indent: usize, message: &str) {
        let mut output = self.output.borrow_mut();
        writeln!(output, "{:indent$}{}", "", message, indent = indent).ok();
    }

    fn process(&self, message: &str) {
        self.line(2, message);
    }

    fn subprocess(&self, message: &str) {
        self.line(4, message);
    }

    fn action(&self, message: &str) {
        self.line(6, message);
    }

    fn break_line(&self) {
        writeln!(self.output.borrow_mut()).ok();
    }
}

impl<W: Write> Reporter for LogEmitter<W> {
    fn title(&self, name: &str, version: &str) {
        self.line(0, &style(format!("{} {}", name, version)).bold().to_string());
    }

    fn resolving(&self, component: &str) {
        self.process(&format!("Resolving {} version", component));
    }

    fn candidates(&self, entries: &[PlanEntry]) {
        self.subprocess("Candidate version sources (in priority order):");

        let sources: Vec<(&str, &str)> = entries
            .iter()
            .map(|entry| {
                let source = entry.version_source().unwrap_or(UNKNOWN_SOURCE);
                let version = if entry.version.is_empty() {
                    ANY_VERSION
                } else {
                    entry.version.as_str()
                };
                (source, version)
            })
            .collect();

        let width = sources.iter().map(|(s, _)| s.len()).max().unwrap_or(0);
        for (source, version) in sources {
            self.action(&format!("{:<width$} -> {:?}", source, version, width = width));
        }

        self.break_line();
    }

    fn selected_dependency(&self, entry: &PlanEntry, dependency: &Dependency, now: DateTime<Utc>) {
        let source = entry.version_source().unwrap_or(UNKNOWN_SOURCE);
        self.subprocess(&format!(
            "Selected {} version (using {}): {}",
            dependency.name, source, dependency.version
        ));

        if let Some(date) = dependency.deprecation_date {
            match deprecation_status(date, now) {
                Some(DeprecationStatus::Approaching) => {
                    self.action(&format!(
                        "Version {} of {} will be deprecated after {}.",
                        dependency.version,
                        dependency.name,
                        date.format("%Y-%m-%d")
                    ));
                    self.action(&format!(
                        "Migrate your application to a supported version of {} before this time.",
                        dependency.name
                    ));
                }
                Some(DeprecationStatus::Deprecated) => {
                    self.action(&format!(
                        "Version {} of {} is deprecated.",
                        dependency.version, dependency.name
                    ));
                    self.action(&format!(
                        "Migrate your application to a supported version of {}.",
                        dependency.name
                    ));
                }
                None => {}
            }
        }

        self.break_line();
    }

    fn reusing_layer(&self, path: &Path) {
        self.process(&format!("Reusing cached layer {}", path.display()));
        self.break_line();
    }

    fn executing_build(&self) {
        self.process("Executing build process");
    }

    fn installing(&self, dependency: &Dependency) {
        self.subprocess(&format!(
            "Installing {} {}",
            dependency.name, dependency.version
        ));
    }

    fn install_completed(&self, elapsed: Duration) {
        self.action(&format!("Completed in {}", format_elapsed(elapsed)));
        self.break_line();
    }
}
