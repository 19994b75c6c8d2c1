//! Plan entry resolution
//!
//! Several buildpacks may require Bundler, each with its own version
//! constraint. The entry whose `version-source` ranks highest wins;
//! entries with a missing or unrecognized source rank below every known
//! source, and ties keep their input order. Boolean flags such as
//! `build = true` requested by any entry are carried over to the winner.

use crate::config::schema::ResolverConfig;
use crate::constants::VERSION_SOURCE_KEY;
use crate::plan::{Metadata, PlanEntry};
use crate::ui::Reporter;
use tracing::debug;

/// Merges competing plan entries into one
pub trait EntryResolver {
    /// Returns `None` only when `entries` is empty
    fn resolve(&self, entries: &[PlanEntry]) -> Option<PlanEntry>;
}

/// Ranks entries by an ordered list of version sources
pub struct PlanEntryResolver<'a> {
    reporter: &'a dyn Reporter,
    priorities: Vec<String>,
}

impl<'a> PlanEntryResolver<'a> {
    /// Resolver using the default ranking (`buildpack.yml` only)
    pub fn new(reporter: &'a dyn Reporter) -> Self {
        Self::with_priorities(reporter, ResolverConfig::default().priorities)
    }

    /// Resolver with an explicit ranking, highest priority first
    pub fn with_priorities(reporter: &'a dyn Reporter, priorities: Vec<String>) -> Self {
        Self {
            reporter,
            priorities,
        }
    }

    fn rank(&self, entry: &PlanEntry) -> usize {
        entry
            .version_source()
            .and_then(|source| self.priorities.iter().position(|p| p == source))
            .unwrap_or(self.priorities.len())
    }
}

impl EntryResolver for PlanEntryResolver<'_> {
    fn resolve(&self, entries: &[PlanEntry]) -> Option<PlanEntry> {
        if entries.is_empty() {
            return None;
        }

        let mut ordered = entries.to_vec();
        // sort_by_key is stable, so equal ranks keep input order
        ordered.sort_by_key(|entry| self.rank(entry));
        self.reporter.candidates(&ordered);

        let mut ordered = ordered.into_iter();
        let mut chosen = ordered.next()?;
        let metadata = chosen.metadata.get_or_insert_with(Metadata::new);

        for entry in ordered {
            let Some(other) = entry.metadata else {
                continue;
            };
            for (key, value) in other {
                if key != VERSION_SOURCE_KEY && value.as_bool() == Some(true) {
                    metadata.insert(key, toml::Value::Boolean(true));
                }
            }
        }

        debug!(
            "Resolved {} version {:?} from {} candidate(s)",
            chosen.name,
            chosen.version,
            entries.len()
        );
        Some(chosen)
    }
}
