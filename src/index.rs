//! Directory indexing
//!
//! Walks the base directory and records one File per regular file found,
//! skipping the database itself and any configured ignore patterns. Files
//! are inserted one at a time; a location that is already known is counted
//! as existing and the walk continues.
//!
//! Indexing never removes anything: rows for files deleted from disk stay
//! until `kfs cleanup` is run.

use crate::KfsError;
use crate::db::{Database, InsertOutcome, Location};
use crate::workspace::Workspace;
use glob::{MatchOptions, Pattern};
use std::path::Path;
use walkdir::WalkDir;

/// Options controlling a single indexing run
#[derive(Debug, Clone, Default)]
pub struct IndexOptions {
    /// Glob patterns matched against `/`-separated paths relative to the base directory
    pub ignore: Vec<String>,
    /// Follow symbolic links while walking
    pub follow_links: bool,
}

/// Summary of an indexing run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexReport {
    /// Files recorded by this run
    pub new: usize,
    /// Files that were already recorded
    pub existing: usize,
    /// Entries that could not be read or recorded
    pub skipped: usize,
}

impl IndexReport {
    #[must_use]
    pub const fn total(&self) -> usize {
        self.new + self.existing
    }
}

struct IgnoreSet(Vec<Pattern>);

impl IgnoreSet {
    fn new(patterns: &[String]) -> Result<Self, KfsError> {
        patterns
            .iter()
            .map(|p| {
                Pattern::new(p).map_err(|e| {
                    KfsError::InvalidInput(format!("Invalid ignore pattern '{p}': {e}"))
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    fn matches(&self, relative: &str) -> bool {
        let options = MatchOptions {
            require_literal_separator: true,
            ..MatchOptions::new()
        };
        self.0.iter().any(|pattern| pattern.matches_with(relative, options))
    }
}

/// Index every regular file below the workspace's base directory
///
/// # Errors
///
/// Returns `KfsError::InvalidInput` for a malformed ignore pattern, or
/// `KfsError::DbError` if a database write fails for a reason other than the
/// file already being indexed.
pub fn create_index(
    db: &Database,
    workspace: &Workspace,
    options: &IndexOptions,
) -> Result<IndexReport, KfsError> {
    let base_dir = workspace.base_dir();
    let db_path = workspace.db_path();
    let ignore = IgnoreSet::new(&options.ignore)?;
    let mut report = IndexReport::default();

    let walker = WalkDir::new(base_dir)
        .follow_links(options.follow_links)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.path() != db_path);

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Skipping unreadable entry: {e}");
                report.skipped += 1;
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let Some(location) = location_in(base_dir, entry.path()) else {
            report.skipped += 1;
            continue;
        };
        if ignore.matches(&location.display_path()) {
            log::debug!("Ignoring {}", location.display_path());
            continue;
        }

        match db.insert_file(&location)? {
            InsertOutcome::Inserted(id) => {
                log::debug!("Indexed {} as {id}", location.display_path());
                report.new += 1;
            }
            InsertOutcome::Existing(_) => report.existing += 1,
        }
    }

    log::info!(
        "Indexed {}: {} new, {} existing, {} skipped",
        base_dir.display(),
        report.new,
        report.existing,
        report.skipped
    );
    Ok(report)
}

fn location_in(base_dir: &Path, path: &Path) -> Option<Location> {
    let relative = path.strip_prefix(base_dir).ok()?;
    match Location::from_relative(relative) {
        Ok(location) => Some(location),
        Err(e) => {
            log::warn!("Skipping {}: {e}", path.display());
            None
        }
    }
}
