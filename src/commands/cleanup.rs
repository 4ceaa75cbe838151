//! Cleanup command - remove index entries for files that no longer exist
//!
//! `kfs index` never removes anything, so files deleted or moved on disk
//! leave stale rows behind. This command is the explicit reconciliation step.

use crate::db::File;
use crate::{KfsError, db::Database, workspace::Workspace};
use colored::Colorize;
use dialoguer::Confirm;

type Result<T> = std::result::Result<T, KfsError>;

/// Indexed files that are no longer present on disk
///
/// # Errors
/// Returns an error if database iteration fails
pub fn find_stale(db: &Database, workspace: &Workspace) -> Result<Vec<File>> {
    Ok(db
        .list_files()?
        .into_iter()
        .filter(|file| !workspace.absolute_path(file).is_file())
        .collect())
}

/// Remove `files` and their tag associations from the database
///
/// # Returns
/// Number of files removed
///
/// # Errors
/// Returns an error if database operations fail
pub fn prune(db: &Database, files: &[File]) -> Result<usize> {
    let mut removed = 0;
    for file in files {
        if db.remove_file(file.id)? {
            removed += 1;
        }
    }
    db.flush()?;
    Ok(removed)
}

/// Execute the cleanup command
///
/// Without `assume_yes` the user is asked once before anything is deleted;
/// quiet mode implies confirmation.
///
/// # Errors
/// Returns an error if database operations fail or if user interaction fails
pub fn execute(
    db: &Database,
    workspace: &Workspace,
    assume_yes: bool,
    quiet: bool,
) -> Result<usize> {
    let stale = find_stale(db, workspace)?;

    if stale.is_empty() {
        if !quiet {
            println!("No issues found. Index is clean.");
        }
        return Ok(0);
    }

    if !quiet {
        println!("Found {} missing file(s):", stale.len());
        for file in &stale {
            println!("  - {}", file.display_path().red());
        }
        println!();
    }

    if !(assume_yes || quiet) {
        let confirmed = Confirm::new()
            .with_prompt(format!("Remove {} entr(y/ies) from the index?", stale.len()))
            .default(false)
            .interact()
            .map_err(|e| KfsError::InvalidInput(format!("Confirmation failed: {e}")))?;
        if !confirmed {
            println!("Nothing removed.");
            return Ok(0);
        }
    }

    let removed = prune(db, &stale)?;
    if !quiet {
        println!("Removed {removed} stale entr(y/ies).");
    }
    Ok(removed)
}
