//! Init command - create a new database

use crate::{KfsError, workspace::Workspace};
use std::path::Path;

type Result<T> = std::result::Result<T, KfsError>;

/// Execute the init command
///
/// # Errors
/// Returns `KfsError::AlreadyInitialized` if a database already exists in the
/// target directory or any of its ancestors, or an error if creation fails.
pub fn execute(target: &Path, db_name: &str, quiet: bool) -> Result<Workspace> {
    let (workspace, db) = Workspace::create(target, db_name)?;
    db.flush()?;

    if !quiet {
        println!("Initialized empty database at {}", workspace.db_path().display());
    }
    Ok(workspace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_DB_NAME;

    #[test]
    fn test_init_creates_database() {
        let dir = tempfile::tempdir().unwrap();

        let workspace = execute(dir.path(), DEFAULT_DB_NAME, true).unwrap();

        assert!(workspace.is_initialized());
        assert!(dir.path().join(DEFAULT_DB_NAME).exists());
    }

    #[test]
    fn test_init_twice_fails() {
        let dir = tempfile::tempdir().unwrap();
        execute(dir.path(), DEFAULT_DB_NAME, true).unwrap();

        let result = execute(&dir.path().join("nested"), DEFAULT_DB_NAME, true);

        assert!(matches!(result, Err(KfsError::AlreadyInitialized(_))));
    }

    #[test]
    fn test_init_with_custom_name() {
        let dir = tempfile::tempdir().unwrap();

        execute(dir.path(), "kfs.sqlite3", true).unwrap();

        assert!(dir.path().join("kfs.sqlite3").exists());
        assert!(!dir.path().join(DEFAULT_DB_NAME).exists());
    }
}
