//! Testing utilities for kfs
//!
//! Helper types for writing tests: a `TestDb` wrapper around a database in a
//! temporary directory, and a `TestWorkspace` that also provides a base
//! directory to populate with files.
//!
//! Only available when compiled with `cfg(test)`.

use crate::db::Database;
use crate::workspace::Workspace;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A database living in its own temporary directory
///
/// The directory, and with it the database, is removed when the wrapper
/// goes out of scope.
pub struct TestDb {
    // Field order matters: the database must be dropped before its directory.
    db: Database,
    path: PathBuf,
    _dir: TempDir,
}

impl TestDb {
    /// # Panics
    /// Panics if the temporary directory or the database cannot be created.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join(crate::DEFAULT_DB_NAME);
        let db = Database::open(&path).expect("Failed to open test database");
        Self {
            db,
            path,
            _dir: dir,
        }
    }

    #[must_use]
    pub const fn db(&self) -> &Database {
        &self.db
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// An initialized workspace in a temporary base directory
pub struct TestWorkspace {
    db: Database,
    workspace: Workspace,
    _dir: TempDir,
}

impl TestWorkspace {
    /// # Panics
    /// Panics if the temporary directory or the database cannot be created.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let (workspace, db) = Workspace::create(dir.path(), crate::DEFAULT_DB_NAME)
            .expect("Failed to initialize test workspace");
        Self {
            db,
            workspace,
            _dir: dir,
        }
    }

    #[must_use]
    pub const fn db(&self) -> &Database {
        &self.db
    }

    #[must_use]
    pub const fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    #[must_use]
    pub fn base_dir(&self) -> &Path {
        self.workspace.base_dir()
    }

    /// Create a file (and its parent directories) relative to the base directory
    ///
    /// # Panics
    /// Panics if the file cannot be written.
    pub fn write_file(&self, relative: impl AsRef<Path>) -> PathBuf {
        let path = self.base_dir().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, b"test content").expect("Failed to write test file");
        path
    }
}
