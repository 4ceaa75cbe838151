//! Database discovery and lifecycle
//!
//! The database is searched for in the start directory and then in each of
//! its ancestors. The directory holding it is the *base directory*: every
//! indexed file is recorded relative to it, and any command run below it
//! operates on the same database.

use crate::KfsError;
use crate::db::{Database, File, Location};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Find an existing database named `db_name`, starting at `start` and walking up
#[must_use]
pub fn find_database(start: &Path, db_name: &str) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(db_name))
        .find(|candidate| candidate.exists())
}

/// Locate the database for `start`
///
/// Returns the first existing database found from `start` upwards, or
/// `start/<db_name>` when there is none. The returned path not existing is
/// how "not initialized" is signalled.
#[must_use]
pub fn locate_database(start: &Path, db_name: &str) -> PathBuf {
    find_database(start, db_name).unwrap_or_else(|| start.join(db_name))
}

/// A resolved database location and the base directory it anchors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    base_dir: PathBuf,
    db_path: PathBuf,
}

impl Workspace {
    /// Resolve the workspace seen from `start`
    #[must_use]
    pub fn discover(start: &Path, db_name: &str) -> Self {
        let db_path = locate_database(start, db_name);
        let base_dir = db_path
            .parent()
            .map_or_else(|| start.to_path_buf(), Path::to_path_buf);
        Self { base_dir, db_path }
    }

    /// Resolve the workspace seen from the current working directory
    ///
    /// # Errors
    ///
    /// Returns `KfsError::IoError` if the current directory cannot be determined.
    pub fn from_current_dir(db_name: &str) -> Result<Self, KfsError> {
        let cwd = std::env::current_dir()?.canonicalize()?;
        Ok(Self::discover(&cwd, db_name))
    }

    /// Create a new, empty database in `target`
    ///
    /// `target` is created if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns `KfsError::AlreadyInitialized` if a database already exists in
    /// `target` or any of its ancestors; nothing is created in that case.
    /// Returns `KfsError::IoError` or `KfsError::DbError` if creation fails.
    pub fn create(target: &Path, db_name: &str) -> Result<(Self, Database), KfsError> {
        let target = resolve_target(target)?;

        if let Some(existing) = find_database(&target, db_name) {
            return Err(KfsError::AlreadyInitialized(existing));
        }

        fs::create_dir_all(&target)?;
        let base_dir = target.canonicalize()?;
        let workspace = Self {
            db_path: base_dir.join(db_name),
            base_dir,
        };
        let db = Database::open(&workspace.db_path)?;
        log::info!("Created database at {}", workspace.db_path.display());
        Ok((workspace, db))
    }

    /// Open the database handle
    ///
    /// Opening creates any missing trees.
    ///
    /// # Errors
    ///
    /// Returns `KfsError::NotInitialized` if `require_existing` is set and no
    /// database exists, or `KfsError::DbError` if it cannot be opened.
    pub fn open(&self, require_existing: bool) -> Result<Database, KfsError> {
        if require_existing && !self.is_initialized() {
            return Err(KfsError::NotInitialized(self.base_dir.clone()));
        }
        log::debug!("Opening database at {}", self.db_path.display());
        Ok(Database::open(&self.db_path)?)
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.db_path.exists()
    }

    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    #[must_use]
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Location of an on-disk file relative to the base directory
    ///
    /// The final component is kept as given, so a symbolic link is located
    /// under its own name, the way `index` records it.
    ///
    /// # Errors
    ///
    /// Returns `KfsError::InvalidInput` if the path cannot be accessed or lies
    /// outside the base directory.
    pub fn location_of(&self, path: &Path) -> Result<Location, KfsError> {
        let inaccessible = |e: std::io::Error| {
            KfsError::InvalidInput(format!("Cannot access path '{}': {e}", path.display()))
        };
        let normalized = normalize(path).map_err(inaccessible)?;
        fs::symlink_metadata(&normalized).map_err(inaccessible)?;

        if let Ok(relative) = normalized.strip_prefix(&self.base_dir) {
            return Ok(Location::from_relative(relative)?);
        }

        // Reached through a symlinked directory: resolve the parent only.
        let (Some(parent), Some(name)) = (normalized.parent(), normalized.file_name()) else {
            return Err(self.outside(path));
        };
        let resolved = parent.canonicalize().map_err(inaccessible)?.join(name);
        let relative = resolved.strip_prefix(&self.base_dir).map_err(|_| self.outside(path))?;
        Ok(Location::from_relative(relative)?)
    }

    fn outside(&self, path: &Path) -> KfsError {
        KfsError::InvalidInput(format!(
            "'{}' is outside of {}",
            path.display(),
            self.base_dir.display()
        ))
    }

    /// Absolute path of an indexed file
    #[must_use]
    pub fn absolute_path(&self, file: &File) -> PathBuf {
        self.base_dir.join(file.location().relative_path())
    }
}

/// Make `path` absolute and resolve `.` and `..` by path text
fn normalize(path: &Path) -> std::io::Result<PathBuf> {
    let mut normalized = PathBuf::new();
    for component in std::path::absolute(path)?.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    Ok(normalized)
}

/// Canonical form of a directory that may not exist yet
///
/// The nearest existing ancestor is canonicalized and the missing
/// components are appended to it.
fn resolve_target(target: &Path) -> std::io::Result<PathBuf> {
    let normalized = normalize(target)?;
    let mut existing = normalized.as_path();
    let mut missing = Vec::new();
    while !existing.exists() {
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name);
                existing = parent;
            }
            _ => break,
        }
    }

    let mut resolved = existing.canonicalize()?;
    resolved.extend(missing.iter().rev());
    Ok(resolved)
}
