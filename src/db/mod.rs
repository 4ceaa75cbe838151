//! Database wrapper module for kfs
//!
//! Provides the persistence handle for indexed files, tags and the
//! associations between them, using sled as the embedded database backend.
//!
//! Each entity set lives in its own sled tree:
//! - `files`: `FileId` -> `FileRecord`
//! - `locations`: encoded `Location` -> `FileId` (uniqueness of `(path, name)`)
//! - `tags`: `TagId` -> encoded `TagSpec`
//! - `tag_keys`: encoded `TagSpec` -> `TagId` (uniqueness of `(category, value)`)
//! - `file_tags`: `FileId ++ TagId` -> empty (the association, keyed by file)
//! - `tag_files`: `TagId ++ FileId` -> empty (reverse index, keyed by tag)
//!
//! Every write that touches more than one tree runs in a single sled
//! transaction, so each insert is atomic on its own and never rolls back
//! earlier ones.

use sled::transaction::ConflictableTransactionError;
use sled::{Db, Tree};
use std::path::Path;

pub mod error;
mod files;
mod query;
mod tags;
pub mod types;

pub use error::DbError;

/// Result of a closure run inside a multi-tree sled transaction
pub(crate) type TxResult<T> = Result<T, ConflictableTransactionError<sled::Error>>;
pub use files::InsertOutcome;
pub use query::TagUsage;
pub use types::{File, FileId, Location, Tag, TagId, TagSpec};

/// Entity counts, as reported by `kfs status`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub files: usize,
    pub tags: usize,
    pub associations: usize,
}

/// Database handle that encapsulates all storage operations
///
/// A handle is scoped to one CLI invocation and passed explicitly to the
/// indexer, the tag manager and the query layer.
pub struct Database {
    db: Db,
    files: Tree,
    locations: Tree,
    tags: Tree,
    tag_keys: Tree,
    file_tags: Tree,
    tag_files: Tree,
}

impl Database {
    /// Opens or creates a database at the specified path
    ///
    /// All trees are created on first open.
    ///
    /// # Examples
    /// ```no_run
    /// use kfs::db::Database;
    /// let db = Database::open("kfs.db").unwrap();
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the database cannot be opened or if the internal
    /// trees cannot be created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DbError> {
        let db = sled::open(path)?;
        let files = db.open_tree("files")?;
        let locations = db.open_tree("locations")?;
        let tags = db.open_tree("tags")?;
        let tag_keys = db.open_tree("tag_keys")?;
        let file_tags = db.open_tree("file_tags")?;
        let tag_files = db.open_tree("tag_files")?;
        Ok(Self {
            db,
            files,
            locations,
            tags,
            tag_keys,
            file_tags,
            tag_files,
        })
    }

    /// Number of indexed files
    #[must_use]
    pub fn count(&self) -> usize {
        self.files.len()
    }

    /// Counts of files, tags and associations
    #[must_use]
    pub fn stats(&self) -> Stats {
        Stats {
            files: self.files.len(),
            tags: self.tags.len(),
            associations: self.file_tags.len(),
        }
    }

    /// Flush all pending writes to disk
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the flush operation fails.
    pub fn flush(&self) -> Result<(), DbError> {
        self.db.flush()?;
        Ok(())
    }
}

impl Drop for Database {
    fn drop(&mut self) {
        // Errors cannot be propagated from Drop; callers that need
        // durability guarantees call flush() themselves.
        let _ = self.db.flush();
    }
}
