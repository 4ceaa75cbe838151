//! kfs - a small personal file tagger
//!
//! Indexes every file below a base directory into an embedded database and
//! lets files carry `category:value` tags, which can later be listed.
//!
//! The database is found by searching the current directory and its
//! ancestors; the directory that holds it is the base directory all indexed
//! paths are relative to.

use std::path::PathBuf;
use thiserror::Error;

pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod index;
pub mod output;
pub mod workspace;

#[cfg(test)]
pub mod testing;

/// Default name of the database inside the base directory
pub const DEFAULT_DB_NAME: &str = "kfs.db";

/// Version string printed by `kfs version`
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum KfsError {
    /// Database error
    #[error("Database error: {0}")]
    DbError(#[from] db::DbError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// JSON output could not be produced
    #[error("Serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
    /// A database already exists in the target directory or one of its ancestors
    #[error("Already initialized: database exists at {}", .0.display())]
    AlreadyInitialized(PathBuf),
    /// No database was found from the current directory upwards
    #[error("Not initialized: no database found in {} or any parent directory", .0.display())]
    NotInitialized(PathBuf),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl KfsError {
    /// Remediation shown below the error message, if there is one
    #[must_use]
    pub const fn hint(&self) -> Option<&'static str> {
        match self {
            Self::NotInitialized(_) => Some("Run `kfs init` to create a database here."),
            Self::AlreadyInitialized(_) => Some(
                "Run commands from anywhere below that directory, or remove the database first.",
            ),
            Self::DbError(db::DbError::FileNotIndexed(_)) => {
                Some("Run `kfs index` to record new files before tagging them.")
            }
            _ => None,
        }
    }
}
