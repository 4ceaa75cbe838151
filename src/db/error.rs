//! Database-specific error types
//!
//! This module defines all error types that can occur during database operations.
//!
//! # Error Types
//!
//! - **`SledError`**: Errors from the underlying sled embedded database, including
//!   failed multi-tree transactions
//! - **`DecodeError`**: Failures when deserializing records from the database
//! - **`EncodeError`**: Failures when serializing records to the database
//! - **`InvalidId`**: A stored identifier is not a valid UUID
//! - **`FileNotIndexed`**: A file was referenced that the index does not know about
//!
//! All errors implement `std::error::Error` via the `thiserror` crate.

use sled::transaction::TransactionError;
use thiserror::Error;

/// Database-specific errors
#[derive(Debug, Error)]
pub enum DbError {
    /// Represents a sled database error
    #[error("Database error: {0}")]
    SledError(#[from] sled::Error),

    /// Represents a bincode decoding error
    #[error("Error while decoding data: {0}")]
    DecodeError(#[from] bincode::error::DecodeError),

    /// Represents a bincode encoding error
    #[error("Error while encoding data: {0}")]
    EncodeError(#[from] bincode::error::EncodeError),

    /// A stored key does not hold a valid identifier
    #[error("Invalid identifier in database: {0}")]
    InvalidId(#[from] uuid::Error),

    /// Generic serialization/deserialization error
    #[error("Error during serialization: {0}")]
    SerializeError(String),

    /// The file exists on disk but has never been indexed
    #[error("File not indexed: {0}")]
    FileNotIndexed(String),

    /// Invalid input provided (e.g., a malformed tag string)
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<TransactionError<sled::Error>> for DbError {
    fn from(err: TransactionError<sled::Error>) -> Self {
        match err {
            TransactionError::Abort(e) | TransactionError::Storage(e) => Self::SledError(e),
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
