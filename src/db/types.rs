//! Entity and key types stored in the database
//!
//! # Types
//!
//! - **`FileId`** / **`TagId`**: UUID identities, stored as 16 raw bytes
//! - **`Location`**: the unique `(path, name)` pair of an indexed file, relative
//!   to the base directory; its bincode encoding is the `locations` tree key
//! - **`TagSpec`**: a parsed `category:value` tag string; its bincode encoding is
//!   both the `tag_keys` tree key and the `tags` tree value
//! - **`File`** / **`Tag`**: decoded entities handed out by the query API
//!
//! # Tag syntax
//!
//! A tag string is split on its **last** colon. Everything before it is the
//! category (empty means no category), everything after it is the value. A value
//! therefore never contains a colon, while a category may. Whitespace around
//! the category and the value is trimmed, so `" bank : chase "` is `bank:chase`:
//!
//! ```
//! use kfs::db::types::TagSpec;
//!
//! let tag: TagSpec = "bank:chase".parse().unwrap();
//! assert_eq!(tag.category.as_deref(), Some("bank"));
//! assert_eq!(tag.value, "chase");
//!
//! let bare: TagSpec = "urgent".parse().unwrap();
//! assert_eq!(bare.to_string(), ":urgent");
//! ```

use super::error::DbError;
use bincode::{Decode, Encode};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::str::FromStr;
use uuid::Uuid;

/// Directory value recorded for files that live directly in the base directory
pub const ROOT_DIR: &str = ".";

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generate a fresh random identifier
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            #[must_use]
            pub const fn as_bytes(&self) -> &[u8; 16] {
                self.0.as_bytes()
            }

            /// # Errors
            ///
            /// Returns `DbError::InvalidId` if `bytes` is not exactly 16 bytes long.
            pub fn from_bytes(bytes: &[u8]) -> Result<Self, DbError> {
                Ok(Self(Uuid::from_slice(bytes)?))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

entity_id!(
    /// Identity of an indexed file
    FileId
);

entity_id!(
    /// Identity of a tag
    TagId
);

/// Key of an association tree: the owning id followed by the other id
#[must_use]
pub fn association_key(first: &[u8; 16], second: &[u8; 16]) -> [u8; 32] {
    let mut key = [0u8; 32];
    key[..16].copy_from_slice(first);
    key[16..].copy_from_slice(second);
    key
}

/// Split an association key into its two halves
///
/// # Errors
///
/// Returns `DbError::SerializeError` if the key is not 32 bytes long.
pub fn split_association_key(key: &[u8]) -> Result<(&[u8], &[u8]), DbError> {
    if key.len() != 32 {
        return Err(DbError::SerializeError(format!(
            "Association key has {} bytes, expected 32",
            key.len()
        )));
    }
    Ok(key.split_at(16))
}

/// Location of a file relative to the base directory
#[derive(Encode, Decode, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Location {
    /// Directory part, `"."` for root-level files, `/`-separated otherwise
    pub path: String,
    /// Final path segment
    pub name: String,
}

impl Location {
    pub fn new(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
        }
    }

    /// Build a location from a path relative to the base directory
    ///
    /// # Errors
    ///
    /// Returns `DbError::SerializeError` if a component is not valid UTF-8, and
    /// `DbError::InvalidInput` if the path is absolute, climbs with `..`, or has
    /// no file name.
    pub fn from_relative(relative: &Path) -> Result<Self, DbError> {
        let name = match relative.file_name() {
            Some(name) => name
                .to_str()
                .ok_or_else(|| DbError::SerializeError("Invalid UTF-8 in path".into()))?,
            None => {
                return Err(DbError::InvalidInput(format!(
                    "Path '{}' does not name a file",
                    relative.display()
                )));
            }
        };

        let mut parts = Vec::new();
        if let Some(parent) = relative.parent() {
            for component in parent.components() {
                match component {
                    Component::Normal(part) => parts.push(part.to_str().ok_or_else(|| {
                        DbError::SerializeError("Invalid UTF-8 in path".into())
                    })?),
                    Component::CurDir => {}
                    _ => {
                        return Err(DbError::InvalidInput(format!(
                            "Path '{}' is not relative to the base directory",
                            relative.display()
                        )));
                    }
                }
            }
        }

        let path = if parts.is_empty() { ROOT_DIR.to_string() } else { parts.join("/") };
        Ok(Self::new(path, name))
    }

    /// Path relative to the base directory, `/`-separated
    #[must_use]
    pub fn display_path(&self) -> String {
        if self.path == ROOT_DIR {
            self.name.clone()
        } else {
            format!("{}/{}", self.path, self.name)
        }
    }

    /// Path relative to the base directory
    #[must_use]
    pub fn relative_path(&self) -> PathBuf {
        if self.path == ROOT_DIR {
            PathBuf::from(&self.name)
        } else {
            self.path.split('/').collect::<PathBuf>().join(&self.name)
        }
    }

    /// # Errors
    ///
    /// Returns `DbError` if the bytes cannot be decoded into a `Location`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DbError> {
        let (location, _): (Self, usize) =
            bincode::decode_from_slice(bytes, bincode::config::standard())?;
        Ok(location)
    }
}

impl TryFrom<&Location> for Vec<u8> {
    type Error = DbError;

    fn try_from(location: &Location) -> Result<Self, Self::Error> {
        Ok(bincode::encode_to_vec(location, bincode::config::standard())?)
    }
}

/// Parsed form of a `category:value` tag string
#[derive(Encode, Decode, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TagSpec {
    pub category: Option<String>,
    pub value: String,
}

impl TagSpec {
    /// # Errors
    ///
    /// Returns `DbError::InvalidInput` if the value is empty.
    pub fn new(category: Option<&str>, value: &str) -> Result<Self, DbError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(DbError::InvalidInput("Tag value must not be empty".into()));
        }
        let category = category.map(str::trim).filter(|c| !c.is_empty()).map(String::from);
        Ok(Self {
            category,
            value: value.to_string(),
        })
    }

    /// # Errors
    ///
    /// Returns `DbError` if the bytes cannot be decoded into a `TagSpec`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DbError> {
        let (spec, _): (Self, usize) =
            bincode::decode_from_slice(bytes, bincode::config::standard())?;
        Ok(spec)
    }
}

impl FromStr for TagSpec {
    type Err = DbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().rsplit_once(':') {
            Some((category, value)) => Self::new(Some(category), value),
            None => Self::new(None, s),
        }
        .map_err(|_| DbError::InvalidInput(format!("Tag '{s}' has no value")))
    }
}

impl fmt::Display for TagSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.category.as_deref().unwrap_or(""), self.value)
    }
}

impl TryFrom<&TagSpec> for Vec<u8> {
    type Error = DbError;

    fn try_from(spec: &TagSpec) -> Result<Self, Self::Error> {
        Ok(bincode::encode_to_vec(spec, bincode::config::standard())?)
    }
}

/// Value stored in the `files` tree
#[derive(Encode, Decode, Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub location: Location,
    /// Unix timestamp (seconds) of the first insert
    pub indexed_at: i64,
}

impl FileRecord {
    #[must_use]
    pub fn new(location: Location) -> Self {
        Self {
            location,
            indexed_at: Utc::now().timestamp(),
        }
    }
}

/// An indexed file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct File {
    pub id: FileId,
    pub name: String,
    pub path: String,
    pub indexed_at: DateTime<Utc>,
}

impl File {
    pub(crate) fn from_record(id: FileId, record: FileRecord) -> Self {
        Self {
            id,
            name: record.location.name,
            path: record.location.path,
            indexed_at: DateTime::from_timestamp(record.indexed_at, 0).unwrap_or_default(),
        }
    }

    #[must_use]
    pub fn location(&self) -> Location {
        Location::new(self.path.clone(), self.name.clone())
    }

    /// Path relative to the base directory, `/`-separated
    #[must_use]
    pub fn display_path(&self) -> String {
        self.location().display_path()
    }
}

/// A tag as stored in the database
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub id: TagId,
    pub category: Option<String>,
    pub value: String,
}

impl Tag {
    pub(crate) fn from_spec(id: TagId, spec: TagSpec) -> Self {
        Self {
            id,
            category: spec.category,
            value: spec.value,
        }
    }

    #[must_use]
    pub fn spec(&self) -> TagSpec {
        TagSpec {
            category: self.category.clone(),
            value: self.value.clone(),
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.category.as_deref().unwrap_or(""), self.value)
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
