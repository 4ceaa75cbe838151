//! File entity operations

use super::types::{FileRecord, association_key, split_association_key};
use super::{Database, DbError, File, FileId, Location, TagId, TxResult};
use sled::IVec;
use sled::Transactional;

/// Result of inserting a file location
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// A new File row was created
    Inserted(FileId),
    /// The location was already indexed under this id
    Existing(FileId),
}

impl InsertOutcome {
    #[must_use]
    pub const fn id(&self) -> FileId {
        match self {
            Self::Inserted(id) | Self::Existing(id) => *id,
        }
    }

    #[must_use]
    pub const fn is_new(&self) -> bool {
        matches!(self, Self::Inserted(_))
    }
}

impl Database {
    /// Insert a File row for `location` unless one already exists
    ///
    /// The uniqueness check and both writes run in one transaction, so a
    /// location can never be recorded twice.
    ///
    /// # Errors
    ///
    /// Returns `DbError` if encoding or the transaction fails.
    pub fn insert_file(&self, location: &Location) -> Result<InsertOutcome, DbError> {
        let key: Vec<u8> = location.try_into()?;
        let id = FileId::new();
        let record = bincode::encode_to_vec(
            FileRecord::new(location.clone()),
            bincode::config::standard(),
        )?;

        let existing = (&self.locations, &self.files).transaction(
            |(locations, files)| -> TxResult<Option<IVec>> {
                if let Some(current) = locations.get(key.as_slice())? {
                    return Ok(Some(current));
                }
                locations.insert(key.as_slice(), id.as_bytes().as_slice())?;
                files.insert(id.as_bytes().as_slice(), record.as_slice())?;
                Ok(None)
            },
        )?;

        match existing {
            Some(current) => Ok(InsertOutcome::Existing(FileId::from_bytes(&current)?)),
            None => Ok(InsertOutcome::Inserted(id)),
        }
    }

    /// Look up the File recorded at `location`
    ///
    /// # Errors
    ///
    /// Returns `DbError` if database operations fail or decoding errors occur.
    pub fn find_file(&self, location: &Location) -> Result<Option<File>, DbError> {
        let key: Vec<u8> = location.try_into()?;
        match self.locations.get(key)? {
            Some(id) => self.get_file(FileId::from_bytes(&id)?),
            None => Ok(None),
        }
    }

    /// Fetch a File by id
    ///
    /// # Errors
    ///
    /// Returns `DbError` if database operations fail or decoding errors occur.
    pub fn get_file(&self, id: FileId) -> Result<Option<File>, DbError> {
        match self.files.get(id.as_bytes())? {
            Some(value) => {
                let (record, _): (FileRecord, usize) =
                    bincode::decode_from_slice(&value, bincode::config::standard())?;
                Ok(Some(File::from_record(id, record)))
            }
            None => Ok(None),
        }
    }

    /// All indexed files, ordered by `(path, name)`
    ///
    /// # Errors
    ///
    /// Returns `DbError` if database iteration fails or decoding errors occur.
    pub fn list_files(&self) -> Result<Vec<File>, DbError> {
        let mut files = Vec::with_capacity(self.files.len());
        for result in &self.files {
            let (key, value) = result?;
            let (record, _): (FileRecord, usize) =
                bincode::decode_from_slice(&value, bincode::config::standard())?;
            files.push(File::from_record(FileId::from_bytes(&key)?, record));
        }
        files.sort_by(|a, b| (&a.path, &a.name).cmp(&(&b.path, &b.name)));
        Ok(files)
    }

    /// Remove a File row together with its location and all of its associations
    ///
    /// Tags themselves are kept, even when no file carries them anymore.
    ///
    /// # Returns
    /// `true` if the file existed
    ///
    /// # Errors
    ///
    /// Returns `DbError` if database operations fail.
    pub fn remove_file(&self, id: FileId) -> Result<bool, DbError> {
        let Some(file) = self.get_file(id)? else {
            return Ok(false);
        };
        let location_key: Vec<u8> = (&file.location()).try_into()?;

        let mut associations = Vec::new();
        for result in self.file_tags.scan_prefix(id.as_bytes()) {
            let (key, _) = result?;
            let (_, tag) = split_association_key(&key)?;
            let tag = TagId::from_bytes(tag)?;
            associations.push((
                association_key(id.as_bytes(), tag.as_bytes()),
                association_key(tag.as_bytes(), id.as_bytes()),
            ));
        }

        (&self.files, &self.locations, &self.file_tags, &self.tag_files).transaction(
            |(files, locations, file_tags, tag_files)| -> TxResult<()> {
                files.remove(id.as_bytes().as_slice())?;
                locations.remove(location_key.as_slice())?;
                for (forward, reverse) in &associations {
                    file_tags.remove(forward.as_slice())?;
                    tag_files.remove(reverse.as_slice())?;
                }
                Ok(())
            },
        )?;

        log::debug!("Removed {} ({} association(s))", file.display_path(), associations.len());
        Ok(true)
    }
}
