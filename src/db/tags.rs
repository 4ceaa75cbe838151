//! Tag resolution and file-tag associations

use super::types::{association_key, split_association_key};
use super::{Database, DbError, FileId, Location, Tag, TagId, TagSpec, TxResult};
use sled::IVec;
use sled::Transactional;

const EMPTY: &[u8] = &[];

impl Database {
    /// Look up an existing tag
    ///
    /// # Errors
    ///
    /// Returns `DbError` if database operations fail or decoding errors occur.
    pub fn find_tag(&self, spec: &TagSpec) -> Result<Option<Tag>, DbError> {
        let key: Vec<u8> = spec.try_into()?;
        match self.tag_keys.get(key)? {
            Some(id) => Ok(Some(Tag::from_spec(TagId::from_bytes(&id)?, spec.clone()))),
            None => Ok(None),
        }
    }

    /// Return the tag for `tag`, creating it if it does not exist yet
    ///
    /// Lookup and creation happen inside one transaction over `tag_keys` and
    /// `tags`; two concurrent callers always end up with the same tag.
    ///
    /// # Errors
    ///
    /// Returns `DbError::InvalidInput` for a malformed tag string, or `DbError`
    /// if the transaction fails.
    pub fn resolve_or_create_tag(&self, tag: &str) -> Result<Tag, DbError> {
        let spec: TagSpec = tag.parse()?;
        self.resolve_or_create_spec(spec)
    }

    fn resolve_or_create_spec(&self, spec: TagSpec) -> Result<Tag, DbError> {
        let key: Vec<u8> = (&spec).try_into()?;
        let id = TagId::new();

        let existing = (&self.tag_keys, &self.tags).transaction(
            |(tag_keys, tags)| -> TxResult<Option<IVec>> {
                if let Some(current) = tag_keys.get(key.as_slice())? {
                    return Ok(Some(current));
                }
                tag_keys.insert(key.as_slice(), id.as_bytes().as_slice())?;
                tags.insert(id.as_bytes().as_slice(), key.as_slice())?;
                Ok(None)
            },
        )?;

        match existing {
            Some(current) => Ok(Tag::from_spec(TagId::from_bytes(&current)?, spec)),
            None => {
                log::debug!("Created tag {spec}");
                Ok(Tag::from_spec(id, spec))
            }
        }
    }

    /// Apply `tag` to the file indexed at `location`
    ///
    /// # Returns
    /// `true` if the association was created, `false` if it already existed
    ///
    /// # Errors
    ///
    /// Returns `DbError::FileNotIndexed` if nothing is indexed at `location`,
    /// `DbError::InvalidInput` for a malformed tag string, or `DbError` if
    /// database operations fail.
    pub fn add_tag_to_file(&self, location: &Location, tag: &str) -> Result<bool, DbError> {
        let spec: TagSpec = tag.parse()?;
        let file = self
            .find_file(location)?
            .ok_or_else(|| DbError::FileNotIndexed(location.display_path()))?;
        let tag = self.resolve_or_create_spec(spec)?;

        let forward = association_key(file.id.as_bytes(), tag.id.as_bytes());
        let reverse = association_key(tag.id.as_bytes(), file.id.as_bytes());

        let previous = (&self.file_tags, &self.tag_files).transaction(
            |(file_tags, tag_files)| -> TxResult<Option<IVec>> {
                let previous = file_tags.insert(forward.as_slice(), EMPTY)?;
                tag_files.insert(reverse.as_slice(), EMPTY)?;
                Ok(previous)
            },
        )?;

        Ok(previous.is_none())
    }

    /// Remove `tag` from the file indexed at `location`
    ///
    /// An unknown tag or a missing association is not an error.
    ///
    /// # Returns
    /// `true` if an association was removed
    ///
    /// # Errors
    ///
    /// Returns `DbError::FileNotIndexed` if nothing is indexed at `location`,
    /// `DbError::InvalidInput` for a malformed tag string, or `DbError` if
    /// database operations fail.
    pub fn remove_tag_from_file(&self, location: &Location, tag: &str) -> Result<bool, DbError> {
        let spec: TagSpec = tag.parse()?;
        let file = self
            .find_file(location)?
            .ok_or_else(|| DbError::FileNotIndexed(location.display_path()))?;
        let Some(tag) = self.find_tag(&spec)? else {
            return Ok(false);
        };

        let forward = association_key(file.id.as_bytes(), tag.id.as_bytes());
        let reverse = association_key(tag.id.as_bytes(), file.id.as_bytes());

        let previous = (&self.file_tags, &self.tag_files).transaction(
            |(file_tags, tag_files)| -> TxResult<Option<IVec>> {
                let previous = file_tags.remove(forward.as_slice())?;
                tag_files.remove(reverse.as_slice())?;
                Ok(previous)
            },
        )?;

        Ok(previous.is_some())
    }

    /// Tags applied to a file, ordered by their canonical form
    ///
    /// # Errors
    ///
    /// Returns `DbError` if database operations fail or decoding errors occur.
    pub fn tags_for_file(&self, file: FileId) -> Result<Vec<Tag>, DbError> {
        let mut tags = Vec::new();
        for result in self.file_tags.scan_prefix(file.as_bytes()) {
            let (key, _) = result?;
            let (_, tag_id) = split_association_key(&key)?;
            let tag_id = TagId::from_bytes(tag_id)?;
            match self.tags.get(tag_id.as_bytes())? {
                Some(value) => tags.push(Tag::from_spec(tag_id, TagSpec::from_bytes(&value)?)),
                None => log::warn!("Association of file {file} points to missing tag {tag_id}"),
            }
        }
        tags.sort_by(|a, b| a.spec().cmp(&b.spec()));
        Ok(tags)
    }
}
