//! Read-only queries over files and tags

use super::types::split_association_key;
use super::{Database, DbError, File, FileId, Tag, TagId, TagSpec};

/// A tag together with the number of files carrying it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagUsage {
    pub tag: Tag,
    pub files: usize,
}

impl Database {
    /// Find all files carrying exactly the tag `tag`
    ///
    /// Matching is exact on `(category, value)`; there is no prefix or
    /// wildcard matching. An unknown tag yields an empty list.
    ///
    /// # Returns
    /// Files ordered by `(path, name)`
    ///
    /// # Errors
    ///
    /// Returns `DbError::InvalidInput` for a malformed tag string, or `DbError`
    /// if database operations fail or decoding errors occur.
    pub fn files_with_tag(&self, tag: &str) -> Result<Vec<File>, DbError> {
        let spec: TagSpec = tag.parse()?;
        let Some(tag) = self.find_tag(&spec)? else {
            return Ok(Vec::new());
        };

        let mut files = Vec::new();
        for result in self.tag_files.scan_prefix(tag.id.as_bytes()) {
            let (key, _) = result?;
            let (_, file_id) = split_association_key(&key)?;
            let file_id = FileId::from_bytes(file_id)?;
            match self.get_file(file_id)? {
                Some(file) => files.push(file),
                None => log::warn!("Tag {tag} points to missing file {file_id}"),
            }
        }
        files.sort_by(|a, b| (&a.path, &a.name).cmp(&(&b.path, &b.name)));
        Ok(files)
    }

    /// All tags with their usage counts, ordered by canonical form
    ///
    /// # Errors
    ///
    /// Returns `DbError` if database iteration fails or decoding errors occur.
    pub fn list_tags(&self) -> Result<Vec<TagUsage>, DbError> {
        let mut usages = Vec::with_capacity(self.tags.len());
        for result in &self.tags {
            let (key, value) = result?;
            let id = TagId::from_bytes(&key)?;
            let files = self.tag_files.scan_prefix(id.as_bytes()).count();
            usages.push(TagUsage {
                tag: Tag::from_spec(id, TagSpec::from_bytes(&value)?),
                files,
            });
        }
        usages.sort_by(|a, b| a.tag.spec().cmp(&b.tag.spec()));
        Ok(usages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Location;
    use crate::testing::TestDb;

    fn tagged_db() -> TestDb {
        let test_db = TestDb::new();
        let db = test_db.db();
        let a = Location::new(".", "a.txt");
        let b = Location::new("sub", "b.txt");
        let c = Location::new("sub", "c.txt");
        for location in [&a, &b, &c] {
            db.insert_file(location).unwrap();
        }
        db.add_tag_to_file(&a, "bank:chase").unwrap();
        db.add_tag_to_file(&b, "bank:chase").unwrap();
        db.add_tag_to_file(&c, "bank:citi").unwrap();
        db.add_tag_to_file(&c, "urgent").unwrap();
        test_db
    }

    #[test]
    fn test_files_with_tag() {
        let test_db = tagged_db();

        let files = test_db.db().files_with_tag("bank:chase").unwrap();
        let paths: Vec<String> = files.iter().map(File::display_path).collect();
        assert_eq!(paths, vec!["a.txt", "sub/b.txt"]);
    }

    #[test]
    fn test_unknown_tag_yields_empty() {
        let test_db = tagged_db();

        assert!(test_db.db().files_with_tag("nonexistent:tag").unwrap().is_empty());
    }

    #[test]
    fn test_no_prefix_matching() {
        let test_db = tagged_db();
        let db = test_db.db();

        assert!(db.files_with_tag("bank:ch").unwrap().is_empty());
        assert!(db.files_with_tag("ban:chase").unwrap().is_empty());
    }

    #[test]
    fn test_tag_without_files_yields_empty() {
        let test_db = TestDb::new();
        let db = test_db.db();
        db.resolve_or_create_tag("lonely:tag").unwrap();

        assert!(db.files_with_tag("lonely:tag").unwrap().is_empty());
    }

    #[test]
    fn test_uncategorized_tag_lookup() {
        let test_db = tagged_db();
        let db = test_db.db();

        let bare = db.files_with_tag("urgent").unwrap();
        let explicit = db.files_with_tag(":urgent").unwrap();
        assert_eq!(bare, explicit);
        assert_eq!(bare.len(), 1);
        assert_eq!(bare[0].name, "c.txt");
    }

    #[test]
    fn test_list_tags_with_counts() {
        let test_db = tagged_db();

        let usages: Vec<(String, usize)> = test_db
            .db()
            .list_tags()
            .unwrap()
            .into_iter()
            .map(|usage| (usage.tag.to_string(), usage.files))
            .collect();

        assert_eq!(
            usages,
            vec![
                (":urgent".to_string(), 1),
                ("bank:chase".to_string(), 2),
                ("bank:citi".to_string(), 1),
            ]
        );
    }
}
