use std::path::{Path, PathBuf};

use lit_hash::Sha1;

use crate::error::BranchError;

/// A named pointer from a branch to a commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub branch_hash: Sha1,
    pub commit_hash: Sha1,
}

fn malformed(path: &Path, reason: impl Into<String>) -> BranchError {
    BranchError::MalformedObject {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
}

impl Tag {
    pub fn new(name: impl Into<String>, branch_hash: Sha1, commit_hash: Sha1) -> Self {
        Tag {
            name: name.into(),
            branch_hash,
            commit_hash,
        }
    }

    /// Canonical on-disk path: `.lit/refs/tags/<name>`.
    pub fn path(refs_tags_root: &Path, name: &str) -> PathBuf {
        refs_tags_root.join(name)
    }

    pub fn write(&self, refs_tags_root: &Path) -> Result<(), BranchError> {
        let path = Self::path(refs_tags_root, &self.name);
        lit_utils::io::ensure_parent_dir(&path)?;
        let out = format!(
            "name:{}\nbranch:{}\ncommit:{}\n",
            self.name,
            self.branch_hash.to_hex(),
            self.commit_hash.to_hex()
        );
        std::fs::write(&path, out)?;
        Ok(())
    }

    pub fn read(refs_tags_root: &Path, name: &str) -> Result<Self, BranchError> {
        let path = Self::path(refs_tags_root, name);
        if !path.exists() {
            return Err(BranchError::MissingObject { path });
        }
        let content = lit_utils::io::read_to_string(&path)?;
        let mut lines = content.lines();

        let file_name = lines
            .next()
            .and_then(|l| l.strip_prefix("name:"))
            .ok_or_else(|| malformed(&path, "missing 'name:' header"))?
            .to_string();
        let branch_hex = lines
            .next()
            .and_then(|l| l.strip_prefix("branch:"))
            .ok_or_else(|| malformed(&path, "missing 'branch:' header"))?;
        let branch_hash = Sha1::from_hex(branch_hex)
            .map_err(|e| malformed(&path, format!("invalid branch hash: {e}")))?;
        let commit_hex = lines
            .next()
            .and_then(|l| l.strip_prefix("commit:"))
            .ok_or_else(|| malformed(&path, "missing 'commit:' header"))?;
        let commit_hash = Sha1::from_hex(commit_hex)
            .map_err(|e| malformed(&path, format!("invalid commit hash: {e}")))?;

        Ok(Tag {
            name: file_name,
            branch_hash,
            commit_hash,
        })
    }

    pub fn delete(refs_tags_root: &Path, name: &str) -> Result<(), BranchError> {
        let path = Self::path(refs_tags_root, name);
        std::fs::remove_file(&path)?;
        Ok(())
    }
}

/// Load every tag ref file under `refs_tags_root`. Missing directory reads
/// as no tags rather than an error — a fresh repository has none yet.
pub fn read_all(refs_tags_root: &Path) -> Result<Vec<Tag>, BranchError> {
    if !refs_tags_root.exists() {
        return Ok(Vec::new());
    }
    let mut tags = Vec::new();
    for entry in std::fs::read_dir(refs_tags_root)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            let name = entry.file_name().to_string_lossy().into_owned();
            tags.push(Tag::read(refs_tags_root, &name)?);
        }
    }
    tags.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(tags)
}

/// Filter `tags` to those pointing at `branch_hash`.
pub fn filter_tags<'a>(tags: &'a [Tag], branch_hash: &Sha1) -> Vec<&'a Tag> {
    tags.iter().filter(|t| &t.branch_hash == branch_hash).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn write_then_read_round_trips() {
        let dir = tempdir().unwrap();
        let refs_tags = dir.path().join("refs/tags");
        let tag = Tag::new("v1", Sha1::digest(b"branch"), Sha1::digest(b"commit"));
        tag.write(&refs_tags).unwrap();
        let read_back = Tag::read(&refs_tags, "v1").unwrap();
        assert_eq!(read_back, tag);
    }

    #[test]
    fn filter_tags_matches_branch_hash_exactly() {
        let b1 = Sha1::digest(b"b1");
        let b2 = Sha1::digest(b"b2");
        let tags = vec![
            Tag::new("t1", b1, Sha1::digest(b"c1")),
            Tag::new("t2", b2, Sha1::digest(b"c2")),
            Tag::new("t3", b1, Sha1::digest(b"c3")),
        ];
        let matched = filter_tags(&tags, &b1);
        let names: Vec<_> = matched.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["t1", "t3"]);
    }

    #[test]
    fn delete_removes_file() {
        let dir = tempdir().unwrap();
        let refs_tags = dir.path().join("refs/tags");
        let tag = Tag::new("v1", Sha1::digest(b"branch"), Sha1::digest(b"commit"));
        tag.write(&refs_tags).unwrap();
        Tag::delete(&refs_tags, "v1").unwrap();
        assert!(Tag::read(&refs_tags, "v1").is_err());
    }

    #[test]
    fn read_all_loads_every_tag_sorted_by_name() {
        let dir = tempdir().unwrap();
        let refs_tags = dir.path().join("refs/tags");
        Tag::new("b", Sha1::digest(b"branch"), Sha1::digest(b"c1"))
            .write(&refs_tags)
            .unwrap();
        Tag::new("a", Sha1::digest(b"branch"), Sha1::digest(b"c2"))
            .write(&refs_tags)
            .unwrap();

        let tags = read_all(&refs_tags).unwrap();
        let names: Vec<_> = tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn read_all_missing_directory_is_empty() {
        let dir = tempdir().unwrap();
        let refs_tags = dir.path().join("refs/tags");
        assert!(read_all(&refs_tags).unwrap().is_empty());
    }
}
