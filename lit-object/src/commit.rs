use std::path::{Path, PathBuf};

use lit_diff::Diff;
use lit_hash::hex::hex_shard;
use lit_hash::Sha1;

use crate::error::ObjectError;
use crate::timestamp::format_timestamp;

/// An ordered group of diffs with identity (commit object).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub hash: Sha1,
    pub message: String,
    pub timestamp: String,
    pub raw_time: u64,
    pub changes: Vec<Diff>,
    written: bool,
}

fn malformed(path: &Path, reason: impl Into<String>) -> ObjectError {
    ObjectError::MalformedObject {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
}

impl Commit {
    /// Create a new, unwritten commit. The hash is fixed at creation from
    /// `(message, timestamp, initial change count, raw_time)` — it does not
    /// change as changes are appended afterward.
    pub fn create(message: impl Into<String>, raw_time: u64) -> Self {
        let message = message.into();
        let timestamp = format_timestamp(raw_time);
        let hash = Sha1::digest(
            format!("{message}|{timestamp}|0|{raw_time}").as_bytes(),
        );
        Commit {
            hash,
            message,
            timestamp,
            raw_time,
            changes: Vec::new(),
            written: false,
        }
    }

    /// Append a change. Only valid before the first `write`.
    pub fn push_change(&mut self, diff: Diff) -> Result<(), ObjectError> {
        if self.written {
            return Err(ObjectError::CommitAlreadyWritten);
        }
        self.changes.push(diff);
        Ok(())
    }

    /// Canonical on-disk path: `<objects>/commits/<h[0:2]>/<h[2:40]>`.
    pub fn path(&self, objects_root: &Path) -> PathBuf {
        let (shard, rest) = hex_shard(&self.hash.to_hex());
        objects_root.join("commits").join(shard).join(rest)
    }

    /// Write every unwritten change's diff object, then the commit header.
    pub fn write(&mut self, objects_root: &Path) -> Result<(), ObjectError> {
        let diffs_root = objects_root.join("diffs");
        for diff in &self.changes {
            let diff_path = lit_diff::object_path(&diffs_root, diff.crc);
            if !diff_path.exists() {
                lit_diff::write(&diff_path, diff)?;
            }
        }

        let path = self.path(objects_root);
        lit_utils::io::ensure_parent_dir(&path)?;

        let mut out = String::new();
        out.push_str(&format!("message:{}\n", self.message));
        out.push_str(&format!("timestamp:{}\n", self.timestamp));
        out.push_str(&format!("sha1:{}\n", self.hash.to_hex()));
        out.push_str(&format!("count:{}\n", self.changes.len()));
        out.push_str(&format!("rawtime:{}\n", self.raw_time));
        for diff in &self.changes {
            out.push_str(&format!("{}\n", diff.crc));
        }
        std::fs::write(&path, out)?;

        self.written = true;
        log::debug!("wrote commit {} ({} changes)", self.hash, self.changes.len());
        Ok(())
    }

    /// Load a previously written commit, resolving every referenced diff.
    pub fn read(objects_root: &Path, hash: &Sha1) -> Result<Self, ObjectError> {
        let (shard, rest) = hex_shard(&hash.to_hex());
        let path = objects_root.join("commits").join(shard).join(rest);
        if !path.exists() {
            return Err(ObjectError::MissingObject { path });
        }
        let content = lit_utils::io::read_to_string(&path)?;
        let mut lines = content.lines();

        let message = lines
            .next()
            .and_then(|l| l.strip_prefix("message:"))
            .ok_or_else(|| malformed(&path, "missing 'message:' header"))?
            .to_string();
        let timestamp = lines
            .next()
            .and_then(|l| l.strip_prefix("timestamp:"))
            .ok_or_else(|| malformed(&path, "missing 'timestamp:' header"))?
            .to_string();
        let sha1_hex = lines
            .next()
            .and_then(|l| l.strip_prefix("sha1:"))
            .ok_or_else(|| malformed(&path, "missing 'sha1:' header"))?;
        let stored_hash = Sha1::from_hex(sha1_hex)
            .map_err(|e| malformed(&path, format!("invalid sha1 header: {e}")))?;
        let count: usize = lines
            .next()
            .and_then(|l| l.strip_prefix("count:"))
            .ok_or_else(|| malformed(&path, "missing 'count:' header"))?
            .parse()
            .map_err(|_| malformed(&path, "non-numeric count header"))?;
        let raw_time: u64 = lines
            .next()
            .and_then(|l| l.strip_prefix("rawtime:"))
            .ok_or_else(|| malformed(&path, "missing 'rawtime:' header"))?
            .parse()
            .map_err(|_| malformed(&path, "non-numeric rawtime header"))?;

        let diffs_root = objects_root.join("diffs");
        let mut changes = Vec::with_capacity(count);
        for _ in 0..count {
            let crc_line = lines
                .next()
                .ok_or_else(|| malformed(&path, "fewer crc lines than 'count' promised"))?;
            let crc: u32 = crc_line
                .parse()
                .map_err(|_| malformed(&path, "non-numeric crc line"))?;
            let diff_path = lit_diff::object_path(&diffs_root, crc);
            if !diff_path.exists() {
                return Err(ObjectError::MissingObject { path: diff_path });
            }
            changes.push(lit_diff::read(&diff_path)?);
        }

        Ok(Commit {
            hash: stored_hash,
            message,
            timestamp,
            raw_time,
            changes,
            written: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::tempdir;

    #[test]
    fn create_is_deterministic_in_hash() {
        let c1 = Commit::create("hello", 1000);
        let c2 = Commit::create("hello", 1000);
        assert_eq!(c1.hash, c2.hash);
    }

    #[test]
    fn different_messages_yield_different_hashes() {
        let c1 = Commit::create("hello", 1000);
        let c2 = Commit::create("world", 1000);
        assert_ne!(c1.hash, c2.hash);
    }

    #[test]
    fn push_after_write_is_rejected() {
        let dir = tempdir().unwrap();
        let objects_root = dir.path().join("objects");
        let mut commit = Commit::create("c1", 1000);
        commit.write(&objects_root).unwrap();
        let diff = Diff::folder_new(Path::new("sub"), 1000);
        assert!(matches!(
            commit.push_change(diff),
            Err(ObjectError::CommitAlreadyWritten)
        ));
    }

    #[test]
    fn write_then_read_round_trips() {
        let dir = tempdir().unwrap();
        let objects_root = dir.path().join("objects");
        fs_write_helper(&dir, "a.txt", "hello\n");

        let mut commit = Commit::create("c1", 1000);
        let diff = Diff::file_new(&dir.path().join("a.txt"), 1000).unwrap();
        commit.push_change(diff).unwrap();
        commit.write(&objects_root).unwrap();

        let read_back = Commit::read(&objects_root, &commit.hash).unwrap();
        assert_eq!(read_back, commit);
    }

    #[test]
    fn read_missing_commit_errors() {
        let dir = tempdir().unwrap();
        let objects_root = dir.path().join("objects");
        let bogus = Sha1::digest(b"nonexistent");
        let err = Commit::read(&objects_root, &bogus).unwrap_err();
        assert!(matches!(err, ObjectError::MissingObject { .. }));
    }

    #[test]
    fn read_with_missing_diff_errors() {
        let dir = tempdir().unwrap();
        let objects_root = dir.path().join("objects");
        fs_write_helper(&dir, "a.txt", "hello\n");

        let mut commit = Commit::create("c1", 1000);
        let diff = Diff::file_new(&dir.path().join("a.txt"), 1000).unwrap();
        commit.push_change(diff).unwrap();
        commit.write(&objects_root).unwrap();

        // Remove the referenced diff object out from under the commit.
        let diffs_root = objects_root.join("diffs");
        let diff_path = lit_diff::object_path(&diffs_root, commit.changes[0].crc);
        std::fs::remove_file(&diff_path).unwrap();

        let err = Commit::read(&objects_root, &commit.hash).unwrap_err();
        assert!(matches!(err, ObjectError::MissingObject { .. }));
    }

    fn fs_write_helper(dir: &tempfile::TempDir, name: &str, content: &str) {
        std::fs::write(dir.path().join(name), content).unwrap();
    }
}
