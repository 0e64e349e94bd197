use std::path::{Path, PathBuf};

use lit_hash::Sha1;
use lit_object::Commit;

use crate::error::BranchError;

/// An ordered history of commits with a current head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    pub name: String,
    pub hash: Sha1,
    pub commits: Vec<Commit>,
    pub head: usize,
}

fn malformed(path: &Path, reason: impl Into<String>) -> BranchError {
    BranchError::MalformedObject {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
}

impl Branch {
    /// Create a branch with an empty history. `salt` disambiguates branches
    /// created with the same name at different times (spec's SHA-1 label is
    /// `name` plus a per-instance salt, not a raw process address).
    pub fn create(name: impl Into<String>, salt: u64) -> Self {
        let name = name.into();
        let hash = Sha1::digest(format!("{name}|{salt}").as_bytes());
        Branch {
            name,
            hash,
            commits: Vec::new(),
            head: 0,
        }
    }

    /// Materialize a new branch as a copy of `source`'s commit list, sharing
    /// commit identities (not duplicating them in the object store).
    pub fn create_from(name: impl Into<String>, salt: u64, source: &Branch) -> Self {
        let mut branch = Self::create(name, salt);
        branch.commits = source.commits.clone();
        branch.head = source.head;
        branch
    }

    /// Append a commit and move the head to it.
    pub fn append_commit(&mut self, commit: Commit) {
        self.commits.push(commit);
        self.head = self.commits.len() - 1;
    }

    /// `true` once any commit exists and the head is not at the tail.
    pub fn is_readonly(&self) -> bool {
        !self.commits.is_empty() && self.head != self.commits.len() - 1
    }

    /// Canonical on-disk path: `.lit/refs/heads/<name>`.
    pub fn path(refs_heads_root: &Path, name: &str) -> PathBuf {
        refs_heads_root.join(name)
    }

    /// Write the branch ref file. Commit objects themselves are expected to
    /// already be written via [`lit_object::Commit::write`].
    pub fn write(&self, refs_heads_root: &Path) -> Result<(), BranchError> {
        let path = Self::path(refs_heads_root, &self.name);
        lit_utils::io::ensure_parent_dir(&path)?;

        let mut out = String::new();
        out.push_str(&format!("name:{}\n", self.name));
        out.push_str(&format!("sha1:{}\n", self.hash.to_hex()));
        out.push_str(&format!("idx:{}\n", self.head));
        out.push_str(&format!("count:{}\n", self.commits.len()));
        for commit in &self.commits {
            out.push_str(&format!("{}\n", commit.hash.to_hex()));
        }
        std::fs::write(&path, out)?;
        log::debug!("wrote branch '{}' ({} commits)", self.name, self.commits.len());
        Ok(())
    }

    /// Load a branch ref file, resolving every listed commit from the
    /// shared object store.
    pub fn read(refs_heads_root: &Path, objects_root: &Path, name: &str) -> Result<Self, BranchError> {
        let path = Self::path(refs_heads_root, name);
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
        let sha1_hex = lines
            .next()
            .and_then(|l| l.strip_prefix("sha1:"))
            .ok_or_else(|| malformed(&path, "missing 'sha1:' header"))?;
        let hash = Sha1::from_hex(sha1_hex)
            .map_err(|e| malformed(&path, format!("invalid sha1 header: {e}")))?;
        let head: usize = lines
            .next()
            .and_then(|l| l.strip_prefix("idx:"))
            .ok_or_else(|| malformed(&path, "missing 'idx:' header"))?
            .parse()
            .map_err(|_| malformed(&path, "non-numeric idx header"))?;
        let count: usize = lines
            .next()
            .and_then(|l| l.strip_prefix("count:"))
            .ok_or_else(|| malformed(&path, "missing 'count:' header"))?
            .parse()
            .map_err(|_| malformed(&path, "non-numeric count header"))?;

        let mut commits = Vec::with_capacity(count);
        for _ in 0..count {
            let hex = lines
                .next()
                .ok_or_else(|| malformed(&path, "fewer commit lines than 'count' promised"))?;
            let commit_hash = Sha1::from_hex(hex)
                .map_err(|e| malformed(&path, format!("invalid commit hash: {e}")))?;
            commits.push(Commit::read(objects_root, &commit_hash)?);
        }

        Ok(Branch {
            name: file_name,
            hash,
            commits,
            head,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn create_from_shares_commit_identities() {
        let mut origin = Branch::create("origin", 1);
        origin.append_commit(lit_object::Commit::create("c0", 1000));
        let dev = Branch::create_from("dev", 2, &origin);
        assert_eq!(dev.commits, origin.commits);
        assert_eq!(dev.head, origin.head);
        assert_ne!(dev.hash, origin.hash);
    }

    #[test]
    fn same_name_different_salt_yields_different_hash() {
        let b1 = Branch::create("origin", 1);
        let b2 = Branch::create("origin", 2);
        assert_ne!(b1.hash, b2.hash);
    }

    #[test]
    fn readonly_iff_head_not_at_tail() {
        let mut b = Branch::create("origin", 1);
        b.append_commit(lit_object::Commit::create("c0", 1000));
        b.append_commit(lit_object::Commit::create("c1", 1000));
        assert!(!b.is_readonly());
        b.head = 0;
        assert!(b.is_readonly());
    }

    #[test]
    fn write_then_read_round_trips() {
        let dir = tempdir().unwrap();
        let refs_heads = dir.path().join("refs/heads");
        let objects_root = dir.path().join("objects");

        let mut branch = Branch::create("origin", 7);
        let mut commit = lit_object::Commit::create("c0", 1000);
        commit.write(&objects_root).unwrap();
        branch.append_commit(commit);
        branch.write(&refs_heads).unwrap();

        let read_back = Branch::read(&refs_heads, &objects_root, "origin").unwrap();
        assert_eq!(read_back, branch);
    }

    #[test]
    fn read_missing_branch_errors() {
        let dir = tempdir().unwrap();
        let refs_heads = dir.path().join("refs/heads");
        let objects_root = dir.path().join("objects");
        let err = Branch::read(&refs_heads, &objects_root, "nope").unwrap_err();
        assert!(matches!(err, BranchError::MissingObject { .. }));
    }
}
