use std::path::{Path, PathBuf};

use lit_branch::Branch;

use crate::error::RepositoryError;

/// Set of branches plus the active-branch pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub root: PathBuf,
    pub branches: Vec<Branch>,
    pub active_idx: usize,
    pub readonly: bool,
}

fn malformed(path: &Path, reason: impl Into<String>) -> RepositoryError {
    RepositoryError::MalformedObject {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
}

impl Repository {
    pub fn lit_dir(&self) -> PathBuf {
        self.root.join(".lit")
    }

    pub fn objects_root(&self) -> PathBuf {
        self.lit_dir().join("objects")
    }

    pub fn refs_heads_root(&self) -> PathBuf {
        self.lit_dir().join("refs").join("heads")
    }

    pub fn refs_tags_root(&self) -> PathBuf {
        self.lit_dir().join("refs").join("tags")
    }

    pub fn shelved_root(&self) -> PathBuf {
        self.objects_root().join("shelved")
    }

    pub fn index_path(&self) -> PathBuf {
        self.lit_dir().join("index")
    }

    pub fn active_branch(&self) -> &Branch {
        &self.branches[self.active_idx]
    }

    pub fn active_branch_mut(&mut self) -> &mut Branch {
        &mut self.branches[self.active_idx]
    }

    /// Create the `.lit/` directory tree and the `origin` branch.
    /// `now` is the repository's creation epoch, used to seed branch
    /// hashes reproducibly (name + repository epoch, not a process address).
    pub fn initialize(root: &Path, now: u64) -> Result<Self, RepositoryError> {
        let lit_dir = root.join(".lit");
        if lit_dir.exists() {
            return Err(RepositoryError::RepositoryExists(lit_dir));
        }

        let objects_root = lit_dir.join("objects");
        lit_utils::io::ensure_dir(&objects_root.join("commits"))?;
        lit_utils::io::ensure_dir(&objects_root.join("diffs"))?;
        lit_utils::io::ensure_dir(&objects_root.join("shelved"))?;
        let refs_heads_root = lit_dir.join("refs").join("heads");
        let refs_tags_root = lit_dir.join("refs").join("tags");
        lit_utils::io::ensure_dir(&refs_heads_root)?;
        lit_utils::io::ensure_dir(&refs_tags_root)?;

        let origin = Branch::create("origin", now);
        origin.write(&refs_heads_root)?;

        let repo = Repository {
            root: root.to_path_buf(),
            branches: vec![origin],
            active_idx: 0,
            readonly: false,
        };
        repo.write_index()?;
        log::info!("initialized repository at {}", root.display());
        Ok(repo)
    }

    /// Open an existing repository, loading every branch it references.
    pub fn open(root: &Path) -> Result<Self, RepositoryError> {
        let lit_dir = root.join(".lit");
        if !lit_dir.exists() {
            return Err(RepositoryError::RepositoryMissing(lit_dir));
        }

        let index_path = lit_dir.join("index");
        let content = lit_utils::io::read_to_string(&index_path)?;
        let mut lines = content.lines();

        let active_idx: usize = lines
            .next()
            .and_then(|l| l.strip_prefix("active:"))
            .ok_or_else(|| malformed(&index_path, "missing 'active:' header"))?
            .parse()
            .map_err(|_| malformed(&index_path, "non-numeric active header"))?;
        let count: usize = lines
            .next()
            .and_then(|l| l.strip_prefix("count:"))
            .ok_or_else(|| malformed(&index_path, "missing 'count:' header"))?
            .parse()
            .map_err(|_| malformed(&index_path, "non-numeric count header"))?;
        let readonly_flag: u8 = lines
            .next()
            .and_then(|l| l.strip_prefix("readonly:"))
            .ok_or_else(|| malformed(&index_path, "missing 'readonly:' header"))?
            .parse()
            .map_err(|_| malformed(&index_path, "non-numeric readonly header"))?;

        let objects_root = lit_dir.join("objects");
        let refs_heads_root = lit_dir.join("refs").join("heads");
        let mut branches = Vec::with_capacity(count);
        for expected_i in 0..count {
            let line = lines.next().ok_or_else(|| {
                malformed(&index_path, "fewer branch lines than 'count' promised")
            })?;
            let (idx_str, name) = line
                .split_once(':')
                .ok_or_else(|| malformed(&index_path, "malformed branch index line"))?;
            let idx: usize = idx_str
                .parse()
                .map_err(|_| malformed(&index_path, "non-numeric branch index"))?;
            if idx != expected_i {
                return Err(malformed(&index_path, "out-of-order branch index"));
            }
            branches.push(Branch::read(&refs_heads_root, &objects_root, name)?);
        }

        Ok(Repository {
            root: root.to_path_buf(),
            branches,
            active_idx,
            readonly: readonly_flag != 0,
        })
    }

    pub fn write_index(&self) -> Result<(), RepositoryError> {
        let path = self.index_path();
        lit_utils::io::ensure_parent_dir(&path)?;
        let mut out = String::new();
        out.push_str(&format!("active:{}\n", self.active_idx));
        out.push_str(&format!("count:{}\n", self.branches.len()));
        out.push_str(&format!("readonly:{}\n", self.readonly as u8));
        for (i, branch) in self.branches.iter().enumerate() {
            out.push_str(&format!("{}:{}\n", i, branch.name));
        }
        std::fs::write(&path, out)?;
        Ok(())
    }

    pub fn get_branch_by_name(&self, name: &str) -> Result<&Branch, RepositoryError> {
        self.branches
            .iter()
            .find(|b| b.name == name)
            .ok_or_else(|| RepositoryError::BranchNotFound(name.to_string()))
    }

    pub fn get_branch_index(&self, name: &str) -> Result<usize, RepositoryError> {
        self.branches
            .iter()
            .position(|b| b.name == name)
            .ok_or_else(|| RepositoryError::BranchNotFound(name.to_string()))
    }

    /// Create `name` as a copy of `source_name`'s commit list (or the
    /// active branch's, if unspecified), sharing commit identities.
    pub fn create_branch_from(
        &mut self,
        name: &str,
        salt: u64,
        source_name: Option<&str>,
    ) -> Result<(), RepositoryError> {
        if self.branches.iter().any(|b| b.name == name) {
            return Err(RepositoryError::BranchAlreadyExists(name.to_string()));
        }
        let source = match source_name {
            Some(n) => self.get_branch_by_name(n)?,
            None => self.active_branch(),
        };
        let new_branch = Branch::create_from(name, salt, source);
        new_branch.write(&self.refs_heads_root())?;
        self.branches.push(new_branch);
        self.write_index()?;
        Ok(())
    }

    /// Delete a branch (never `origin`). If it was active, the caller must
    /// subsequently switch back to `origin` via [`crate::operations::switch`].
    pub fn delete_branch(&mut self, name: &str) -> Result<(), RepositoryError> {
        if name == "origin" {
            return Err(RepositoryError::BranchProtected);
        }
        let idx = self.get_branch_index(name)?;
        let path = lit_branch::Branch::path(&self.refs_heads_root(), name);
        if path.exists() {
            std::fs::remove_file(&path)?;
        }
        self.branches.remove(idx);
        if self.active_idx > idx {
            self.active_idx -= 1;
        } else if self.active_idx == idx {
            self.active_idx = self.get_branch_index("origin")?;
        }
        self.write_index()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn initialize_creates_origin_and_index() {
        let dir = tempdir().unwrap();
        let repo = Repository::initialize(dir.path(), 1000).unwrap();
        assert_eq!(repo.branches.len(), 1);
        assert_eq!(repo.branches[0].name, "origin");
        assert!(dir.path().join(".lit/index").is_file());
        assert!(dir.path().join(".lit/refs/heads/origin").is_file());
    }

    #[test]
    fn initialize_twice_errors() {
        let dir = tempdir().unwrap();
        Repository::initialize(dir.path(), 1000).unwrap();
        let err = Repository::initialize(dir.path(), 1000).unwrap_err();
        assert!(matches!(err, RepositoryError::RepositoryExists(_)));
    }

    #[test]
    fn open_round_trips_initialized_repository() {
        let dir = tempdir().unwrap();
        Repository::initialize(dir.path(), 1000).unwrap();
        let repo = Repository::open(dir.path()).unwrap();
        assert_eq!(repo.active_idx, 0);
        assert_eq!(repo.branches[0].name, "origin");
        assert!(!repo.readonly);
    }

    #[test]
    fn open_missing_repository_errors() {
        let dir = tempdir().unwrap();
        let err = Repository::open(dir.path()).unwrap_err();
        assert!(matches!(err, RepositoryError::RepositoryMissing(_)));
    }

    #[test]
    fn create_branch_from_active_and_delete() {
        let dir = tempdir().unwrap();
        let mut repo = Repository::initialize(dir.path(), 1000).unwrap();
        repo.create_branch_from("dev", 2000, None).unwrap();
        assert_eq!(repo.branches.len(), 2);

        let err = repo.create_branch_from("dev", 3000, None).unwrap_err();
        assert!(matches!(err, RepositoryError::BranchAlreadyExists(_)));

        repo.delete_branch("dev").unwrap();
        assert_eq!(repo.branches.len(), 1);
    }

    #[test]
    fn origin_cannot_be_deleted() {
        let dir = tempdir().unwrap();
        let mut repo = Repository::initialize(dir.path(), 1000).unwrap();
        let err = repo.delete_branch("origin").unwrap_err();
        assert!(matches!(err, RepositoryError::BranchProtected));
    }

    #[test]
    fn deleting_active_branch_falls_back_to_origin() {
        let dir = tempdir().unwrap();
        let mut repo = Repository::initialize(dir.path(), 1000).unwrap();
        repo.create_branch_from("dev", 2000, None).unwrap();
        repo.active_idx = repo.get_branch_index("dev").unwrap();
        repo.delete_branch("dev").unwrap();
        assert_eq!(repo.active_branch().name, "origin");
    }
}
