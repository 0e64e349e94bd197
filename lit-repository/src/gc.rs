use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::RepositoryError;
use crate::repository::Repository;

/// Recursively walk `.lit/objects`, remove every file not referenced by any
/// branch's commits (or those commits' diffs), and prune now-empty parent
/// directories. Returns the count of removed entries.
pub fn scan_object_cache(repo: &Repository) -> Result<usize, RepositoryError> {
    let objects_root = repo.objects_root();
    let diffs_root = objects_root.join("diffs");

    let mut live: HashSet<PathBuf> = HashSet::new();
    for branch in &repo.branches {
        for commit in &branch.commits {
            live.insert(commit.path(&objects_root));
            for diff in &commit.changes {
                live.insert(lit_diff::object_path(&diffs_root, diff.crc));
            }
        }
    }

    let entries = lit_utils::walk::walk(&objects_root, true)?;
    let mut removed = 0usize;
    let mut touched_parents: HashSet<PathBuf> = HashSet::new();

    for entry in entries {
        if entry.is_dir {
            continue;
        }
        if !live.contains(&entry.path) {
            std::fs::remove_file(&entry.path)?;
            removed += 1;
            if let Some(parent) = entry.path.parent() {
                touched_parents.insert(parent.to_path_buf());
            }
        }
    }

    for parent in touched_parents {
        if is_empty_dir(&parent)? {
            std::fs::remove_dir(&parent)?;
        }
    }

    log::info!("cache GC removed {removed} object(s)");
    Ok(removed)
}

fn is_empty_dir(dir: &Path) -> Result<bool, RepositoryError> {
    Ok(std::fs::read_dir(dir)?.next().is_none())
}
