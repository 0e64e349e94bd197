//! Directory enumeration for the `add`/`delete --all` CLI actions: walk a
//! directory either one level deep or fully recursively, recording
//! each entry's modification time so the dispatcher can decide what
//! changed since the last stage.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::error::UtilError;

/// A single filesystem entry discovered by a walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inode {
    pub path: PathBuf,
    pub is_dir: bool,
    pub mtime: Option<SystemTime>,
}

/// Enumerate the entries under `root`. `recursive = false` mirrors the CLI's
/// `--no-recurse` modifier and lists only the immediate children; `true`
/// mirrors `--all` and descends into every subdirectory.
pub fn walk(root: &Path, recursive: bool) -> Result<Vec<Inode>, UtilError> {
    let mut out = Vec::new();
    walk_into(root, recursive, &mut out)?;
    out.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(out)
}

fn walk_into(dir: &Path, recursive: bool, out: &mut Vec<Inode>) -> Result<(), UtilError> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let metadata = entry.metadata()?;
        let is_dir = metadata.is_dir();
        let mtime = metadata.modified().ok();
        out.push(Inode {
            path: path.clone(),
            is_dir,
            mtime,
        });
        if is_dir && recursive {
            walk_into(&path, recursive, out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn non_recursive_lists_only_direct_children() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::write(dir.path().join("sub/b.txt"), "b").unwrap();

        let entries = walk(dir.path(), false).unwrap();
        let names: Vec<_> = entries
            .iter()
            .map(|i| i.path.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a.txt", "sub"]);
    }

    #[test]
    fn recursive_descends_into_subdirectories() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::write(dir.path().join("sub/b.txt"), "b").unwrap();

        let entries = walk(dir.path(), true).unwrap();
        assert!(entries.iter().any(|i| i.path.ends_with("sub/b.txt")));
        assert_eq!(entries.len(), 3);
    }

    #[test]
    fn empty_directory_yields_no_entries() {
        let dir = tempdir().unwrap();
        let entries = walk(dir.path(), true).unwrap();
        assert!(entries.is_empty());
    }
}
