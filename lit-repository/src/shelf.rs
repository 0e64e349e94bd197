use std::fs;
use std::path::Path;

use lit_diff::Diff;

use crate::error::RepositoryError;

fn branch_shelf_dir(shelved_root: &Path, branch_name: &str) -> std::path::PathBuf {
    shelved_root.join(branch_name)
}

/// Stage `diff` for the next commit on `branch_name`.
pub fn write_to_shelved(
    shelved_root: &Path,
    branch_name: &str,
    diff: &Diff,
) -> Result<(), RepositoryError> {
    let dir = branch_shelf_dir(shelved_root, branch_name);
    lit_utils::io::ensure_dir(&dir)?;
    let path = dir.join(format!("{}.diff", diff.crc));
    lit_diff::write(&path, diff)?;
    Ok(())
}

/// List the diffs currently staged for `branch_name`, without consuming them.
pub fn collect_shelved(shelved_root: &Path, branch_name: &str) -> Result<Vec<Diff>, RepositoryError> {
    let dir = branch_shelf_dir(shelved_root, branch_name);
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let mut diffs = Vec::new();
    for entry in fs::read_dir(&dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            diffs.push(lit_diff::read(&entry.path())?);
        }
    }
    Ok(diffs)
}

/// Count the diffs staged for `branch_name`, without loading them.
pub fn count_shelved(shelved_root: &Path, branch_name: &str) -> Result<usize, RepositoryError> {
    let dir = branch_shelf_dir(shelved_root, branch_name);
    if !dir.exists() {
        return Ok(0);
    }
    let mut count = 0;
    for entry in fs::read_dir(&dir)? {
        if entry?.file_type()?.is_file() {
            count += 1;
        }
    }
    Ok(count)
}

/// Load and remove every diff staged for `branch_name` (consumed by a
/// successful commit).
pub fn consume_shelved(shelved_root: &Path, branch_name: &str) -> Result<Vec<Diff>, RepositoryError> {
    let diffs = collect_shelved(shelved_root, branch_name)?;
    let dir = branch_shelf_dir(shelved_root, branch_name);
    if dir.exists() {
        fs::remove_dir_all(&dir)?;
    }
    Ok(diffs)
}
