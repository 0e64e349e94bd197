use std::path::Path;

use lit_object::Commit;

use crate::ancestry::{common_ancestor, index_of};
use crate::error::RepositoryError;
use crate::operations;
use crate::repository::Repository;

/// Two commits conflict if any diff in one and any diff in the other share
/// a `new_path`.
pub fn is_conflicting(c1: &Commit, c2: &Commit) -> bool {
    c1.changes
        .iter()
        .any(|d1| c2.changes.iter().any(|d2| d1.new_path == d2.new_path))
}

/// Result of a rebase feasibility check: whether it's safe, and which
/// commit pairs conflict if not.
pub struct RebaseCheck {
    pub possible: bool,
    pub conflicts: Vec<(String, String)>,
}

pub fn is_rebase_possible(
    repo: &Repository,
    dst_name: &str,
    src_name: &str,
) -> Result<RebaseCheck, RepositoryError> {
    let dst = repo.get_branch_by_name(dst_name)?;
    let src = repo.get_branch_by_name(src_name)?;

    let ancestor = common_ancestor(dst, src).ok_or_else(|| RepositoryError::RebaseConflict {
        conflicts: Vec::new(),
    })?;
    let ancestor_in_dst = index_of(dst, &ancestor).expect("ancestor present on dst");

    let upper = (src.head.min(src.commits.len().saturating_sub(1)))
        .min(dst.commits.len().saturating_sub(1));

    let mut conflicts = Vec::new();
    for i in ancestor_in_dst + 1..=upper {
        if i >= src.commits.len() || i >= dst.commits.len() {
            break;
        }
        if is_conflicting(&src.commits[i], &dst.commits[i]) {
            conflicts.push((src.commits[i].hash.to_hex(), dst.commits[i].hash.to_hex()));
        }
    }

    Ok(RebaseCheck {
        possible: conflicts.is_empty(),
        conflicts,
    })
}

/// Append `src`'s commits above the common ancestor onto `dst`'s tail.
pub fn rebase(
    repo: &mut Repository,
    dst_name: &str,
    src_name: &str,
    root: &Path,
) -> Result<(), RepositoryError> {
    let check = is_rebase_possible(repo, dst_name, src_name)?;
    if !check.possible {
        for (src_hash, dst_hash) in &check.conflicts {
            log::warn!("rebase conflict: src {src_hash} vs dst {dst_hash}");
        }
        return Err(RepositoryError::RebaseConflict {
            conflicts: check.conflicts,
        });
    }

    let src = repo.get_branch_by_name(src_name)?.clone();
    let dst_idx = repo.get_branch_index(dst_name)?;

    let ancestor = common_ancestor(&src, &repo.branches[dst_idx])
        .expect("feasibility check already established a common ancestor");
    let ancestor_in_src = index_of(&src, &ancestor).expect("ancestor present on src");
    let appended: Vec<Commit> = src.commits[ancestor_in_src + 1..].to_vec();
    let appended_count = appended.len();

    let was_active = repo.active_idx == dst_idx;
    {
        let dst = &mut repo.branches[dst_idx];
        dst.commits.extend(appended);
        if was_active {
            dst.head = dst.commits.len() - 1;
        } else {
            dst.head += appended_count;
        }
    }

    if was_active {
        let start = repo.branches[dst_idx].commits.len() - appended_count;
        for i in start..repo.branches[dst_idx].commits.len() {
            operations::apply_forward(&repo.branches[dst_idx].commits[i].clone(), root)?;
        }
    }

    repo.branches[dst_idx].write(&repo.refs_heads_root())?;
    repo.readonly = repo.active_branch().is_readonly();
    repo.write_index()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn commit_with_file(objects_root: &Path, msg: &str, t: u64, path: &str, content: &str) -> Commit {
        let mut c = Commit::create(msg, t);
        c.push_change(lit_diff::Diff::file_new_from_content(Path::new(path), content, t))
            .unwrap();
        c.write(objects_root).unwrap();
        c
    }

    #[test]
    fn rebase_without_conflict_appends_commits() {
        let dir = tempdir().unwrap();
        let mut repo = Repository::initialize(dir.path(), 1000).unwrap();
        let objects_root = repo.objects_root();

        let c0 = commit_with_file(&objects_root, "c0", 1000, "a.txt", "a\n");
        let c1 = commit_with_file(&objects_root, "c1", 2000, "b.txt", "b\n");
        repo.branches[0].append_commit(c0.clone());
        repo.branches[0].append_commit(c1.clone());

        repo.create_branch_from("dev", 3000, None).unwrap();
        let dev_idx = repo.get_branch_index("dev").unwrap();
        let d1 = commit_with_file(&objects_root, "d1", 4000, "c.txt", "c\n");
        repo.branches[dev_idx].append_commit(d1);

        rebase(&mut repo, "origin", "dev", dir.path()).unwrap();
        assert_eq!(repo.branches[0].commits.len(), 3);
        assert_eq!(repo.branches[0].head, 2);
    }

    #[test]
    fn rebase_with_conflict_is_rejected() {
        let dir = tempdir().unwrap();
        let mut repo = Repository::initialize(dir.path(), 1000).unwrap();
        let objects_root = repo.objects_root();

        let c0 = commit_with_file(&objects_root, "c0", 1000, "a.txt", "a\n");
        repo.branches[0].append_commit(c0);

        repo.create_branch_from("dev", 2000, None).unwrap();
        let dev_idx = repo.get_branch_index("dev").unwrap();
        let d1 = commit_with_file(&objects_root, "d1", 3000, "shared.txt", "d\n");
        repo.branches[dev_idx].append_commit(d1);

        let c1 = commit_with_file(&objects_root, "c1", 3500, "shared.txt", "c\n");
        repo.branches[0].append_commit(c1);

        let before = repo.branches[0].commits.clone();
        let err = rebase(&mut repo, "origin", "dev", dir.path()).unwrap_err();
        assert!(matches!(err, RepositoryError::RebaseConflict { .. }));
        assert_eq!(repo.branches[0].commits, before);
        let _ = fs::metadata(dir.path());
    }
}
