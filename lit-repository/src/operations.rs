use std::path::Path;

use lit_branch::Branch;
use lit_hash::Sha1;
use lit_object::Commit;

use crate::ancestry::{common_ancestor, index_of};
use crate::error::RepositoryError;
use crate::repository::Repository;

/// Apply every change of `commit` forward, in stored order.
pub fn apply_forward(commit: &Commit, root: &Path) -> Result<(), RepositoryError> {
    for diff in &commit.changes {
        diff.apply_forward(root)?;
    }
    Ok(())
}

/// Apply every change of `commit`'s inverse. Iterated in the *same* stored
/// order as forward application — safe only because diff targets within a
/// well-formed commit are path-disjoint.
pub fn apply_inverse(commit: &Commit, root: &Path) -> Result<(), RepositoryError> {
    for diff in &commit.changes {
        diff.apply_inverse(root)?;
    }
    Ok(())
}

fn find_commit_index(branch: &Branch, target_hash: &Sha1) -> Result<usize, RepositoryError> {
    branch
        .commits
        .iter()
        .position(|c| &c.hash == target_hash)
        .ok_or_else(|| RepositoryError::CommitNotOnBranch(target_hash.to_hex()))
}

/// Walk `branch.head` down to `target_hash`, applying each commit's inverse.
pub fn rollback(branch: &mut Branch, target_hash: &Sha1, root: &Path) -> Result<(), RepositoryError> {
    let target_idx = find_commit_index(branch, target_hash)?;
    if target_idx >= branch.head {
        return Err(RepositoryError::InvalidMove);
    }
    for i in (target_idx + 1..=branch.head).rev() {
        apply_inverse(&branch.commits[i], root)?;
    }
    branch.head = target_idx;
    Ok(())
}

/// Walk `branch.head` up to `target_hash`, applying each commit forward.
pub fn checkout(branch: &mut Branch, target_hash: &Sha1, root: &Path) -> Result<(), RepositoryError> {
    let target_idx = find_commit_index(branch, target_hash)?;
    if target_idx <= branch.head {
        return Err(RepositoryError::InvalidMove);
    }
    for i in branch.head + 1..=target_idx {
        apply_forward(&branch.commits[i], root)?;
    }
    branch.head = target_idx;
    Ok(())
}

fn rollback_to_start(branch: &Branch, root: &Path) -> Result<(), RepositoryError> {
    if branch.commits.is_empty() {
        return Ok(());
    }
    for i in (0..=branch.head).rev() {
        apply_inverse(&branch.commits[i], root)?;
    }
    Ok(())
}

fn forward_to_head(branch: &Branch, root: &Path) -> Result<(), RepositoryError> {
    if branch.commits.is_empty() {
        return Ok(());
    }
    for i in 0..=branch.head {
        apply_forward(&branch.commits[i], root)?;
    }
    Ok(())
}

/// Switch the working tree from the active branch to `target_name`.
pub fn switch(repo: &mut Repository, target_name: &str, root: &Path) -> Result<(), RepositoryError> {
    if repo.active_branch().name == target_name {
        return Ok(());
    }
    let target_idx_in_repo = repo.get_branch_index(target_name)?;
    let active = repo.branches[repo.active_idx].clone();
    let target = repo.branches[target_idx_in_repo].clone();

    match common_ancestor(&active, &target) {
        Some(ancestor_hash) => {
            let ancestor_in_active = index_of(&active, &ancestor_hash)
                .expect("ancestor hash must be present in the branch it was found on");
            if !active.commits.is_empty() {
                for i in (ancestor_in_active + 1..=active.head).rev() {
                    apply_inverse(&active.commits[i], root)?;
                }
            }
            let ancestor_in_target = index_of(&target, &ancestor_hash)
                .expect("ancestor hash must be present in the branch it was found on");
            if !target.commits.is_empty() {
                for i in ancestor_in_target + 1..=target.head {
                    apply_forward(&target.commits[i], root)?;
                }
            }
        }
        None => {
            rollback_to_start(&active, root)?;
            forward_to_head(&target, root)?;
        }
    }

    repo.active_idx = target_idx_in_repo;
    repo.readonly = repo.active_branch().is_readonly();
    Ok(())
}
