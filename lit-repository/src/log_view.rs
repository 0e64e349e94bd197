use crate::error::RepositoryError;
use crate::repository::Repository;
use crate::shelf::count_shelved;

/// One commit's display fields, in the order they appear on the branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitSummary {
    pub hash: String,
    pub message: String,
    pub timestamp: String,
}

/// Everything the `Log` action prints: branch, shelved count, commit list,
/// tags pointing at this branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogView {
    pub branch_name: String,
    pub shelved_count: usize,
    pub commits: Vec<CommitSummary>,
    pub tags: Vec<String>,
}

/// Gather the read-only projection for the repository's active branch.
pub fn log_view(repo: &Repository) -> Result<LogView, RepositoryError> {
    let branch = repo.active_branch();
    let shelved_count = count_shelved(&repo.shelved_root(), &branch.name)?;
    let commits = branch
        .commits
        .iter()
        .map(|c| CommitSummary {
            hash: c.hash.to_hex(),
            message: c.message.clone(),
            timestamp: c.timestamp.clone(),
        })
        .collect();

    let all_tags = lit_branch::read_all_tags(&repo.refs_tags_root())?;
    let tags = lit_branch::filter_tags(&all_tags, &branch.hash)
        .into_iter()
        .map(|t| t.name.clone())
        .collect();

    Ok(LogView {
        branch_name: branch.name.clone(),
        shelved_count,
        commits,
        tags,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lit_branch::Tag;
    use lit_object::Commit;
    use tempfile::tempdir;

    #[test]
    fn gathers_branch_shelf_commits_and_tags() {
        let dir = tempdir().unwrap();
        let mut repo = Repository::initialize(dir.path(), 1000).unwrap();
        let objects_root = repo.objects_root();

        let mut commit = Commit::create("c0", 1000);
        commit
            .push_change(lit_diff::Diff::folder_new(std::path::Path::new("sub"), 1000))
            .unwrap();
        commit.write(&objects_root).unwrap();
        repo.branches[0].append_commit(commit.clone());

        Tag::new("v1", repo.branches[0].hash, commit.hash)
            .write(&repo.refs_tags_root())
            .unwrap();

        let diff = lit_diff::Diff::file_new_from_content(std::path::Path::new("a.txt"), "hi\n", 2000);
        crate::shelf::write_to_shelved(&repo.shelved_root(), "origin", &diff).unwrap();

        let view = log_view(&repo).unwrap();
        assert_eq!(view.branch_name, "origin");
        assert_eq!(view.shelved_count, 1);
        assert_eq!(view.commits.len(), 1);
        assert_eq!(view.commits[0].message, "c0");
        assert_eq!(view.tags, vec!["v1".to_string()]);
    }
}
