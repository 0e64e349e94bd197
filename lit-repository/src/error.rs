use std::path::PathBuf;

/// Errors produced by the repository layer — the taxonomy every dispatcher
/// action surfaces to the user.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("'.lit' already exists at '{0}'")]
    RepositoryExists(PathBuf),

    #[error("no '.lit' found at '{0}'")]
    RepositoryMissing(PathBuf),

    #[error("branch '{0}' not found")]
    BranchNotFound(String),

    #[error("branch '{0}' already exists")]
    BranchAlreadyExists(String),

    #[error("'origin' cannot be deleted")]
    BranchProtected,

    #[error("commit '{0}' is not on this branch")]
    CommitNotOnBranch(String),

    #[error("commit '{0}' not found")]
    CommitNotFound(String),

    #[error("invalid move: rollback must target an older commit, checkout a newer one")]
    InvalidMove,

    #[error("repository is read-only: the active branch's head is not at its tail")]
    ReadonlyViolation,

    #[error("tag '{0}' not found")]
    TagNotFound(String),

    #[error("tag '{0}' already exists")]
    TagAlreadyExists(String),

    #[error("rebase conflict: {} commit pair(s) share a changed path", conflicts.len())]
    RebaseConflict { conflicts: Vec<(String, String)> },

    #[error("malformed repository index at '{path}': {reason}")]
    MalformedObject { path: PathBuf, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Diff(#[from] lit_diff::DiffError),

    #[error(transparent)]
    Object(#[from] lit_object::ObjectError),

    #[error(transparent)]
    Branch(#[from] lit_branch::BranchError),

    #[error(transparent)]
    Util(#[from] lit_utils::UtilError),
}
