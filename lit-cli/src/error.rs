use std::path::PathBuf;

/// Dispatcher-level errors: the engine's own taxonomy plus the CLI parse
/// kinds that have no home in any engine crate.
#[derive(Debug, thiserror::Error)]
pub enum LitError {
    #[error("unknown argument: {0}")]
    UnknownArgument(String),

    #[error("missing argument: {0}")]
    MissingArgument(String),

    #[error("malformed config at '{path}': {reason}")]
    MalformedConfig { path: PathBuf, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Repository(#[from] lit_repository::RepositoryError),

    #[error(transparent)]
    Diff(#[from] lit_diff::DiffError),

    #[error(transparent)]
    Object(#[from] lit_object::ObjectError),

    #[error(transparent)]
    Branch(#[from] lit_branch::BranchError),

    #[error(transparent)]
    Util(#[from] lit_utils::UtilError),

    #[error(transparent)]
    Hash(#[from] lit_hash::HashError),
}
