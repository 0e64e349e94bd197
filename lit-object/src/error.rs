use std::path::PathBuf;

/// Errors produced by the commit object layer.
#[derive(Debug, thiserror::Error)]
pub enum ObjectError {
    #[error("malformed commit object at '{path}': {reason}")]
    MalformedObject { path: PathBuf, reason: String },

    #[error("missing object referenced at '{path}'")]
    MissingObject { path: PathBuf },

    #[error("commit already written, cannot append further changes")]
    CommitAlreadyWritten,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Diff(#[from] lit_diff::DiffError),

    #[error(transparent)]
    Util(#[from] lit_utils::UtilError),
}
