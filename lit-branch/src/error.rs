use std::path::PathBuf;

/// Errors produced by the branch and tag layer.
#[derive(Debug, thiserror::Error)]
pub enum BranchError {
    #[error("malformed branch object at '{path}': {reason}")]
    MalformedObject { path: PathBuf, reason: String },

    #[error("branch not found at '{path}'")]
    MissingObject { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Object(#[from] lit_object::ObjectError),

    #[error(transparent)]
    Util(#[from] lit_utils::UtilError),
}
