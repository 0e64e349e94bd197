use std::path::PathBuf;

/// Errors produced by the diff engine.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    #[error("malformed diff object at '{path}': {reason}")]
    MalformedObject { path: PathBuf, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Util(#[from] lit_utils::UtilError),
}
