use std::path::PathBuf;

/// Base error type for lit-utils operations.
#[derive(Debug, thiserror::Error)]
pub enum UtilError {
    #[error("failed to create directory '{path}': {source}")]
    Mkdir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
