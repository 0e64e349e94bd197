use std::path::{Path, PathBuf};

use lit_repository::Repository;

use crate::config::{self, Config};
use crate::error::LitError;

/// Explicit context for a single command invocation: the repository root,
/// its loaded `Repository`, and its resolved config. Replaces the
/// process-wide mutable globals a dispatcher would otherwise reach for, so
/// tests can run multiple sessions against different roots in the same
/// process.
pub struct Session {
    pub root: PathBuf,
    pub repo: Repository,
    pub config: Config,
}

impl Session {
    /// Open an existing repository rooted at `root`.
    pub fn open(root: &Path) -> Result<Self, LitError> {
        let repo = Repository::open(root)?;
        let config = config::load(&repo.lit_dir())?;
        Ok(Session {
            root: root.to_path_buf(),
            repo,
            config,
        })
    }

    /// Load just the config for a directory that may not yet be a
    /// repository (needed before `Init`, where no `Repository` exists).
    pub fn load_config(root: &Path) -> Result<Config, LitError> {
        config::load(&root.join(".lit"))
    }
}
