use std::path::PathBuf;

use clap::{ArgGroup, Parser};

/// The proper (action) options and their modifier flags, matching the flat
/// set of short/long options a single `lit` invocation may carry. At most
/// one action may be given; `clap`'s `ArgGroup` enforces that up front,
/// before the dispatcher ever sees the parsed value.
///
/// A few actions (`add-branch`, `switch-branch`, `rebase-branch`,
/// `delete-branch`, `clear-cache`, `add-tag`, `delete-tag`) are documented
/// elsewhere with two/three-letter short forms; those aren't expressible as
/// `clap` short options (which are exactly one character), so only their
/// long forms are wired here — the long form is always available and is
/// the one a script would use anyway.
#[derive(Parser, Debug)]
#[command(
    name = "lit",
    version,
    disable_version_flag = true,
    about = "A local, content-addressed, single-user version control engine"
)]
#[command(group(
    ArgGroup::new("action")
        .args([
            "init", "commit", "rollback", "checkout", "log", "add", "delete",
            "add_branch", "switch_branch", "rebase_branch", "delete_branch",
            "clear_cache", "add_tag", "delete_tag",
        ])
        .multiple(false)
))]
pub struct Cli {
    /// Create a new repository in the current directory
    #[arg(short = 'i', long = "init")]
    pub init: bool,

    /// Commit every diff currently staged on the shelf
    #[arg(short = 'c', long = "commit")]
    pub commit: bool,

    /// Roll the active branch back to an older commit
    #[arg(
        short = 'r',
        long = "rollback",
        value_name = "HASH",
        num_args = 0..=1,
        default_missing_value = ""
    )]
    pub rollback: Option<String>,

    /// Move the active branch forward to a newer commit
    #[arg(
        short = 'C',
        long = "checkout",
        value_name = "HASH",
        num_args = 0..=1,
        default_missing_value = ""
    )]
    pub checkout: Option<String>,

    /// Print the active branch, shelved count, commit list, and tags
    #[arg(short = 'l', long = "log")]
    pub log: bool,

    /// Stage a file or directory for the next commit
    #[arg(short = 'a', long = "add", value_name = "PATH")]
    pub add: Option<PathBuf>,

    /// Stage a file or directory deletion for the next commit
    #[arg(short = 'd', long = "delete", value_name = "PATH")]
    pub delete: Option<PathBuf>,

    /// Create a branch (from `--from`, or the active branch)
    #[arg(long = "add-branch", value_name = "NAME")]
    pub add_branch: Option<String>,

    /// Make another branch active, replaying the working tree to match
    #[arg(long = "switch-branch", value_name = "NAME")]
    pub switch_branch: Option<String>,

    /// Append one branch's unique commits onto another's
    #[arg(long = "rebase-branch", num_args = 2, value_names = ["SRC", "DST"])]
    pub rebase_branch: Option<Vec<String>>,

    /// Delete a branch (never `origin`)
    #[arg(long = "delete-branch", value_name = "NAME")]
    pub delete_branch: Option<String>,

    /// Sweep `.lit/objects` for unreferenced commit and diff files
    #[arg(long = "clear-cache")]
    pub clear_cache: bool,

    /// Point a named tag at a commit hash
    #[arg(long = "add-tag", num_args = 2, value_names = ["HASH", "NAME"])]
    pub add_tag: Option<Vec<String>>,

    /// Remove a tag
    #[arg(long = "delete-tag", value_name = "NAME")]
    pub delete_tag: Option<String>,

    /// Print the version and exit
    #[arg(short = 'v', long = "version")]
    pub version: bool,

    // --- modifier flags, valid only with specific actions above ---
    /// With `--add`/`--delete` on a directory: recurse into subdirectories
    #[arg(long = "all")]
    pub all: bool,

    /// With `--add`/`--delete` on a directory: list immediate children only
    #[arg(long = "no-recurse")]
    pub no_recurse: bool,

    /// With `--delete-branch`: bypass the readonly guard (reserved)
    #[arg(long = "hard")]
    pub hard: bool,

    /// With `--log`: render the commit list as a graph (reserved)
    #[arg(long = "graph")]
    pub graph: bool,

    /// With `--log`: only show commits whose message contains this string
    #[arg(long = "filter", value_name = "STR")]
    pub filter: Option<String>,

    /// With `--log`: limit the number of commits printed
    #[arg(long = "max-count", value_name = "N")]
    pub max_count: Option<usize>,

    /// Raise the log level to debug
    #[arg(long = "verbose")]
    pub verbose: bool,

    /// Lower the log level to errors only
    #[arg(long = "quiet")]
    pub quiet: bool,

    /// With `--add-branch`: the source branch (else the active branch)
    #[arg(long = "from", value_name = "BRANCH")]
    pub from: Option<String>,

    /// With `--commit`: the commit message
    #[arg(long = "message", visible_alias = "m", value_name = "TEXT")]
    pub message: Option<String>,

    /// With `--rollback`/`--checkout`: target by tag name instead of hash
    #[arg(long = "tag", value_name = "NAME")]
    pub tag: Option<String>,
}
