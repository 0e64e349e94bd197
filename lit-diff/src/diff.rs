use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use lit_hash::crc32;

use crate::error::DiffError;
use crate::lcs::lcs_diff;

/// A single annotated line. The tag lives in the variant, not in the
/// string content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Added(String),
    Removed(String),
    Retained(String),
}

impl Line {
    pub fn text(&self) -> &str {
        match self {
            Line::Added(s) | Line::Removed(s) | Line::Retained(s) => s,
        }
    }

    /// The 2-character on-disk tag for this line.
    pub fn tag(&self) -> &'static str {
        match self {
            Line::Added(_) => "+ ",
            Line::Removed(_) => "- ",
            Line::Retained(_) => "  ",
        }
    }
}

/// The kind of change a diff records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffKind {
    FileNew,
    FileDeleted,
    FileModified,
    FolderNew,
    FolderDeleted,
    FolderModified,
}

impl DiffKind {
    pub fn is_folder(&self) -> bool {
        matches!(
            self,
            DiffKind::FolderNew | DiffKind::FolderDeleted | DiffKind::FolderModified
        )
    }

    /// The integer tag used in the on-disk header.
    pub fn as_code(&self) -> u32 {
        match self {
            DiffKind::FileNew => 0,
            DiffKind::FileDeleted => 1,
            DiffKind::FileModified => 2,
            DiffKind::FolderNew => 3,
            DiffKind::FolderDeleted => 4,
            DiffKind::FolderModified => 5,
        }
    }

    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(DiffKind::FileNew),
            1 => Some(DiffKind::FileDeleted),
            2 => Some(DiffKind::FileModified),
            3 => Some(DiffKind::FolderNew),
            4 => Some(DiffKind::FolderDeleted),
            5 => Some(DiffKind::FolderModified),
            _ => None,
        }
    }
}

impl fmt::Display for DiffKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            DiffKind::FileNew => '+',
            DiffKind::FileDeleted => '-',
            DiffKind::FileModified => 'M',
            DiffKind::FolderNew => '+',
            DiffKind::FolderDeleted => '-',
            DiffKind::FolderModified => 'M',
        };
        write!(f, "{c}")
    }
}

/// A unit of change. `stored_path` is the path the diff applies
/// to when walked forward from the parent state; `new_path` is the path
/// after applying it forward (equal to `stored_path` except for renames).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diff {
    pub kind: DiffKind,
    pub stored_path: PathBuf,
    pub new_path: PathBuf,
    pub lines: Vec<Line>,
    pub crc: u32,
}

/// Strip tags, returning plaintext content regardless of line origin.
pub fn clean(lines: &[Line]) -> Vec<String> {
    lines.iter().map(|l| l.text().to_string()).collect()
}

/// Keep retained and added lines (skip removed) — the state after forward
/// application.
pub fn forward_projection(lines: &[Line]) -> Vec<String> {
    lines
        .iter()
        .filter_map(|l| match l {
            Line::Retained(s) | Line::Added(s) => Some(s.clone()),
            Line::Removed(_) => None,
        })
        .collect()
}

/// Keep retained and removed lines (skip added) — the state before forward
/// application (i.e. after inverse application).
pub fn inverse_projection(lines: &[Line]) -> Vec<String> {
    lines
        .iter()
        .filter_map(|l| match l {
            Line::Retained(s) | Line::Removed(s) => Some(s.clone()),
            Line::Added(_) => None,
        })
        .collect()
}

/// Canonical byte serialization used for CRC computation: the raw line
/// list, then a trailer of `type|stored_path|new_path|creation_time`.
fn canonical_bytes(
    kind: DiffKind,
    stored_path: &Path,
    new_path: &Path,
    lines: &[Line],
    creation_time: u64,
) -> Vec<u8> {
    let mut buf = Vec::new();
    for line in lines {
        buf.extend_from_slice(line.tag().as_bytes());
        buf.extend_from_slice(line.text().as_bytes());
        buf.push(b'\n');
    }
    buf.extend_from_slice(kind.as_code().to_string().as_bytes());
    buf.push(b'|');
    buf.extend_from_slice(stored_path.to_string_lossy().as_bytes());
    buf.push(b'|');
    buf.extend_from_slice(new_path.to_string_lossy().as_bytes());
    buf.push(b'|');
    buf.extend_from_slice(creation_time.to_string().as_bytes());
    buf
}

impl Diff {
    fn build(
        kind: DiffKind,
        stored_path: PathBuf,
        new_path: PathBuf,
        lines: Vec<Line>,
        creation_time: u64,
    ) -> Self {
        let crc = crc32(&canonical_bytes(
            kind,
            &stored_path,
            &new_path,
            &lines,
            creation_time,
        ));
        Diff {
            kind,
            stored_path,
            new_path,
            lines,
            crc,
        }
    }

    /// `FileNew(path)`: read `path`, emit all lines as added.
    pub fn file_new(path: &Path, creation_time: u64) -> Result<Self, DiffError> {
        let content = fs::read_to_string(path)?;
        let lines = split_lines(&content).into_iter().map(Line::Added).collect();
        Ok(Self::build(
            DiffKind::FileNew,
            path.to_path_buf(),
            path.to_path_buf(),
            lines,
            creation_time,
        ))
    }

    /// `FileDeleted(path)`: read `path`, emit all lines as removed.
    pub fn file_deleted(path: &Path, creation_time: u64) -> Result<Self, DiffError> {
        let content = fs::read_to_string(path)?;
        let lines = split_lines(&content)
            .into_iter()
            .map(Line::Removed)
            .collect();
        Ok(Self::build(
            DiffKind::FileDeleted,
            path.to_path_buf(),
            path.to_path_buf(),
            lines,
            creation_time,
        ))
    }

    /// `FileNew`, reading from `root.join(rel_path)` but recording the diff
    /// against `rel_path`, so the stored path stays meaningful regardless
    /// of which directory a later command runs from. Used by the CLI,
    /// which always works in paths relative to the repository root.
    pub fn file_new_at(root: &Path, rel_path: &Path, creation_time: u64) -> Result<Self, DiffError> {
        let content = fs::read_to_string(root.join(rel_path))?;
        let lines = split_lines(&content).into_iter().map(Line::Added).collect();
        Ok(Self::build(
            DiffKind::FileNew,
            rel_path.to_path_buf(),
            rel_path.to_path_buf(),
            lines,
            creation_time,
        ))
    }

    /// `FileDeleted`, reading from `root.join(rel_path)` but recording the
    /// diff against `rel_path`. See [`Diff::file_new_at`].
    pub fn file_deleted_at(root: &Path, rel_path: &Path, creation_time: u64) -> Result<Self, DiffError> {
        let content = fs::read_to_string(root.join(rel_path))?;
        let lines = split_lines(&content)
            .into_iter()
            .map(Line::Removed)
            .collect();
        Ok(Self::build(
            DiffKind::FileDeleted,
            rel_path.to_path_buf(),
            rel_path.to_path_buf(),
            lines,
            creation_time,
        ))
    }

    /// `FileNew(path)` built from already-in-memory content rather than a
    /// file on disk; used by the shelving path, which snapshots working
    /// tree content before it ever writes an object.
    pub fn file_new_from_content(path: &Path, content: &str, creation_time: u64) -> Self {
        let lines = split_lines(content).into_iter().map(Line::Added).collect();
        Self::build(
            DiffKind::FileNew,
            path.to_path_buf(),
            path.to_path_buf(),
            lines,
            creation_time,
        )
    }

    /// `FileModified(stored_path, new_path)`: LCS between old and new content.
    pub fn file_modified(
        stored_path: &Path,
        new_path: &Path,
        old_content: &str,
        new_content: &str,
        creation_time: u64,
    ) -> Self {
        let a = split_lines(old_content);
        let b = split_lines(new_content);
        let lines = lcs_diff(&a, &b);
        Self::build(
            DiffKind::FileModified,
            stored_path.to_path_buf(),
            new_path.to_path_buf(),
            lines,
            creation_time,
        )
    }

    /// `FolderNew(path)`: carries no lines.
    pub fn folder_new(path: &Path, creation_time: u64) -> Self {
        Self::build(
            DiffKind::FolderNew,
            path.to_path_buf(),
            path.to_path_buf(),
            Vec::new(),
            creation_time,
        )
    }

    /// `FolderDeleted(path)`: carries no lines.
    pub fn folder_deleted(path: &Path, creation_time: u64) -> Self {
        Self::build(
            DiffKind::FolderDeleted,
            path.to_path_buf(),
            path.to_path_buf(),
            Vec::new(),
            creation_time,
        )
    }

    /// `FolderModified(stored_path, new_path)`: a rename; carries no lines.
    pub fn folder_modified(stored_path: &Path, new_path: &Path, creation_time: u64) -> Self {
        Self::build(
            DiffKind::FolderModified,
            stored_path.to_path_buf(),
            new_path.to_path_buf(),
            Vec::new(),
            creation_time,
        )
    }

    /// Apply this diff forward to the working tree.
    pub fn apply_forward(&self, root: &Path) -> Result<(), DiffError> {
        let stored = root.join(&self.stored_path);
        let new = root.join(&self.new_path);
        match self.kind {
            DiffKind::FileNew => {
                write_content(&new, &forward_projection(&self.lines))?;
            }
            DiffKind::FileDeleted => {
                remove_file_if_exists(&stored)?;
            }
            DiffKind::FileModified => {
                write_content(&new, &forward_projection(&self.lines))?;
                if stored != new {
                    remove_file_if_exists(&stored)?;
                }
            }
            DiffKind::FolderNew => {
                lit_utils::io::ensure_dir(&new)?;
            }
            DiffKind::FolderDeleted => {
                remove_dir_if_exists(&stored)?;
            }
            DiffKind::FolderModified => {
                if stored != new {
                    fs::rename(&stored, &new)?;
                }
            }
        }
        log::debug!("applied forward: {:?} {}", self.kind, self.new_path.display());
        Ok(())
    }

    /// Apply this diff's inverse to the working tree, undoing `apply_forward`.
    pub fn apply_inverse(&self, root: &Path) -> Result<(), DiffError> {
        let stored = root.join(&self.stored_path);
        let new = root.join(&self.new_path);
        match self.kind {
            DiffKind::FileNew => {
                remove_file_if_exists(&new)?;
            }
            DiffKind::FileDeleted => {
                write_content(&stored, &clean(&self.lines))?;
            }
            DiffKind::FileModified => {
                write_content(&stored, &inverse_projection(&self.lines))?;
                if stored != new {
                    remove_file_if_exists(&new)?;
                }
            }
            DiffKind::FolderNew => {
                remove_dir_if_exists(&new)?;
            }
            DiffKind::FolderDeleted => {
                lit_utils::io::ensure_dir(&stored)?;
            }
            DiffKind::FolderModified => {
                if stored != new {
                    fs::rename(&new, &stored)?;
                }
            }
        }
        log::debug!("applied inverse: {:?} {}", self.kind, self.stored_path.display());
        Ok(())
    }

    /// A one-line rendering used by `log` and dispatcher error messages:
    /// no hunk/context rendering, just a status letter and a path.
    pub fn summary_line(&self) -> String {
        let path = if self.new_path == self.stored_path {
            self.new_path.display().to_string()
        } else {
            format!(
                "{} -> {}",
                self.stored_path.display(),
                self.new_path.display()
            )
        };
        format!("{} {}", self.kind, path)
    }
}

fn write_content(path: &Path, lines: &[String]) -> Result<(), DiffError> {
    lit_utils::io::ensure_parent_dir(path)?;
    lit_utils::io::write_lines(path, lines)?;
    Ok(())
}

fn remove_file_if_exists(path: &Path) -> Result<(), DiffError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

fn remove_dir_if_exists(path: &Path) -> Result<(), DiffError> {
    match fs::remove_dir_all(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// Split text into lines with any trailing line ending stripped. Tags
/// carry the line's origin, so the raw line ending itself is discarded.
fn split_lines(content: &str) -> Vec<String> {
    if content.is_empty() {
        return Vec::new();
    }
    content
        .split('\n')
        .enumerate()
        .filter_map(|(i, l)| {
            let stripped = l.strip_suffix('\r').unwrap_or(l);
            if stripped.is_empty() && i == content.split('\n').count() - 1 {
                // trailing empty segment after the final newline
                None
            } else {
                Some(stripped.to_string())
            }
        })
        .collect()
}
