//! Line-oriented file I/O and path helpers shared by every on-disk object
//! format in lit. All object files are line-oriented ASCII/UTF-8 with LF
//! terminators, so the primitives here never special-case CRLF.

use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use crate::error::UtilError;

/// Read a file into its LF-terminated lines, with the trailing newline of
/// each line stripped. The final line need not end in a newline.
pub fn read_lines(path: &Path) -> Result<Vec<String>, UtilError> {
    let file = fs::File::open(path)?;
    let reader = BufReader::new(file);
    let mut lines = Vec::new();
    for line in reader.lines() {
        lines.push(line?);
    }
    Ok(lines)
}

/// Write `lines` to `path`, one per line, each terminated by `\n`.
/// Creates or truncates the file.
pub fn write_lines<I, S>(path: &Path, lines: I) -> Result<(), UtilError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut file = fs::File::create(path)?;
    for line in lines {
        file.write_all(line.as_ref().as_bytes())?;
        file.write_all(b"\n")?;
    }
    Ok(())
}

/// Ensure every ancestor directory of `path` exists, creating them as
/// needed (`mkdir -p` semantics for the parent chain).
pub fn ensure_parent_dir(path: &Path) -> Result<(), UtilError> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    Ok(())
}

/// Ensure `dir` and all of its ancestors exist.
pub fn ensure_dir(dir: &Path) -> Result<(), UtilError> {
    fs::create_dir_all(dir).map_err(|source| UtilError::Mkdir {
        path: dir.to_path_buf(),
        source,
    })
}

/// Strip a single trailing `"\r\n"` or `"\n"` from a line, matching the
/// cleanup step the diff engine applies before tagging lines.
pub fn strip_line_ending(line: &str) -> &str {
    line.strip_suffix("\r\n")
        .or_else(|| line.strip_suffix('\n'))
        .unwrap_or(line)
}

/// Read an entire file's content as a single string, leaving line endings
/// untouched. Used where the caller needs the raw text rather than a split
/// line list (e.g. reading a whole file to diff against another revision).
pub fn read_to_string(path: &Path) -> Result<String, UtilError> {
    Ok(fs::read_to_string(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn write_then_read_lines_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("f.txt");
        write_lines(&path, ["first", "second", "third"]).unwrap();
        let lines = read_lines(&path).unwrap();
        assert_eq!(lines, vec!["first", "second", "third"]);
    }

    #[test]
    fn ensure_parent_dir_creates_missing_chain() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a/b/c/file.txt");
        ensure_parent_dir(&path).unwrap();
        assert!(path.parent().unwrap().is_dir());
    }

    #[test]
    fn strip_line_ending_variants() {
        assert_eq!(strip_line_ending("hello\n"), "hello");
        assert_eq!(strip_line_ending("hello\r\n"), "hello");
        assert_eq!(strip_line_ending("hello"), "hello");
    }
}
