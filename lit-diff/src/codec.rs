//! On-disk diff object format: a small text header followed, for file
//! diffs, by a blank line and the tagged line body. Folder diffs write
//! only the header — they carry no line content.

use std::path::{Path, PathBuf};

use lit_hash::crc32_shard;

use crate::diff::{Diff, DiffKind, Line};
use crate::error::DiffError;

/// The canonical on-disk path of a diff under `<objects>/diffs`, sharded
/// by the leading 2 digits of its zero-padded decimal CRC.
pub fn object_path(diffs_root: &Path, crc: u32) -> PathBuf {
    let (shard, rest) = crc32_shard(crc);
    diffs_root.join(shard).join(rest)
}

fn malformed(path: &Path, reason: impl Into<String>) -> DiffError {
    DiffError::MalformedObject {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
}

/// Serialize a diff to its on-disk text form.
pub fn encode(diff: &Diff) -> String {
    let mut out = String::new();
    out.push_str(&format!("type:{}\n", diff.kind.as_code()));
    out.push_str(&format!("stored:{}\n", diff.stored_path.display()));
    out.push_str(&format!("new:{}\n", diff.new_path.display()));
    out.push_str(&format!("crc32:{}\n", diff.crc));

    if !diff.kind.is_folder() {
        out.push('\n');
        for line in &diff.lines {
            out.push_str(line.tag());
            out.push_str(line.text());
            out.push('\n');
        }
    }
    out
}

/// Write a diff to `path`, creating parent directories as needed.
pub fn write(path: &Path, diff: &Diff) -> Result<(), DiffError> {
    lit_utils::io::ensure_parent_dir(path)?;
    std::fs::write(path, encode(diff))?;
    Ok(())
}

/// Parse a diff object previously written by [`write`] or [`encode`].
pub fn decode(path: &Path, content: &str) -> Result<Diff, DiffError> {
    let mut lines = content.lines();

    let type_line = lines
        .next()
        .ok_or_else(|| malformed(path, "missing type header"))?;
    let code: u32 = type_line
        .strip_prefix("type:")
        .ok_or_else(|| malformed(path, "missing 'type:' header"))?
        .parse()
        .map_err(|_| malformed(path, "non-numeric type header"))?;
    let kind = DiffKind::from_code(code).ok_or_else(|| malformed(path, "unknown type code"))?;

    let stored_line = lines
        .next()
        .ok_or_else(|| malformed(path, "missing stored-path header"))?;
    let stored_path = PathBuf::from(
        stored_line
            .strip_prefix("stored:")
            .ok_or_else(|| malformed(path, "missing 'stored:' header"))?,
    );

    let new_line = lines
        .next()
        .ok_or_else(|| malformed(path, "missing new-path header"))?;
    let new_path = PathBuf::from(
        new_line
            .strip_prefix("new:")
            .ok_or_else(|| malformed(path, "missing 'new:' header"))?,
    );

    let crc_line = lines
        .next()
        .ok_or_else(|| malformed(path, "missing crc32 header"))?;
    let crc: u32 = crc_line
        .strip_prefix("crc32:")
        .ok_or_else(|| malformed(path, "missing 'crc32:' header"))?
        .parse()
        .map_err(|_| malformed(path, "non-numeric crc32 header"))?;

    let mut body = Vec::new();
    if !kind.is_folder() {
        let blank = lines
            .next()
            .ok_or_else(|| malformed(path, "missing blank separator before body"))?;
        if !blank.is_empty() {
            return Err(malformed(path, "expected blank line before body"));
        }
        for line in lines {
            if let Some(text) = line.strip_prefix("+ ") {
                body.push(Line::Added(text.to_string()));
            } else if let Some(text) = line.strip_prefix("- ") {
                body.push(Line::Removed(text.to_string()));
            } else if let Some(text) = line.strip_prefix("  ") {
                body.push(Line::Retained(text.to_string()));
            } else {
                return Err(malformed(path, format!("unrecognized line tag: {line:?}")));
            }
        }
    }

    Ok(Diff {
        kind,
        stored_path,
        new_path,
        lines: body,
        crc,
    })
}

/// Read and parse a diff object from `path`.
pub fn read(path: &Path) -> Result<Diff, DiffError> {
    let content = lit_utils::io::read_to_string(path)?;
    decode(path, &content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::tempdir;

    #[test]
    fn round_trips_a_file_diff() {
        let diff = Diff::file_modified(
            Path::new("a.txt"),
            Path::new("a.txt"),
            "one\ntwo\n",
            "one\nthree\n",
            42,
        );
        let encoded = encode(&diff);
        let decoded = decode(Path::new("irrelevant"), &encoded).unwrap();
        assert_eq!(decoded, diff);
    }

    #[test]
    fn folder_diff_has_no_body() {
        let diff = Diff::folder_new(Path::new("sub"), 42);
        let encoded = encode(&diff);
        assert!(!encoded.contains("\n\n"));
        let decoded = decode(Path::new("irrelevant"), &encoded).unwrap();
        assert_eq!(decoded, diff);
    }

    #[test]
    fn write_then_read_round_trips_on_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("00/1234");
        let diff = Diff::file_new_from_content(Path::new("a.txt"), "hi\n", 7);
        write(&path, &diff).unwrap();
        let read_back = read(&path).unwrap();
        assert_eq!(read_back, diff);
    }

    #[test]
    fn malformed_header_is_rejected() {
        let err = decode(Path::new("bad"), "garbage\n").unwrap_err();
        assert!(matches!(err, DiffError::MalformedObject { .. }));
    }

    #[test]
    fn unrecognized_tag_is_rejected() {
        let content = "type:0\nstored:a.txt\nnew:a.txt\ncrc32:1\n\nxx bad tag\n";
        let err = decode(Path::new("bad"), content).unwrap_err();
        assert!(matches!(err, DiffError::MalformedObject { .. }));
    }
}
