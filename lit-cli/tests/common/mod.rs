//! Shared test harness for `lit-cli` end-to-end tests: spawns the compiled
//! `lit` binary against a temp working directory and reads back the
//! on-disk object files directly (so assertions check real persisted
//! state, not just captured stdout).

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

pub struct CommandResult {
    pub stdout: String,
    pub stderr: String,
    pub code: i32,
}

/// Run the `lit` binary in `dir` with `args`, returning its captured output.
pub fn lit(dir: &Path, args: &[&str]) -> CommandResult {
    let output = Command::new(env!("CARGO_BIN_EXE_lit"))
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to spawn lit binary");
    CommandResult {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        code: output.status.code().unwrap_or(-1),
    }
}

/// Read a branch ref file's commit hash list (one hex string per line,
/// after the 4-line header).
pub fn branch_commit_hashes(dir: &Path, branch: &str) -> Vec<String> {
    let content = fs::read_to_string(dir.join(".lit/refs/heads").join(branch)).unwrap();
    content.lines().skip(4).map(|l| l.to_string()).collect()
}

/// Read a branch ref file's `idx:` (head) field.
pub fn branch_head(dir: &Path, branch: &str) -> usize {
    let content = fs::read_to_string(dir.join(".lit/refs/heads").join(branch)).unwrap();
    content
        .lines()
        .find_map(|l| l.strip_prefix("idx:"))
        .unwrap()
        .parse()
        .unwrap()
}

/// Read `.lit/index`'s `readonly:` field as a bool.
pub fn index_readonly(dir: &Path) -> bool {
    let content = fs::read_to_string(dir.join(".lit/index")).unwrap();
    content
        .lines()
        .find_map(|l| l.strip_prefix("readonly:"))
        .unwrap()
        == "1"
}

/// Read `.lit/index`'s `active:` field.
pub fn index_active(dir: &Path) -> usize {
    let content = fs::read_to_string(dir.join(".lit/index")).unwrap();
    content
        .lines()
        .find_map(|l| l.strip_prefix("active:"))
        .unwrap()
        .parse()
        .unwrap()
}

pub fn write_file(dir: &Path, rel: &str, content: &str) {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

pub fn read_file(dir: &Path, rel: &str) -> String {
    fs::read_to_string(dir.join(rel)).unwrap()
}

pub fn shelved_dir(dir: &Path, branch: &str) -> PathBuf {
    dir.join(".lit/objects/shelved").join(branch)
}
