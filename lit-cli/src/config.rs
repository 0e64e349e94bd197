use std::path::Path;

use crate::error::LitError;

/// Parsed `.lit/config`. Unknown keys are accepted and ignored so an older
/// binary reading a newer config file doesn't fail outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Config {
    pub debug: bool,
}

/// Read `.lit/config` if present. A missing file is not an error — the
/// engine runs with defaults (`debug: false`).
pub fn load(lit_dir: &Path) -> Result<Config, LitError> {
    let path = lit_dir.join("config");
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = lit_utils::io::read_to_string(&path)?;
    let mut config = Config::default();
    for (lineno, raw_line) in content.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (key, value) = line.split_once('=').ok_or_else(|| LitError::MalformedConfig {
            path: path.clone(),
            reason: format!("line {}: missing '='", lineno + 1),
        })?;
        match key.trim() {
            "debug" => {
                config.debug = parse_bool(&path, lineno, value.trim())?;
            }
            _ => {
                log::debug!("ignoring unknown config key '{}'", key.trim());
            }
        }
    }
    Ok(config)
}

fn parse_bool(path: &Path, lineno: usize, value: &str) -> Result<bool, LitError> {
    match value {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(LitError::MalformedConfig {
            path: path.to_path_buf(),
            reason: format!("line {}: '{}' is not a bool", lineno + 1, other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let config = load(dir.path()).unwrap();
        assert!(!config.debug);
    }

    #[test]
    fn parses_debug_flag_and_skips_comments() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("config"),
            "# a comment\n\ndebug=true\n",
        )
        .unwrap();
        let config = load(dir.path()).unwrap();
        assert!(config.debug);
    }

    #[test]
    fn unknown_key_is_ignored() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("config"), "color=always\n").unwrap();
        let config = load(dir.path()).unwrap();
        assert!(!config.debug);
    }

    #[test]
    fn malformed_line_errors() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("config"), "not-a-kv-line\n").unwrap();
        let err = load(dir.path()).unwrap_err();
        assert!(matches!(err, LitError::MalformedConfig { .. }));
    }
}
