use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::env::format_env_line;
use crate::paths;

/// Result of patching an env file: the new text and which keys changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchOutcome {
    pub content: String,
    /// Keys whose existing line was rewritten.
    pub updated: Vec<String>,
    /// Keys appended because no line defined them.
    pub added: Vec<String>,
}

/// Rewrites `KEY=...` lines for every key in `values` and appends the rest.
///
/// Comments, blank lines and unrelated keys are kept as-is. A key defined on
/// several lines has each of them rewritten. The result always ends in `\n`.
pub fn patch_env(existing: &str, values: &IndexMap<String, String>) -> PatchOutcome {
    let mut outcome = PatchOutcome::default();
    let mut lines: Vec<String> = Vec::new();

    for line in existing.lines() {
        match line_key(line).and_then(|key| values.get_key_value(key)) {
            Some((key, value)) => {
                if !outcome.updated.contains(key) {
                    outcome.updated.push(key.clone());
                }
                lines.push(format_env_line(key, value));
            }
            None => lines.push(line.to_owned()),
        }
    }

    for (key, value) in values {
        if !outcome.updated.contains(key) {
            outcome.added.push(key.clone());
            lines.push(format_env_line(key, value));
        }
    }

    outcome.content = lines.join("\n");
    if !outcome.content.is_empty() {
        outcome.content.push('\n');
    }
    outcome
}

/// Patches `{project_dir}/.env` in place.
///
/// A missing `.env` is seeded from `.env.example` when that exists, otherwise
/// from an empty file.
pub fn patch_env_file(
    project_dir: &Path,
    values: &IndexMap<String, String>,
) -> Result<PatchOutcome, EnvPatchError> {
    let env_path = project_dir.join(paths::ENV_FILE);
    let existing = if env_path.exists() {
        read(&env_path)?
    } else {
        let example = project_dir.join(paths::ENV_EXAMPLE_FILE);
        if example.exists() {
            tracing::info!(from = %example.display(), "seeding .env from example");
            read(&example)?
        } else {
            String::new()
        }
    };

    let outcome = patch_env(&existing, values);
    std::fs::write(&env_path, &outcome.content).map_err(|e| EnvPatchError::Write {
        path: env_path.clone(),
        source: e,
    })?;

    tracing::debug!(
        path = %env_path.display(),
        updated = outcome.updated.len(),
        added = outcome.added.len(),
        "patched env file"
    );
    Ok(outcome)
}

fn read(path: &Path) -> Result<String, EnvPatchError> {
    std::fs::read_to_string(path).map_err(|e| EnvPatchError::Read {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Key of an assignment line, tolerating an `export ` prefix. Comments and
/// lines without `=` have no key.
fn line_key(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    if trimmed.starts_with('#') {
        return None;
    }
    let trimmed = match trimmed.strip_prefix("export ") {
        Some(rest) => rest,
        None => trimmed,
    };
    let (key, _) = trimmed.split_once('=')?;
    let key = key.trim();
    (!key.is_empty()).then_some(key)
}

#[derive(Debug, thiserror::Error)]
pub enum EnvPatchError {
    #[error("failed to read env file at {path}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("failed to write env file at {path}")]
    Write { path: PathBuf, source: std::io::Error },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn rewrites_existing_and_appends_missing() {
        let existing = "APP_NAME=Laravel\nDB_HOST=127.0.0.1\n";
        let outcome = patch_env(
            existing,
            &values(&[("DB_HOST", "database"), ("REDIS_HOST", "redis")]),
        );
        assert_eq!(
            outcome.content,
            "APP_NAME=Laravel\nDB_HOST=database\nREDIS_HOST=redis\n"
        );
        assert_eq!(outcome.updated, vec!["DB_HOST"]);
        assert_eq!(outcome.added, vec!["REDIS_HOST"]);
    }

    #[test]
    fn comments_and_blank_lines_survive() {
        let existing = "# comment\n\n#DB_HOST=old\nDB_HOST=old\n";
        let outcome = patch_env(existing, &values(&[("DB_HOST", "database")]));
        assert_eq!(outcome.content, "# comment\n\n#DB_HOST=old\nDB_HOST=database\n");
    }

    #[test]
    fn quotes_values_that_need_it() {
        let outcome = patch_env("", &values(&[("MAIL_FROM", "Dock Yard")]));
        assert_eq!(outcome.content, "MAIL_FROM=\"Dock Yard\"\n");
    }

    #[test]
    fn adds_trailing_newline() {
        let outcome = patch_env("APP_ENV=local", &IndexMap::new());
        assert_eq!(outcome.content, "APP_ENV=local\n");
    }

    #[test]
    fn export_prefix_is_recognised() {
        let outcome = patch_env("export DB_PORT=1\n", &values(&[("DB_PORT", "3306")]));
        assert_eq!(outcome.content, "DB_PORT=3306\n");
        assert!(outcome.added.is_empty());
    }

    #[test]
    fn line_key_ignores_non_assignments() {
        assert_eq!(line_key("# DB_HOST=x"), None);
        assert_eq!(line_key("garbage"), None);
        assert_eq!(line_key("=value"), None);
        assert_eq!(line_key("  KEY = v"), Some("KEY"));
    }

    #[test]
    fn file_is_seeded_from_example() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".env.example"), "APP_NAME=Shop\nDB_HOST=\n").unwrap();

        let outcome = patch_env_file(dir.path(), &values(&[("DB_HOST", "database")])).unwrap();
        let written = std::fs::read_to_string(dir.path().join(".env")).unwrap();
        assert_eq!(written, "APP_NAME=Shop\nDB_HOST=database\n");
        assert_eq!(outcome.updated, vec!["DB_HOST"]);
    }

    #[test]
    fn file_created_when_nothing_exists() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = patch_env_file(dir.path(), &values(&[("REDIS_HOST", "redis")])).unwrap();
        assert_eq!(outcome.added, vec!["REDIS_HOST"]);
        assert_eq!(
            std::fs::read_to_string(dir.path().join(".env")).unwrap(),
            "REDIS_HOST=redis\n"
        );
    }
}
