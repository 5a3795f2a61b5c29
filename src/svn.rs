//! Subversion property retrieval via the system `svn` client.
//!
//! This uses the installed `svn` command rather than a working-copy library,
//! which automatically handles:
//! - Working-copy format differences across Subversion versions
//! - Stored credentials and authentication configuration
//! - Repository-level redirects and externals
//!
//! The bulk path issues one `svn propget svn:ignore -R <root>` for the whole
//! tree; the fallback path issues `svn propget svn:ignore <dir>` for a single
//! directory.

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};
use std::process::Command;

use log::debug;

use crate::error::{Error, Result};
use crate::patterns::ROOT_DIRECTORY;
use crate::source::{BulkSnapshot, PropertySource};

/// The Subversion property holding per-directory ignore patterns.
pub const IGNORE_PROPERTY: &str = "svn:ignore";

/// Retrieves `svn:ignore` values by invoking the system `svn` client.
#[derive(Debug, Default)]
pub struct SvnPropertySource;

impl SvnPropertySource {
    pub fn new() -> Self {
        Self
    }
}

impl PropertySource for SvnPropertySource {
    fn load_bulk(&self, root: &Path) -> Result<BulkSnapshot> {
        ensure_working_copy(root)?;

        let output = Command::new("svn")
            .args(["propget", IGNORE_PROPERTY, "-R"])
            .arg(root)
            .output()
            .map_err(spawn_error)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Collection {
                message: format!(
                    "recursive propget failed for '{}': {}",
                    root.display(),
                    stderr.trim()
                ),
                hint: None,
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let values = parse_bulk_output(root, &stdout);
        debug!("bulk propget returned {} directories", values.len());
        Ok(BulkSnapshot::complete(values))
    }

    fn load_directory(&self, root: &Path, rel_path: &str) -> Result<Option<String>> {
        let target = directory_path(root, rel_path);
        let output = Command::new("svn")
            .args(["propget", IGNORE_PROPERTY])
            .arg(&target)
            .output()
            .map_err(|e| Error::Retrieval {
                directory: rel_path.to_string(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Retrieval {
                directory: rel_path.to_string(),
                message: stderr.trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        if stdout.trim().is_empty() {
            Ok(None)
        } else {
            Ok(Some(stdout.into_owned()))
        }
    }
}

/// Verify that `root` is a usable Subversion working copy.
fn ensure_working_copy(root: &Path) -> Result<()> {
    let output = Command::new("svn")
        .arg("info")
        .arg(root)
        .output()
        .map_err(spawn_error)?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::Collection {
            message: format!(
                "'{}' is not a Subversion working copy: {}",
                root.display(),
                stderr.trim()
            ),
            hint: None,
        });
    }
    Ok(())
}

fn spawn_error(e: std::io::Error) -> Error {
    let hint = if e.kind() == std::io::ErrorKind::NotFound {
        Some("install Subversion or make sure `svn` is on your PATH".to_string())
    } else {
        None
    };
    Error::Collection {
        message: format!("failed to run `svn`: {}", e),
        hint,
    }
}

fn directory_path(root: &Path, rel_path: &str) -> PathBuf {
    if rel_path == ROOT_DIRECTORY {
        root.to_path_buf()
    } else {
        root.join(rel_path)
    }
}

/// Parse the output of `svn propget svn:ignore -R`.
///
/// Each entry starts with `<path> - <first value line>`; the lines up to the
/// next entry belong to the same value. Multi-line values make the format
/// ambiguous, so a line only starts a new entry when its path prefix names an
/// existing directory. Value lines that happen to contain ` - ` after an
/// existing directory name are misattributed; svn offers no unambiguous plain
/// encoding.
pub(crate) fn parse_bulk_output(root: &Path, stdout: &str) -> BTreeMap<String, String> {
    let mut values = BTreeMap::new();
    let mut current: Option<(String, Vec<String>)> = None;

    for line in stdout.lines() {
        if let Some((prefix, first)) = split_entry_line(line) {
            if Path::new(prefix).is_dir() {
                if let Some((dir, lines)) = current.take() {
                    values.insert(dir, lines.join("\n"));
                }
                match relative_to_root(root, prefix) {
                    Some(rel) => current = Some((rel, vec![first.to_string()])),
                    None => debug!("ignoring propget entry outside the scan root: {}", prefix),
                }
                continue;
            }
        }
        if let Some((_, lines)) = current.as_mut() {
            lines.push(line.to_string());
        }
    }
    if let Some((dir, lines)) = current.take() {
        values.insert(dir, lines.join("\n"));
    }
    values
}

fn split_entry_line(line: &str) -> Option<(&str, &str)> {
    line.find(" - ").map(|i| (&line[..i], &line[i + 3..]))
}

/// Relative `/`-separated path of `path` under `root`, `.` for the root
/// itself. `svn` echoes targets as given, so the printed path may already be
/// relative to the invocation directory.
fn relative_to_root(root: &Path, path: &str) -> Option<String> {
    let printed = Path::new(path);
    let rel = printed.strip_prefix(root).unwrap_or(printed);

    let mut parts = Vec::new();
    for component in rel.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_str()?.to_string()),
            Component::CurDir => {}
            _ => return None,
        }
    }
    if parts.is_empty() {
        Some(ROOT_DIRECTORY.to_string())
    } else {
        Some(parts.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_bulk_output_single_entries() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("a/b")).unwrap();

        let stdout = format!(
            "{} - *.tmp\n{} - b\n",
            root.join("a").display(),
            root.join("a/b").display()
        );
        let values = parse_bulk_output(root, &stdout);

        assert_eq!(values.len(), 2);
        assert_eq!(values.get("a").map(String::as_str), Some("*.tmp"));
        assert_eq!(values.get("a/b").map(String::as_str), Some("b"));
    }

    #[test]
    fn test_parse_bulk_output_multiline_value() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("a")).unwrap();

        let stdout = format!("{} - *.tmp\n*.log\nbuild\n", root.join("a").display());
        let values = parse_bulk_output(root, &stdout);

        assert_eq!(values.get("a").map(String::as_str), Some("*.tmp\n*.log\nbuild"));
    }

    #[test]
    fn test_parse_bulk_output_root_entry_uses_dot() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        let stdout = format!("{} - build\n", root.display());
        let values = parse_bulk_output(root, &stdout);

        assert_eq!(values.get(ROOT_DIRECTORY).map(String::as_str), Some("build"));
    }

    #[test]
    fn test_parse_bulk_output_dash_in_value_is_continuation() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("a")).unwrap();

        // "not-a-dir - x" looks like an entry but its prefix is not a directory
        let stdout = format!("{} - *.tmp\nnot-a-dir - x\n", root.join("a").display());
        let values = parse_bulk_output(root, &stdout);

        assert_eq!(
            values.get("a").map(String::as_str),
            Some("*.tmp\nnot-a-dir - x")
        );
    }

    #[test]
    fn test_parse_bulk_output_empty() {
        let temp = TempDir::new().unwrap();
        assert!(parse_bulk_output(temp.path(), "").is_empty());
    }

    #[test]
    fn test_relative_to_root_normalizes_separators() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        let nested = root.join("a").join("b");
        let rel = relative_to_root(root, &nested.display().to_string()).unwrap();
        assert_eq!(rel, "a/b");
    }

    #[test]
    fn test_relative_to_root_accepts_already_relative_paths() {
        let temp = TempDir::new().unwrap();
        assert_eq!(
            relative_to_root(temp.path(), "a/b").as_deref(),
            Some("a/b")
        );
    }

    #[test]
    fn test_relative_to_root_rejects_paths_outside_root() {
        let temp = TempDir::new().unwrap();
        assert_eq!(relative_to_root(temp.path(), "/somewhere/else"), None);
    }

    #[test]
    fn test_directory_path_for_root_and_children() {
        let root = Path::new("/wc");
        assert_eq!(directory_path(root, ROOT_DIRECTORY), PathBuf::from("/wc"));
        assert_eq!(directory_path(root, "a/b"), PathBuf::from("/wc/a/b"));
    }

    // Integration tests against a real `svn` client live in the E2E suite,
    // which drives the binary through a scripted stand-in on PATH.
}
