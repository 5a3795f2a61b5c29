//! Ignore-property normalization and pattern matching.
//!
//! An `svn:ignore` property value is a newline-separated list of shell glob
//! patterns scoped to the owning directory's immediate contents. This module
//! turns one raw value into a [`PropertyRecord`] and provides the
//! single-segment glob matching used for ancestor pruning.
//!
//! Normalization is deliberately shallow: lines are trimmed, empty lines are
//! dropped and backslash path separators are rewritten to `/`. Everything
//! else passes through verbatim - glob semantics are not interpreted and no
//! pattern is silently discarded.

use glob::Pattern;

/// Relative path used for the scan root itself.
pub const ROOT_DIRECTORY: &str = ".";

/// The normalized ignore configuration of one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyRecord {
    /// Owning directory, relative to the scan root, `/`-separated
    /// ([`ROOT_DIRECTORY`] for the root itself).
    pub directory: String,
    /// Cleaned pattern fragments in property order, without the directory
    /// prefix. Never empty.
    pub patterns: Vec<String>,
}

impl PropertyRecord {
    /// Final ignore-file lines for this record.
    ///
    /// Fragments from non-root directories are qualified with the owning
    /// directory path so they keep their per-directory scope in a flat file;
    /// root fragments stay as written.
    pub fn entries(&self) -> impl Iterator<Item = String> + '_ {
        self.patterns.iter().map(move |p| qualify(&self.directory, p))
    }

    /// Whether this record belongs to the scan root.
    pub fn is_root(&self) -> bool {
        self.directory == ROOT_DIRECTORY
    }
}

/// Normalize one directory's raw `svn:ignore` value into a record.
///
/// Returns `None` when nothing remains after trimming - a directory without
/// usable patterns produces no record rather than an empty one.
pub fn normalize_property(directory: &str, raw: &str) -> Option<PropertyRecord> {
    let patterns: Vec<String> = raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(rewrite_separators)
        .collect();
    if patterns.is_empty() {
        None
    } else {
        Some(PropertyRecord {
            directory: directory.to_string(),
            patterns,
        })
    }
}

/// Rewrite backslash path separators to the canonical forward slash.
pub fn rewrite_separators(pattern: &str) -> String {
    pattern.replace('\\', "/")
}

/// Match a single path segment name against an ignore pattern.
///
/// Shell-style wildcards (`?`, `*`, `[...]`) apply; a syntactically invalid
/// pattern never matches. Patterns containing `/` cannot match a bare name,
/// which mirrors the per-directory scope of `svn:ignore`.
pub fn segment_matches(pattern: &str, name: &str) -> bool {
    match Pattern::new(pattern) {
        Ok(pattern) => pattern.matches(name),
        Err(_) => false,
    }
}

fn qualify(directory: &str, pattern: &str) -> String {
    if directory == ROOT_DIRECTORY {
        return pattern.to_string();
    }
    let mut joined = format!("{}/{}", directory, pattern);
    // a pattern may itself start with a separator
    while let Some(i) = joined.find("//") {
        joined.replace_range(i..i + 2, "/");
    }
    joined
}
