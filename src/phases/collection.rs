//! Phase 1: Property Collection
//!
//! This is the first phase of the conversion pipeline. Its responsibilities
//! are to decide which directories to query, retrieve their `svn:ignore`
//! values and assemble the ordered record set.
//!
//! ## Process
//!
//! 1. **Bulk Retrieval**: One aggregated query fetches the property values
//!    for the whole eligible subtree up front, reducing external calls from
//!    one per directory to one per run in the common case.
//!
//! 2. **Tree Walk**: The working copy is walked breadth-first with an
//!    explicit frontier, children sorted lexicographically at each level, so
//!    the traversal (and with it the output) is deterministic. A directory at
//!    depth `d` is only entered when the configuration allows that depth; the
//!    root is always visited.
//!
//! 3. **Ancestor Pruning**: Once a directory's record is known, each child
//!    name is matched against the record's patterns. Matching children are
//!    excluded together with their entire subtrees - they are never walked
//!    and never queried.
//!
//! 4. **Fallback Retrieval**: Directories the bulk pass leaves unresolved
//!    are fetched individually through the bounded worker pool, one level at
//!    a time (a parent's record must be known before its children can be
//!    pruned). A failed fallback skips that one directory with a warning;
//!    the run continues.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use super::{Collection, DirectoryNode, SkippedDirectory};
use crate::config::ScanConfig;
use crate::error::Result;
use crate::patterns::{normalize_property, segment_matches, ROOT_DIRECTORY};
use crate::scheduler::RetrievalPool;
use crate::source::PropertySource;

/// Execute Phase 1: collect ignore records for the eligible subtree.
///
/// Fails fast when the bulk retrieval cannot run at all; individual fallback
/// failures are downgraded to warnings on the returned [`Collection`].
pub fn execute<S: PropertySource>(
    config: &ScanConfig,
    source: &S,
    pool: &RetrievalPool,
) -> Result<Collection> {
    let snapshot = source.load_bulk(&config.root)?;
    debug!(
        "bulk pass resolved {} directories (complete: {})",
        snapshot.values.len(),
        snapshot.complete
    );

    let mut collection = Collection::default();
    let mut current_level = vec![DirectoryNode {
        rel_path: ROOT_DIRECTORY.to_string(),
        depth: 0,
    }];

    while !current_level.is_empty() {
        // Fetch everything the bulk pass left unresolved at this level before
        // folding the level into results. Pruned directories never enter
        // `current_level`, so no task is ever issued for them.
        let unresolved: Vec<String> = current_level
            .iter()
            .filter(|node| !snapshot.resolves(&node.rel_path))
            .map(|node| node.rel_path.clone())
            .collect();
        let mut fetched = if unresolved.is_empty() {
            BTreeMap::new()
        } else {
            debug!("fallback retrieval for {} directories", unresolved.len());
            pool.run(&unresolved, |rel_path| {
                source.load_directory(&config.root, rel_path)
            })
        };

        let mut next_level = Vec::new();
        for node in &current_level {
            collection.stats.visited += 1;

            let raw = match snapshot.values.get(&node.rel_path) {
                Some(value) => Some(value.clone()),
                None if snapshot.complete => None,
                None => match fetched.remove(&node.rel_path) {
                    Some(Ok(value)) => value,
                    Some(Err(e)) => {
                        warn!("skipping {}: {}", node.rel_path, e);
                        collection.stats.skipped += 1;
                        collection.warnings.push(SkippedDirectory {
                            directory: node.rel_path.clone(),
                            reason: e.to_string(),
                        });
                        None
                    }
                    None => None,
                },
            };
            let record = raw
                .as_deref()
                .and_then(|text| normalize_property(&node.rel_path, text));

            if config.within_depth(node.depth + 1) {
                for name in child_directories(&config.root, &node.rel_path) {
                    if let Some(record) = &record {
                        if record.patterns.iter().any(|p| segment_matches(p, &name)) {
                            debug!("pruning {} under {}", name, node.rel_path);
                            collection.stats.pruned += 1;
                            continue;
                        }
                    }
                    next_level.push(DirectoryNode {
                        rel_path: join_relative(&node.rel_path, &name),
                        depth: node.depth + 1,
                    });
                }
            }

            if let Some(record) = record {
                collection.records.push(record);
            }
        }
        current_level = next_level;
    }

    Ok(collection)
}

/// Immediate subdirectory names of `rel_path`, lexicographically sorted.
///
/// `.svn` administrative directories and non-UTF-8 names are never listed.
/// An unreadable directory yields no children; the walk continues elsewhere.
fn child_directories(root: &Path, rel_path: &str) -> Vec<String> {
    let dir = directory_path(root, rel_path);
    let entries = match fs::read_dir(&dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("cannot list {}: {}", dir.display(), e);
            return Vec::new();
        }
    };

    let mut names: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|t| t.is_dir()).unwrap_or(false))
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name != ".svn")
        .collect();
    names.sort();
    names
}

fn directory_path(root: &Path, rel_path: &str) -> PathBuf {
    if rel_path == ROOT_DIRECTORY {
        root.to_path_buf()
    } else {
        root.join(rel_path)
    }
}

fn join_relative(parent: &str, name: &str) -> String {
    if parent == ROOT_DIRECTORY {
        name.to_string()
    } else {
        format!("{}/{}", parent, name)
    }
}
