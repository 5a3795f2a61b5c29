//! # svn2gitignore Library
//!
//! This library provides the core functionality for converting per-directory
//! `svn:ignore` properties of a Subversion working copy into a single flat
//! ignore file with path-qualified entries. It is designed to be used by the
//! `svn2gitignore` command-line tool but can also be embedded in other
//! migration tooling.
//!
//! ## Quick Example
//!
//! ```
//! use svn2gitignore::patterns::normalize_property;
//!
//! // One directory's raw property value becomes a normalized record.
//! let record = normalize_property("src/lib", "*.log\nbuild\\output\n\n").unwrap();
//!
//! // Entries are qualified with the owning directory for the flat file.
//! let entries: Vec<String> = record.entries().collect();
//! assert_eq!(entries, ["src/lib/*.log", "src/lib/build/output"]);
//! ```
//!
//! ## Core Concepts
//!
//! - **Configuration (`config`)**: Validated scan parameters - root path,
//!   recursion and depth bounds, and the clamped worker count.
//! - **Records and normalization (`patterns`)**: The `PropertyRecord` unit
//!   and the shallow normalization applied to raw property values.
//! - **Retrieval sources (`source`, `svn`)**: The strategy interface hiding
//!   the two retrieval paths (one aggregated bulk query, per-directory
//!   fallback) and its production implementation over the `svn` client.
//! - **Bounded scheduling (`scheduler`)**: A fixed-size worker pool that
//!   executes fallback retrievals and reassembles results by directory path.
//! - **Phases (`phases`)**: The collection walk with ancestor pruning, the
//!   atomic writer, and the orchestrator that runs and times both.
//!
//! ## Execution Flow
//!
//! 1. **Bulk retrieval**: One aggregated `svn propget` covers the whole
//!    eligible subtree.
//! 2. **Walk and prune**: The tree is walked breadth-first; a subtree whose
//!    name is already matched by an ancestor's ignore rule is skipped
//!    entirely.
//! 3. **Fallback**: Directories the bulk pass left unresolved are fetched
//!    individually on the bounded pool, level by level.
//! 4. **Write**: Records are rendered in traversal order and written
//!    atomically to the destination file.

pub mod config;
pub mod error;
pub mod output;
pub mod patterns;
pub mod phases;
pub mod scheduler;
pub mod source;
pub mod svn;

#[cfg(test)]
mod patterns_proptest;
