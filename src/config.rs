//! Scan configuration for a conversion run.
//!
//! The configuration is assembled once at the CLI boundary and consumed
//! read-only by the rest of the pipeline. Two rules are enforced here rather
//! than scattered through the code that uses the values:
//!
//! - The worker count is clamped into [`MIN_WORKERS`]..=[`MAX_WORKERS`] by
//!   [`clamp_workers`], a pure function applied when the configuration is
//!   built. Out-of-range requests are adjusted, not rejected.
//! - The root path is validated up front, before any external call or worker
//!   thread is started.

use std::path::PathBuf;

use crate::error::{Error, Result};

/// Smallest allowed worker count for fallback retrievals.
pub const MIN_WORKERS: usize = 1;
/// Largest allowed worker count for fallback retrievals.
pub const MAX_WORKERS: usize = 10;
/// Default destination for the converted ignore file.
pub const DEFAULT_OUTPUT_FILE: &str = ".gitignore";

/// Validated configuration for one conversion run.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Root of the Subversion working copy to scan.
    pub root: PathBuf,
    /// Whether to descend into subdirectories at all.
    pub recursive: bool,
    /// Maximum depth to descend to (0 = unlimited; the root is depth 0).
    pub max_depth: u32,
    /// Worker count for fallback retrievals, already clamped.
    pub workers: usize,
    /// Destination path for the converted ignore file.
    pub output: PathBuf,
}

impl ScanConfig {
    /// Build and validate a configuration.
    ///
    /// The requested worker count is clamped; an unusable root path is an
    /// error.
    pub fn new(
        root: PathBuf,
        recursive: bool,
        max_depth: u32,
        workers: usize,
        output: PathBuf,
    ) -> Result<Self> {
        let config = Self {
            root,
            recursive,
            max_depth,
            workers: clamp_workers(workers),
            output,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !self.root.is_dir() {
            return Err(Error::Config {
                message: format!(
                    "root path '{}' does not exist or is not a directory",
                    self.root.display()
                ),
            });
        }
        Ok(())
    }

    /// Whether a directory at `depth` may be visited.
    ///
    /// The root (depth 0) is always visited; deeper directories require
    /// `recursive` and must be within `max_depth` when one is set.
    pub fn within_depth(&self, depth: u32) -> bool {
        depth == 0 || (self.recursive && (self.max_depth == 0 || depth <= self.max_depth))
    }
}

/// Clamp a requested worker count into the supported range.
pub fn clamp_workers(requested: usize) -> usize {
    requested.clamp(MIN_WORKERS, MAX_WORKERS)
}
