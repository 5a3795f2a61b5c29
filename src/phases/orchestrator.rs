//! Pipeline orchestration for a conversion run.
//!
//! Runs the collection and write phases in order, times each one and
//! returns a [`ConvertReport`] with the counters and durations the command
//! layer presents. The orchestrator owns no formatting - it only emits the
//! numbers.

use std::path::Path;
use std::time::{Duration, Instant};

use log::debug;

use super::{collection, write, CollectionStats, SkippedDirectory};
use crate::config::ScanConfig;
use crate::error::Result;
use crate::scheduler::RetrievalPool;
use crate::source::PropertySource;

/// Summary of one conversion run.
#[derive(Debug)]
pub struct ConvertReport {
    pub stats: CollectionStats,
    pub warnings: Vec<SkippedDirectory>,
    /// Number of directories that contributed a record.
    pub records: usize,
    /// Number of ignore entries produced.
    pub entries: usize,
    /// Rendered output text (what was, or would be, written).
    pub rendered: String,
    pub collection_duration: Duration,
    pub write_duration: Duration,
    /// True when the output file was written.
    pub written: bool,
}

/// Run the conversion pipeline.
///
/// Collection always runs. The write phase runs only when `output` is given
/// and at least one record was collected; an empty result never touches the
/// target file.
pub fn execute_convert<S: PropertySource>(
    config: &ScanConfig,
    source: &S,
    output: Option<&Path>,
) -> Result<ConvertReport> {
    let pool = RetrievalPool::new(config.workers)?;

    let collect_start = Instant::now();
    let collection = collection::execute(config, source, &pool)?;
    let collection_duration = collect_start.elapsed();
    debug!(
        "collection finished in {:.2}s: {} visited, {} pruned, {} skipped",
        collection_duration.as_secs_f64(),
        collection.stats.visited,
        collection.stats.pruned,
        collection.stats.skipped
    );

    let rendered = write::render(&collection.records);

    let write_start = Instant::now();
    let mut written = false;
    if let Some(path) = output {
        if !collection.is_empty() {
            write::execute(&collection.records, path)?;
            written = true;
        }
    }
    let write_duration = write_start.elapsed();

    Ok(ConvertReport {
        records: collection.records.len(),
        entries: collection.entry_count(),
        stats: collection.stats,
        warnings: collection.warnings,
        rendered,
        collection_duration,
        write_duration,
        written,
    })
}
