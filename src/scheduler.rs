//! Bounded parallel execution of per-directory retrievals.
//!
//! Fallback property retrievals are independent external calls, so they are
//! executed on a fixed-size rayon pool. Workers push results into one
//! mutex-guarded map keyed by directory path; completion order is irrelevant
//! because callers reassemble results in traversal order from that map. A
//! task is never created for a directory the bulk pass already resolved or
//! that was pruned, and an in-flight call is never cancelled - the pool
//! simply waits for outstanding calls to finish.

use std::collections::BTreeMap;
use std::sync::Mutex;

use rayon::prelude::*;

use crate::error::{Error, Result};

/// Fixed-size worker pool for fallback property retrievals.
pub struct RetrievalPool {
    pool: rayon::ThreadPool,
}

impl RetrievalPool {
    /// Build a pool with exactly `workers` threads.
    ///
    /// Callers pass an already clamped count (see
    /// [`crate::config::clamp_workers`]).
    pub fn new(workers: usize) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("retrieval-{}", i))
            .build()
            .map_err(|e| Error::Collection {
                message: format!("failed to start retrieval worker pool: {}", e),
                hint: None,
            })?;
        Ok(Self { pool })
    }

    /// Number of worker threads in the pool.
    pub fn workers(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Run one retrieval per directory, at most `workers` concurrently.
    ///
    /// Every directory gets an entry in the returned map, whether its
    /// retrieval succeeded or failed.
    pub fn run<F>(&self, directories: &[String], fetch: F) -> BTreeMap<String, Result<Option<String>>>
    where
        F: Fn(&str) -> Result<Option<String>> + Sync,
    {
        let results = Mutex::new(BTreeMap::new());
        self.pool.install(|| {
            directories.par_iter().for_each(|directory| {
                let outcome = fetch(directory);
                results.lock().unwrap().insert(directory.clone(), outcome);
            });
        });
        results.into_inner().unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::clamp_workers;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;
    use std::time::Duration;

    fn directories(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("dir-{:02}", i)).collect()
    }

    #[test]
    fn test_run_collects_every_result() {
        let pool = RetrievalPool::new(3).unwrap();
        let dirs = directories(20);

        let results = pool.run(&dirs, |dir| Ok(Some(format!("value for {}", dir))));

        assert_eq!(results.len(), 20);
        for dir in &dirs {
            match results.get(dir) {
                Some(Ok(Some(value))) => assert!(value.contains(dir)),
                other => panic!("unexpected result for {}: {:?}", dir, other),
            }
        }
    }

    #[test]
    fn test_run_respects_worker_bound() {
        let workers = 3;
        let pool = RetrievalPool::new(workers).unwrap();
        let dirs = directories(24);

        let active = AtomicUsize::new(0);
        let peak = AtomicUsize::new(0);

        pool.run(&dirs, |_| {
            let now = active.fetch_add(1, Ordering::SeqCst) + 1;
            peak.fetch_max(now, Ordering::SeqCst);
            thread::sleep(Duration::from_millis(10));
            active.fetch_sub(1, Ordering::SeqCst);
            Ok(None)
        });

        assert!(peak.load(Ordering::SeqCst) <= workers);
    }

    #[test]
    fn test_clamped_request_bounds_concurrency_at_ten() {
        let pool = RetrievalPool::new(clamp_workers(50)).unwrap();
        assert_eq!(pool.workers(), 10);

        let dirs = directories(40);
        let active = AtomicUsize::new(0);
        let peak = AtomicUsize::new(0);

        pool.run(&dirs, |_| {
            let now = active.fetch_add(1, Ordering::SeqCst) + 1;
            peak.fetch_max(now, Ordering::SeqCst);
            thread::sleep(Duration::from_millis(5));
            active.fetch_sub(1, Ordering::SeqCst);
            Ok(None)
        });

        assert!(peak.load(Ordering::SeqCst) <= 10);
    }

    #[test]
    fn test_failures_stay_isolated_per_directory() {
        let pool = RetrievalPool::new(2).unwrap();
        let dirs = directories(6);

        let results = pool.run(&dirs, |dir| {
            if dir.ends_with('3') {
                Err(Error::Retrieval {
                    directory: dir.to_string(),
                    message: "boom".to_string(),
                })
            } else {
                Ok(None)
            }
        });

        assert_eq!(results.len(), 6);
        assert!(results.get("dir-03").unwrap().is_err());
        assert!(results.get("dir-02").unwrap().is_ok());
    }

    #[test]
    fn test_single_worker_pool_still_completes() {
        let pool = RetrievalPool::new(1).unwrap();
        let dirs = directories(5);
        let results = pool.run(&dirs, |_| Ok(Some("x".to_string())));
        assert_eq!(results.len(), 5);
    }
}
