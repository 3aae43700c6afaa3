//! Bounded worker pool for page and document fan-out.

use rayon::prelude::*;

use crate::analysis::AnalysisConfig;
use crate::error::{Error, Result};

/// Runs independent work items, in parallel when configured.
///
/// Results always come back in submission order, so callers can aggregate
/// without caring how items were scheduled.
#[derive(Debug)]
pub struct WorkerPool {
    pool: Option<rayon::ThreadPool>,
}

impl WorkerPool {
    /// Build a pool from analysis options.
    ///
    /// Sequential options give a pool that runs everything on the caller's
    /// thread.
    pub fn new(config: &AnalysisConfig) -> Result<Self> {
        if !config.parallel {
            return Ok(Self::sequential());
        }

        let threads = config.worker_count();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("pdflens-worker-{}", i))
            .build()
            .map_err(|e| Error::Worker(e.to_string()))?;

        log::debug!("Started worker pool with {} threads", threads);
        Ok(Self { pool: Some(pool) })
    }

    /// A pool that runs items one after another on the caller's thread.
    pub fn sequential() -> Self {
        Self { pool: None }
    }

    /// Check if items run on worker threads.
    pub fn is_parallel(&self) -> bool {
        self.pool.is_some()
    }

    /// Number of threads items run on.
    pub fn threads(&self) -> usize {
        self.pool.as_ref().map_or(1, |p| p.current_num_threads())
    }

    /// Apply `f` to every item and collect the results in item order.
    pub fn map<T, R, F>(&self, items: &[T], f: F) -> Vec<R>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Sync + Send,
    {
        match &self.pool {
            Some(pool) => pool.install(|| items.par_iter().map(&f).collect()),
            None => items.iter().map(f).collect(),
        }
    }
}

impl Default for WorkerPool {
    fn default() -> Self {
        Self::sequential()
    }
}
