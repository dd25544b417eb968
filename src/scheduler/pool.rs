//! Rayon-backed parallel scheduler backend

use super::{run_unit, CancelToken, DayOutcome, DayWorker, Scheduler};
use crate::session::TradingDay;
use rayon::prelude::*;

/// Dispatches units across a bounded rayon thread pool.
///
/// CPU-bound numeric work, so the pool is sized to physical capacity by
/// default. The pool is owned rather than global so two pipelines with
/// different thread budgets can coexist in one process.
pub struct ParallelScheduler {
    pool: rayon::ThreadPool,
}

impl ParallelScheduler {
    /// Build a scheduler; `threads = None` uses available parallelism
    pub fn new(threads: Option<usize>) -> anyhow::Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads.unwrap_or(0))
            .build()?;
        Ok(Self { pool })
    }

    /// Worker threads in the pool
    pub fn thread_count(&self) -> usize {
        self.pool.current_num_threads()
    }
}

impl Scheduler for ParallelScheduler {
    fn run(&self, days: &[TradingDay], worker: &DayWorker<'_>, cancel: &CancelToken) -> Vec<DayOutcome> {
        self.pool.install(|| {
            days.par_iter()
                .map(|day| run_unit(day, worker, cancel))
                .collect()
        })
    }
}
