//! Single-threaded scheduler backend

use super::{run_unit, CancelToken, DayOutcome, DayWorker, Scheduler};
use crate::session::TradingDay;

/// Runs units one at a time on the calling thread.
///
/// Useful for tests and for debugging a run without interleaved workers;
/// the outcome set is identical to the parallel backend's because per-day
/// randomness is derived from the date, not from dispatch order.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialScheduler;

impl Scheduler for SequentialScheduler {
    fn run(&self, days: &[TradingDay], worker: &DayWorker<'_>, cancel: &CancelToken) -> Vec<DayOutcome> {
        days.iter().map(|day| run_unit(day, worker, cancel)).collect()
    }
}
