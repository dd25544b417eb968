//! Per-day work scheduling module
//!
//! Days are embarrassingly parallel: each unit gets an immutable view of
//! its own day and nothing else. Backends differ only in dispatch; failure
//! isolation and cancellation live here so every backend behaves the same.

mod pool;
mod sequential;

pub use pool::ParallelScheduler;
pub use sequential::SequentialScheduler;

use crate::session::{DayError, DayVolatilityEstimate, TradingDay};
use chrono::NaiveDate;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Worker signature: one trading day in, one estimate or a per-day error out
pub type DayWorker<'a> = dyn Fn(&TradingDay) -> Result<DayVolatilityEstimate, DayError> + Sync + 'a;

/// Completion record for one dispatched day, in completion order
#[derive(Debug, Clone)]
pub struct DayOutcome {
    /// Trading date of the unit
    pub date: NaiveDate,
    /// Estimate, or the reason the day produced none
    pub result: Result<DayVolatilityEstimate, DayError>,
}

/// Cooperative cancellation flag shared between the caller and workers.
///
/// Units observed after cancellation are skipped with `DayError::Cancelled`;
/// outcomes already gathered are unaffected.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a fresh, uncancelled token
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation of all not-yet-started units
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// True once cancellation has been requested
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Dispatches per-day units and gathers outcomes with failure isolation
pub trait Scheduler: Send + Sync {
    /// Run the worker over every day, collecting outcomes without any
    /// ordering guarantee. A panicking unit becomes a `WorkerFailure`
    /// outcome; it never aborts the remaining days.
    fn run(&self, days: &[TradingDay], worker: &DayWorker<'_>, cancel: &CancelToken) -> Vec<DayOutcome>;
}

/// Execute one unit with panic isolation and cancellation checks
pub(crate) fn run_unit(day: &TradingDay, worker: &DayWorker<'_>, cancel: &CancelToken) -> DayOutcome {
    if cancel.is_cancelled() {
        return DayOutcome {
            date: day.date,
            result: Err(DayError::Cancelled),
        };
    }

    let result = match catch_unwind(AssertUnwindSafe(|| worker(day))) {
        Ok(result) => result,
        Err(payload) => Err(DayError::WorkerFailure(panic_message(payload))),
    };

    DayOutcome {
        date: day.date,
        result,
    }
}

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(date: NaiveDate) -> TradingDay {
        TradingDay {
            date,
            observations: Vec::new(),
        }
    }

    fn estimate(date: NaiveDate) -> DayVolatilityEstimate {
        DayVolatilityEstimate {
            date,
            realized_volatility: 0.25,
        }
    }

    #[test]
    fn test_cancel_token() {
        let token = CancelToken::new();
        assert!(!token.is_cancelled());
        let clone = token.clone();
        clone.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_run_unit_success() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let outcome = run_unit(&day(date), &|d| Ok(estimate(d.date)), &CancelToken::new());
        assert_eq!(outcome.date, date);
        assert!(outcome.result.is_ok());
    }

    #[test]
    fn test_run_unit_panic_becomes_worker_failure() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let outcome = run_unit(&day(date), &|_| panic!("exploded"), &CancelToken::new());
        assert_eq!(
            outcome.result,
            Err(DayError::WorkerFailure("exploded".to_string()))
        );
    }

    #[test]
    fn test_run_unit_cancelled() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let token = CancelToken::new();
        token.cancel();
        let outcome = run_unit(&day(date), &|d| Ok(estimate(d.date)), &token);
        assert_eq!(outcome.result, Err(DayError::Cancelled));
    }

    #[test]
    fn test_run_unit_propagates_day_error() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let outcome = run_unit(
            &day(date),
            &|_| Err(DayError::NoValidTrials),
            &CancelToken::new(),
        );
        assert_eq!(outcome.result, Err(DayError::NoValidTrials));
    }
}
