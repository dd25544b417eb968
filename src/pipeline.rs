//! End-to-end estimation pipeline
//!
//! Partitions the tick series into days, dispatches each day to the
//! configured scheduler backend, and gathers the per-day estimates into a
//! date-sorted report alongside the days that had to be skipped.

use crate::config::{Config, SchedulerBackend};
use crate::data::PriceObservation;
use crate::estimator::{day_rng, MonteCarloAggregator};
use crate::scheduler::{CancelToken, ParallelScheduler, Scheduler, SequentialScheduler};
use crate::session::{partition_days, AnchorExtractor, DayVolatilityEstimate, SkippedDay, TradingDay};

/// Outcome of one pipeline run
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    /// Per-day estimates, sorted ascending by date
    pub estimates: Vec<DayVolatilityEstimate>,
    /// Days excluded from the output, sorted ascending by date
    pub skipped: Vec<SkippedDay>,
}

/// Wires partitioning, anchor extraction, estimation, and scheduling
pub struct Pipeline {
    config: Config,
    scheduler: Box<dyn Scheduler>,
    run_seed: u64,
}

impl Pipeline {
    /// Build a pipeline from configuration.
    ///
    /// Without an explicit `montecarlo.seed` the run seed comes from OS
    /// entropy and results are not reproducible across runs.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let scheduler: Box<dyn Scheduler> = match config.scheduler.backend {
            SchedulerBackend::Parallel => {
                Box::new(ParallelScheduler::new(config.scheduler.threads)?)
            }
            SchedulerBackend::Sequential => Box::new(SequentialScheduler),
        };

        let run_seed = match config.montecarlo.seed {
            Some(seed) => seed,
            None => {
                let seed = rand::random();
                tracing::info!(seed, "no seed configured, drew one from entropy");
                seed
            }
        };

        Ok(Self {
            config,
            scheduler,
            run_seed,
        })
    }

    /// Seed in effect for this run
    pub fn run_seed(&self) -> u64 {
        self.run_seed
    }

    /// Estimate per-day realized volatility for the whole series.
    ///
    /// Never fails as a batch: every per-day anomaly lands in the report's
    /// skip list with its reason, and the surviving estimates come back
    /// sorted by date regardless of completion order.
    pub fn run(&self, observations: Vec<PriceObservation>, cancel: &CancelToken) -> RunReport {
        let days = partition_days(observations);
        tracing::info!(days = days.len(), trials = self.config.montecarlo.trials, "starting run");

        let extractor = AnchorExtractor::new(&self.config.session);
        let aggregator = MonteCarloAggregator::new(
            self.config.montecarlo.trials,
            self.config.montecarlo.annualization_factor,
        );
        let run_seed = self.run_seed;

        let worker = move |day: &TradingDay| {
            let anchors = extractor.extract(day)?;
            let mut rng = day_rng(run_seed, day.date);
            aggregator.aggregate(day, &anchors, &mut rng)
        };

        let outcomes = self.scheduler.run(&days, &worker, cancel);

        let mut report = RunReport::default();
        for outcome in outcomes {
            match outcome.result {
                Ok(estimate) => report.estimates.push(estimate),
                Err(reason) => {
                    tracing::warn!(date = %outcome.date, %reason, "skipping day");
                    report.skipped.push(SkippedDay {
                        date: outcome.date,
                        reason,
                    });
                }
            }
        }
        report.estimates.sort_by_key(|e| e.date);
        report.skipped.sort_by_key(|s| s.date);

        tracing::info!(
            estimated = report.estimates.len(),
            skipped = report.skipped.len(),
            "run complete"
        );
        report
    }
}
