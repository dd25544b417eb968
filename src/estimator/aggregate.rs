//! Multi-trial RMS aggregation

use super::trial::run_trial;
use crate::session::{AnchorPair, DayError, DayVolatilityEstimate, TradingDay};
use rand::Rng;

/// Runs N independent trials for one day and reduces them to one estimate
#[derive(Debug, Clone)]
pub struct MonteCarloAggregator {
    /// Trials per day
    pub trials: usize,
    /// Scalar applied to each trial's raw RMS log-return figure
    pub annualization_factor: f64,
}

impl MonteCarloAggregator {
    /// Create an aggregator
    pub fn new(trials: usize, annualization_factor: f64) -> Self {
        Self {
            trials,
            annualization_factor,
        }
    }

    /// Aggregate N trials into one per-day estimate.
    ///
    /// Failed and non-finite trials are discarded. Volatility is a
    /// quadratic-variation quantity, so surviving trials combine via
    /// root-mean-square rather than arithmetic mean. Signals
    /// `NoValidTrials` when nothing survives.
    pub fn aggregate(
        &self,
        day: &TradingDay,
        anchors: &AnchorPair,
        rng: &mut impl Rng,
    ) -> Result<DayVolatilityEstimate, DayError> {
        let mut survivors = Vec::with_capacity(self.trials);
        let mut discarded = 0usize;

        for _ in 0..self.trials {
            match run_trial(day, anchors, self.annualization_factor, rng) {
                Ok(vol) if vol.is_finite() => survivors.push(vol),
                Ok(_) | Err(_) => discarded += 1,
            }
        }

        if survivors.is_empty() {
            return Err(DayError::NoValidTrials);
        }
        if discarded > 0 {
            tracing::debug!(date = %day.date, discarded, "discarded failed trials");
        }

        Ok(DayVolatilityEstimate {
            date: day.date,
            realized_volatility: rms(&survivors),
        })
    }
}

/// Root-mean-square of a non-empty slice
fn rms(values: &[f64]) -> f64 {
    let mean_sq = values.iter().map(|v| v * v).sum::<f64>() / values.len() as f64;
    mean_sq.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::PriceObservation;
    use crate::estimator::day_rng;
    use chrono::{NaiveDate, TimeZone, Utc};
    use rust_decimal::prelude::FromPrimitive;
    use rust_decimal::Decimal;

    fn day_from_prices(prices: &[f64]) -> TradingDay {
        let observations = prices
            .iter()
            .enumerate()
            .map(|(i, &p)| {
                PriceObservation::new(
                    Utc.with_ymd_and_hms(2024, 3, 4, 9, i as u32, 0).unwrap(),
                    Decimal::from_f64(p).unwrap(),
                )
            })
            .collect();
        TradingDay {
            date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            observations,
        }
    }

    fn anchors(sod: f64, eod: f64) -> AnchorPair {
        AnchorPair {
            sod: Decimal::from_f64(sod).unwrap(),
            eod: Decimal::from_f64(eod).unwrap(),
        }
    }

    #[test]
    fn test_aggregate_finite_non_negative() {
        let day = day_from_prices(&[100.0, 101.0, 102.0, 103.0, 104.0, 105.0, 106.0, 107.0]);
        let aggregator = MonteCarloAggregator::new(100, 16.0);
        let mut rng = day_rng(42, day.date);
        let estimate = aggregator.aggregate(&day, &anchors(99.0, 108.0), &mut rng).unwrap();
        assert!(estimate.realized_volatility.is_finite());
        assert!(estimate.realized_volatility >= 0.0);
        assert_eq!(estimate.date, day.date);
    }

    #[test]
    fn test_aggregate_within_single_step_bound() {
        let day = day_from_prices(&[100.0, 101.0, 102.0, 103.0, 104.0, 105.0, 106.0, 107.0]);
        let aggregator = MonteCarloAggregator::new(100, 16.0);
        let mut rng = day_rng(7, day.date);
        let estimate = aggregator.aggregate(&day, &anchors(99.0, 108.0), &mut rng).unwrap();
        let max_step = (108.0f64 / 99.0).ln();
        assert!(estimate.realized_volatility <= 16.0 * max_step);
    }

    #[test]
    fn test_aggregate_too_few_observations() {
        let day = day_from_prices(&[100.0, 101.0, 102.0]);
        let aggregator = MonteCarloAggregator::new(100, 16.0);
        let mut rng = day_rng(42, day.date);
        let result = aggregator.aggregate(&day, &anchors(100.0, 102.0), &mut rng);
        assert_eq!(result, Err(DayError::NoValidTrials));
    }

    #[test]
    fn test_aggregate_six_observation_boundary() {
        // One below the minimum: every trial fails, day yields no estimate
        let day = day_from_prices(&[100.0, 101.0, 102.0, 103.0, 104.0, 105.0]);
        let aggregator = MonteCarloAggregator::new(50, 16.0);
        let mut rng = day_rng(42, day.date);
        let result = aggregator.aggregate(&day, &anchors(99.0, 106.0), &mut rng);
        assert_eq!(result, Err(DayError::NoValidTrials));
    }

    #[test]
    fn test_aggregate_deterministic_under_seed() {
        let day = day_from_prices(&[100.0, 100.5, 101.2, 99.8, 100.9, 101.5, 100.2, 99.5]);
        let aggregator = MonteCarloAggregator::new(100, 16.0);
        let a = anchors(100.0, 99.5);
        let mut rng1 = day_rng(42, day.date);
        let mut rng2 = day_rng(42, day.date);
        let e1 = aggregator.aggregate(&day, &a, &mut rng1).unwrap();
        let e2 = aggregator.aggregate(&day, &a, &mut rng2).unwrap();
        assert_eq!(e1.realized_volatility.to_bits(), e2.realized_volatility.to_bits());
    }

    #[test]
    fn test_aggregate_converges_with_trial_count() {
        // Spread of independent aggregates shrinks as N grows
        let day = day_from_prices(&[
            100.0, 100.8, 99.6, 101.1, 100.3, 99.9, 100.6, 101.4, 99.7, 100.1, 100.9, 99.4,
            100.5, 101.0, 99.8, 100.2,
        ]);
        let a = anchors(100.0, 100.2);

        let spread = |trials: usize| {
            let aggregator = MonteCarloAggregator::new(trials, 16.0);
            let estimates: Vec<f64> = (0..20)
                .map(|run| {
                    let mut rng = day_rng(run, day.date);
                    aggregator.aggregate(&day, &a, &mut rng).unwrap().realized_volatility
                })
                .collect();
            let max = estimates.iter().cloned().fold(f64::MIN, f64::max);
            let min = estimates.iter().cloned().fold(f64::MAX, f64::min);
            max - min
        };

        assert!(spread(1000) < spread(10));
    }

    #[test]
    fn test_rms_basic() {
        assert_eq!(rms(&[3.0, 4.0]), (12.5f64).sqrt());
        assert_eq!(rms(&[2.0]), 2.0);
        assert_eq!(rms(&[0.0, 0.0]), 0.0);
    }

    #[test]
    fn test_rms_monotone_under_larger_trial() {
        // Appending a value above the current RMS never lowers it
        let base = vec![1.0, 2.0, 3.0];
        let before = rms(&base);
        let mut extended = base.clone();
        extended.push(before + 1.0);
        assert!(rms(&extended) >= before);
        assert!(rms(&extended) >= 0.0);
    }
}
