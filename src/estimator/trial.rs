//! Single Monte Carlo volatility trial

use super::INTERIOR_SAMPLES;
use crate::session::{AnchorPair, DayError, TradingDay, MIN_OBSERVATIONS};
use rand::Rng;
use rust_decimal::Decimal;

/// Run one random-subsampling volatility trial for a day.
///
/// Samples `INTERIOR_SAMPLES` distinct indices uniformly from the interior
/// range `[1, n-2]` (first and last ticks are reserved as boundary context),
/// sorts them ascending, and chains six log-returns from SOD through the
/// sampled prices to EOD:
///
/// `sqrt(mean(r0^2..r5^2)) * annualization_factor`
///
/// Returns `InsufficientObservations` when the day has fewer than
/// `MIN_OBSERVATIONS` ticks. The result can be non-finite if a degenerate
/// price slipped past upstream hygiene; callers discard such trials.
pub fn run_trial(
    day: &TradingDay,
    anchors: &AnchorPair,
    annualization_factor: f64,
    rng: &mut impl Rng,
) -> Result<f64, DayError> {
    let n = day.observations.len();
    if n < MIN_OBSERVATIONS {
        return Err(DayError::InsufficientObservations(n));
    }

    // Interior candidates are indices 1..=n-2; sample without replacement
    // and restore chronological order.
    let mut indices: Vec<usize> = rand::seq::index::sample(rng, n - 2, INTERIOR_SAMPLES)
        .into_iter()
        .map(|i| i + 1)
        .collect();
    indices.sort_unstable();

    let mut legs = Vec::with_capacity(INTERIOR_SAMPLES + 1);
    legs.push(price_f64(anchors.sod));
    for &i in &indices {
        legs.push(price_f64(day.observations[i].price));
    }
    legs.push(price_f64(anchors.eod));

    let mut sum_sq = 0.0;
    for pair in legs.windows(2) {
        let r = (pair[1] / pair[0]).ln();
        sum_sq += r * r;
    }
    let mean_sq = sum_sq / (INTERIOR_SAMPLES + 1) as f64;

    Ok(mean_sq.sqrt() * annualization_factor)
}

fn price_f64(price: Decimal) -> f64 {
    price.try_into().unwrap_or(0.0)
}
