//! Trading-day types and the per-day failure taxonomy

use crate::data::PriceObservation;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

/// One calendar day's chronologically ordered observations
#[derive(Debug, Clone)]
pub struct TradingDay {
    /// Calendar date of every observation in the day
    pub date: NaiveDate,
    /// Observations sorted ascending by timestamp
    pub observations: Vec<PriceObservation>,
}

impl TradingDay {
    /// Number of observations in the day
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// True when the day holds no observations
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

/// Start-of-day and end-of-day reference prices for one trading day
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorPair {
    /// Start-of-day anchor price
    pub sod: Decimal,
    /// End-of-day anchor price
    pub eod: Decimal,
}

/// Aggregated volatility estimate for one trading day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayVolatilityEstimate {
    /// Trading date
    pub date: NaiveDate,
    /// Annualized realized volatility, always non-negative
    pub realized_volatility: f64,
}

/// Per-day failures; all non-fatal to the batch
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DayError {
    /// Day has zero observations; upstream filtering should prevent this
    #[error("no anchor price available")]
    MissingAnchor,
    /// Fewer observations than one trial needs
    #[error("insufficient observations: have {0}, need {min}", min = MIN_OBSERVATIONS)]
    InsufficientObservations(usize),
    /// Every trial for the day failed
    #[error("no valid trials")]
    NoValidTrials,
    /// Unexpected fault inside a worker
    #[error("worker failure: {0}")]
    WorkerFailure(String),
    /// Run was cancelled before the day was processed
    #[error("cancelled")]
    Cancelled,
}

/// Minimum observations for a valid trial: 5 distinct interior indices
/// require at least 5 candidates strictly between the first and last tick.
pub const MIN_OBSERVATIONS: usize = 7;

/// A day excluded from the output, with the reason it was skipped
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedDay {
    /// Trading date
    pub date: NaiveDate,
    /// Why the day produced no estimate
    pub reason: DayError,
}
