//! SOD/EOD anchor price extraction

use super::{AnchorPair, DayError, TradingDay};
use crate::config::{AnchorPolicy, SessionConfig};
use rust_decimal::Decimal;

/// Derives the start-of-day and end-of-day reference prices for one day
pub struct AnchorExtractor {
    open: chrono::NaiveTime,
    close: chrono::NaiveTime,
    policy: AnchorPolicy,
}

impl AnchorExtractor {
    /// Create an extractor for the given session boundaries
    pub fn new(session: &SessionConfig) -> Self {
        Self {
            open: session.open,
            close: session.close,
            policy: session.anchor_policy,
        }
    }

    /// Extract the anchor pair for one trading day.
    ///
    /// The SOD anchor is the tick sitting exactly on the session-open
    /// boundary, the EOD anchor the tick exactly on session close. Under
    /// `AnchorPolicy::Fallback` a missing boundary tick is substituted with
    /// the day's first/last observation; under `Strict` it fails the day.
    /// Fails with `MissingAnchor` on an empty day regardless of policy.
    pub fn extract(&self, day: &TradingDay) -> Result<AnchorPair, DayError> {
        let first = day.observations.first().ok_or(DayError::MissingAnchor)?;
        let last = day.observations.last().ok_or(DayError::MissingAnchor)?;

        let sod = self.boundary_price(day, self.open, first.price, "open")?;
        let eod = self.boundary_price(day, self.close, last.price, "close")?;

        Ok(AnchorPair { sod, eod })
    }

    fn boundary_price(
        &self,
        day: &TradingDay,
        boundary: chrono::NaiveTime,
        fallback: Decimal,
        label: &str,
    ) -> Result<Decimal, DayError> {
        let exact = day
            .observations
            .iter()
            .find(|obs| obs.timestamp.time() == boundary)
            .map(|obs| obs.price);

        match exact {
            Some(price) => Ok(price),
            None => match self.policy {
                AnchorPolicy::Fallback => {
                    tracing::debug!(date = %day.date, boundary = label, "no exact boundary tick, using fallback anchor");
                    Ok(fallback)
                }
                AnchorPolicy::Strict => Err(DayError::MissingAnchor),
            },
        }
    }
}
