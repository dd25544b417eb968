//! Tick data types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single timestamped price tick for one instrument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceObservation {
    /// Tick timestamp
    pub timestamp: DateTime<Utc>,
    /// Traded price
    pub price: Decimal,
}

impl PriceObservation {
    /// Create a new observation
    pub fn new(timestamp: DateTime<Utc>, price: Decimal) -> Self {
        Self { timestamp, price }
    }
}
