//! Trading-day domain module
//!
//! Partitions a tick series into calendar days and derives the SOD/EOD
//! anchor prices each day's volatility trials hang off

mod anchor;
mod partition;
mod types;

pub use anchor::AnchorExtractor;
pub use partition::partition_days;
pub use types::{AnchorPair, DayError, DayVolatilityEstimate, SkippedDay, TradingDay, MIN_OBSERVATIONS};
