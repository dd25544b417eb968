//! CSV tick loader
//!
//! Reads raw (timestamp, price) rows, normalizes them into a clean,
//! time-ordered observation series restricted to the trading session.

use super::PriceObservation;
use crate::config::SessionConfig;
use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::Path;

/// Raw CSV row before timestamp normalization
#[derive(Debug, Deserialize)]
struct RawTick {
    timestamp: String,
    price: Decimal,
}

/// Loads and normalizes tick data from CSV files
pub struct TickLoader {
    session: SessionConfig,
}

impl TickLoader {
    /// Create a loader for the given session window
    pub fn new(session: SessionConfig) -> Self {
        Self { session }
    }

    /// Load one instrument's ticks from a CSV file with `timestamp,price` columns.
    ///
    /// The returned series is sorted ascending by timestamp, deduplicated,
    /// restricted to the configured session window, and free of non-positive
    /// prices.
    pub fn load(&self, path: impl AsRef<Path>) -> anyhow::Result<Vec<PriceObservation>> {
        let mut reader = csv::Reader::from_path(path.as_ref())?;
        let mut observations = Vec::new();
        let mut dropped_prices = 0usize;

        for row in reader.deserialize() {
            let raw: RawTick = row?;
            let timestamp = parse_timestamp(&raw.timestamp)?;

            if raw.price <= Decimal::ZERO {
                dropped_prices += 1;
                continue;
            }
            observations.push(PriceObservation::new(timestamp, raw.price));
        }

        if dropped_prices > 0 {
            tracing::warn!(count = dropped_prices, "dropped ticks with non-positive prices");
        }

        observations.sort_by_key(|obs| obs.timestamp);
        observations.dedup_by_key(|obs| obs.timestamp);
        let total = observations.len();
        observations.retain(|obs| self.in_session(obs));

        tracing::info!(
            kept = observations.len(),
            filtered = total - observations.len(),
            "loaded tick series"
        );
        Ok(observations)
    }

    fn in_session(&self, obs: &PriceObservation) -> bool {
        let time = obs.timestamp.time();
        time >= self.session.open && time <= self.session.close
    }
}

/// Parse a timestamp that may or may not carry a timezone offset.
///
/// Offset-less timestamps are interpreted as UTC.
fn parse_timestamp(raw: &str) -> anyhow::Result<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(naive.and_utc());
        }
    }
    anyhow::bail!("unparseable timestamp: {raw}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Write;

    fn write_csv(rows: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "timestamp,price").unwrap();
        write!(file, "{rows}").unwrap();
        file
    }

    #[test]
    fn test_load_sorts_and_filters() {
        let file = write_csv(
            "2024-03-04 10:30:00,101.5\n\
             2024-03-04 09:15:00,100.0\n\
             2024-03-04 08:59:00,99.0\n\
             2024-03-04 17:45:00,103.0\n",
        );

        let loader = TickLoader::new(SessionConfig::default());
        let obs = loader.load(file.path()).unwrap();

        // Pre-open and post-close ticks are dropped, remainder sorted
        assert_eq!(obs.len(), 2);
        assert_eq!(obs[0].price, dec!(100.0));
        assert_eq!(obs[1].price, dec!(101.5));
        assert!(obs[0].timestamp < obs[1].timestamp);
    }

    #[test]
    fn test_load_drops_non_positive_prices() {
        let file = write_csv(
            "2024-03-04 10:00:00,0\n\
             2024-03-04 10:01:00,-5.0\n\
             2024-03-04 10:02:00,100.0\n",
        );

        let loader = TickLoader::new(SessionConfig::default());
        let obs = loader.load(file.path()).unwrap();
        assert_eq!(obs.len(), 1);
        assert_eq!(obs[0].price, dec!(100.0));
    }

    #[test]
    fn test_load_dedupes_timestamps() {
        let file = write_csv(
            "2024-03-04 10:00:00,100.0\n\
             2024-03-04 10:00:00,100.5\n",
        );

        let loader = TickLoader::new(SessionConfig::default());
        let obs = loader.load(file.path()).unwrap();
        assert_eq!(obs.len(), 1);
    }

    #[test]
    fn test_load_rfc3339_timestamps() {
        let file = write_csv("2024-03-04T10:00:00+01:00,100.0\n");

        let loader = TickLoader::new(SessionConfig::default());
        let obs = loader.load(file.path()).unwrap();
        assert_eq!(obs.len(), 1);
        // 10:00 +01:00 is 09:00 UTC, inside the default session
        assert_eq!(obs[0].timestamp.time(), chrono::NaiveTime::from_hms_opt(9, 0, 0).unwrap());
    }

    #[test]
    fn test_load_rejects_garbage_timestamp() {
        let file = write_csv("not-a-date,100.0\n");
        let loader = TickLoader::new(SessionConfig::default());
        assert!(loader.load(file.path()).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let loader = TickLoader::new(SessionConfig::default());
        assert!(loader.load("/nonexistent/ticks.csv").is_err());
    }
}
