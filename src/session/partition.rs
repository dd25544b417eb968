//! Calendar-day partitioning of a tick series

use super::TradingDay;
use crate::data::PriceObservation;

/// Group a time-ordered observation series into per-day units.
///
/// Input must already be sorted ascending by timestamp (the loader's output
/// contract); each run of equal calendar dates becomes one `TradingDay`.
/// Days come out in chronological order. Empty input yields no days.
pub fn partition_days(observations: Vec<PriceObservation>) -> Vec<TradingDay> {
    let mut days: Vec<TradingDay> = Vec::new();

    for obs in observations {
        let date = obs.timestamp.date_naive();
        match days.last_mut() {
            Some(day) if day.date == date => day.observations.push(obs),
            _ => days.push(TradingDay {
                date,
                observations: vec![obs],
            }),
        }
    }

    days
}
