//! Most frequent times of travel.

use serde::Serialize;

use crate::config::BikeshareConfig;
use crate::types::TripDataset;

use super::mode;

/// Modes of the start month, weekday and hour.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TravelTimeStats {
    /// Month names, in calendar order.
    pub common_months: Vec<String>,
    /// Weekday names, in alphabetical order.
    pub common_days: Vec<String>,
    /// Hours 0-23, ascending.
    pub common_start_hours: Vec<u32>,
}

/// Most common month, weekday and start hour. Ties are all reported.
pub fn travel_time_stats(dataset: &TripDataset, config: &BikeshareConfig) -> TravelTimeStats {
    let records = &dataset.records;
    TravelTimeStats {
        common_months: mode(records.iter().map(|r| r.month()))
            .into_iter()
            .filter_map(|m| config.month_name(m).map(str::to_owned))
            .collect(),
        common_days: mode(records.iter().map(|r| r.day_name()))
            .into_iter()
            .map(str::to_owned)
            .collect(),
        common_start_hours: mode(records.iter().map(|r| r.start_hour())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::fixtures::{dataset, trip};

    #[test]
    fn month_mode_maps_back_to_names() {
        let ds = dataset(vec![
            trip("2017-01-02 08:10:00", "A", "B", 100),
            trip("2017-01-09 08:20:00", "A", "B", 200),
            trip("2017-03-06 17:00:00", "A", "B", 300),
        ]);
        let stats = travel_time_stats(&ds, &BikeshareConfig::default());
        assert_eq!(stats.common_months, vec!["january"]);
        assert_eq!(stats.common_days, vec!["Monday"]);
        assert_eq!(stats.common_start_hours, vec![8]);
    }

    #[test]
    fn ties_are_reported_together() {
        let ds = dataset(vec![
            trip("2017-02-03 07:00:00", "A", "B", 60),
            trip("2017-05-01 19:00:00", "A", "B", 60),
        ]);
        let stats = travel_time_stats(&ds, &BikeshareConfig::default());
        assert_eq!(stats.common_months, vec!["february", "may"]);
        assert_eq!(stats.common_days, vec!["Friday", "Monday"]);
        assert_eq!(stats.common_start_hours, vec![7, 19]);
    }

    #[test]
    fn empty_dataset_has_no_modes() {
        let stats = travel_time_stats(&dataset(Vec::new()), &BikeshareConfig::default());
        assert_eq!(stats, TravelTimeStats::default());
    }
}
