//! Descriptive statistics over a (filtered) [`TripDataset`].
//!
//! Each group is a pure function of the dataset and tolerates an empty one: modes come back
//! empty, counts and totals zero, means `None`.
//!
//! - [`travel_time_stats`]: most common month, weekday and start hour
//! - [`station_stats`]: most common start station, end station and start → end trip
//! - [`trip_duration_stats`]: total and mean trip duration
//! - [`user_stats`]: user-type counts and, where the city records them, gender and birth year
//!
//! [`StatsReport::compute`] runs all four.

pub mod duration;
mod mode;
pub mod station;
pub mod travel_time;
pub mod users;

use std::time::{Duration, Instant};

use serde::Serialize;

use crate::config::BikeshareConfig;
use crate::types::TripDataset;

pub use duration::{trip_duration_stats, DurationBreakdown, TripDurationStats};
pub use mode::mode;
pub use station::{station_stats, StationPair, StationStats};
pub use travel_time::{travel_time_stats, TravelTimeStats};
pub use users::{user_stats, Demographics, GenderCounts, UserStats, UserTypeCounts};

/// All four statistic groups for one dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatsReport {
    pub rows: usize,
    pub travel_time: TravelTimeStats,
    pub stations: StationStats,
    pub trip_duration: TripDurationStats,
    pub users: UserStats,
}

impl StatsReport {
    pub fn compute(dataset: &TripDataset, config: &BikeshareConfig) -> Self {
        Self {
            rows: dataset.row_count(),
            travel_time: timed("travel time", || travel_time_stats(dataset, config)),
            stations: timed("stations", || station_stats(dataset)),
            trip_duration: timed("trip duration", || trip_duration_stats(dataset)),
            users: timed("users", || user_stats(dataset)),
        }
    }
}

fn timed<T>(group: &str, compute: impl FnOnce() -> T) -> T {
    let start = Instant::now();
    let out = compute();
    let elapsed: Duration = start.elapsed();
    log::debug!("{group} statistics took {elapsed:?}");
    out
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::NaiveDateTime;

    use crate::config::City;
    use crate::types::{TripDataset, TripRecord, TripSchema, UserType};

    pub(crate) fn trip(start: &str, from: &str, to: &str, duration_secs: u64) -> TripRecord {
        TripRecord {
            start_time: NaiveDateTime::parse_from_str(start, "%Y-%m-%d %H:%M:%S").unwrap(),
            end_time: None,
            start_station: from.to_string(),
            end_station: to.to_string(),
            duration_secs,
            user_type: Some(UserType::Subscriber),
            gender: None,
            birth_year: None,
        }
    }

    pub(crate) fn dataset(records: Vec<TripRecord>) -> TripDataset {
        TripDataset::new(City::Chicago, TripSchema::full(), records)
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{dataset, trip};
    use super::*;

    #[test]
    fn empty_dataset_report_is_all_empty() {
        let report = StatsReport::compute(&dataset(Vec::new()), &BikeshareConfig::default());
        assert_eq!(report.rows, 0);
        assert!(report.travel_time.common_months.is_empty());
        assert!(report.stations.common_trips.is_empty());
        assert_eq!(report.trip_duration.total_seconds, 0);
        assert_eq!(report.trip_duration.mean, None);
        assert_eq!(report.users.user_types.total(), 0);
    }

    #[test]
    fn report_serializes_to_json() {
        let ds = dataset(vec![trip("2017-04-03 12:00:00", "A", "B", 90)]);
        let report = StatsReport::compute(&ds, &BikeshareConfig::default());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["travel_time"]["common_months"][0], "april");
        assert_eq!(json["stations"]["common_trips"][0]["end"], "B");
        assert_eq!(json["trip_duration"]["total"]["minutes"], 1);
    }
}
