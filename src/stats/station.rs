//! Most popular stations and trips.

use serde::Serialize;

use crate::types::TripDataset;

use super::mode;

/// An ordered (start, end) station pair.
///
/// Compared field by field, so station names may contain any characters without two
/// different trips ever sharing a key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct StationPair {
    pub start: String,
    pub end: String,
}

impl StationPair {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

/// Modes of start station, end station and start → end trip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StationStats {
    pub common_start_stations: Vec<String>,
    pub common_end_stations: Vec<String>,
    pub common_trips: Vec<StationPair>,
}

pub fn station_stats(dataset: &TripDataset) -> StationStats {
    let records = &dataset.records;
    let owned = |names: Vec<&str>| names.into_iter().map(str::to_owned).collect::<Vec<_>>();
    StationStats {
        common_start_stations: owned(mode(records.iter().map(|r| r.start_station.as_str()))),
        common_end_stations: owned(mode(records.iter().map(|r| r.end_station.as_str()))),
        common_trips: mode(records.iter().map(|r| (r.start_station.as_str(), r.end_station.as_str())))
            .into_iter()
            .map(|(start, end)| StationPair::new(start, end))
            .collect(),
    }
}
