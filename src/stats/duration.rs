//! Total and mean trip duration.

use serde::Serialize;

use crate::types::TripDataset;

/// A whole-second duration split into hours, minutes and seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DurationBreakdown {
    pub hours: u64,
    /// 0-59
    pub minutes: u64,
    /// 0-59
    pub seconds: u64,
}

impl DurationBreakdown {
    /// `hours = secs div 3600`, `minutes = rest div 60`, `seconds = rest mod 60`.
    pub fn from_secs(secs: u64) -> Self {
        Self {
            hours: secs / 3600,
            minutes: secs % 3600 / 60,
            seconds: secs % 60,
        }
    }

    pub fn as_secs(&self) -> u64 {
        self.hours * 3600 + self.minutes * 60 + self.seconds
    }
}

/// Trip duration aggregates.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TripDurationStats {
    pub trip_count: usize,
    /// Sum of all trip durations in seconds, saturating at `u64::MAX`.
    ///
    /// Loaded durations are capped well below the point where a sum could saturate; only
    /// hand-built records can reach it.
    pub total_seconds: u64,
    pub total: DurationBreakdown,
    /// Exact mean in seconds; `None` for an empty dataset.
    pub mean_seconds: Option<f64>,
    /// Mean truncated to whole seconds and broken down like `total`.
    pub mean: Option<DurationBreakdown>,
}

pub fn trip_duration_stats(dataset: &TripDataset) -> TripDurationStats {
    let trip_count = dataset.row_count();
    let exact_total: u128 = dataset.records.iter().map(|r| u128::from(r.duration_secs)).sum();
    let total_seconds = u64::try_from(exact_total).unwrap_or(u64::MAX);
    let mean_seconds = (trip_count > 0).then(|| exact_total as f64 / trip_count as f64);
    // The mean of u64 values always fits in u64.
    let mean_whole = (trip_count > 0)
        .then(|| u64::try_from(exact_total / trip_count as u128).unwrap_or(u64::MAX));

    TripDurationStats {
        trip_count,
        total_seconds,
        total: DurationBreakdown::from_secs(total_seconds),
        mean_seconds,
        mean: mean_whole.map(DurationBreakdown::from_secs),
    }
}
