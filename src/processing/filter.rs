//! Month / day-of-week row filtering for [`crate::types::TripDataset`].

use chrono::Weekday;

use crate::config::BikeshareConfig;
use crate::error::{BikeshareError, BikeshareResult};
use crate::types::{day_name, parse_day_name, TripDataset};

/// Filter value meaning "no predicate on this axis".
pub const ALL: &str = "all";

/// Month and weekday predicates. `None` on an axis means "all".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Month number (1 = January).
    pub month: Option<u32>,
    pub day: Option<Weekday>,
}

impl FilterCriteria {
    /// No predicates: every row passes.
    pub fn all() -> Self {
        Self::default()
    }

    /// Parse criteria from filter names.
    ///
    /// `month` must be `all` or one of `config.months`; `day` must be `all` or a weekday name.
    /// Both comparisons ignore case.
    pub fn from_names(config: &BikeshareConfig, month: &str, day: &str) -> BikeshareResult<Self> {
        let month = if month.trim().eq_ignore_ascii_case(ALL) {
            None
        } else {
            Some(
                config
                    .month_index(month)
                    .ok_or_else(|| BikeshareError::InvalidMonth(month.to_owned()))?,
            )
        };
        let day = if day.trim().eq_ignore_ascii_case(ALL) {
            None
        } else {
            Some(parse_day_name(day).ok_or_else(|| BikeshareError::InvalidDay(day.to_owned()))?)
        };
        Ok(Self { month, day })
    }

    /// Human-readable form, e.g. `month=march day=Friday`.
    pub fn describe(&self, config: &BikeshareConfig) -> String {
        let month = self
            .month
            .and_then(|m| config.month_name(m))
            .unwrap_or(ALL);
        let day = self.day.map(day_name).unwrap_or(ALL);
        format!("month={month} day={day}")
    }
}

/// Returns a new [`TripDataset`] containing only rows matching every active predicate.
///
/// Row order, city and schema are preserved; the input is not modified. A filter that matches
/// nothing yields an empty dataset.
pub fn filter(dataset: &TripDataset, criteria: &FilterCriteria) -> TripDataset {
    dataset.filter_records(|r| {
        criteria.month.is_none_or(|m| r.month() == m) && criteria.day.is_none_or(|d| r.weekday() == d)
    })
}
