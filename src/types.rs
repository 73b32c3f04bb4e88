//! Core data model for trip logs.
//!
//! Loading produces a [`TripDataset`]: a [`City`], a [`TripSchema`] saying which optional
//! columns the source carried, and the ordered [`TripRecord`]s.

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use serde::Serialize;

use crate::config::City;
use crate::cursor::RowCursor;

/// Canonical title-cased weekday names, Monday first.
pub const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Title-cased name of a weekday (`Weekday::Mon` -> `"Monday"`).
pub fn day_name(day: Weekday) -> &'static str {
    DAY_NAMES[day.num_days_from_monday() as usize]
}

/// Parse a weekday from its full name, case-insensitively.
pub fn parse_day_name(name: &str) -> Option<Weekday> {
    let name = name.trim();
    DAY_NAMES
        .iter()
        .position(|d| d.eq_ignore_ascii_case(name))
        .map(|idx| WEEKDAYS[idx])
}

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// A trip-log column the loader knows how to map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    StartTime,
    EndTime,
    StartStation,
    EndStation,
    TripDuration,
    UserType,
    Gender,
    BirthYear,
}

impl Column {
    /// Every known column, in canonical order.
    pub const ALL: [Column; 8] = [
        Column::StartTime,
        Column::EndTime,
        Column::StartStation,
        Column::EndStation,
        Column::TripDuration,
        Column::UserType,
        Column::Gender,
        Column::BirthYear,
    ];

    /// Canonical header as it appears in the published trip logs.
    pub fn header(self) -> &'static str {
        match self {
            Column::StartTime => "Start Time",
            Column::EndTime => "End Time",
            Column::StartStation => "Start Station",
            Column::EndStation => "End Station",
            Column::TripDuration => "Trip Duration",
            Column::UserType => "User Type",
            Column::Gender => "Gender",
            Column::BirthYear => "Birth Year",
        }
    }

    /// Whether a source without this column is rejected.
    pub fn is_required(self) -> bool {
        !matches!(self, Column::EndTime | Column::Gender | Column::BirthYear)
    }

    /// Returns `true` if `header` names this column.
    ///
    /// Matching ignores case and treats `_` and `-` as spaces, so `start_time` and
    /// `START-TIME` both match [`Column::StartTime`].
    pub fn matches(self, header: &str) -> bool {
        normalize_header(header) == normalize_header(self.header())
    }
}

fn normalize_header(header: &str) -> String {
    header
        .trim()
        .chars()
        .map(|c| match c {
            '_' | '-' => ' ',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

/// Rider category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum UserType {
    Subscriber,
    Customer,
    /// A label the trip log uses that is neither of the known categories (e.g. `Dependent`).
    Other(String),
}

impl UserType {
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "Subscriber" => UserType::Subscriber,
            "Customer" => UserType::Customer,
            other => UserType::Other(other.to_owned()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            UserType::Subscriber => "Subscriber",
            UserType::Customer => "Customer",
            UserType::Other(s) => s,
        }
    }
}

/// Rider gender as recorded by the operator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Gender {
    Male,
    Female,
    Other(String),
}

impl Gender {
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "Male" => Gender::Male,
            "Female" => Gender::Female,
            other => Gender::Other(other.to_owned()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other(s) => s,
        }
    }
}

/// One ride.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripRecord {
    pub start_time: NaiveDateTime,
    pub end_time: Option<NaiveDateTime>,
    pub start_station: String,
    pub end_station: String,
    /// Trip duration in whole seconds.
    pub duration_secs: u64,
    pub user_type: Option<UserType>,
    pub gender: Option<Gender>,
    pub birth_year: Option<i32>,
}

impl TripRecord {
    /// Month of the start time (1 = January).
    pub fn month(&self) -> u32 {
        self.start_time.month()
    }

    /// Weekday of the start time.
    pub fn weekday(&self) -> Weekday {
        self.start_time.weekday()
    }

    /// Title-cased weekday name of the start time.
    pub fn day_name(&self) -> &'static str {
        day_name(self.weekday())
    }

    /// Hour of the start time (0-23).
    pub fn start_hour(&self) -> u32 {
        self.start_time.hour()
    }
}

/// Which optional columns a city's trip log carries.
///
/// Presence is a property of the source, not of individual rows: a city without a gender
/// column has `gender == false` even when the dataset is empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TripSchema {
    pub end_time: bool,
    pub gender: bool,
    pub birth_year: bool,
}

impl TripSchema {
    /// Schema with every optional column present.
    pub fn full() -> Self {
        Self {
            end_time: true,
            gender: true,
            birth_year: true,
        }
    }

    /// Returns `true` if gender and birth-year statistics can be computed.
    pub fn has_demographics(&self) -> bool {
        self.gender && self.birth_year
    }

    /// Whether `column` is part of this schema.
    pub fn has_column(&self, column: Column) -> bool {
        match column {
            Column::EndTime => self.end_time,
            Column::Gender => self.gender,
            Column::BirthYear => self.birth_year,
            _ => true,
        }
    }
}

/// In-memory trip log for one city.
#[derive(Debug, Clone, PartialEq)]
pub struct TripDataset {
    pub city: City,
    pub schema: TripSchema,
    /// Records in source order.
    pub records: Vec<TripRecord>,
}

impl TripDataset {
    /// Create a dataset from its parts.
    pub fn new(city: City, schema: TripSchema, records: Vec<TripRecord>) -> Self {
        Self {
            city,
            schema,
            records,
        }
    }

    /// Number of rows in the dataset.
    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Create a new dataset containing only records that match `predicate`.
    ///
    /// The returned dataset preserves city, schema and record order.
    pub fn filter_records<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&TripRecord) -> bool,
    {
        let records = self
            .records
            .iter()
            .filter(|r| predicate(r))
            .cloned()
            .collect();
        Self {
            city: self.city,
            schema: self.schema,
            records,
        }
    }

    /// A fresh forward cursor positioned at the first record.
    pub fn cursor(&self) -> RowCursor<'_> {
        RowCursor::new(self)
    }
}
