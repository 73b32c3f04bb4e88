//! Rider statistics.

use serde::Serialize;

use crate::types::{Gender, TripDataset, UserType};

use super::mode;

/// Rows per user type. Missing and unrecognized labels both count as `unknown`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UserTypeCounts {
    pub subscriber: usize,
    pub customer: usize,
    pub unknown: usize,
}

impl UserTypeCounts {
    pub fn total(&self) -> usize {
        self.subscriber + self.customer + self.unknown
    }
}

/// Rows per gender. Missing and unrecognized values both count as `unknown`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GenderCounts {
    pub female: usize,
    pub male: usize,
    pub unknown: usize,
}

/// Gender and birth-year statistics, for cities whose logs carry both columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Demographics {
    pub gender: GenderCounts,
    /// `None` when no row has a birth year.
    pub earliest_birth_year: Option<i32>,
    pub most_recent_birth_year: Option<i32>,
    /// Ascending; missing birth years are ignored.
    pub common_birth_years: Vec<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserStats {
    pub user_types: UserTypeCounts,
    /// `None` when the city's schema lacks a gender or birth-year column.
    pub demographics: Option<Demographics>,
}

pub fn user_stats(dataset: &TripDataset) -> UserStats {
    let mut user_types = UserTypeCounts::default();
    for r in &dataset.records {
        match r.user_type {
            Some(UserType::Subscriber) => user_types.subscriber += 1,
            Some(UserType::Customer) => user_types.customer += 1,
            Some(UserType::Other(_)) | None => user_types.unknown += 1,
        }
    }

    UserStats {
        user_types,
        demographics: dataset
            .schema
            .has_demographics()
            .then(|| demographics(dataset)),
    }
}

fn demographics(dataset: &TripDataset) -> Demographics {
    let mut gender = GenderCounts::default();
    for r in &dataset.records {
        match r.gender {
            Some(Gender::Female) => gender.female += 1,
            Some(Gender::Male) => gender.male += 1,
            Some(Gender::Other(_)) | None => gender.unknown += 1,
        }
    }

    let years = || dataset.records.iter().filter_map(|r| r.birth_year);
    Demographics {
        gender,
        earliest_birth_year: years().min(),
        most_recent_birth_year: years().max(),
        common_birth_years: mode(years()),
    }
}
