//! Column mapping and cell parsing shared by every source format.
//!
//! Each format reader resolves its headers once with [`ColumnMap::resolve`], then hands every
//! row to [`ColumnMap::build_record`] as a cell-lookup closure returning the cell text.

use std::borrow::Cow;

use chrono::NaiveDateTime;

use crate::error::{BikeshareError, BikeshareResult};
use crate::types::{Column, Gender, TripRecord, TripSchema, UserType};

const TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

const COLUMN_COUNT: usize = Column::ALL.len();

/// Source column position of each known [`Column`].
#[derive(Debug, Clone)]
pub(crate) struct ColumnMap {
    positions: [Option<usize>; COLUMN_COUNT],
}

impl ColumnMap {
    /// Map source headers to trip columns. Unknown headers are ignored.
    ///
    /// Fails with [`BikeshareError::SchemaMismatch`] if a required column is missing.
    pub(crate) fn resolve<'a, I>(headers: I) -> BikeshareResult<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let headers: Vec<&str> = headers.into_iter().collect();
        let mut positions = [None; COLUMN_COUNT];
        for (slot, column) in positions.iter_mut().zip(Column::ALL) {
            *slot = headers.iter().position(|h| column.matches(h));
            if slot.is_none() && column.is_required() {
                return Err(BikeshareError::SchemaMismatch {
                    message: format!(
                        "missing required column '{}'. headers={headers:?}",
                        column.header()
                    ),
                });
            }
        }
        Ok(Self { positions })
    }

    /// Source position of `column`, if the source carries it.
    pub(crate) fn position(&self, column: Column) -> Option<usize> {
        self.positions[column_slot(column)]
    }

    pub(crate) fn schema(&self) -> TripSchema {
        TripSchema {
            end_time: self.position(Column::EndTime).is_some(),
            gender: self.position(Column::Gender).is_some(),
            birth_year: self.position(Column::BirthYear).is_some(),
        }
    }

    /// Build one record. `cell(pos)` returns the text at source position `pos`, or `None`
    /// when the cell is null.
    ///
    /// `row` is the user-facing row number used in error messages.
    pub(crate) fn build_record<'c, F>(&self, row: usize, mut cell: F) -> BikeshareResult<TripRecord>
    where
        F: FnMut(usize) -> Option<Cow<'c, str>>,
    {
        let mut text = |column: Column| -> Option<Cow<'c, str>> {
            let raw = cell(self.position(column)?)?;
            if raw.trim().is_empty() { None } else { Some(raw) }
        };

        let start_time = required(row, Column::StartTime, text(Column::StartTime))?;
        let start_station = required(row, Column::StartStation, text(Column::StartStation))?;
        let end_station = required(row, Column::EndStation, text(Column::EndStation))?;
        let duration = required(row, Column::TripDuration, text(Column::TripDuration))?;

        Ok(TripRecord {
            start_time: parse_timestamp(row, Column::StartTime, &start_time)?,
            end_time: text(Column::EndTime)
                .map(|raw| parse_timestamp(row, Column::EndTime, &raw))
                .transpose()?,
            start_station: start_station.trim().to_owned(),
            end_station: end_station.trim().to_owned(),
            duration_secs: parse_duration(row, &duration)?,
            user_type: text(Column::UserType).map(|raw| UserType::parse(&raw)),
            gender: text(Column::Gender).map(|raw| Gender::parse(&raw)),
            birth_year: text(Column::BirthYear)
                .map(|raw| parse_birth_year(row, &raw))
                .transpose()?,
        })
    }
}

fn column_slot(column: Column) -> usize {
    Column::ALL
        .iter()
        .position(|c| *c == column)
        .unwrap_or_default()
}

fn required<'c>(row: usize, column: Column, value: Option<Cow<'c, str>>) -> BikeshareResult<Cow<'c, str>> {
    value.ok_or_else(|| BikeshareError::ParseError {
        row,
        column: column.header().to_owned(),
        raw: String::new(),
        message: "missing required value".to_string(),
    })
}

fn parse_error(row: usize, column: Column, raw: &str, message: impl Into<String>) -> BikeshareError {
    BikeshareError::ParseError {
        row,
        column: column.header().to_owned(),
        raw: raw.to_owned(),
        message: message.into(),
    }
}

pub(crate) fn parse_timestamp(row: usize, column: Column, raw: &str) -> BikeshareResult<NaiveDateTime> {
    let trimmed = raw.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| parse_error(row, column, raw, "expected timestamp 'YYYY-MM-DD HH:MM:SS'"))
}

/// Longest accepted trip, in seconds. Keeps the sum over any loadable dataset within `u64`.
pub(crate) const MAX_DURATION_SECS: u64 = u32::MAX as u64;

/// Whole seconds. Fractional durations (`1423.854`) are truncated.
fn parse_duration(row: usize, raw: &str) -> BikeshareResult<u64> {
    let trimmed = raw.trim();
    let secs = match trimmed.parse::<u64>() {
        Ok(v) => v,
        Err(_) => match trimmed.parse::<f64>() {
            Ok(v) if v.is_finite() && v >= 0.0 => {
                if v.trunc() > MAX_DURATION_SECS as f64 {
                    return Err(out_of_range_duration(row, raw));
                }
                v.trunc() as u64
            }
            Ok(_) => return Err(parse_error(row, Column::TripDuration, raw, "expected a non-negative duration")),
            Err(e) => return Err(parse_error(row, Column::TripDuration, raw, e.to_string())),
        },
    };
    if secs > MAX_DURATION_SECS {
        return Err(out_of_range_duration(row, raw));
    }
    Ok(secs)
}

fn out_of_range_duration(row: usize, raw: &str) -> BikeshareError {
    parse_error(
        row,
        Column::TripDuration,
        raw,
        format!("duration exceeds {MAX_DURATION_SECS} seconds"),
    )
}

/// Accepts `1992` and `1992.0`.
fn parse_birth_year(row: usize, raw: &str) -> BikeshareResult<i32> {
    let trimmed = raw.trim();
    if let Ok(v) = trimmed.parse::<i32>() {
        return Ok(v);
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.fract() == 0.0 && v >= f64::from(i32::MIN) && v <= f64::from(i32::MAX) => Ok(v as i32),
        Ok(_) => Err(parse_error(row, Column::BirthYear, raw, "expected a whole year")),
        Err(e) => Err(parse_error(row, Column::BirthYear, raw, e.to_string())),
    }
}
