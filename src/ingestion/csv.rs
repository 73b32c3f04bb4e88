//! CSV trip-log reader.

use std::borrow::Cow;
use std::fs::File;
use std::path::Path;

use crate::config::City;
use crate::error::BikeshareResult;
use crate::types::TripDataset;

use super::record::ColumnMap;

/// Read a CSV trip log into a [`TripDataset`].
///
/// Rules:
///
/// - The CSV must have headers.
/// - Headers must contain every required trip column (order can differ, extra columns are ignored).
/// - Optional columns (`End Time`, `Gender`, `Birth Year`) set the dataset's [`crate::types::TripSchema`].
pub fn read_csv_from_path(path: impl AsRef<Path>, city: City) -> BikeshareResult<TripDataset> {
    // Open separately so a missing file surfaces as an I/O error.
    let file = File::open(path)?;
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);
    read_csv_from_reader(&mut rdr, city)
}

/// Read a CSV trip log from an existing CSV reader.
pub fn read_csv_from_reader<R: std::io::Read>(
    rdr: &mut csv::Reader<R>,
    city: City,
) -> BikeshareResult<TripDataset> {
    let headers = rdr.headers()?.clone();
    let columns = ColumnMap::resolve(headers.iter())?;

    let mut records = Vec::new();
    for (row_idx0, result) in rdr.records().enumerate() {
        // Report 1-based row number for users; +1 again because header is row 1.
        let user_row = row_idx0 + 2;
        let record = result?;
        records.push(columns.build_record(user_row, |pos| record.get(pos).map(Cow::Borrowed))?);
    }

    Ok(TripDataset::new(city, columns.schema(), records))
}
