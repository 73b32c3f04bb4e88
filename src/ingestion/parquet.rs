//! Parquet trip-log reader.

use std::borrow::Cow;
use std::path::Path;

use chrono::{DateTime, Utc};
use parquet::file::reader::{ChunkReader, FileReader};
use parquet::file::serialized_reader::SerializedFileReader;
use parquet::record::Field;

use crate::config::City;
use crate::error::BikeshareResult;
use crate::types::TripDataset;

use super::record::ColumnMap;

/// Read a Parquet trip log into a [`TripDataset`].
///
/// Notes:
/// - Trip columns are matched against Parquet leaf column paths, so `start_time` style
///   names work where the published headers contain spaces
/// - Timestamps may be stored as strings or as `TIMESTAMP(MILLIS|MICROS)` values
/// - Uses the Parquet record API (`RowIter`)
pub fn read_parquet_from_path(path: impl AsRef<Path>, city: City) -> BikeshareResult<TripDataset> {
    let reader = SerializedFileReader::try_from(path.as_ref())?;

    let leaf_columns = parquet_leaf_column_paths(&reader);
    let columns = ColumnMap::resolve(leaf_columns.iter().map(String::as_str))?;

    let mut records = Vec::new();
    for (idx0, row_res) in reader.into_iter().enumerate() {
        let row_num = idx0 + 1;
        let row = row_res?;

        // Row columns come back in schema order; look cells up by name anyway so a
        // reordered projection cannot shift values between columns.
        let fields: Vec<(&String, &Field)> = row.get_column_iter().collect();
        let record = columns.build_record(row_num, |pos| {
            let name = leaf_columns.get(pos)?;
            let (_, field) = fields.iter().find(|(n, _)| *n == name)?;
            field_text(field)
        })?;
        records.push(record);
    }

    Ok(TripDataset::new(city, columns.schema(), records))
}

fn parquet_leaf_column_paths<R: ChunkReader + 'static>(reader: &SerializedFileReader<R>) -> Vec<String> {
    reader
        .metadata()
        .file_metadata()
        .schema_descr()
        .columns()
        .iter()
        .map(|c| c.path().string())
        .collect()
}

fn field_text(field: &Field) -> Option<Cow<'_, str>> {
    match field {
        Field::Null => None,
        Field::Str(s) => Some(Cow::Borrowed(s.as_str())),
        Field::TimestampMillis(ms) => Some(timestamp_text(DateTime::from_timestamp_millis(*ms), *ms)),
        Field::TimestampMicros(us) => Some(timestamp_text(DateTime::from_timestamp_micros(*us), *us)),
        other => Some(Cow::Owned(other.to_string())),
    }
}

/// Out-of-range timestamps keep their raw integer so parsing reports it.
fn timestamp_text(dt: Option<DateTime<Utc>>, raw: i64) -> Cow<'static, str> {
    match dt {
        Some(dt) => Cow::Owned(dt.naive_utc().format("%Y-%m-%d %H:%M:%S%.f").to_string()),
        None => Cow::Owned(raw.to_string()),
    }
}
