//! JSON trip-log reader.
//!
//! Supported inputs:
//! - A JSON array of objects: `[{"Start Time": "...", ...}, ...]`
//! - Newline-delimited JSON (NDJSON): one object per line
//!
//! The column set is the union of keys over all objects, in first-seen order, so writers that
//! drop null keys still load. A key an object lacks reads as a null cell.

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use crate::config::City;
use crate::error::{BikeshareError, BikeshareResult};
use crate::types::{TripDataset, TripSchema};

use super::record::ColumnMap;

/// Read a JSON or NDJSON trip log into a [`TripDataset`].
pub fn read_json_from_path(path: impl AsRef<Path>, city: City) -> BikeshareResult<TripDataset> {
    let text = fs::read_to_string(path)?;
    read_json_from_str(&text, city)
}

/// Read a JSON or NDJSON trip log from an in-memory string.
pub fn read_json_from_str(input: &str, city: City) -> BikeshareResult<TripDataset> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(BikeshareError::SchemaMismatch {
            message: "json input is empty".to_string(),
        });
    }

    // First try parsing as a single JSON value (array or object).
    if let Ok(v) = serde_json::from_str::<Value>(trimmed) {
        match v {
            Value::Array(items) => read_json_values(&items, city),
            Value::Object(_) => read_json_values(std::slice::from_ref(&v), city),
            _ => Err(BikeshareError::SchemaMismatch {
                message: "json must be an object, an array of objects, or NDJSON".to_string(),
            }),
        }
    } else {
        let mut values = Vec::new();
        for (i, line) in trimmed.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let v = serde_json::from_str::<Value>(line).map_err(|e| BikeshareError::SchemaMismatch {
                message: format!("invalid ndjson at line {}: {}", i + 1, e),
            })?;
            values.push(v);
        }
        read_json_values(&values, city)
    }
}

fn read_json_values(values: &[Value], city: City) -> BikeshareResult<TripDataset> {
    let objects = values
        .iter()
        .enumerate()
        .map(|(idx0, v)| {
            v.as_object().ok_or_else(|| BikeshareError::SchemaMismatch {
                message: format!("row {} is not a json object", idx0 + 1),
            })
        })
        .collect::<BikeshareResult<Vec<_>>>()?;

    if objects.is_empty() {
        return Ok(TripDataset::new(city, TripSchema::default(), Vec::new()));
    }
    let keys = union_keys(&objects);
    let columns = ColumnMap::resolve(keys.iter().copied())?;

    let mut records = Vec::with_capacity(objects.len());
    for (idx0, obj) in objects.iter().enumerate() {
        records.push(columns.build_record(idx0 + 1, |pos| cell_text(obj, keys[pos]))?);
    }

    Ok(TripDataset::new(city, columns.schema(), records))
}

fn union_keys<'a>(objects: &[&'a Map<String, Value>]) -> Vec<&'a str> {
    let mut keys: Vec<&str> = Vec::new();
    for key in objects.iter().copied().flat_map(|obj| obj.keys()) {
        let key = key.as_str();
        if !keys.contains(&key) {
            keys.push(key);
        }
    }
    keys
}

fn cell_text<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<Cow<'a, str>> {
    match obj.get(key)? {
        Value::Null => None,
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        other => Some(Cow::Owned(other.to_string())),
    }
}
