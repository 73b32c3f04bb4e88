//! Format-independent trip-log reading.
//!
//! [`read_trips_from_path`] picks a reader by [`LoadOptions::format`] or, when that is `None`,
//! by file extension, and reports the outcome to the configured [`LoadObserver`].

use std::error::Error as StdError;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::config::City;
use crate::error::{BikeshareError, BikeshareResult};
use crate::types::TripDataset;

use super::observability::{LoadContext, LoadObserver, LoadSeverity, LoadStats};
use super::{csv, json, parquet};

/// Supported trip-log formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    /// JSON array-of-objects or NDJSON.
    Json,
    Parquet,
}

impl SourceFormat {
    /// Parse a format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "json" | "ndjson" => Some(Self::Json),
            "parquet" | "pq" => Some(Self::Parquet),
            _ => None,
        }
    }
}

/// Options controlling how trip logs are read.
#[derive(Clone)]
pub struct LoadOptions {
    /// If `None`, the format is inferred from the file extension.
    pub format: Option<SourceFormat>,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn LoadObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: LoadSeverity,
}

impl fmt::Debug for LoadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadOptions")
            .field("format", &self.format)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            format: None,
            observer: None,
            alert_at_or_above: LoadSeverity::Critical,
        }
    }
}

/// Read the trip log at `path` for `city`.
///
/// When an observer is configured, this function reports:
///
/// - `on_success` with the row count
/// - `on_failure` with a computed severity (I/O failures are [`LoadSeverity::Critical`],
///   malformed content is [`LoadSeverity::Error`])
/// - `on_alert` when that severity is >= `options.alert_at_or_above`
///
/// ```no_run
/// use bikeshare_stats::config::City;
/// use bikeshare_stats::ingestion::{read_trips_from_path, LoadOptions, SourceFormat};
///
/// # fn main() -> Result<(), bikeshare_stats::BikeshareError> {
/// let opts = LoadOptions {
///     format: Some(SourceFormat::Csv),
///     ..Default::default()
/// };
/// let ds = read_trips_from_path("chicago_export", City::Chicago, &opts)?;
/// println!("rows={}", ds.row_count());
/// # Ok(())
/// # }
/// ```
pub fn read_trips_from_path(
    path: impl AsRef<Path>,
    city: City,
    options: &LoadOptions,
) -> BikeshareResult<TripDataset> {
    let path = path.as_ref();
    let format = match options.format {
        Some(f) => f,
        None => infer_format_from_path(path)?,
    };

    log::debug!("reading {city} trips from {} as {format:?}", path.display());
    let result = match format {
        SourceFormat::Csv => csv::read_csv_from_path(path, city),
        SourceFormat::Json => json::read_json_from_path(path, city),
        SourceFormat::Parquet => parquet::read_parquet_from_path(path, city),
    };

    if let Some(obs) = options.observer.as_ref() {
        let ctx = LoadContext {
            city,
            path: path.to_path_buf(),
            format,
        };
        match &result {
            Ok(ds) => obs.on_success(&ctx, LoadStats { rows: ds.row_count() }),
            Err(e) => {
                let sev = severity_for_error(e);
                obs.on_failure(&ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }

    result
}

fn severity_for_error(e: &BikeshareError) -> LoadSeverity {
    match e {
        BikeshareError::Io(_) => LoadSeverity::Critical,
        BikeshareError::Parquet(err) => {
            // Parquet errors sometimes wrap an io::Error without exposing it structurally.
            if error_chain_contains_io(err) {
                LoadSeverity::Critical
            } else {
                LoadSeverity::Error
            }
        }
        BikeshareError::Csv(err) => match err.kind() {
            ::csv::ErrorKind::Io(_) => LoadSeverity::Critical,
            _ => LoadSeverity::Error,
        },
        BikeshareError::Json(err) if err.is_io() => LoadSeverity::Critical,
        _ => LoadSeverity::Error,
    }
}

fn error_chain_contains_io(e: &(dyn StdError + 'static)) -> bool {
    let mut cur: Option<&(dyn StdError + 'static)> = Some(e);
    while let Some(err) = cur {
        if err.is::<std::io::Error>() {
            return true;
        }
        cur = err.source();
    }
    false
}

fn infer_format_from_path(path: &Path) -> BikeshareResult<SourceFormat> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .ok_or_else(|| BikeshareError::SchemaMismatch {
            message: format!("cannot infer format: path has no extension ({})", path.display()),
        })?;

    SourceFormat::from_extension(ext).ok_or_else(|| BikeshareError::SchemaMismatch {
        message: format!(
            "cannot infer format from extension '{ext}' for path ({})",
            path.display()
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_extension() {
        assert_eq!(SourceFormat::from_extension("CSV"), Some(SourceFormat::Csv));
        assert_eq!(SourceFormat::from_extension("ndjson"), Some(SourceFormat::Json));
        assert_eq!(SourceFormat::from_extension("pq"), Some(SourceFormat::Parquet));
        assert_eq!(SourceFormat::from_extension("xlsx"), None);
    }

    #[test]
    fn inference_errors_without_extension() {
        let err = infer_format_from_path(Path::new("trips")).unwrap_err();
        assert!(err.to_string().contains("path has no extension"));
    }

    #[test]
    fn io_failures_are_critical() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert_eq!(severity_for_error(&BikeshareError::Io(io)), LoadSeverity::Critical);
        let mismatch = BikeshareError::SchemaMismatch {
            message: "x".to_string(),
        };
        assert_eq!(severity_for_error(&mismatch), LoadSeverity::Error);
    }
}
