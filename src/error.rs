use thiserror::Error;

/// Convenience result type used across loading, filtering and configuration.
pub type BikeshareResult<T> = Result<T, BikeshareError>;

/// Error type returned by the loader, the filter-criteria parser and the configuration layer.
///
/// Backing-source failures (`Io`, `Csv`, `Json`, `Parquet`, `SchemaMismatch`, `ParseError`) are
/// fatal for the query cycle that hit them. The remaining variants are caller precondition
/// violations (an unsupported city, a month or day name outside the canonical lists).
#[derive(Debug, Error)]
pub enum BikeshareError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV decoding error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON decoding error (source files or configuration).
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Parquet decoding error.
    #[error("parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    /// The source does not carry the columns a trip log needs.
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },

    /// A cell could not be parsed into its trip-record field.
    #[error("failed to parse value at row {row} column '{column}': {message} (raw='{raw}')")]
    ParseError {
        row: usize,
        column: String,
        raw: String,
        message: String,
    },

    /// The city is not one of the supported cities, or has no configured source.
    #[error("unknown city '{0}'")]
    UnknownCity(String),

    /// The month name is neither `all` nor one of the configured month names.
    #[error("invalid month '{0}'")]
    InvalidMonth(String),

    /// The day name is neither `all` nor one of the seven weekday names.
    #[error("invalid day '{0}'")]
    InvalidDay(String),

    /// The configuration itself is inconsistent.
    #[error("invalid configuration: {message}")]
    Config { message: String },
}
