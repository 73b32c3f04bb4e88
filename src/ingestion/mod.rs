//! Trip-log readers.
//!
//! Most callers should go through [`crate::loader::load`], which resolves a city's source from
//! the configuration and applies the month/day filter. Underneath it sits
//! [`read_trips_from_path`] (from [`unified`]), which:
//!
//! - picks a reader by file extension (or the format forced in [`LoadOptions`])
//! - maps source headers to trip columns and parses every row into a [`crate::types::TripRecord`]
//! - optionally reports success/failure/alerts to a [`LoadObserver`]
//!
//! Format-specific readers live under [`csv`], [`json`] and [`parquet`].

pub mod csv;
pub mod json;
pub mod observability;
pub mod parquet;
mod record;
pub mod unified;

pub use observability::{
    CompositeObserver, FileObserver, LoadContext, LoadObserver, LoadSeverity, LoadStats, LogObserver,
};
pub use unified::{read_trips_from_path, LoadOptions, SourceFormat};
