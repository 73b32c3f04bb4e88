//! `bikeshare-stats` answers descriptive-statistics queries over bike-share trip logs.
//!
//! A query cycle picks a [`config::City`] and an optional month and/or weekday filter, then:
//!
//! 1. [`loader::load`] reads the city's trip log (CSV, JSON/NDJSON or Parquet) into a
//!    [`types::TripDataset`] and keeps the rows matching the [`processing::FilterCriteria`]
//! 2. [`stats::StatsReport::compute`] derives the four statistic groups from it
//! 3. [`cursor::RowCursor`] pages through the raw rows, independently of the statistics
//!
//! ## Trip logs
//!
//! Sources are matched to trip columns by header (`Start Time`, `End Time`, `Start Station`,
//! `End Station`, `Trip Duration`, `User Type`, `Gender`, `Birth Year`), ignoring case and
//! treating `_`/`-` as spaces. `End Time`, `Gender` and `Birth Year` are optional: their presence
//! is recorded in [`types::TripSchema`], and gender / birth-year statistics are only computed
//! when both columns exist.
//!
//! Empty cells are missing values. A missing required column or an unparsable cell is a
//! [`BikeshareError`].
//!
//! ## Example
//!
//! ```rust
//! use bikeshare_stats::config::{BikeshareConfig, City};
//! use bikeshare_stats::ingestion::json::read_json_from_str;
//! use bikeshare_stats::processing::{filter, FilterCriteria};
//! use bikeshare_stats::stats::{DurationBreakdown, StatsReport};
//!
//! let input = r#"
//! {"Start Time":"2017-01-02 08:00:00","Trip Duration":100,"Start Station":"A","End Station":"B","User Type":"Subscriber"}
//! {"Start Time":"2017-01-09 08:30:00","Trip Duration":200,"Start Station":"A","End Station":"B","User Type":"Customer"}
//! {"Start Time":"2017-03-06 17:00:00","Trip Duration":300,"Start Station":"B","End Station":"A","User Type":"Subscriber"}
//! "#;
//! let ds = read_json_from_str(input, City::Washington).unwrap();
//! let config = BikeshareConfig::default();
//!
//! let report = StatsReport::compute(&ds, &config);
//! assert_eq!(report.travel_time.common_months, vec!["january"]);
//! assert_eq!(report.trip_duration.total, DurationBreakdown { hours: 0, minutes: 10, seconds: 0 });
//! assert!(report.users.demographics.is_none());
//!
//! let march = filter(&ds, &FilterCriteria::from_names(&config, "march", "all").unwrap());
//! let mut cursor = march.cursor();
//! assert_eq!(cursor.next_page(10).len(), 1);
//! assert!(cursor.next_page(10).is_empty());
//! ```
//!
//! ## Modules
//!
//! - [`config`]: cities, source table and month names
//! - [`ingestion`]: format readers and load observers
//! - [`loader`]: load + filter for one query cycle
//! - [`processing`]: month / weekday filtering
//! - [`stats`]: statistic groups
//! - [`cursor`]: raw-row paging
//! - [`types`]: trip records and datasets
//! - [`error`]: the crate error type

pub mod config;
pub mod cursor;
pub mod error;
pub mod ingestion;
pub mod loader;
pub mod processing;
pub mod stats;
pub mod types;

pub use error::{BikeshareError, BikeshareResult};
