//! In-memory dataset transformations.
//!
//! The processing layer operates on [`crate::types::TripDataset`] values produced by loading.
//! Currently implemented:
//!
//! - [`filter()`]: month / day-of-week equality predicates
//!
//! ## Example
//!
//! ```rust
//! use bikeshare_stats::config::BikeshareConfig;
//! use bikeshare_stats::processing::{filter, FilterCriteria};
//! use bikeshare_stats::ingestion::csv::read_csv_from_reader;
//! use bikeshare_stats::config::City;
//!
//! let input = "\
//! Start Time,End Station,Start Station,Trip Duration,User Type
//! 2017-01-06 08:00:00,B,A,600,Subscriber
//! 2017-02-03 09:30:00,C,B,300,Customer
//! 2017-02-06 18:15:00,A,C,900,Subscriber
//! ";
//! let mut rdr = csv::Reader::from_reader(input.as_bytes());
//! let ds = read_csv_from_reader(&mut rdr, City::Chicago).unwrap();
//!
//! let config = BikeshareConfig::default();
//! let criteria = FilterCriteria::from_names(&config, "february", "friday").unwrap();
//! let fridays_in_feb = filter(&ds, &criteria);
//! assert_eq!(fridays_in_feb.row_count(), 1);
//! ```

pub mod filter;

pub use filter::{filter, FilterCriteria};
