//! Dataset loading for one query cycle.

use crate::config::{BikeshareConfig, City};
use crate::error::BikeshareResult;
use crate::ingestion::{read_trips_from_path, LoadOptions};
use crate::processing::{filter, FilterCriteria};
use crate::types::TripDataset;

/// Load `city`'s full trip log as configured in `config`.
pub fn load_city(config: &BikeshareConfig, city: City, options: &LoadOptions) -> BikeshareResult<TripDataset> {
    let path = config.source_path(city)?;
    read_trips_from_path(path, city, options)
}

/// Load `city`'s trip log and keep only the rows matching `criteria`.
///
/// A missing or malformed source is returned as an error; nothing is retried.
///
/// ```no_run
/// use bikeshare_stats::config::{BikeshareConfig, City};
/// use bikeshare_stats::ingestion::LoadOptions;
/// use bikeshare_stats::loader::load;
/// use bikeshare_stats::processing::FilterCriteria;
///
/// # fn main() -> Result<(), bikeshare_stats::BikeshareError> {
/// let config = BikeshareConfig::with_data_dir("data");
/// let criteria = FilterCriteria::from_names(&config, "march", "friday")?;
/// let ds = load(&config, City::Chicago, &criteria, &LoadOptions::default())?;
/// println!("rows={}", ds.row_count());
/// # Ok(())
/// # }
/// ```
pub fn load(
    config: &BikeshareConfig,
    city: City,
    criteria: &FilterCriteria,
    options: &LoadOptions,
) -> BikeshareResult<TripDataset> {
    let full = load_city(config, city, options)?;
    let filtered = filter(&full, criteria);
    log::debug!(
        "{city}: {} of {} rows match {criteria:?}",
        filtered.row_count(),
        full.row_count()
    );
    Ok(filtered)
}
