//! Immutable query configuration.
//!
//! [`BikeshareConfig`] owns the tables the loader and the filter consult: where each city's
//! trip log lives and which month names are valid filter values. Build it once (via
//! [`Default`] or [`BikeshareConfig::from_json_path`]) and pass it by reference.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{BikeshareError, BikeshareResult};

/// English month names, January first. Used when a month falls outside the configured list.
const CALENDAR_MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// The trip logs only cover the first half of the year.
const DEFAULT_MONTH_COUNT: usize = 6;

/// A supported city.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum City {
    #[serde(rename = "chicago")]
    Chicago,
    #[serde(rename = "new york city")]
    NewYorkCity,
    #[serde(rename = "washington")]
    Washington,
}

impl City {
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    /// Lower-case display name (`"new york city"`).
    pub fn name(self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYorkCity => "new york city",
            City::Washington => "washington",
        }
    }

    fn default_source(self) -> &'static str {
        match self {
            City::Chicago => "chicago.csv",
            City::NewYorkCity => "new_york_city.csv",
            City::Washington => "washington.csv",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for City {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        City::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| BikeshareError::UnknownCity(s.to_owned()))
    }
}

/// City → source table, data directory and canonical month list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BikeshareConfig {
    /// Directory relative source paths are resolved against.
    pub data_dir: PathBuf,
    /// Source file per city. Relative paths are joined onto `data_dir`.
    pub sources: BTreeMap<City, PathBuf>,
    /// Valid month filter values, in calendar order starting at January.
    pub months: Vec<String>,
}

impl Default for BikeshareConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            sources: City::ALL
                .into_iter()
                .map(|c| (c, PathBuf::from(c.default_source())))
                .collect(),
            months: CALENDAR_MONTHS[..DEFAULT_MONTH_COUNT]
                .iter()
                .map(|m| m.to_string())
                .collect(),
        }
    }
}

impl BikeshareConfig {
    /// Default configuration with sources resolved against `data_dir`.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    /// Read a configuration from a JSON file. Missing keys take their default values.
    ///
    /// ```no_run
    /// use bikeshare_stats::config::BikeshareConfig;
    ///
    /// # fn main() -> Result<(), bikeshare_stats::BikeshareError> {
    /// let config = BikeshareConfig::from_json_path("bikeshare.json")?;
    /// println!("{}", config.data_dir.display());
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_json_path(path: impl AsRef<Path>) -> BikeshareResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Parse a configuration from a JSON string.
    pub fn from_json_str(input: &str) -> BikeshareResult<Self> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> BikeshareResult<()> {
        if self.months.len() > CALENDAR_MONTHS.len() {
            return Err(BikeshareError::Config {
                message: format!("{} month names configured, at most 12 allowed", self.months.len()),
            });
        }
        if self.months.iter().any(|m| m.eq_ignore_ascii_case("all")) {
            return Err(BikeshareError::Config {
                message: "'all' is reserved and cannot be a month name".to_string(),
            });
        }
        Ok(())
    }

    /// Resolved path of a city's trip log.
    pub fn source_path(&self, city: City) -> BikeshareResult<PathBuf> {
        let source = self
            .sources
            .get(&city)
            .ok_or_else(|| BikeshareError::UnknownCity(city.name().to_owned()))?;
        Ok(self.data_dir.join(source))
    }

    /// 1-based position of `name` in the month list (case-insensitive).
    pub fn month_index(&self, name: &str) -> Option<u32> {
        let name = name.trim();
        self.months
            .iter()
            .position(|m| m.eq_ignore_ascii_case(name))
            .map(|idx| idx as u32 + 1)
    }

    /// Name of month `index` (1 = January).
    ///
    /// Months past the configured list fall back to the lower-case English name.
    pub fn month_name(&self, index: u32) -> Option<&str> {
        let idx = (index as usize).checked_sub(1)?;
        self.months
            .get(idx)
            .map(String::as_str)
            .or_else(|| CALENDAR_MONTHS.get(idx).copied())
    }
}
