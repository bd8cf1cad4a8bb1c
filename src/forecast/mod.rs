//! Forecast document model
//!
//! The document combines two views of the same forecast:
//!
//! - `table`: hourly records, one object per timestep, each carrying a `time`
//!   string and an open set of numeric measurements
//! - `forecast.periods`: day/night periods with a predicted high or low and a
//!   human readable description
//!
//! Submodules provide the ways of obtaining a document (`source`) and of
//! building the `table` section from the NWS digital forecast (`dwml`).

pub mod dwml;
pub mod source;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use source::{FileSource, ForecastSource, HttpSource, source_from};

/// Name of the field holding the record timestamp
pub const TIME_FIELD: &str = "time";

/// Fallback layout for offsets written without a colon (`-0500`)
const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// Top-level forecast document
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ForecastDocument {
    /// Hourly records in chronological order
    #[serde(default)]
    pub table: Vec<Record>,
    /// Day/night periods; absent when only the table was generated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forecast: Option<PeriodForecast>,
}

/// One timestep of the hourly table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Record {
    pub time: String,
    /// Measurement name to value; `None` marks a value the source could not provide
    #[serde(flatten)]
    pub measurements: BTreeMap<String, Option<f64>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PeriodForecast {
    #[serde(default)]
    pub periods: Vec<Period>,
}

/// A day or night forecast period
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Period {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub temperature: f64,
    pub temperature_unit: String,
    pub detailed_forecast: String,
}

impl Record {
    pub fn new(time: impl Into<String>) -> Self {
        Self {
            time: time.into(),
            measurements: BTreeMap::new(),
        }
    }

    /// Builder-style helper for assembling records
    pub fn with(mut self, name: impl Into<String>, value: f64) -> Self {
        self.measurements.insert(name.into(), Some(value));
        self
    }

    /// Returns the value of a measurement if present and not null
    pub fn value(&self, name: &str) -> Option<f64> {
        self.measurements.get(name).copied().flatten()
    }
}

impl ForecastDocument {
    /// The first record, describing the upcoming hour
    pub fn now(&self) -> Option<&Record> {
        self.table.first()
    }

    /// The active day or night period
    pub fn current_period(&self) -> Option<&Period> {
        self.forecast.as_ref().and_then(|f| f.periods.first())
    }
}

/// Parses a record timestamp such as `2024-01-01T00:00:00Z`,
/// `2024-01-01T00:00:00-05:00` or `2024-01-01T00:00:00-0500`
pub fn parse_timestamp(value: &str) -> Result<DateTime<FixedOffset>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(value).or_else(|_| DateTime::parse_from_str(value, TIME_FORMAT))
}
