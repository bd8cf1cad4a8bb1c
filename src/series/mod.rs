//! Time series reshaping
//!
//! The forecast table arrives as a list of records, each holding every
//! measurement for one timestep. Charts want the transpose: one ordered list of
//! `(time, value)` points per measurement.
//!
//! - `builder`: records → [`SeriesSet`] (one [`Series`] per measurement name)
//! - `domain`: shared axis extents over a [`SeriesGroup`]
//!
//! Groups are assembled from any [`NamedSeriesProvider`] and are the unit a
//! chart renders.

pub mod builder;
pub mod domain;

use chrono::{DateTime, FixedOffset};
use log::warn;
use serde::Serialize;
use std::collections::BTreeMap;

pub use builder::build_series;
pub use domain::{Extent, time_extent, value_extent};

/// One sample of a measurement
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub time: DateTime<FixedOffset>,
    pub value: f64,
}

/// Ordered samples of one measurement, in source record order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Series {
    points: Vec<Point>,
}

impl Series {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, time: DateTime<FixedOffset>, value: f64) {
        self.points.push(Point { time, value });
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.value)
    }
}

impl FromIterator<Point> for Series {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

/// Capability of handing out series by measurement name
pub trait NamedSeriesProvider {
    fn series(&self, name: &str) -> Option<&Series>;

    fn names(&self) -> Vec<&str>;

    /// Assembles a group from `(display name, measurement name)` pairs
    ///
    /// Measurements the provider does not know are left out of the group.
    fn group(&self, members: &[(&str, &str)]) -> SeriesGroup {
        let mut group = SeriesGroup::new();
        for (display, measurement) in members {
            match self.series(measurement) {
                Some(series) => group.insert(*display, series.clone()),
                None => warn!("No '{measurement}' measurement in forecast, omitting '{display}'"),
            }
        }
        group
    }
}

/// Every measurement found in a forecast table, keyed by name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesSet {
    series: BTreeMap<String, Series>,
}

impl SeriesSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a point to the named series, creating it on first use
    pub fn push(&mut self, name: &str, time: DateTime<FixedOffset>, value: f64) {
        match self.series.get_mut(name) {
            Some(series) => series.push(time, value),
            None => {
                let mut series = Series::new();
                series.push(time, value);
                self.series.insert(name.to_string(), series);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Series)> {
        self.series.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl NamedSeriesProvider for SeriesSet {
    fn series(&self, name: &str) -> Option<&Series> {
        self.series.get(name)
    }

    fn names(&self) -> Vec<&str> {
        self.series.keys().map(String::as_str).collect()
    }
}

/// Named series drawn together on one chart
///
/// Insertion order is kept; it decides which colour each line gets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesGroup {
    entries: Vec<(String, Series)>,
}

impl SeriesGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a series, replacing one already stored under the same name in place
    pub fn insert(&mut self, name: impl Into<String>, series: Series) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = series,
            None => self.entries.push((name, series)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Series> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, s)| s)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Series)> {
        self.entries.iter().map(|(n, s)| (n.as_str(), s))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::parse_timestamp;

    fn at(hour: u32) -> DateTime<FixedOffset> {
        parse_timestamp(&format!("2024-01-01T{hour:02}:00:00Z")).unwrap()
    }

    #[test]
    fn test_series_set_push_creates_on_first_use() {
        let mut set = SeriesSet::new();
        set.push("temperature", at(0), 32.0);
        set.push("temperature", at(1), 34.0);
        set.push("qpf", at(1), 0.1);

        assert_eq!(set.len(), 2);
        assert_eq!(set.series("temperature").unwrap().len(), 2);
        assert_eq!(set.names(), vec!["qpf", "temperature"]);
    }

    #[test]
    fn test_group_keeps_insertion_order() {
        let mut group = SeriesGroup::new();
        group.insert("temperature", Series::new());
        group.insert("dew_point", Series::new());
        group.insert("aaa", Series::new());

        let names: Vec<&str> = group.names().collect();
        assert_eq!(names, vec!["temperature", "dew_point", "aaa"]);
    }

    #[test]
    fn test_group_insert_replaces_same_name() {
        let mut group = SeriesGroup::new();
        group.insert("qpf", Series::new());
        let mut replacement = Series::new();
        replacement.push(at(0), 0.5);
        group.insert("qpf", replacement);

        assert_eq!(group.len(), 1);
        assert_eq!(group.get("qpf").unwrap().len(), 1);
    }

    #[test]
    fn test_provider_group_renames_and_skips_missing() {
        let mut set = SeriesSet::new();
        set.push("qpf", at(0), 0.02);

        let group = set.group(&[("precipitation_amount", "qpf"), ("snow", "snow_amount")]);
        assert_eq!(group.len(), 1);
        assert!(group.get("precipitation_amount").is_some());
        assert!(group.get("qpf").is_none());
    }
}
