//! Axis domains shared by every series of a group
//!
//! Each series contributes its local `[min, max]` over the selected field; the
//! group's domain is the extent of all local extents. A group with no points
//! at all has [`Extent::Empty`] rather than a made-up range, and callers
//! decide how to draw that.

use chrono::{DateTime, FixedOffset};

use crate::series::{Point, Series, SeriesGroup};

/// Default number of ticks targeted by [`Extent::nice`]
pub const DEFAULT_TICK_COUNT: usize = 10;

/// Closed `[min, max]` range over a group, or nothing when there are no points
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Extent<T> {
    Empty,
    Range(T, T),
}

impl<T: PartialOrd + Copy> Extent<T> {
    /// Widens the extent to include `value`
    pub fn include(self, value: T) -> Self {
        match self {
            Extent::Empty => Extent::Range(value, value),
            Extent::Range(min, max) => Extent::Range(
                if value < min { value } else { min },
                if value > max { value } else { max },
            ),
        }
    }

    /// Smallest extent covering both
    pub fn merge(self, other: Self) -> Self {
        match other {
            Extent::Empty => self,
            Extent::Range(min, max) => self.include(min).include(max),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Extent::Empty)
    }

    pub fn bounds(&self) -> Option<(T, T)> {
        match *self {
            Extent::Empty => None,
            Extent::Range(min, max) => Some((min, max)),
        }
    }
}

impl Extent<f64> {
    /// Extends the range outward to tick boundaries
    ///
    /// The tick step is 1, 2 or 5 times a power of ten, chosen so that about
    /// `count` ticks cover the range; the minimum is rounded down and the
    /// maximum rounded up to a multiple of it. A zero-width range is first
    /// widened by one unit on each side.
    pub fn nice(self, count: usize) -> Self {
        let Extent::Range(min, max) = self else {
            return self;
        };
        let (mut lo, mut hi) = if min == max {
            (min - 1.0, max + 1.0)
        } else {
            (min, max)
        };

        let mut previous: Option<f64> = None;
        for _ in 0..10 {
            let step = tick_step(lo, hi, count);
            if !step.is_finite() || step <= 0.0 || previous == Some(step) {
                break;
            }
            lo = (lo / step).floor() * step;
            hi = (hi / step).ceil() * step;
            previous = Some(step);
        }
        Extent::Range(lo, hi)
    }
}

/// Step of a "nice" tick sequence covering `[start, stop]` with about `count` ticks
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let raw = (stop - start) / count.max(1) as f64;
    let power = raw.log10().floor();
    let magnitude = 10f64.powf(power);
    let error = raw / magnitude;

    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    factor * magnitude
}

/// Tick positions from `start` to `stop` inclusive, at the step [`tick_step`] picks
///
/// For a range produced by [`Extent::nice`] both ends are ticks.
pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    let step = tick_step(start, stop, count);
    if !step.is_finite() || step <= 0.0 {
        return Vec::new();
    }
    let first = (start / step - 1e-9).ceil() as i64;
    let last = (stop / step + 1e-9).floor() as i64;
    (first..=last).map(|i| i as f64 * step).collect()
}

/// Local extent of one series over a field
pub fn series_extent<T, F>(series: &Series, field: F) -> Extent<T>
where
    T: PartialOrd + Copy,
    F: Fn(&Point) -> T,
{
    series
        .points()
        .iter()
        .fold(Extent::Empty, |extent, point| extent.include(field(point)))
}

/// Extent of a field over every point of every series in the group
pub fn domain_extent<T, F>(group: &SeriesGroup, field: F) -> Extent<T>
where
    T: PartialOrd + Copy,
    F: Fn(&Point) -> T,
{
    group
        .iter()
        .map(|(_, series)| series_extent(series, &field))
        .fold(Extent::Empty, Extent::merge)
}

pub fn time_extent(group: &SeriesGroup) -> Extent<DateTime<FixedOffset>> {
    domain_extent(group, |p| p.time)
}

pub fn value_extent(group: &SeriesGroup) -> Extent<f64> {
    domain_extent(group, |p| p.value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::parse_timestamp;

    fn series(start_hour: u32, values: &[f64]) -> Series {
        let mut series = Series::new();
        for (i, v) in values.iter().enumerate() {
            let time =
                parse_timestamp(&format!("2024-01-01T{:02}:00:00Z", start_hour as usize + i))
                    .unwrap();
            series.push(time, *v);
        }
        series
    }

    #[test]
    fn test_value_extent_spans_all_series() {
        let mut group = SeriesGroup::new();
        group.insert("temperature", series(0, &[32.0, 34.0, 31.0]));
        group.insert("dew_point", series(0, &[20.0, 22.0]));

        assert_eq!(value_extent(&group), Extent::Range(20.0, 34.0));
    }

    #[test]
    fn test_time_extent_spans_differing_lengths() {
        let mut group = SeriesGroup::new();
        group.insert("a", series(0, &[1.0]));
        group.insert("b", series(3, &[1.0, 2.0]));

        let (start, end) = time_extent(&group).bounds().unwrap();
        assert_eq!(start, parse_timestamp("2024-01-01T00:00:00Z").unwrap());
        assert_eq!(end, parse_timestamp("2024-01-01T04:00:00Z").unwrap());
    }

    #[test]
    fn test_empty_group_and_empty_series() {
        assert!(value_extent(&SeriesGroup::new()).is_empty());

        let mut group = SeriesGroup::new();
        group.insert("a", Series::new());
        group.insert("b", Series::new());
        assert!(value_extent(&group).is_empty());
        assert!(time_extent(&group).is_empty());
    }

    #[test]
    fn test_empty_series_does_not_affect_extent() {
        let mut group = SeriesGroup::new();
        group.insert("a", Series::new());
        group.insert("b", series(0, &[-3.0, 5.0]));
        assert_eq!(value_extent(&group), Extent::Range(-3.0, 5.0));
    }

    #[test]
    fn test_nice_rounds_outward() {
        assert_eq!(Extent::Range(3.0, 97.0).nice(10), Extent::Range(0.0, 100.0));
        assert_eq!(Extent::Range(20.0, 34.0).nice(10), Extent::Range(20.0, 34.0));
        assert_eq!(Extent::Range(21.5, 33.2).nice(10), Extent::Range(21.0, 34.0));
    }

    #[test]
    fn test_nice_small_fractions() {
        let (lo, hi) = Extent::Range(0.03, 0.47).nice(10).bounds().unwrap();
        assert_eq!(lo, 0.0);
        assert!((hi - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_nice_degenerate_and_empty() {
        let (lo, hi) = Extent::Range(5.0, 5.0).nice(10).bounds().unwrap();
        assert!((lo - 4.0).abs() < 1e-9);
        assert!((hi - 6.0).abs() < 1e-9);
        assert_eq!(Extent::<f64>::Empty.nice(10), Extent::Empty);
    }

    #[test]
    fn test_ticks_cover_nice_range() {
        assert_eq!(
            ticks(0.0, 100.0, 10),
            vec![0.0, 10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 100.0]
        );

        let fractional = ticks(0.0, 0.5, 10);
        assert_eq!(fractional.len(), 11);
        assert!((fractional[10] - 0.5).abs() < 1e-9);

        assert!(ticks(1.0, 1.0, 10).is_empty());
    }
}
