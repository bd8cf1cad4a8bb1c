use chrono::{DateTime, Duration, FixedOffset};
use log::{debug, warn};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::errors::{ForecastError, Result};
use crate::graphs::{ColorScheme, GraphConfig, SeriesRenderer, ValueFormat};
use crate::series::domain::{DEFAULT_TICK_COUNT, ticks};
use crate::series::{SeriesGroup, time_extent, value_extent};
use crate::surface::Surface;

/// Series lines are 2px wide and never filled
const STROKE_WIDTH: u32 = 2;
const LABEL_FONT_SIZE: f64 = 10.0;
const LABEL_PADDING: i32 = 4;
const GRID_COLOR: RGBColor = RGBColor(0xdd, 0xdd, 0xdd);

/// Time axis labels, in the forecast's own UTC offset
pub const TIME_LABEL_FORMAT: &str = "%a %H:%M";

/// Candidate spacings between time ticks, in hours
const TIME_TICK_HOURS: [i64; 7] = [1, 2, 3, 6, 12, 24, 48];
/// Minimum horizontal room per time label, in pixels
const MIN_TIME_TICK_SPACING: u32 = 80;
const SECONDS_PER_DAY: i64 = 24 * 3600;

/// Multi-series line chart sharing one time axis and one value axis
///
/// Every series of the group is drawn against the same domains, so lines of
/// different lengths still line up in time. The chart is rendered to SVG and
/// appended to the target surface.
pub struct LineChart {
    config: GraphConfig,
    colors: ColorScheme,
    value_format: ValueFormat,
}

impl LineChart {
    pub fn new(colors: ColorScheme) -> Self {
        Self {
            config: GraphConfig::default(),
            colors,
            value_format: ValueFormat::default(),
        }
    }

    pub fn with_config(mut self, config: GraphConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_value_format(mut self, value_format: ValueFormat) -> Self {
        self.value_format = value_format;
        self
    }

    /// Renders the group as a standalone SVG document
    ///
    /// A group without any points yields a blank canvas of the same size.
    pub fn draw_svg(&self, group: &SeriesGroup, client_width: u32) -> Result<String> {
        let plot_width = self.config.plot_width(client_width);
        let canvas = self.config.canvas_size(client_width);
        let time = time_extent(group).bounds();
        let value = value_extent(group).nice(DEFAULT_TICK_COUNT).bounds();

        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, canvas).into_drawing_area();
            root.fill(&WHITE).map_err(render_error)?;

            match (time, value) {
                (Some(time), Some(value)) => self.draw_chart(&root, group, time, value, plot_width)?,
                _ => warn!(
                    "No points in group [{}], drawing empty chart",
                    group.names().collect::<Vec<_>>().join(", ")
                ),
            }

            root.present().map_err(render_error)?;
        }
        Ok(svg)
    }

    fn draw_chart(
        &self,
        root: &DrawingArea<SVGBackend<'_>, Shift>,
        group: &SeriesGroup,
        (start, end): (DateTime<FixedOffset>, DateTime<FixedOffset>),
        (lo, hi): (f64, f64),
        plot_width: u32,
    ) -> Result<()> {
        // A single timestep still needs a non-zero time range
        let (x0, x1) = if start == end {
            (
                seconds(&(start - Duration::minutes(30))),
                seconds(&(end + Duration::minutes(30))),
            )
        } else {
            (seconds(&start), seconds(&end))
        };

        let mut chart = ChartBuilder::on(root)
            .margin_top(self.config.top)
            .margin_right(self.config.right)
            .margin_bottom(self.config.bottom)
            .margin_left(self.config.left)
            .build_cartesian_2d(x0..x1, lo..hi)
            .map_err(render_error)?;

        let time_ticks = time_ticks(start, end, plot_width);
        let value_ticks = ticks(lo, hi, DEFAULT_TICK_COUNT);

        // Gridlines span the whole plot area
        chart
            .draw_series(time_ticks.iter().map(|t| {
                let x = seconds(t);
                PathElement::new(vec![(x, lo), (x, hi)], GRID_COLOR.stroke_width(1))
            }))
            .map_err(render_error)?;
        chart
            .draw_series(
                value_ticks
                    .iter()
                    .map(|y| PathElement::new(vec![(x0, *y), (x1, *y)], GRID_COLOR.stroke_width(1))),
            )
            .map_err(render_error)?;
        chart
            .draw_series(std::iter::once(PathElement::new(
                vec![(x0, hi), (x0, lo), (x1, lo)],
                BLACK.stroke_width(1),
            )))
            .map_err(render_error)?;

        for (index, (name, series)) in group.iter().enumerate() {
            let color = self.colors.color_for(index);
            chart
                .draw_series(LineSeries::new(
                    series.points().iter().map(|p| (seconds(&p.time), p.value)),
                    color.stroke_width(STROKE_WIDTH),
                ))
                .map_err(render_error)?;
            debug!("Drew '{}' with {} points", name, series.len());
        }

        let label_style = TextStyle::from(("sans-serif", LABEL_FONT_SIZE).into_font()).color(&BLACK);
        let below = label_style.pos(Pos::new(HPos::Center, VPos::Top));
        let left_of = label_style.pos(Pos::new(HPos::Right, VPos::Center));

        for t in &time_ticks {
            let (px, py) = chart.backend_coord(&(seconds(t), lo));
            let label = t.format(TIME_LABEL_FORMAT).to_string();
            root.draw(&Text::new(label, (px, py + LABEL_PADDING), below.clone()))
                .map_err(render_error)?;
        }
        for y in &value_ticks {
            let (px, py) = chart.backend_coord(&(x0, *y));
            let label = self.value_format.apply(*y);
            root.draw(&Text::new(label, (px - LABEL_PADDING, py), left_of.clone()))
                .map_err(render_error)?;
        }

        Ok(())
    }
}

impl SeriesRenderer for LineChart {
    fn render(&self, group: &SeriesGroup, surface: &mut Surface) -> Result<()> {
        let svg = self.draw_svg(group, surface.client_width())?;
        debug!(
            "Appending {} byte chart to surface '{}'",
            svg.len(),
            surface.id()
        );
        surface.append(&svg);
        Ok(())
    }
}

/// Tick times between `start` and `end`, aligned to whole multiples of the
/// tick spacing in local time
///
/// The spacing is the smallest candidate that leaves at least
/// `MIN_TIME_TICK_SPACING` pixels per label across `plot_width`. Spans too
/// long for the largest candidate get a spacing of whole days.
pub fn time_ticks(
    start: DateTime<FixedOffset>,
    end: DateTime<FixedOffset>,
    plot_width: u32,
) -> Vec<DateTime<FixedOffset>> {
    let max_ticks = (plot_width / MIN_TIME_TICK_SPACING).max(2) as i64;
    let span = (end - start).num_seconds().max(0);

    let interval = TIME_TICK_HOURS
        .iter()
        .map(|h| h * 3600)
        .find(|interval| span / interval < max_ticks)
        .unwrap_or_else(|| (span / max_ticks / SECONDS_PER_DAY + 1) * SECONDS_PER_DAY);

    let offset = i64::from(start.offset().local_minus_utc());
    let local_start = start.timestamp() + offset;
    let first = local_start.div_euclid(interval) * interval
        + if local_start.rem_euclid(interval) == 0 { 0 } else { interval };

    let mut ticks = Vec::new();
    let mut next = start.checked_add_signed(Duration::seconds(first - local_start));
    while let Some(tick) = next.filter(|t| *t <= end) {
        ticks.push(tick);
        next = tick.checked_add_signed(Duration::seconds(interval));
    }
    ticks
}

fn seconds(time: &DateTime<FixedOffset>) -> f64 {
    time.timestamp() as f64
}

fn render_error<E: std::fmt::Display>(e: E) -> ForecastError {
    ForecastError::Render(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::parse_timestamp;
    use crate::series::Series;

    fn hourly(start: &str, values: &[f64]) -> Series {
        let start = parse_timestamp(start).unwrap();
        let mut series = Series::new();
        for (i, v) in values.iter().enumerate() {
            series.push(start + Duration::hours(i as i64), *v);
        }
        series
    }

    fn temperature_group() -> SeriesGroup {
        let mut group = SeriesGroup::new();
        group.insert(
            "temperature",
            hourly("2024-07-04T13:00:00-05:00", &[81.0, 83.0, 84.0, 82.0, 79.0, 75.0]),
        );
        group.insert(
            "dew_point",
            hourly("2024-07-04T13:00:00-05:00", &[70.0, 69.0, 69.0]),
        );
        group
    }

    #[test]
    fn test_draw_svg_canvas_and_colors() {
        let chart = LineChart::new(ColorScheme::temperature());
        let svg = chart.draw_svg(&temperature_group(), 800).unwrap().to_lowercase();

        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("width=\"800\""));
        assert!(svg.contains("height=\"350\""));
        assert!(svg.contains("#ff0000"));
        assert!(svg.contains("#009900"));
        assert!(svg.contains("polyline"));
    }

    #[test]
    fn test_draw_svg_labels_use_value_format() {
        let mut group = SeriesGroup::new();
        group.insert(
            "precipitation_amount",
            hourly("2024-07-04T13:00:00-05:00", &[0.0, 0.03, 0.47]),
        );

        let chart = LineChart::new(ColorScheme::precipitation_amount())
            .with_value_format(ValueFormat::fixed(2));
        let svg = chart.draw_svg(&group, 600).unwrap();
        assert!(svg.contains("0.50"));
        assert!(svg.contains("0.25"));
    }

    #[test]
    fn test_draw_svg_time_labels_in_local_offset() {
        let chart = LineChart::new(ColorScheme::temperature());
        let svg = chart.draw_svg(&temperature_group(), 800).unwrap();
        // 2024-07-04 is a Thursday; 13:00-18:00 local is 18:00-23:00 UTC
        assert!(svg.contains("Thu 13:00"));
        assert!(!svg.contains("Thu 23:00"));
    }

    #[test]
    fn test_empty_group_draws_blank_canvas() {
        let chart = LineChart::new(ColorScheme::sky_cover());

        let svg = chart.draw_svg(&SeriesGroup::new(), 500).unwrap();
        assert!(svg.contains("width=\"500\""));
        assert!(!svg.contains("polyline"));

        let mut group = SeriesGroup::new();
        group.insert("cloud_amount", Series::new());
        assert!(chart.draw_svg(&group, 500).is_ok());
    }

    #[test]
    fn test_single_point_group_renders() {
        let mut group = SeriesGroup::new();
        group.insert("qpf", hourly("2024-01-01T00:00:00Z", &[0.1]));

        let chart = LineChart::new(ColorScheme::precipitation_amount());
        assert!(chart.draw_svg(&group, 300).is_ok());
    }

    #[test]
    fn test_render_appends_to_surface() {
        let chart = LineChart::new(ColorScheme::temperature());
        let mut surface = Surface::new("temperature-graph", 700);

        chart.render(&temperature_group(), &mut surface).unwrap();
        let once = surface.content().len();
        chart.render(&temperature_group(), &mut surface).unwrap();

        assert_eq!(surface.content().len(), once * 2);
        assert_eq!(surface.content().matches("<svg").count(), 2);
    }

    #[test]
    fn test_time_ticks_alignment_and_spacing() {
        let start = parse_timestamp("2024-07-04T13:30:00-05:00").unwrap();
        let end = parse_timestamp("2024-07-04T19:00:00-05:00").unwrap();

        // Wide plot: hourly ticks on the hour
        let ticks = time_ticks(start, end, 800);
        assert_eq!(ticks.len(), 6);
        assert_eq!(ticks[0].format("%H:%M").to_string(), "14:00");
        assert_eq!(ticks[5].format("%H:%M").to_string(), "19:00");

        // Narrow plot: fewer, wider-spaced ticks
        let sparse = time_ticks(start, end, 200);
        assert!(sparse.len() <= 2);
        assert!(sparse.iter().all(|t| *t >= start && *t <= end));
    }

    #[test]
    fn test_time_ticks_week_long_forecast() {
        let start = parse_timestamp("2024-07-01T00:00:00-05:00").unwrap();
        let end = start + Duration::days(7);

        let ticks = time_ticks(start, end, 750);
        assert!(!ticks.is_empty());
        assert!(ticks.len() <= 9);
        assert!(ticks.iter().all(|t| t.format("%H:%M").to_string() == "00:00"));
    }

    #[test]
    fn test_time_ticks_bounded_for_long_spans() {
        let start = parse_timestamp("2024-07-01T00:00:00-05:00").unwrap();
        for weeks in [3, 6, 26, 520] {
            let end = start + Duration::weeks(weeks);
            let ticks = time_ticks(start, end, 750);
            assert!(!ticks.is_empty());
            assert!(ticks.len() <= 750 / 80, "{} ticks for {weeks} weeks", ticks.len());
            assert!(ticks.iter().all(|t| t.format("%H:%M").to_string() == "00:00"));
        }
    }

    #[test]
    fn test_draw_svg_extreme_time_range_stays_small() {
        let mut series = Series::new();
        series.push(parse_timestamp("0001-01-01T00:00:00Z").unwrap(), 0.0);
        series.push(parse_timestamp("9999-01-01T01:00:00Z").unwrap(), 0.5);
        let mut group = SeriesGroup::new();
        group.insert("qpf", series);

        let svg = LineChart::new(ColorScheme::precipitation_amount())
            .draw_svg(&group, 800)
            .unwrap();
        assert!(svg.len() < 100_000, "svg is {} bytes", svg.len());
    }
}
