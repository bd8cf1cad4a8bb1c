//! Forecast page pipeline
//!
//! One retrieval of the forecast document, then, in order: the summary, the
//! series build, and one chart per [`ChartSpec`]. Nothing is retried; the
//! first failure ends the run and is returned to the caller.

use log::{debug, info};

use crate::errors::Result;
use crate::forecast::{ForecastDocument, ForecastSource};
use crate::graphs::{ColorScheme, GraphConfig, LineChart, SeriesRenderer, ValueFormat};
use crate::series::{NamedSeriesProvider, SeriesGroup, build_series};
use crate::summary::Summary;
use crate::surface::{self, Page};

/// What goes on one chart surface
#[derive(Debug, Clone)]
pub struct ChartSpec {
    pub surface: &'static str,
    /// `(display name, measurement name)` pairs, in colour order
    pub members: Vec<(&'static str, &'static str)>,
    pub colors: ColorScheme,
    pub value_format: ValueFormat,
}

/// The three forecast charts: temperatures, sky cover and precipitation amount
pub fn forecast_charts() -> Vec<ChartSpec> {
    vec![
        ChartSpec {
            surface: surface::TEMPERATURE_GRAPH,
            members: vec![("temperature", "temperature"), ("dew_point", "dew_point")],
            colors: ColorScheme::temperature(),
            value_format: ValueFormat::default(),
        },
        ChartSpec {
            surface: surface::PRECIPITATION_POTENTIAL,
            members: vec![
                ("cloud_amount", "cloud_amount"),
                ("precipitation_probability", "precipitation_probability"),
            ],
            colors: ColorScheme::sky_cover(),
            value_format: ValueFormat::default(),
        },
        ChartSpec {
            surface: surface::PRECIPITATION_AMOUNT,
            members: vec![("precipitation_amount", "qpf")],
            colors: ColorScheme::precipitation_amount(),
            value_format: ValueFormat::fixed(2),
        },
    ]
}

/// Result of a rendered page
#[derive(Debug, Clone)]
pub struct RenderOutcome {
    pub summary: Summary,
    /// The group drawn on the first chart, kept for callers that reuse it
    pub temperature: SeriesGroup,
    pub charts_rendered: usize,
}

/// Drives a forecast source through summary and charts onto a page
pub struct ForecastPipeline {
    source: Box<dyn ForecastSource>,
    config: GraphConfig,
    charts: Vec<ChartSpec>,
}

impl ForecastPipeline {
    pub fn new(source: Box<dyn ForecastSource>) -> Self {
        Self {
            source,
            config: GraphConfig::default(),
            charts: forecast_charts(),
        }
    }

    pub fn with_config(mut self, config: GraphConfig) -> Self {
        self.config = config;
        self
    }

    pub fn charts(&self) -> &[ChartSpec] {
        &self.charts
    }

    /// Fetches the document once and renders it onto `page`
    pub async fn run(&self, page: &mut Page) -> Result<RenderOutcome> {
        let document = self.source.fetch().await?;
        info!(
            "Forecast from {}: {} table rows",
            self.source.describe(),
            document.table.len()
        );
        render_document(&document, page, &self.charts, self.config)
    }
}

/// Renders an already retrieved document onto `page`
pub fn render_document(
    document: &ForecastDocument,
    page: &mut Page,
    charts: &[ChartSpec],
    config: GraphConfig,
) -> Result<RenderOutcome> {
    let summary = Summary::from_document(document)?;
    summary.render_into(page)?;

    let series = build_series(&document.table)?;
    let groups = render_charts(&series, page, charts, config)?;
    let charts_rendered = groups.len();

    Ok(RenderOutcome {
        summary,
        temperature: groups.into_iter().next().unwrap_or_default(),
        charts_rendered,
    })
}

/// Draws each chart from any series provider, returning the groups in chart
/// order
pub fn render_charts<P: NamedSeriesProvider>(
    series: &P,
    page: &mut Page,
    charts: &[ChartSpec],
    config: GraphConfig,
) -> Result<Vec<SeriesGroup>> {
    let mut groups = Vec::with_capacity(charts.len());
    for chart in charts {
        let group = series.group(&chart.members);
        let renderer = LineChart::new(chart.colors.clone())
            .with_config(config)
            .with_value_format(chart.value_format);
        renderer.render(&group, page.surface_mut(chart.surface)?)?;
        debug!("Rendered {} series onto '{}'", group.len(), chart.surface);
        groups.push(group);
    }
    Ok(groups)
}
