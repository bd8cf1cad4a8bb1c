use crate::forecast::source_from;
use crate::graphs::GraphConfig;
use crate::pipeline::ForecastPipeline;
use crate::settings::AppConfig;
use crate::summary::Summary;
use crate::surface::Page;
use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

/// Handles `render` and `summary`
pub struct RenderCommandHandler {
    config: AppConfig,
}

impl RenderCommandHandler {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub async fn handle_render(
        &self,
        source: Option<String>,
        output: Option<PathBuf>,
        width: Option<u32>,
        svg_dir: Option<PathBuf>,
    ) -> Result<()> {
        let location = source.unwrap_or_else(|| self.config.source.clone());
        let output = output.unwrap_or_else(|| self.config.output.clone());
        let width = width.unwrap_or(self.config.surface_width);

        let pipeline = ForecastPipeline::new(source_from(&location)?)
            .with_config(GraphConfig::default());
        let mut page = Page::forecast(width);

        let outcome = pipeline
            .run(&mut page)
            .await
            .with_context(|| format!("Failed to render forecast from {location}"))?;
        info!("Rendered {} charts", outcome.charts_rendered);

        page.write_to(&output)
            .with_context(|| format!("Failed to write {}", output.display()))?;
        println!("{}", outcome.summary.now_line());
        println!("{}", outcome.summary.predicted_line());
        println!("Forecast page saved to: {}", output.display());

        if let Some(dir) = svg_dir {
            let ids: Vec<&str> = pipeline.charts().iter().map(|c| c.surface).collect();
            page.write_svgs(&dir, &ids)?;
            println!("Chart SVGs saved to: {}", dir.display());
        }

        Ok(())
    }

    pub async fn handle_summary(&self, source: Option<String>) -> Result<()> {
        let location = source.unwrap_or_else(|| self.config.source.clone());
        let document = source_from(&location)?
            .fetch()
            .await
            .with_context(|| format!("Failed to fetch forecast from {location}"))?;
        let summary = Summary::from_document(&document)?;

        println!("Forecast Summary");
        println!("================");
        println!("{}", summary.now_line());
        println!("{}", summary.predicted_line());
        if !summary.detailed_forecast.is_empty() {
            println!("\n{}", summary.detailed_forecast);
        }
        Ok(())
    }
}
