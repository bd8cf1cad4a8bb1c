//! Textual forecast summary
//!
//! "Now" is the first table record, i.e. the upcoming hour, which is close to
//! the current temperature. The current period is the first day/night period;
//! it covers the whole time the sun is up or down and its temperature is the
//! predicted high or low.

use log::debug;

use crate::errors::{ForecastError, Result};
use crate::forecast::ForecastDocument;
use crate::surface::{self, Page, escape_html};

/// The summary lines derived from one forecast document
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub now_temperature: f64,
    pub predicted_temperature: f64,
    pub temperature_unit: String,
    pub detailed_forecast: String,
}

impl Summary {
    pub fn from_document(document: &ForecastDocument) -> Result<Self> {
        let now = document
            .now()
            .ok_or_else(|| ForecastError::Summary("forecast table is empty".to_string()))?;
        let now_temperature = now.value("temperature").ok_or_else(|| {
            ForecastError::Summary(format!("no temperature for {}", now.time))
        })?;
        let period = document
            .current_period()
            .ok_or_else(|| ForecastError::Summary("no forecast periods".to_string()))?;

        Ok(Self {
            now_temperature,
            predicted_temperature: period.temperature,
            temperature_unit: period.temperature_unit.clone(),
            detailed_forecast: period.detailed_forecast.clone(),
        })
    }

    pub fn now_line(&self) -> String {
        format!("Now: {} °{}", self.now_temperature, self.temperature_unit)
    }

    pub fn predicted_line(&self) -> String {
        format!(
            "Predicted: {} °{}",
            self.predicted_temperature, self.temperature_unit
        )
    }

    /// Replaces the content of the temperature and weather-info surfaces
    pub fn render_into(&self, page: &mut Page) -> Result<()> {
        let temperature = format!(
            "<h1>{}</h1><h1>{}</h1>",
            escape_html(&self.now_line()),
            escape_html(&self.predicted_line())
        );
        page.surface_mut(surface::TEMPERATURE)?.set_html(temperature);

        let info = format!("<h2>{}</h2>", escape_html(&self.detailed_forecast));
        page.surface_mut(surface::WEATHER_INFO)?.set_html(info);

        debug!("Summary written: {} / {}", self.now_line(), self.predicted_line());
        Ok(())
    }
}
