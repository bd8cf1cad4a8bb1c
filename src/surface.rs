//! Rendering surfaces
//!
//! A [`Page`] is a fixed set of named display regions. Renderers look a region
//! up by id and either replace its markup (text summaries) or append to it
//! (charts). The finished page is written out as one standalone HTML file.

use log::{debug, info};
use std::fs;
use std::path::Path;

use crate::errors::{ForecastError, Result};

pub const TEMPERATURE: &str = "temperature";
pub const WEATHER_INFO: &str = "weather-info";
pub const TEMPERATURE_GRAPH: &str = "temperature-graph";
pub const PRECIPITATION_POTENTIAL: &str = "precipitation-potential";
pub const PRECIPITATION_AMOUNT: &str = "precipitation-amount";

/// Surfaces of the forecast page, in display order
pub const FORECAST_SURFACES: [&str; 5] = [
    TEMPERATURE,
    WEATHER_INFO,
    TEMPERATURE_GRAPH,
    PRECIPITATION_POTENTIAL,
    PRECIPITATION_AMOUNT,
];

pub const DEFAULT_CLIENT_WIDTH: u32 = 800;

/// One named display region
#[derive(Debug, Clone)]
pub struct Surface {
    id: String,
    client_width: u32,
    content: String,
}

impl Surface {
    pub fn new(id: impl Into<String>, client_width: u32) -> Self {
        Self {
            id: id.into(),
            client_width,
            content: String::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Width available to the region's content, in pixels
    pub fn client_width(&self) -> u32 {
        self.client_width
    }

    /// Replaces the region's markup
    pub fn set_html(&mut self, html: impl Into<String>) {
        self.content = html.into();
    }

    /// Appends markup after whatever the region already holds
    pub fn append(&mut self, fragment: &str) {
        self.content.push_str(fragment);
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// The page hosting every surface
#[derive(Debug, Clone)]
pub struct Page {
    title: String,
    surfaces: Vec<Surface>,
}

impl Page {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            surfaces: Vec::new(),
        }
    }

    /// A page with the five forecast surfaces, all `client_width` wide
    pub fn forecast(client_width: u32) -> Self {
        let mut page = Self::new("Forecast");
        for id in FORECAST_SURFACES {
            page.add_surface(Surface::new(id, client_width));
        }
        page
    }

    pub fn add_surface(&mut self, surface: Surface) {
        self.surfaces.push(surface);
    }

    pub fn surface(&self, id: &str) -> Option<&Surface> {
        self.surfaces.iter().find(|s| s.id == id)
    }

    pub fn surface_mut(&mut self, id: &str) -> Result<&mut Surface> {
        self.surfaces
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| ForecastError::Render(format!("no surface with id '{id}'")))
    }

    pub fn surfaces(&self) -> &[Surface] {
        &self.surfaces
    }

    /// Standalone HTML document with one `<div>` per surface
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
        html.push_str(&format!("<title>{}</title>\n", escape_html(&self.title)));
        html.push_str("</head>\n<body>\n");
        for surface in &self.surfaces {
            html.push_str(&format!(
                "<div id=\"{}\">{}</div>\n",
                escape_html(&surface.id),
                surface.content
            ));
        }
        html.push_str("</body>\n</html>\n");
        html
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_html())?;
        info!("Page written to {}", path.display());
        Ok(())
    }

    /// Writes every non-empty surface in `ids` to `<dir>/<id>.svg`
    pub fn write_svgs(&self, dir: &Path, ids: &[&str]) -> Result<()> {
        fs::create_dir_all(dir)?;
        for id in ids {
            if let Some(surface) = self.surface(id).filter(|s| !s.is_empty()) {
                let path = dir.join(format!("{id}.svg"));
                fs::write(&path, surface.content())?;
                debug!("Surface '{id}' written to {}", path.display());
            }
        }
        Ok(())
    }
}

/// Escapes text for inclusion in HTML element content or attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
