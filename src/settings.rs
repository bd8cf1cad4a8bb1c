//! Application configuration
//!
//! Values are layered, later sources overriding earlier ones:
//!
//! 1. built-in defaults
//! 2. `weather_config.{yaml,toml,json}` in the working directory, or the file
//!    given with `--config`
//! 3. `FC_`-prefixed environment variables, with `__` separating nested keys
//!    (`FC_LOCATION__LATITUDE=39.74`)
//!
//! Command line flags override the loaded values.

use config::{Config, Environment, File};
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::errors::{ForecastError, Result};
use crate::surface::DEFAULT_CLIENT_WIDTH;

const DEFAULT_CONFIG_NAME: &str = "weather_config";
const ENV_PREFIX: &str = "FC";

#[derive(Debug, Clone, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// URL or path of the forecast document
    pub source: String,
    /// Where the rendered page is written
    pub output: PathBuf,
    /// Client width of every page surface, in pixels
    pub surface_width: u32,
    /// Where `table` writes the generated forecast document
    pub table_output: PathBuf,
    /// Point the NWS table is fetched for
    #[serde(default)]
    pub location: Option<Location>,
}

impl AppConfig {
    /// Loads configuration from defaults, an optional file and the environment
    ///
    /// An explicitly named file must exist; the default one is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_environment(path, environment())
    }

    fn load_with_environment(path: Option<&Path>, environment: Environment) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("source", "./forecast.json")?
            .set_default("output", "./index.html")?
            .set_default("surface_width", i64::from(DEFAULT_CLIENT_WIDTH))?
            .set_default("table_output", "./forecast.json")?;

        builder = match path {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder.add_source(File::with_name(DEFAULT_CONFIG_NAME).required(false)),
        };

        let config: AppConfig = builder
            .add_source(environment)
            .build()?
            .try_deserialize()?;

        debug!("Loaded configuration: {config:?}");
        Ok(config)
    }

    /// The configured location, required for fetching the NWS table
    pub fn location(&self) -> Result<&Location> {
        self.location.as_ref().ok_or_else(|| {
            ForecastError::Config("missing location.latitude / location.longitude".to_string())
        })
    }
}

/// `FC_SURFACE_WIDTH`, `FC_LOCATION__LATITUDE`, ...
fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}
