use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Main CLI structure for the forecast-charts application
/// Uses clap's derive macros for automatic CLI generation
#[derive(Parser)]
#[command(version)] // Automatically uses version from Cargo.toml
#[command(about = "Weather forecast charts - render an hourly forecast as temperature, sky cover and precipitation charts")]
#[command(long_about = "Forecast Charts reads a forecast document (hourly table plus day/night periods), \
writes a short temperature summary and draws three time-series charts into a static HTML page. \
It can also build the hourly table from the NWS digital forecast for a configured location.")]
pub struct Cli {
    /// Configuration file (YAML, TOML or JSON); defaults to ./weather_config.*
    #[arg(short, long, global = true, help = "Configuration file path")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Fetch the forecast document and render the summary and charts to a page
    #[command(about = "Render the forecast page")]
    #[command(long_about = "Fetches the forecast document once, writes the summary into the \
temperature and weather-info regions and draws the temperature, precipitation potential and \
precipitation amount charts. The page is written as a single HTML file.\n\n\
Examples:\n  \
fc render                                      # Use ./forecast.json, write ./index.html\n  \
fc render --source https://host/forecast.json  # Fetch over HTTP\n  \
fc render --width 1000 --svg-dir charts        # Wider charts, also write each SVG")]
    Render {
        /// Forecast document URL or path
        #[arg(short, long, help = "Forecast document URL or file path")]
        source: Option<String>,

        /// Output HTML file
        #[arg(short, long, help = "Output HTML file path")]
        output: Option<PathBuf>,

        /// Width of every page region in pixels
        #[arg(short, long, help = "Surface width in pixels")]
        width: Option<u32>,

        /// Also write each chart as <dir>/<region>.svg
        #[arg(long, help = "Directory for standalone chart SVGs")]
        svg_dir: Option<PathBuf>,
    },

    /// Print the now/predicted temperature and the detailed forecast
    #[command(about = "Print the forecast summary")]
    Summary {
        /// Forecast document URL or path
        #[arg(short, long, help = "Forecast document URL or file path")]
        source: Option<String>,
    },

    /// Build the hourly forecast table from the NWS digital forecast
    #[command(about = "Generate forecast.json from the NWS digital forecast")]
    #[command(long_about = "Fetches the NWS digital (DWML) forecast for the configured \
location.latitude / location.longitude and writes its hourly table as a forecast document.\n\n\
Examples:\n  \
fc table                                 # Fetch for the configured location\n  \
fc table --input dwml.xml                # Parse a saved XML document instead\n  \
fc table --output public/forecast.json   # Choose the output file")]
    Table {
        /// Parse a local DWML file instead of fetching
        #[arg(short, long, value_name = "FORECAST_XML", help = "Local DWML XML file")]
        input: Option<PathBuf>,

        /// Output forecast document
        #[arg(short, long, value_name = "OUTPUT_JSON", help = "Output JSON file path")]
        output: Option<PathBuf>,
    },
}
