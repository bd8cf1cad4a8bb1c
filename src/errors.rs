//! Error types for forecast retrieval, reshaping and rendering
//!
//! Library code returns [`ForecastError`]; the CLI layer wraps it in `anyhow`.

use thiserror::Error;

/// Errors that can occur between fetching a forecast and writing the page
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Network retrieval failed or the server answered with an error status
    #[error("failed to fetch forecast: {0}")]
    Fetch(#[from] reqwest::Error),

    /// The forecast document is not valid JSON of the expected shape
    #[error("failed to decode forecast document: {0}")]
    Decode(#[from] serde_json::Error),

    /// I/O error while reading a local source or writing output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A record carries a time string that does not parse
    #[error("record {index}: unparseable timestamp '{value}'")]
    Timestamp { value: String, index: usize },

    /// The document lacks the fields the summary needs
    #[error("cannot build summary: {0}")]
    Summary(String),

    /// Chart drawing failed, or a surface does not exist
    #[error("render error: {0}")]
    Render(String),

    /// The NWS forecast table could not be parsed
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Configuration could not be loaded or is missing a required key
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<config::ConfigError> for ForecastError {
    fn from(e: config::ConfigError) -> Self {
        ForecastError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ForecastError>;
