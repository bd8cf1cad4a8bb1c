//! Forecast charts
//!
//! Turns a forecast document (an hourly `table` plus day/night `forecast`
//! periods) into a temperature summary and three time-series line charts
//! rendered as SVG into a static HTML page.

pub mod cli;
pub mod errors;
pub mod forecast;
pub mod graphs;
pub mod pipeline;
pub mod series;
pub mod settings;
pub mod summary;
pub mod surface;

pub use errors::{ForecastError, Result};
pub use pipeline::{ForecastPipeline, RenderOutcome};
