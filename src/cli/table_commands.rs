use crate::forecast::{ForecastDocument, dwml};
use crate::settings::AppConfig;
use anyhow::{Context, Result};
use log::info;
use std::path::{Path, PathBuf};

/// Handles `table`: builds the hourly forecast table from DWML
pub struct TableCommandHandler {
    config: AppConfig,
}

impl TableCommandHandler {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub async fn handle_table(&self, input: Option<PathBuf>, output: Option<PathBuf>) -> Result<()> {
        let output = output.unwrap_or_else(|| self.config.table_output.clone());

        let table = match input {
            Some(path) => {
                let xml = tokio::fs::read_to_string(&path)
                    .await
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                dwml::parse_table(&xml)?
            }
            None => {
                let location = self.config.location()?;
                dwml::fetch_table(location.latitude, location.longitude).await?
            }
        };

        if table.is_empty() {
            println!("No hourly data found in the digital forecast.");
            return Ok(());
        }

        let count = table.len();
        write_document(&ForecastDocument { table, forecast: None }, &output).await?;
        info!("Wrote {count} hourly records");
        println!("Forecast table saved to: {}", output.display());
        Ok(())
    }
}

async fn write_document(document: &ForecastDocument, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(document)?;
    tokio::fs::write(path, json)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
