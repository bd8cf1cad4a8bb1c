use async_trait::async_trait;
use log::{debug, info};
use std::path::PathBuf;

use crate::errors::Result;
use crate::forecast::ForecastDocument;

const USER_AGENT: &str = concat!("forecast-charts/", env!("CARGO_PKG_VERSION"));

/// Somewhere a forecast document can be retrieved from
///
/// Retrieval happens exactly once per call: there is no retry and no timeout,
/// a failure is returned to the caller as is.
#[async_trait]
pub trait ForecastSource: Send + Sync {
    async fn fetch(&self) -> Result<ForecastDocument>;

    /// Human readable location, used in log lines
    fn describe(&self) -> String;
}

/// Retrieves the document with an HTTP GET
pub struct HttpSource {
    client: reqwest::Client,
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl ForecastSource for HttpSource {
    async fn fetch(&self) -> Result<ForecastDocument> {
        info!("Fetching forecast document from {}", self.url);
        let body = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        debug!("Received {} bytes from {}", body.len(), self.url);
        Ok(serde_json::from_str(&body)?)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Reads the document from the local filesystem
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ForecastSource for FileSource {
    async fn fetch(&self) -> Result<ForecastDocument> {
        info!("Reading forecast document from {}", self.path.display());
        let body = tokio::fs::read_to_string(&self.path).await?;
        Ok(serde_json::from_str(&body)?)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Picks an HTTP source for `http://` and `https://` locations and a file
/// source for anything else
pub fn source_from(location: &str) -> Result<Box<dyn ForecastSource>> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Ok(Box::new(HttpSource::new(location)?))
    } else {
        Ok(Box::new(FileSource::new(location)))
    }
}
