//! NWS digital forecast (DWML) table builder
//!
//! forecast.weather.gov publishes an hourly "digital DWML" XML forecast for a
//! point. The columns of interest are laid out as parallel arrays of `<value>`
//! elements under one parent element per parameter, plus a single list of
//! `<start-valid-time>` elements. This module zips those columns into the
//! per-timestep [`Record`]s of the forecast document's `table` section.

use log::{debug, info, warn};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::errors::{ForecastError, Result};
use crate::forecast::Record;

const NWS_FORECAST_TABLE_URL: &str = "https://forecast.weather.gov/MapClick.php";

/// Parameter columns extracted from the DWML document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Temperature,
    DewPoint,
    CloudAmount,
    PrecipitationProbability,
    Qpf,
}

impl Column {
    /// Output measurement name
    fn measurement(self) -> &'static str {
        match self {
            Column::Temperature => "temperature",
            Column::DewPoint => "dew_point",
            Column::CloudAmount => "cloud_amount",
            Column::PrecipitationProbability => "precipitation_probability",
            Column::Qpf => "qpf",
        }
    }

    /// Quantitative precipitation is fractional inches; everything else is whole units
    fn parse(self, text: &str) -> Option<f64> {
        let text = text.trim();
        match self {
            Column::Qpf => text.parse::<f64>().ok(),
            _ => text.parse::<i64>().ok().map(|v| v as f64),
        }
    }

    const ALL: [Column; 5] = [
        Column::Temperature,
        Column::DewPoint,
        Column::CloudAmount,
        Column::PrecipitationProbability,
        Column::Qpf,
    ];
}

/// Which text node the reader is positioned in
#[derive(Debug, Clone, Copy)]
enum Capture {
    ValidTime,
    Value(Column),
}

/// Columnar contents of a DWML document
#[derive(Debug, Default)]
struct Columns {
    valid_times: Vec<String>,
    temperature: Vec<Option<f64>>,
    dew_point: Vec<Option<f64>>,
    cloud_amount: Vec<Option<f64>>,
    precipitation_probability: Vec<Option<f64>>,
    qpf: Vec<Option<f64>>,
}

impl Columns {
    fn column_mut(&mut self, column: Column) -> &mut Vec<Option<f64>> {
        match column {
            Column::Temperature => &mut self.temperature,
            Column::DewPoint => &mut self.dew_point,
            Column::CloudAmount => &mut self.cloud_amount,
            Column::PrecipitationProbability => &mut self.precipitation_probability,
            Column::Qpf => &mut self.qpf,
        }
    }

    fn column(&self, column: Column) -> &[Option<f64>] {
        match column {
            Column::Temperature => &self.temperature,
            Column::DewPoint => &self.dew_point,
            Column::CloudAmount => &self.cloud_amount,
            Column::PrecipitationProbability => &self.precipitation_probability,
            Column::Qpf => &self.qpf,
        }
    }

    /// Zips all columns into records, stopping at the shortest one
    fn into_records(self) -> Vec<Record> {
        let rows = Column::ALL
            .iter()
            .map(|c| self.column(*c).len())
            .fold(self.valid_times.len(), usize::min);

        if Column::ALL
            .iter()
            .any(|c| self.column(*c).len() != self.valid_times.len())
        {
            warn!(
                "DWML columns differ in length, truncating to {} rows (times={})",
                rows,
                self.valid_times.len()
            );
        }

        (0..rows)
            .map(|row| {
                let mut record = Record::new(self.valid_times[row].clone());
                for column in Column::ALL {
                    record
                        .measurements
                        .insert(column.measurement().to_string(), self.column(column)[row]);
                }
                record
            })
            .collect()
    }
}

/// Builds the request URL for the digital forecast at a point
pub fn table_url(latitude: f64, longitude: f64) -> String {
    format!("{NWS_FORECAST_TABLE_URL}?lat={latitude}&lon={longitude}&FcstType=digitalDWML")
}

/// Fetches and parses the hourly table for a point
pub async fn fetch_table(latitude: f64, longitude: f64) -> Result<Vec<Record>> {
    let url = table_url(latitude, longitude);
    info!("Fetching NWS digital forecast from {url}");

    let client = reqwest::Client::builder()
        .user_agent(concat!("forecast-charts/", env!("CARGO_PKG_VERSION")))
        .build()?;
    let xml = client
        .get(&url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    parse_table(&xml)
}

/// Parses a DWML document into hourly records
///
/// Values that are empty (`xsi:nil`) or not numeric become `None`.
pub fn parse_table(xml: &str) -> Result<Vec<Record>> {
    let mut reader = Reader::from_reader(xml.as_bytes());
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut columns = Columns::default();
    let mut parent: Option<Column> = None;
    let mut capture: Option<Capture> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"start-valid-time" => capture = Some(Capture::ValidTime),
                b"value" => {
                    if let Some(column) = parent {
                        capture = Some(Capture::Value(column));
                    }
                }
                _ => {
                    if let Some(column) = parameter_column(e)? {
                        parent = Some(column);
                    }
                }
            },
            Ok(Event::Empty(ref e)) => {
                // <value xsi:nil="true"/>
                if e.local_name().as_ref() == b"value" {
                    if let Some(column) = parent {
                        columns.column_mut(column).push(None);
                    }
                }
            }
            Ok(Event::Text(ref t)) => {
                let text = t.unescape()?;
                match capture.take() {
                    Some(Capture::ValidTime) => columns.valid_times.push(text.trim().to_string()),
                    Some(Capture::Value(column)) => {
                        let value = column.parse(&text);
                        if value.is_none() {
                            debug!("Unparseable {} value '{}'", column.measurement(), text);
                        }
                        columns.column_mut(column).push(value);
                    }
                    None => {}
                }
            }
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                // A <value></value> pair with no text in between
                b"value" => {
                    if let Some(Capture::Value(column)) = capture.take() {
                        columns.column_mut(column).push(None);
                    }
                }
                b"start-valid-time" => capture = None,
                b"temperature"
                | b"cloud-amount"
                | b"probability-of-precipitation"
                | b"hourly-qpf" => parent = None,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(ForecastError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    let records = columns.into_records();
    debug!("Parsed {} forecast table rows", records.len());
    Ok(records)
}

/// Maps a parameter element to the column its `<value>` children fill
fn parameter_column(e: &BytesStart) -> Result<Option<Column>> {
    let column = match e.local_name().as_ref() {
        b"temperature" => match get_attribute(e, "type")?.as_deref() {
            Some("hourly") => Some(Column::Temperature),
            Some("dew point") => Some(Column::DewPoint),
            _ => None,
        },
        b"cloud-amount" => Some(Column::CloudAmount),
        b"probability-of-precipitation" => Some(Column::PrecipitationProbability),
        b"hourly-qpf" => Some(Column::Qpf),
        _ => None,
    };
    Ok(column)
}

fn get_attribute(e: &BytesStart, name: &str) -> Result<Option<String>> {
    for attr in e.attributes() {
        let attr = attr.map_err(|e| ForecastError::Xml(quick_xml::Error::from(e)))?;
        if attr.key.as_ref() == name.as_bytes() {
            let value = String::from_utf8_lossy(&attr.value).into_owned();
            return Ok(Some(value));
        }
    }
    Ok(None)
}
