use log::{debug, trace};

use crate::errors::{ForecastError, Result};
use crate::forecast::{Record, parse_timestamp};
use crate::series::SeriesSet;

/// Transposes forecast records into one series per measurement
///
/// Each record's time is parsed once and paired with every measurement the
/// record carries. A measurement missing from a record, or present as `null`,
/// contributes no point for that timestep, so series built from the same
/// records may differ in length. Points keep the order of their records.
///
/// A record with an unparseable time aborts the build.
pub fn build_series(records: &[Record]) -> Result<SeriesSet> {
    let mut set = SeriesSet::new();

    for (index, record) in records.iter().enumerate() {
        let time = parse_timestamp(&record.time).map_err(|_| ForecastError::Timestamp {
            value: record.time.clone(),
            index,
        })?;

        for (name, value) in &record.measurements {
            match value {
                Some(value) => set.push(name, time, *value),
                None => trace!("Record {index}: '{name}' is null, skipping"),
            }
        }
    }

    debug!(
        "Built {} series from {} records",
        set.len(),
        records.len()
    );
    Ok(set)
}
