use forecast_charts::forecast::{ForecastDocument, Record, parse_timestamp};
use forecast_charts::series::{
    Extent, NamedSeriesProvider, SeriesGroup, build_series, time_extent, value_extent,
};

/// Integration tests for the hourly table to series transform and its domains

fn week_of_records() -> Vec<Record> {
    (0..168)
        .map(|hour| {
            let time = format!("2024-07-{:02}T{:02}:00:00-05:00", 1 + hour / 24, hour % 24);
            let mut record = Record::new(time).with("temperature", 60.0 + (hour % 24) as f64);
            // dew point only every third hour, qpf null on odd hours
            if hour % 3 == 0 {
                record = record.with("dew_point", 50.0 + (hour % 7) as f64);
            }
            record.measurements.insert(
                "qpf".to_string(),
                (hour % 2 == 0).then_some(0.01 * (hour % 5) as f64),
            );
            record
        })
        .collect()
}

#[test]
fn test_series_length_matches_present_values() {
    let records = week_of_records();
    let series = build_series(&records).expect("table should build");

    for name in ["temperature", "dew_point", "qpf"] {
        let expected = records.iter().filter(|r| r.value(name).is_some()).count();
        let actual = series.series(name).map(|s| s.len()).unwrap_or(0);
        assert_eq!(actual, expected, "series length for {name}");
    }
    assert!(series.series("time").is_none(), "time is never a measurement");
}

#[test]
fn test_series_keep_table_order() {
    let series = build_series(&week_of_records()).unwrap();
    for (name, s) in series.iter() {
        let times: Vec<_> = s.points().iter().map(|p| p.time).collect();
        assert!(
            times.windows(2).all(|w| w[0] < w[1]),
            "{name} points out of order"
        );
    }
}

#[test]
fn test_build_is_idempotent() {
    let records = week_of_records();
    assert_eq!(build_series(&records).unwrap(), build_series(&records).unwrap());
}

#[test]
fn test_every_value_lies_within_group_extent() {
    let series = build_series(&week_of_records()).unwrap();
    let group = series.group(&[("temperature", "temperature"), ("dew_point", "dew_point")]);

    let Extent::Range(min, max) = value_extent(&group) else {
        panic!("value extent should not be empty");
    };
    let Extent::Range(start, end) = time_extent(&group) else {
        panic!("time extent should not be empty");
    };
    for (_, s) in group.iter() {
        for point in s.points() {
            assert!(min <= point.value && point.value <= max);
            assert!(start <= point.time && point.time <= end);
        }
    }
    assert_eq!((min, max), (50.0, 83.0));
}

#[test]
fn test_small_table_scenario() {
    let records = vec![
        Record::new("2024-01-01T00:00:00Z")
            .with("temperature", 32.0)
            .with("dew_point", 20.0),
        Record::new("2024-01-01T01:00:00Z").with("temperature", 34.0),
    ];
    let series = build_series(&records).unwrap();

    let temperature: Vec<f64> = series.series("temperature").unwrap().values().collect();
    assert_eq!(temperature, vec![32.0, 34.0]);
    let dew_point = series.series("dew_point").unwrap();
    assert_eq!(dew_point.len(), 1);
    assert_eq!(
        dew_point.points()[0].time,
        parse_timestamp("2024-01-01T00:00:00Z").unwrap()
    );

    let group = series.group(&[("temperature", "temperature"), ("dew_point", "dew_point")]);
    assert_eq!(value_extent(&group), Extent::Range(20.0, 34.0));
    assert_eq!(value_extent(&group).nice(10), Extent::Range(20.0, 34.0));
}

#[test]
fn test_empty_table_gives_empty_extents() {
    let document: ForecastDocument = serde_json::from_str(r#"{"table": []}"#).unwrap();
    let series = build_series(&document.table).unwrap();
    assert!(series.is_empty());

    let group = series.group(&[("temperature", "temperature")]);
    assert_eq!(group, SeriesGroup::new());
    assert!(time_extent(&group).is_empty());
    assert!(value_extent(&group).is_empty());
}

#[test]
fn test_bad_timestamp_reports_record_index() {
    let mut records = week_of_records();
    records[5].time = "yesterday".to_string();
    let err = build_series(&records).unwrap_err();
    assert!(err.to_string().contains("yesterday"));
}
