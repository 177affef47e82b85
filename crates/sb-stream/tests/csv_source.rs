//! CSV folder loading tests.

use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use sb_core::parse_timestamp;
use sb_stream::{CsvFolderSource, DatasetSource, StreamError, load_csv_file};

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    dir.push(format!("{}_{}", prefix, nanos));
    fs::create_dir_all(&dir).expect("failed to create temp dir");
    dir
}

#[test]
fn merges_files_sorted_by_timestamp() {
    let dir = unique_temp_dir("sb_stream_merge");
    fs::write(
        dir.join("chiller_1.csv"),
        "timestamp,supply_temp,power_kw\n\
         2024-01-01 00:00:00,6.5,120.0\n\
         2024-01-01 00:02:00,6.7,121.5\n",
    )
    .unwrap();
    fs::write(
        dir.join("ahu_2.csv"),
        "timestamp,fan_vibration\n\
         2024-01-01 00:01:00,0.12\n",
    )
    .unwrap();
    fs::write(dir.join("notes.txt"), "not a dataset").unwrap();

    let rows = CsvFolderSource::new(&dir).load().expect("load should succeed");
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].sensor_id, "chiller_1");
    assert_eq!(rows[1].sensor_id, "ahu_2");
    assert_eq!(rows[2].sensor_id, "chiller_1");
    assert_eq!(rows[1].metric("fan_vibration"), Some(0.12));
    assert_eq!(rows[1].metric("supply_temp"), None);
    assert_eq!(
        rows[2].timestamp,
        parse_timestamp("2024-01-01 00:02:00").unwrap()
    );

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn empty_folder_is_empty_dataset() {
    let dir = unique_temp_dir("sb_stream_empty");
    assert!(CsvFolderSource::new(&dir).load().unwrap().is_empty());
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn drops_non_numeric_columns_and_keeps_gaps() {
    let dir = unique_temp_dir("sb_stream_columns");
    let path = dir.join("pump_3.csv");
    fs::write(
        &path,
        "timestamp,status,flow_gpm,sensor_id\n\
         0,ok,410.0,ignored\n\
         1,fault,,ignored\n\
         2,ok,415.5,ignored\n",
    )
    .unwrap();

    let rows = load_csv_file(&path).expect("load should succeed");
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| r.sensor_id == "pump_3"));
    assert!(rows.iter().all(|r| !r.metrics.contains_key("status")));
    assert_eq!(rows[0].metric("flow_gpm"), Some(410.0));
    assert_eq!(rows[1].metric("flow_gpm"), None);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn missing_markers_are_gaps_not_text() {
    let dir = unique_temp_dir("sb_stream_nan_cells");
    let path = dir.join("chiller_1.csv");
    fs::write(
        &path,
        "timestamp,Chiller_Temp_1,kw\n\
         0,6.5,NA\n\
         1,NaN,120.0\n\
         2,6.7,null\n\
         3,inf,N/A\n",
    )
    .unwrap();

    let rows = load_csv_file(&path).expect("load should succeed");
    let temps: Vec<Option<f64>> = rows.iter().map(|r| r.metric("Chiller_Temp_1")).collect();
    assert_eq!(temps, vec![Some(6.5), None, Some(6.7), None]);
    let kw: Vec<Option<f64>> = rows.iter().map(|r| r.metric("kw")).collect();
    assert_eq!(kw, vec![None, Some(120.0), None, None]);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn file_without_timestamp_is_skipped() {
    let dir = unique_temp_dir("sb_stream_no_ts");
    let path = dir.join("meter.csv");
    fs::write(&path, "time,kw\n0,1.0\n").unwrap();
    assert!(load_csv_file(&path).unwrap().is_empty());
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn bad_timestamp_reports_line() {
    let dir = unique_temp_dir("sb_stream_bad_ts");
    let path = dir.join("meter.csv");
    fs::write(&path, "timestamp,kw\n0,1.0\nsoon,2.0\n").unwrap();
    match load_csv_file(&path) {
        Err(StreamError::Dataset { line, .. }) => assert_eq!(line, 3),
        other => panic!("expected dataset error, got {:?}", other),
    }
    let _ = fs::remove_dir_all(&dir);
}
