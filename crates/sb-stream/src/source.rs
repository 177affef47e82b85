//! Dataset sources replayed by the stream simulator.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use sb_core::{SensorReading, ensure_finite, parse_timestamp};
use tracing::{debug, warn};

use crate::csv::split_record;
use crate::error::{StreamError, StreamResult};

const TIMESTAMP_COLUMN: &str = "timestamp";
const SENSOR_ID_COLUMN: &str = "sensor_id";

/// Cell markers that mean "no reading", as common CSV readers treat them.
const MISSING_MARKERS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn is_missing(cell: &str) -> bool {
    cell.is_empty() || MISSING_MARKERS.contains(&cell)
}

/// How a metric cell reads.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Cell {
    Value(f64),
    /// Empty, a missing marker, or a non-finite number.
    Gap,
    Text,
}

fn classify(cell: &str) -> Cell {
    if is_missing(cell) {
        return Cell::Gap;
    }
    match cell.parse::<f64>() {
        Ok(v) => ensure_finite(v, "metric cell").map_or(Cell::Gap, Cell::Value),
        Err(_) => Cell::Text,
    }
}

/// A readable, enumerable set of sensor rows.
///
/// Implementations return rows ordered by timestamp; ties keep their
/// source order.
pub trait DatasetSource {
    fn load(&self) -> StreamResult<Vec<SensorReading>>;

    /// Short label for logs.
    fn describe(&self) -> String;
}

/// Every `*.csv` file in a folder, one sensor per file.
#[derive(Debug, Clone)]
pub struct CsvFolderSource {
    dir: PathBuf,
}

impl CsvFolderSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn csv_files(&self) -> StreamResult<Vec<PathBuf>> {
        if !self.dir.is_dir() {
            debug!(dir = %self.dir.display(), "sensor folder missing, dataset is empty");
            return Ok(Vec::new());
        }
        let mut files = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            let is_csv = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
            if path.is_file() && is_csv {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }
}

impl DatasetSource for CsvFolderSource {
    fn load(&self) -> StreamResult<Vec<SensorReading>> {
        let mut rows = Vec::new();
        for path in self.csv_files()? {
            rows.extend(load_csv_file(&path)?);
        }
        rows.sort_by_key(|r| r.timestamp);
        debug!(dir = %self.dir.display(), rows = rows.len(), "loaded sensor dataset");
        Ok(rows)
    }

    fn describe(&self) -> String {
        self.dir.display().to_string()
    }
}

/// Rows held in memory, replayed in timestamp order.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    rows: Vec<SensorReading>,
}

impl InMemorySource {
    pub fn new(rows: Vec<SensorReading>) -> Self {
        Self { rows }
    }
}

impl DatasetSource for InMemorySource {
    fn load(&self) -> StreamResult<Vec<SensorReading>> {
        let mut rows = self.rows.clone();
        rows.sort_by_key(|r| r.timestamp);
        Ok(rows)
    }

    fn describe(&self) -> String {
        format!("in-memory ({} rows)", self.rows.len())
    }
}

/// Parse one sensor export. The file stem becomes the sensor id.
///
/// Files without a `timestamp` column yield no rows. A metric column is
/// kept only when every cell is a number or a gap. Empty cells, markers
/// such as `NaN`, `NA` or `null`, and non-finite numbers are gaps on that
/// row.
pub fn load_csv_file(path: &Path) -> StreamResult<Vec<SensorReading>> {
    let content = fs::read_to_string(path)?;
    let sensor_id = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();

    let mut lines = content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());

    let Some((_, header_line)) = lines.next() else {
        return Ok(Vec::new());
    };
    let header = split_record(header_line.trim_start_matches('\u{feff}'));

    let Some(ts_idx) = header
        .iter()
        .position(|h| h.eq_ignore_ascii_case(TIMESTAMP_COLUMN))
    else {
        warn!(path = %path.display(), "no timestamp column, skipping file");
        return Ok(Vec::new());
    };

    let records: Vec<(usize, Vec<String>)> = lines
        .map(|(idx, line)| (idx + 1, split_record(line)))
        .collect();

    let metric_columns: Vec<(usize, &str)> = header
        .iter()
        .enumerate()
        .filter(|(idx, name)| {
            *idx != ts_idx && !name.is_empty() && !name.eq_ignore_ascii_case(SENSOR_ID_COLUMN)
        })
        .filter(|(idx, name)| {
            let numeric = records.iter().all(|(_, cells)| {
                cells
                    .get(*idx)
                    .is_none_or(|c| classify(c) != Cell::Text)
            });
            if !numeric {
                debug!(path = %path.display(), column = %name, "dropping non-numeric column");
            }
            numeric
        })
        .map(|(idx, name)| (idx, name.as_str()))
        .collect();

    let mut rows = Vec::with_capacity(records.len());
    for (line_no, cells) in &records {
        let raw_ts = cells.get(ts_idx).map(String::as_str).unwrap_or_default();
        let timestamp = parse_timestamp(raw_ts).map_err(|e| StreamError::Dataset {
            path: path.to_path_buf(),
            line: *line_no,
            message: e.to_string(),
        })?;

        let mut metrics = BTreeMap::new();
        for (idx, name) in &metric_columns {
            if let Some(Cell::Value(value)) = cells.get(*idx).map(|c| classify(c)) {
                metrics.insert((*name).to_string(), value);
            }
        }

        rows.push(SensorReading {
            timestamp,
            sensor_id: sensor_id.clone(),
            metrics,
        });
    }

    Ok(rows)
}
