//! Query helpers for extracting data from a sensor frame.

use sb_core::{SensorReading, Timestamp, metric_columns};

use crate::error::{AppError, AppResult};

/// Time series for one metric column.
pub fn extract_metric_series(
    rows: &[SensorReading],
    metric: &str,
) -> AppResult<Vec<(Timestamp, f64)>> {
    if !metric_columns(rows).iter().any(|m| m == metric) {
        return Err(AppError::InvalidInput(format!(
            "Unknown metric: {}",
            metric
        )));
    }
    Ok(sb_analytics::metric_series(rows, metric))
}

/// Two-column CSV: `timestamp,<metric>`.
pub fn series_to_csv(metric: &str, series: &[(Timestamp, f64)]) -> String {
    let mut csv = format!("timestamp,{}\n", metric);
    for (ts, value) in series {
        csv.push_str(&format!("{},{}\n", ts.format("%Y-%m-%dT%H:%M:%S%.f"), value));
    }
    csv
}
