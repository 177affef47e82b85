//! Frame summaries and series extraction for display.

use sb_core::{SensorReading, Timestamp, metric_columns};
use serde::Serialize;

/// Shape of a frame: how many rows, from which sensors, over what span.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameSummary {
    pub row_count: usize,
    pub sensor_ids: Vec<String>,
    pub metrics: Vec<String>,
    pub first_timestamp: Timestamp,
    pub last_timestamp: Timestamp,
}

/// Summarize a frame, `None` when it is empty.
pub fn summarize(rows: &[SensorReading]) -> Option<FrameSummary> {
    let first = rows.first()?;
    let last = rows.last()?;

    let mut sensor_ids: Vec<String> = Vec::new();
    for row in rows {
        if !sensor_ids.contains(&row.sensor_id) {
            sensor_ids.push(row.sensor_id.clone());
        }
    }

    Some(FrameSummary {
        row_count: rows.len(),
        sensor_ids,
        metrics: metric_columns(rows),
        first_timestamp: first.timestamp,
        last_timestamp: last.timestamp,
    })
}

/// `(timestamp, value)` pairs for one metric, skipping rows without it.
pub fn metric_series(rows: &[SensorReading], metric: &str) -> Vec<(Timestamp, f64)> {
    rows.iter()
        .filter_map(|r| r.metric(metric).map(|v| (r.timestamp, v)))
        .collect()
}

/// The last `n` items.
pub fn tail<T>(items: &[T], n: usize) -> &[T] {
    &items[items.len().saturating_sub(n)..]
}

#[cfg(test)]
mod tests {
    use super::*;
    use sb_core::from_epoch_seconds;

    fn frame() -> Vec<SensorReading> {
        vec![
            SensorReading::new(from_epoch_seconds(0), "chiller_1").with_metric("temp", 6.0),
            SensorReading::new(from_epoch_seconds(1), "ahu_2").with_metric("kw", 4.0),
            SensorReading::new(from_epoch_seconds(2), "chiller_1").with_metric("temp", 6.5),
        ]
    }

    #[test]
    fn summary_of_empty_frame() {
        assert!(summarize(&[]).is_none());
    }

    #[test]
    fn summary_basic() {
        let s = summarize(&frame()).unwrap();
        assert_eq!(s.row_count, 3);
        assert_eq!(s.sensor_ids, vec!["chiller_1", "ahu_2"]);
        assert_eq!(s.metrics, vec!["temp", "kw"]);
        assert_eq!(s.first_timestamp, from_epoch_seconds(0));
        assert_eq!(s.last_timestamp, from_epoch_seconds(2));
    }

    #[test]
    fn series_skips_missing() {
        let series = metric_series(&frame(), "temp");
        assert_eq!(
            series,
            vec![(from_epoch_seconds(0), 6.0), (from_epoch_seconds(2), 6.5)]
        );
    }

    #[test]
    fn tail_bounds() {
        let v = [1, 2, 3, 4];
        assert_eq!(tail(&v, 2), &[3, 4]);
        assert_eq!(tail(&v, 10), &[1, 2, 3, 4]);
        assert!(tail(&v, 0).is_empty());
    }
}
