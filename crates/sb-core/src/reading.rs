//! Sensor rows as they flow from a dataset into the stream state.

use std::collections::BTreeMap;

/// Wall-clock instant of a reading. Datasets carry no zone information.
pub type Timestamp = chrono::NaiveDateTime;

/// One row of sensor data: a timestamp, the sensor it came from, and the
/// numeric metrics present on that row.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SensorReading {
    pub timestamp: Timestamp,
    pub sensor_id: String,
    pub metrics: BTreeMap<String, f64>,
}

impl SensorReading {
    pub fn new(timestamp: Timestamp, sensor_id: impl Into<String>) -> Self {
        Self {
            timestamp,
            sensor_id: sensor_id.into(),
            metrics: BTreeMap::new(),
        }
    }

    /// Builder-style metric insertion.
    pub fn with_metric(mut self, name: impl Into<String>, value: f64) -> Self {
        self.metrics.insert(name.into(), value);
        self
    }

    pub fn metric(&self, name: &str) -> Option<f64> {
        self.metrics.get(name).copied()
    }
}

/// Metric names across `rows` in first-seen order.
///
/// Within one row names come out in map order, so two files with the same
/// header produce the same column order.
pub fn metric_columns(rows: &[SensorReading]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for row in rows {
        for name in row.metrics.keys() {
            if !columns.iter().any(|c| c == name) {
                columns.push(name.clone());
            }
        }
    }
    columns
}
