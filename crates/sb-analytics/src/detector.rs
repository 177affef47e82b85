//! Rolling z-score anomaly detection.
//!
//! Each metric column is scored independently. A sample is compared with
//! the trailing window of samples that precede it; the sample itself is not
//! part of its own baseline, so a single spike is not diluted by itself.

use sb_core::{SensorReading, Timestamp, mean, metric_columns, sample_std, z_score};
use serde::{Deserialize, Serialize};

use crate::error::{AnalyticsError, AnalyticsResult};

pub const DEFAULT_WINDOW: usize = 50;
pub const DEFAULT_Z_THRESHOLD: f64 = 3.0;

/// Detector configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectorOptions {
    /// Number of trailing samples in the baseline.
    pub window: usize,
    /// Flag when `|z|` is strictly greater than this.
    pub z_threshold: f64,
}

impl Default for DetectorOptions {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            z_threshold: DEFAULT_Z_THRESHOLD,
        }
    }
}

impl DetectorOptions {
    pub fn new(window: usize, z_threshold: f64) -> AnalyticsResult<Self> {
        let opts = Self {
            window,
            z_threshold,
        };
        opts.validate()?;
        Ok(opts)
    }

    pub fn validate(&self) -> AnalyticsResult<()> {
        if self.window < 2 {
            return Err(AnalyticsError::InvalidArg {
                what: "window must be at least 2",
            });
        }
        if !self.z_threshold.is_finite() || self.z_threshold <= 0.0 {
            return Err(AnalyticsError::InvalidArg {
                what: "z_threshold must be finite and positive",
            });
        }
        Ok(())
    }

    /// Baseline samples required before any score is emitted.
    pub fn min_periods(&self) -> usize {
        (self.window / 2).max(2)
    }
}

/// One flagged sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyRecord {
    pub timestamp: Timestamp,
    pub sensor_id: String,
    pub metric: String,
    pub z: f64,
}

/// Flag every sample whose rolling z-score exceeds the threshold.
///
/// Output is ordered by timestamp; samples sharing a timestamp keep metric
/// column order, then row order. Empty input or rows without metrics give
/// an empty result.
pub fn detect_anomalies(rows: &[SensorReading], opts: &DetectorOptions) -> Vec<AnomalyRecord> {
    let mut flagged = Vec::new();

    for metric in metric_columns(rows) {
        let series: Vec<Option<f64>> = rows
            .iter()
            .map(|r| r.metric(&metric).filter(|v| v.is_finite()))
            .collect();

        for (idx, z) in rolling_z_scores(&series, opts.window, opts.min_periods()) {
            if z.abs() > opts.z_threshold {
                let row = &rows[idx];
                flagged.push(AnomalyRecord {
                    timestamp: row.timestamp,
                    sensor_id: row.sensor_id.clone(),
                    metric: metric.clone(),
                    z,
                });
            }
        }
    }

    flagged.sort_by_key(|a| a.timestamp);
    flagged
}

/// Z-score of each present sample against the `window` rows before it.
///
/// Missing samples are skipped, both as candidates and inside baselines.
/// A score is produced only when the baseline holds at least `min_periods`
/// values. Returns `(row index, z)` pairs in row order.
pub fn rolling_z_scores(
    series: &[Option<f64>],
    window: usize,
    min_periods: usize,
) -> Vec<(usize, f64)> {
    let window = window.max(1);
    let min_periods = min_periods.max(2);
    let mut scores = Vec::new();
    let mut baseline: Vec<f64> = Vec::with_capacity(window);

    for (idx, value) in series.iter().enumerate() {
        let Some(x) = *value else {
            continue;
        };

        baseline.clear();
        baseline.extend(series[idx.saturating_sub(window)..idx].iter().flatten());
        if baseline.len() < min_periods {
            continue;
        }

        if let (Some(m), Some(s)) = (mean(&baseline), sample_std(&baseline)) {
            scores.push((idx, z_score(x, m, s)));
        }
    }

    scores
}

#[cfg(test)]
mod tests {
    use super::*;
    use sb_core::from_epoch_seconds;

    fn rows(values: &[f64]) -> Vec<SensorReading> {
        values
            .iter()
            .enumerate()
            .map(|(t, v)| {
                SensorReading::new(from_epoch_seconds(t as i64), "s").with_metric("temp", *v)
            })
            .collect()
    }

    #[test]
    fn defaults() {
        let opts = DetectorOptions::default();
        assert_eq!(opts.window, 50);
        assert_eq!(opts.z_threshold, 3.0);
        assert_eq!(opts.min_periods(), 25);
    }

    #[test]
    fn min_periods_floor_is_two() {
        assert_eq!(DetectorOptions::new(2, 3.0).unwrap().min_periods(), 2);
        assert_eq!(DetectorOptions::new(3, 3.0).unwrap().min_periods(), 2);
        assert_eq!(DetectorOptions::new(10, 3.0).unwrap().min_periods(), 5);
    }

    #[test]
    fn invalid_options() {
        assert!(DetectorOptions::new(1, 3.0).is_err());
        assert!(DetectorOptions::new(10, 0.0).is_err());
        assert!(DetectorOptions::new(10, f64::NAN).is_err());
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(detect_anomalies(&[], &DetectorOptions::default()).is_empty());
    }

    #[test]
    fn rows_without_metrics_give_empty_output() {
        let rows = vec![SensorReading::new(from_epoch_seconds(0), "s")];
        assert!(detect_anomalies(&rows, &DetectorOptions::default()).is_empty());
    }

    #[test]
    fn baseline_excludes_current_sample() {
        let series = [Some(1.0), Some(1.0), Some(3.0)];
        let scores = rolling_z_scores(&series, 2, 2);
        assert_eq!(scores.len(), 1);
        let (idx, z) = scores[0];
        assert_eq!(idx, 2);
        // zero-variance baseline, guarded by epsilon
        assert!((z - 2.0 / 1e-6).abs() < 1.0);
    }

    #[test]
    fn missing_values_are_skipped() {
        let series = [Some(1.0), None, Some(2.0), None, Some(3.0)];
        let scores = rolling_z_scores(&series, 4, 2);
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].0, 4);
    }

    #[test]
    fn spike_after_stable_baseline_is_flagged() {
        let mut values: Vec<f64> = (0..30).map(|i| 20.0 + (i % 2) as f64).collect();
        values.push(60.0);
        let found = detect_anomalies(&rows(&values), &DetectorOptions::new(10, 3.0).unwrap());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].timestamp, from_epoch_seconds(30));
        assert_eq!(found[0].metric, "temp");
        assert!(found[0].z > 3.0);
    }

    #[test]
    fn negative_spikes_are_flagged() {
        let mut values: Vec<f64> = (0..30).map(|i| 20.0 + (i % 2) as f64).collect();
        values.push(-10.0);
        let found = detect_anomalies(&rows(&values), &DetectorOptions::new(10, 3.0).unwrap());
        assert_eq!(found.len(), 1);
        assert!(found[0].z < -3.0);
    }

    #[test]
    fn output_is_ordered_by_timestamp_across_metrics() {
        let mut data = Vec::new();
        for t in 0..30_i64 {
            let wobble = (t % 2) as f64;
            let temp = if t == 25 { 90.0 } else { 20.0 + wobble };
            let kw = if t == 20 { 500.0 } else { 100.0 + wobble };
            data.push(
                SensorReading::new(from_epoch_seconds(t), "s")
                    .with_metric("temp", temp)
                    .with_metric("kw", kw),
            );
        }
        let found = detect_anomalies(&data, &DetectorOptions::new(8, 3.0).unwrap());
        let flagged: Vec<(i64, &str)> = found
            .iter()
            .map(|a| (a.timestamp.and_utc().timestamp(), a.metric.as_str()))
            .collect();
        assert_eq!(flagged.first(), Some(&(20, "kw")));
        assert!(flagged.contains(&(25, "temp")));
        assert!(found.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    }
}
