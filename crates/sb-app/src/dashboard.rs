//! Dashboard refresh: one consistent view of the live frame.

use sb_analytics::{
    AnomalyRecord, DetectorOptions, FrameSummary, detect_anomalies, efficiency_tips,
    maintenance_recommendations, summarize, tail,
};
use sb_core::{SensorReading, Timestamp};
use sb_stream::StreamSnapshot;
use serde::Serialize;

/// Everything the dashboard shows for one refresh.
///
/// All fields derive from the same snapshot. An empty frame gives the
/// "waiting for data" view: no summary, anomalies, recommendations or tips.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub generation: u64,
    pub last_update: Option<Timestamp>,
    pub summary: Option<FrameSummary>,
    /// Most recent anomalies, oldest first.
    pub anomalies: Vec<AnomalyRecord>,
    pub anomaly_total: usize,
    pub recommendations: Vec<String>,
    pub tips: Vec<String>,
}

impl DashboardView {
    pub fn is_waiting(&self) -> bool {
        self.summary.is_none()
    }
}

pub fn refresh(snapshot: &StreamSnapshot, options: &DetectorOptions, tail_len: usize) -> DashboardView {
    let mut view = analyze_rows(snapshot.rows(), options, tail_len);
    view.generation = snapshot.generation;
    view
}

/// The dashboard view over an arbitrary frame, for offline analysis.
pub fn analyze_rows(rows: &[SensorReading], options: &DetectorOptions, tail_len: usize) -> DashboardView {
    let Some(summary) = summarize(rows) else {
        return DashboardView {
            generation: 0,
            last_update: None,
            summary: None,
            anomalies: Vec::new(),
            anomaly_total: 0,
            recommendations: Vec::new(),
            tips: Vec::new(),
        };
    };

    let anomalies = detect_anomalies(rows, options);
    let recommendations = maintenance_recommendations(&anomalies);

    DashboardView {
        generation: 0,
        last_update: Some(summary.last_timestamp),
        anomaly_total: anomalies.len(),
        anomalies: tail(&anomalies, tail_len).to_vec(),
        recommendations,
        tips: efficiency_tips(rows),
        summary: Some(summary),
    }
}
