//! Worked example: a temperature ramp that ends in a spike.

use sb_analytics::{
    DetectorOptions, NO_ANOMALIES_MESSAGE, detect_anomalies, maintenance_recommendations,
};
use sb_core::{SensorReading, from_epoch_seconds};

/// `t = 0..=59` ramps 20, 21, ..., 79; `t = 60` jumps to 95.
fn ramp_then_spike() -> Vec<SensorReading> {
    (0..=60_i64)
        .map(|t| {
            let temp = if t == 60 { 95.0 } else { 20.0 + t as f64 };
            SensorReading::new(from_epoch_seconds(t), "chiller_1").with_metric("temp", temp)
        })
        .collect()
}

#[test]
fn late_spike_is_flagged_and_warm_up_is_not() {
    let opts = DetectorOptions::new(10, 3.0).unwrap();
    let found = detect_anomalies(&ramp_then_spike(), &opts);

    assert!(
        found
            .iter()
            .any(|a| a.timestamp == from_epoch_seconds(60) && a.metric == "temp"),
        "spike at t=60 should be flagged: {:?}",
        found
    );
    let warm_up = opts.min_periods() as i64;
    assert!(
        found
            .iter()
            .all(|a| a.timestamp >= from_epoch_seconds(warm_up))
    );
    // A steady ramp is not anomalous against its own trailing baseline.
    assert_eq!(found.len(), 1);
}

#[test]
fn spike_leads_to_cooling_advice() {
    let found = detect_anomalies(&ramp_then_spike(), &DetectorOptions::new(10, 3.0).unwrap());
    let recs = maintenance_recommendations(&found);
    assert_eq!(recs.len(), 1);
    assert!(recs[0].contains("cooling loops"));
}

#[test]
fn quiet_frame_leads_to_routine_message() {
    let rows: Vec<SensorReading> = (0..40_i64)
        .map(|t| SensorReading::new(from_epoch_seconds(t), "chiller_1").with_metric("temp", 7.0))
        .collect();
    let found = detect_anomalies(&rows, &DetectorOptions::default());
    assert!(found.is_empty());
    assert_eq!(
        maintenance_recommendations(&found),
        vec![NO_ANOMALIES_MESSAGE.to_string()]
    );
}
