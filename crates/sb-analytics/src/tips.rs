//! Energy-efficiency tips from the metric columns present in a frame.

use sb_core::{SensorReading, metric_columns};

use crate::rules::KeywordRule;

pub const EFFICIENCY_RULES: &[KeywordRule] = &[
    KeywordRule::new(
        &["kw", "power"],
        "Consider optimizing setpoints during low occupancy to reduce kW draw.",
    ),
    KeywordRule::new(&["temp"], "Tighten temperature deadbands to avoid short cycling."),
];

pub const ALWAYS_TIP: &str =
    "Review AHU schedules to align with occupancy and reduce after-hours runtime.";

/// Tips for a frame. An empty frame has no tips.
pub fn efficiency_tips(rows: &[SensorReading]) -> Vec<String> {
    if rows.is_empty() {
        return Vec::new();
    }

    let columns = metric_columns(rows);
    let mut tips: Vec<String> = EFFICIENCY_RULES
        .iter()
        .filter(|rule| columns.iter().any(|c| rule.matches(c)))
        .map(|rule| rule.template.to_string())
        .collect();
    tips.push(ALWAYS_TIP.to_string());
    tips
}
