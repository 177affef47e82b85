//! Anomaly detection and maintenance advice over sensor snapshots.
//!
//! Everything here is a pure function of a snapshot: the stream state is
//! copied before analysis, so concurrent appends never affect a result.
//!
//! - `detector`: rolling z-scores per metric column
//! - `rules`: ordered keyword rule tables shared by advice and tips
//! - `recommend`: one maintenance recommendation per anomalous metric
//! - `tips`: efficiency tips from column-name heuristics
//! - `summary`: frame summaries and per-metric series for display

pub mod detector;
pub mod error;
pub mod recommend;
pub mod rules;
pub mod summary;
pub mod tips;

pub use detector::{
    AnomalyRecord, DEFAULT_WINDOW, DEFAULT_Z_THRESHOLD, DetectorOptions, detect_anomalies,
    rolling_z_scores,
};
pub use error::{AnalyticsError, AnalyticsResult};
pub use recommend::{NO_ANOMALIES_MESSAGE, RecommendationEngine, maintenance_recommendations};
pub use rules::{KeywordRule, MAINTENANCE_FALLBACK, MAINTENANCE_RULES};
pub use summary::{FrameSummary, metric_series, summarize, tail};
pub use tips::{ALWAYS_TIP, EFFICIENCY_RULES, efficiency_tips};
