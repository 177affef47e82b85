//! Maintenance recommendations from an anomaly set.

use crate::detector::AnomalyRecord;
use crate::rules::{KeywordRule, MAINTENANCE_FALLBACK, MAINTENANCE_RULES, first_match};

pub const NO_ANOMALIES_MESSAGE: &str =
    "No anomalies detected. Continue routine maintenance schedule.";

/// Maps anomalous metrics to advice through an ordered rule table.
#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    rules: Vec<KeywordRule>,
    fallback: KeywordRule,
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new(MAINTENANCE_RULES.to_vec(), MAINTENANCE_FALLBACK)
    }
}

impl RecommendationEngine {
    pub fn new(rules: Vec<KeywordRule>, fallback: KeywordRule) -> Self {
        Self { rules, fallback }
    }

    pub fn rules(&self) -> &[KeywordRule] {
        &self.rules
    }

    /// Advice for a single metric name.
    pub fn advise(&self, metric: &str) -> String {
        first_match(&self.rules, metric)
            .unwrap_or(&self.fallback)
            .render(metric)
    }

    /// One recommendation per distinct anomalous metric.
    ///
    /// Metrics with more anomalies come first; ties keep first appearance.
    /// An empty anomaly set yields exactly the "no anomalies" message.
    pub fn recommend(&self, anomalies: &[AnomalyRecord]) -> Vec<String> {
        if anomalies.is_empty() {
            return vec![NO_ANOMALIES_MESSAGE.to_string()];
        }

        let mut counts: Vec<(&str, usize)> = Vec::new();
        for anomaly in anomalies {
            match counts.iter_mut().find(|(m, _)| *m == anomaly.metric) {
                Some((_, n)) => *n += 1,
                None => counts.push((anomaly.metric.as_str(), 1)),
            }
        }
        counts.sort_by(|a, b| b.1.cmp(&a.1));

        counts.iter().map(|(metric, _)| self.advise(metric)).collect()
    }
}

/// Recommendations using the built-in rule table.
pub fn maintenance_recommendations(anomalies: &[AnomalyRecord]) -> Vec<String> {
    RecommendationEngine::default().recommend(anomalies)
}
