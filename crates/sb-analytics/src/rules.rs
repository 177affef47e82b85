//! Ordered keyword rule tables.
//!
//! A table is evaluated top to bottom and the first rule whose keyword
//! appears in the metric name (case-insensitive) wins.

/// Keyword predicate paired with a message template.
///
/// `{metric}` in the template is replaced with the metric name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordRule {
    pub keywords: &'static [&'static str],
    pub template: &'static str,
}

impl KeywordRule {
    pub const fn new(keywords: &'static [&'static str], template: &'static str) -> Self {
        Self { keywords, template }
    }

    pub fn matches(&self, metric: &str) -> bool {
        let lower = metric.to_lowercase();
        self.keywords.iter().any(|k| lower.contains(k))
    }

    pub fn render(&self, metric: &str) -> String {
        self.template.replace("{metric}", metric)
    }
}

/// First rule in `table` matching `metric`.
pub fn first_match<'a>(table: &'a [KeywordRule], metric: &str) -> Option<&'a KeywordRule> {
    table.iter().find(|rule| rule.matches(metric))
}

pub const MAINTENANCE_RULES: &[KeywordRule] = &[
    KeywordRule::new(
        &["temp"],
        "High variance in {metric}: Inspect cooling loops, check refrigerant levels, and verify sensor calibration.",
    ),
    KeywordRule::new(
        &["vibration"],
        "Vibration spikes in {metric}: Schedule bearing inspection and balance rotating components.",
    ),
    KeywordRule::new(
        &["power", "kw"],
        "Power anomalies in {metric}: Check motor load, drive settings, and potential phase imbalance.",
    ),
];

pub const MAINTENANCE_FALLBACK: KeywordRule = KeywordRule::new(
    &[],
    "Anomalies in {metric}: Perform equipment inspection and review recent maintenance logs.",
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_is_case_insensitive() {
        let rule = KeywordRule::new(&["temp"], "{metric}");
        assert!(rule.matches("Chiller_Temp_1"));
        assert!(rule.matches("TEMPERATURE"));
        assert!(!rule.matches("flow"));
    }

    #[test]
    fn empty_keywords_never_match() {
        assert!(!MAINTENANCE_FALLBACK.matches("anything"));
    }

    #[test]
    fn first_match_respects_order() {
        // "temp" outranks "kw" even when both appear
        let rule = first_match(MAINTENANCE_RULES, "temp_kw_ratio").unwrap();
        assert!(rule.template.starts_with("High variance"));
    }

    #[test]
    fn render_substitutes_metric() {
        let text = MAINTENANCE_FALLBACK.render("flow_gpm");
        assert!(text.starts_with("Anomalies in flow_gpm:"));
    }
}
