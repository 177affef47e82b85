//! Report data types.

use chrono::{DateTime, SecondsFormat, Utc};
use sb_retrieval::EvalSummary;
use serde::{Deserialize, Serialize};

pub use sb_retrieval::QueryEvaluation;

pub type ReportId = String;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportManifest {
    pub report_id: ReportId,
    pub project_name: String,
    /// RFC 3339, UTC.
    pub created_at: String,
    pub k: usize,
    pub query_count: usize,
    pub avg_latency_s: f64,
}

impl ReportManifest {
    /// Manifest for an evaluation summary, id derived from its content.
    pub fn for_summary(
        project_name: &str,
        summary: &EvalSummary,
        k: usize,
        created: DateTime<Utc>,
    ) -> Self {
        let created_at = created.to_rfc3339_opts(SecondsFormat::Millis, false);
        let queries: Vec<&str> = summary.queries.iter().map(|q| q.query.as_str()).collect();
        Self {
            report_id: crate::hash::compute_report_id(&queries, k, &created_at),
            project_name: project_name.to_string(),
            created_at,
            k,
            query_count: summary.queries.len(),
            avg_latency_s: summary.avg_latency_s,
        }
    }
}

/// A stored report: manifest plus per-query rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalReport {
    pub manifest: ReportManifest,
    pub queries: Vec<QueryEvaluation>,
}

impl EvalReport {
    pub fn summary(&self) -> EvalSummary {
        EvalSummary {
            queries: self.queries.clone(),
            avg_latency_s: self.manifest.avg_latency_s,
        }
    }
}
