//! Retrieval evaluation runs and their persisted reports.

use chrono::Utc;
use sb_results::{EvalReport, ReportManifest, ReportStore};
use sb_retrieval::{EvalSummary, Retriever, evaluate};
use tracing::info;

use crate::error::{AppError, AppResult};

/// Evaluate the non-blank `queries`, trimmed, in order.
pub fn run_eval<R, Q>(retriever: &R, queries: &[Q], k: usize) -> AppResult<EvalSummary>
where
    R: Retriever + ?Sized,
    Q: AsRef<str>,
{
    if k == 0 {
        return Err(AppError::InvalidInput("k must be positive".to_string()));
    }
    let queries: Vec<&str> = queries
        .iter()
        .map(|q| q.as_ref().trim())
        .filter(|q| !q.is_empty())
        .collect();
    Ok(evaluate(retriever, &queries, k)?)
}

/// Evaluate and persist the result as a new report.
pub fn run_and_save<R, Q>(
    store: &ReportStore,
    project_name: &str,
    retriever: &R,
    queries: &[Q],
    k: usize,
) -> AppResult<(ReportManifest, EvalSummary)>
where
    R: Retriever + ?Sized,
    Q: AsRef<str>,
{
    let summary = run_eval(retriever, queries, k)?;
    let manifest = ReportManifest::for_summary(project_name, &summary, k, Utc::now());
    store.save_eval(&manifest, &summary.queries)?;
    info!(report_id = %manifest.report_id, queries = manifest.query_count, "saved evaluation report");
    Ok((manifest, summary))
}

/// Saved reports, oldest first.
pub fn list_reports(store: &ReportStore) -> AppResult<Vec<ReportManifest>> {
    Ok(store.list_reports()?)
}

/// Load a report by id or by a unique id prefix.
pub fn load_report(store: &ReportStore, id: &str) -> AppResult<EvalReport> {
    if store.has_report(id) {
        return Ok(store.load_eval(id)?);
    }

    let matches: Vec<ReportManifest> = store
        .list_reports()?
        .into_iter()
        .filter(|m| m.report_id.starts_with(id))
        .collect();
    match matches.as_slice() {
        [only] => Ok(store.load_eval(&only.report_id)?),
        [] => Err(AppError::ReportNotFound(id.to_string())),
        _ => Err(AppError::InvalidInput(format!(
            "report id prefix '{}' is ambiguous ({} matches)",
            id,
            matches.len()
        ))),
    }
}
