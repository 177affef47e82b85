//! Project validation logic.

use crate::schema::{AnalyticsDef, EvaluationDef, Project, RetrievalDef, StreamDef};

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: &str, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

pub fn validate_project(project: &Project) -> Result<(), ValidationError> {
    if project.version > crate::migrate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: project.version,
        });
    }

    validate_stream(&project.stream)?;
    validate_analytics(&project.analytics)?;
    validate_retrieval(&project.retrieval)?;
    validate_evaluation(&project.evaluation)?;
    Ok(())
}

fn validate_stream(stream: &StreamDef) -> Result<(), ValidationError> {
    if !stream.interval_s.is_finite() || stream.interval_s < 0.0 {
        return Err(invalid(
            "stream.interval_s",
            stream.interval_s,
            "must be finite and non-negative",
        ));
    }
    Ok(())
}

fn validate_analytics(analytics: &AnalyticsDef) -> Result<(), ValidationError> {
    if analytics.window < 2 {
        return Err(invalid(
            "analytics.window",
            analytics.window,
            "rolling window needs at least 2 rows",
        ));
    }
    if !analytics.z_threshold.is_finite() || analytics.z_threshold <= 0.0 {
        return Err(invalid(
            "analytics.z_threshold",
            analytics.z_threshold,
            "must be finite and positive",
        ));
    }
    Ok(())
}

fn validate_retrieval(retrieval: &RetrievalDef) -> Result<(), ValidationError> {
    if retrieval.chunk_words == 0 {
        return Err(invalid("retrieval.chunk_words", 0, "must be positive"));
    }
    if retrieval.chunk_overlap >= retrieval.chunk_words {
        return Err(invalid(
            "retrieval.chunk_overlap",
            retrieval.chunk_overlap,
            "must be smaller than chunk_words",
        ));
    }
    if retrieval.top_k == 0 {
        return Err(invalid("retrieval.top_k", 0, "must be positive"));
    }
    Ok(())
}

fn validate_evaluation(evaluation: &EvaluationDef) -> Result<(), ValidationError> {
    for (idx, query) in evaluation.queries.iter().enumerate() {
        if query.trim().is_empty() {
            return Err(invalid(
                &format!("evaluation.queries[{idx}]"),
                format!("{query:?}"),
                "query must not be blank",
            ));
        }
    }
    Ok(())
}
