//! Error types for the sb-app service layer.

use std::path::PathBuf;

/// Application error type that wraps errors from the backend crates and
/// gives frontends a single error surface.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Project error: {0}")]
    Project(String),

    #[error("Failed to read project file: {path}")]
    ProjectFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Project validation failed: {0}")]
    Validation(String),

    #[error("Stream error: {0}")]
    Stream(String),

    #[error("Analytics error: {0}")]
    Analytics(String),

    #[error("Retrieval error: {0}")]
    Retrieval(String),

    #[error("Results error: {0}")]
    Results(String),

    #[error("Report not found: {0}")]
    ReportNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for sb-app operations.
pub type AppResult<T> = Result<T, AppError>;

// Conversions from backend error types
impl From<sb_project::ProjectError> for AppError {
    fn from(err: sb_project::ProjectError) -> Self {
        match err {
            sb_project::ProjectError::Validation(e) => AppError::Validation(e.to_string()),
            other => AppError::Project(other.to_string()),
        }
    }
}

impl From<sb_project::ValidationError> for AppError {
    fn from(err: sb_project::ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<sb_stream::StreamError> for AppError {
    fn from(err: sb_stream::StreamError) -> Self {
        AppError::Stream(err.to_string())
    }
}

impl From<sb_analytics::AnalyticsError> for AppError {
    fn from(err: sb_analytics::AnalyticsError) -> Self {
        AppError::Analytics(err.to_string())
    }
}

impl From<sb_retrieval::RetrievalError> for AppError {
    fn from(err: sb_retrieval::RetrievalError) -> Self {
        AppError::Retrieval(err.to_string())
    }
}

impl From<sb_results::ResultsError> for AppError {
    fn from(err: sb_results::ResultsError) -> Self {
        match err {
            sb_results::ResultsError::ReportNotFound { report_id } => {
                AppError::ReportNotFound(report_id)
            }
            other => AppError::Results(other.to_string()),
        }
    }
}
