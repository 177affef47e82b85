//! Shared application service layer for the smart-building assistant.
//!
//! The CLI (and any future frontend) goes through these services for
//! project handling, live streaming, dashboard refreshes, document QA and
//! retrieval evaluation.

pub mod dashboard;
pub mod error;
pub mod eval_service;
pub mod project_service;
pub mod qa_service;
pub mod query;
pub mod stream_service;

// Re-export key types for convenience
pub use dashboard::{DashboardView, analyze_rows, refresh};
pub use error::{AppError, AppResult};
pub use eval_service::{list_reports, load_report, run_and_save, run_eval};
pub use project_service::{
    ProjectPaths, chunk_options, detector_options, load_project, project_paths, resolve_path,
    save_project, validate_project,
};
pub use qa_service::{DocumentEntry, ask, build_index, list_documents};
pub use query::{extract_metric_series, series_to_csv};
pub use stream_service::{load_dataset, start_stream};
