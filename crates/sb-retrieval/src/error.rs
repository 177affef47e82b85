//! Error types for retrieval, ingestion and generation.

use std::path::PathBuf;

use thiserror::Error;

pub type RetrievalResult<T> = Result<T, RetrievalError>;

#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// The retrieval collaborator failed.
    #[error("Retrieval backend error: {message}")]
    Backend { message: String },

    /// The generation collaborator failed.
    #[error("Generation error: {message}")]
    Generation { message: String },

    #[error("Failed to read document {path}: {source}")]
    DocumentRead {
        path: PathBuf,
        source: std::io::Error,
    },
}
