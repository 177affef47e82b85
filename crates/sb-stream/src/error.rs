//! Error types for stream operations.

use std::path::PathBuf;

use sb_core::{CoreError, Timestamp};
use thiserror::Error;

/// Errors encountered while loading or replaying sensor data.
#[derive(Error, Debug)]
pub enum StreamError {
    #[error("Stale producer: append for generation {found}, store is at {current}")]
    StaleGeneration { current: u64, found: u64 },

    #[error("Out-of-order reading: {next} arrived after {last}")]
    OutOfOrder { last: Timestamp, next: Timestamp },

    #[error("Dataset error in {path} (line {line}): {message}")]
    Dataset {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type StreamResult<T> = Result<T, StreamError>;
