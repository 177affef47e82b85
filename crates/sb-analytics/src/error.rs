//! Error types for analytics configuration.

use thiserror::Error;

pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnalyticsError {
    /// Invalid detector or rule configuration.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}
