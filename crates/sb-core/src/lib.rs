//! sb-core: shared foundation for the smart-building toolkit.
//!
//! Contains:
//! - reading (sensor rows and their metric maps)
//! - time (timestamp parsing for dataset sources)
//! - numeric (finite checks, mean and sample standard deviation)
//! - timing (wall-clock stopwatch used for latency measurement)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod reading;
pub mod time;
pub mod timing;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult};
pub use numeric::*;
pub use reading::{SensorReading, Timestamp, metric_columns};
pub use time::{from_epoch_seconds, parse_timestamp};
pub use timing::{Stopwatch, average_seconds, round_ms};
