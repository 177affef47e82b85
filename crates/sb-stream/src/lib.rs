//! Sensor stream replay for the smart-building dashboard.
//!
//! Provides:
//! - `SensorFrameStore`, the owned "latest known stream state"
//! - dataset sources (CSV folders, in-memory rows)
//! - `StreamSimulator`, a cancellable background replay of a dataset
//!
//! Exactly one producer writes into a store at a time; any number of
//! readers take snapshots.

pub mod cancel;
pub mod error;
pub mod simulator;
pub mod source;
pub mod store;

mod csv;

pub use cancel::CancelToken;
pub use error::{StreamError, StreamResult};
pub use simulator::{RunEnd, RunOutcome, SimulatorState, StreamSimulator};
pub use source::{CsvFolderSource, DatasetSource, InMemorySource, load_csv_file};
pub use store::{SensorFrameStore, StreamSnapshot};
