//! Owned, append-only stream state with snapshot reads.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use sb_core::{SensorReading, Timestamp};

use crate::error::{StreamError, StreamResult};

#[derive(Debug, Default)]
struct Frame {
    generation: u64,
    rows: Vec<SensorReading>,
}

/// Shared handle to the latest known stream state.
///
/// Cloning the handle shares the same underlying frame. Every `reset`
/// starts a new generation; appends carry the generation they were issued
/// for and are rejected once the store has moved on.
#[derive(Debug, Clone, Default)]
pub struct SensorFrameStore {
    inner: Arc<RwLock<Frame>>,
}

/// Immutable point-in-time copy of the stream state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StreamSnapshot {
    pub generation: u64,
    pub rows: Vec<SensorReading>,
}

impl StreamSnapshot {
    pub fn rows(&self) -> &[SensorReading] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn last_timestamp(&self) -> Option<Timestamp> {
        self.rows.last().map(|r| r.timestamp)
    }
}

impl SensorFrameStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Frame> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Frame> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Drop all rows and open a new generation. Returns the new generation.
    pub fn reset(&self) -> u64 {
        let mut frame = self.write();
        frame.generation += 1;
        frame.rows.clear();
        frame.generation
    }

    /// Append one reading on behalf of the producer owning `generation`.
    pub fn append(&self, generation: u64, reading: SensorReading) -> StreamResult<()> {
        let mut frame = self.write();
        if frame.generation != generation {
            return Err(StreamError::StaleGeneration {
                current: frame.generation,
                found: generation,
            });
        }
        if let Some(last) = frame.rows.last()
            && reading.timestamp < last.timestamp
        {
            return Err(StreamError::OutOfOrder {
                last: last.timestamp,
                next: reading.timestamp,
            });
        }
        frame.rows.push(reading);
        Ok(())
    }

    pub fn snapshot(&self) -> StreamSnapshot {
        let frame = self.read();
        StreamSnapshot {
            generation: frame.generation,
            rows: frame.rows.clone(),
        }
    }

    pub fn generation(&self) -> u64 {
        self.read().generation
    }

    pub fn len(&self) -> usize {
        self.read().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().rows.is_empty()
    }

    pub fn last_timestamp(&self) -> Option<Timestamp> {
        self.read().rows.last().map(|r| r.timestamp)
    }
}
