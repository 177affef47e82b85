//! Background replay of a dataset into a `SensorFrameStore`.

use std::thread::{self, JoinHandle};
use std::time::Duration;

use sb_core::SensorReading;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::cancel::CancelToken;
use crate::error::StreamResult;
use crate::source::DatasetSource;
use crate::store::SensorFrameStore;

/// Observable simulator state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulatorState {
    Idle,
    Running,
}

/// Why a replay ended.
#[derive(Debug, Clone, PartialEq)]
pub enum RunEnd {
    /// Every row was appended.
    Exhausted,
    /// `stop` (or a newer `start`) interrupted the replay.
    Cancelled,
    /// The dataset could not be loaded or the store refused a row.
    Failed { message: String },
}

/// Summary of one finished replay.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    pub run_id: Uuid,
    pub rows_emitted: usize,
    pub end: RunEnd,
}

struct ActiveRun {
    run_id: Uuid,
    token: CancelToken,
    handle: JoinHandle<RunOutcome>,
}

/// Replays a dataset into a store on a background thread, one row per
/// interval. At most one replay is active; `start` always stops and joins
/// the previous one first.
pub struct StreamSimulator {
    store: SensorFrameStore,
    active: Option<ActiveRun>,
}

impl StreamSimulator {
    pub fn new(store: SensorFrameStore) -> Self {
        Self {
            store,
            active: None,
        }
    }

    pub fn store(&self) -> &SensorFrameStore {
        &self.store
    }

    pub fn state(&self) -> SimulatorState {
        match &self.active {
            Some(run) if !run.handle.is_finished() => SimulatorState::Running,
            _ => SimulatorState::Idle,
        }
    }

    pub fn is_running(&self) -> bool {
        self.state() == SimulatorState::Running
    }

    /// Id of the most recently started replay that has not been joined yet.
    pub fn current_run_id(&self) -> Option<Uuid> {
        self.active.as_ref().map(|run| run.run_id)
    }

    /// Begin replaying `source`, appending one row every `interval`.
    ///
    /// Any previous replay is cancelled and joined, and the store is reset,
    /// before the new producer is spawned.
    pub fn start<S>(&mut self, source: S, interval: Duration) -> StreamResult<Uuid>
    where
        S: DatasetSource + Send + 'static,
    {
        if let Some(previous) = self.stop() {
            debug!(run_id = %previous.run_id, "previous replay stopped before restart");
        }

        let generation = self.store.reset();
        let run_id = Uuid::new_v4();
        let token = CancelToken::new();

        let producer = Producer {
            run_id,
            generation,
            interval,
            store: self.store.clone(),
            token: token.clone(),
        };

        info!(
            %run_id,
            source = %source.describe(),
            interval_ms = interval.as_millis() as u64,
            "stream replay starting"
        );

        let handle = thread::Builder::new()
            .name("sb-stream-replay".to_string())
            .spawn(move || producer.run(&source))?;

        self.active = Some(ActiveRun {
            run_id,
            token,
            handle,
        });
        Ok(run_id)
    }

    /// Cancel the active replay and wait for its producer to exit.
    ///
    /// Returns `None` when nothing was running. The wait has no timeout:
    /// when this returns, the producer can no longer append.
    pub fn stop(&mut self) -> Option<RunOutcome> {
        let run = self.active.take()?;
        run.token.cancel();
        Some(join(run))
    }

    /// Wait for the active replay to finish on its own.
    pub fn wait(&mut self) -> Option<RunOutcome> {
        let run = self.active.take()?;
        Some(join(run))
    }
}

impl Drop for StreamSimulator {
    fn drop(&mut self) {
        self.stop();
    }
}

fn join(run: ActiveRun) -> RunOutcome {
    let run_id = run.run_id;
    match run.handle.join() {
        Ok(outcome) => outcome,
        Err(_) => {
            error!(%run_id, "stream producer panicked");
            RunOutcome {
                run_id,
                rows_emitted: 0,
                end: RunEnd::Failed {
                    message: "stream producer panicked".to_string(),
                },
            }
        }
    }
}

struct Producer {
    run_id: Uuid,
    generation: u64,
    interval: Duration,
    store: SensorFrameStore,
    token: CancelToken,
}

impl Producer {
    fn run<S: DatasetSource>(self, source: &S) -> RunOutcome {
        let rows = match source.load() {
            Ok(rows) => rows,
            Err(e) => {
                warn!(run_id = %self.run_id, error = %e, "dataset load failed");
                return self.finish(0, RunEnd::Failed {
                    message: e.to_string(),
                });
            }
        };

        if rows.is_empty() {
            info!(run_id = %self.run_id, "dataset is empty, nothing to replay");
            return self.finish(0, RunEnd::Exhausted);
        }

        let (emitted, end) = self.replay(rows);
        self.finish(emitted, end)
    }

    fn replay(&self, rows: Vec<SensorReading>) -> (usize, RunEnd) {
        let mut emitted = 0;
        for row in rows {
            if self.token.is_cancelled() {
                return (emitted, RunEnd::Cancelled);
            }
            if let Err(e) = self.store.append(self.generation, row) {
                warn!(run_id = %self.run_id, error = %e, "store rejected reading");
                return (emitted, RunEnd::Failed {
                    message: e.to_string(),
                });
            }
            emitted += 1;
            if self.token.wait_timeout(self.interval) {
                return (emitted, RunEnd::Cancelled);
            }
        }
        (emitted, RunEnd::Exhausted)
    }

    fn finish(&self, rows_emitted: usize, end: RunEnd) -> RunOutcome {
        info!(run_id = %self.run_id, rows_emitted, end = ?end, "stream replay finished");
        RunOutcome {
            run_id: self.run_id,
            rows_emitted,
            end,
        }
    }
}
