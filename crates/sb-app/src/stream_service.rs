//! Starting live replays and loading datasets for offline analysis.

use std::path::Path;
use std::time::Duration;

use sb_core::SensorReading;
use sb_project::schema::Project;
use sb_stream::{CsvFolderSource, DatasetSource, StreamSimulator};
use tracing::info;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::project_service;

fn replay_interval(project: &Project) -> AppResult<Duration> {
    Duration::try_from_secs_f64(project.stream.interval_s).map_err(|e| {
        AppError::InvalidInput(format!(
            "stream.interval_s = {}: {}",
            project.stream.interval_s, e
        ))
    })
}

/// Start replaying the project's sensor folder into the simulator's store.
/// Any replay already running is stopped first.
pub fn start_stream(
    simulator: &mut StreamSimulator,
    project_path: &Path,
    project: &Project,
) -> AppResult<Uuid> {
    let interval = replay_interval(project)?;
    let sensors_dir = project_service::resolve_path(project_path, &project.stream.sensors_dir);
    info!(dir = %sensors_dir.display(), ?interval, "starting sensor stream");

    let run_id = simulator.start(CsvFolderSource::new(sensors_dir), interval)?;
    Ok(run_id)
}

/// The whole sensor dataset at once, time ordered.
pub fn load_dataset(project_path: &Path, project: &Project) -> AppResult<Vec<SensorReading>> {
    let sensors_dir = project_service::resolve_path(project_path, &project.stream.sensors_dir);
    Ok(CsvFolderSource::new(sensors_dir).load()?)
}
