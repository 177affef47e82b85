//! Project loading, saving, validation, and path resolution.

use std::path::{Path, PathBuf};

use sb_analytics::DetectorOptions;
use sb_project::schema::Project;
use sb_retrieval::ChunkOptions;

use crate::error::{AppError, AppResult};

/// Filesystem locations a project refers to, resolved to usable paths.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectPaths {
    pub sensors_dir: PathBuf,
    pub document_dirs: Vec<PathBuf>,
    pub reports_dir: PathBuf,
}

/// Load a project file (YAML, or JSON by extension), migrated and validated.
pub fn load_project(path: &Path) -> AppResult<Project> {
    if !path.exists() {
        return Err(AppError::ProjectFileRead {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        });
    }
    Ok(sb_project::load(path)?)
}

/// Save a project file; invalid projects are refused.
pub fn save_project(path: &Path, project: &Project) -> AppResult<()> {
    sb_project::save(path, project)?;
    Ok(())
}

pub fn validate_project(project: &Project) -> AppResult<()> {
    sb_project::validate_project(project)?;
    Ok(())
}

/// Resolve a project-relative path against the project file's directory.
pub fn resolve_path(project_path: &Path, path: &Path) -> PathBuf {
    sb_project::resolve_path(project_path, path)
}

pub fn project_paths(project_path: &Path, project: &Project) -> ProjectPaths {
    ProjectPaths {
        sensors_dir: resolve_path(project_path, &project.stream.sensors_dir),
        document_dirs: project
            .retrieval
            .document_dirs
            .iter()
            .map(|d| resolve_path(project_path, d))
            .collect(),
        reports_dir: resolve_path(project_path, Path::new(".smartbuilding/reports")),
    }
}

pub fn detector_options(project: &Project) -> AppResult<DetectorOptions> {
    Ok(DetectorOptions::new(
        project.analytics.window,
        project.analytics.z_threshold,
    )?)
}

pub fn chunk_options(project: &Project) -> AppResult<ChunkOptions> {
    Ok(ChunkOptions::new(
        project.retrieval.chunk_words,
        project.retrieval.chunk_overlap,
    )?)
}
