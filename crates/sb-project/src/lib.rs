//! sb-project: building project file format and validation.

pub mod migrate;
pub mod schema;
pub mod validate;

use std::path::{Path, PathBuf};

pub use migrate::{LATEST_VERSION, migrate_to_latest};
pub use schema::*;
pub use validate::{ValidationError, validate_project};

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Migration error: {what}")]
    Migration { what: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn load_yaml(path: &Path) -> ProjectResult<Project> {
    let content = std::fs::read_to_string(path)?;
    let project: Project = serde_yaml::from_str(&content)?;
    finish_load(project)
}

pub fn save_yaml(path: &Path, project: &Project) -> ProjectResult<()> {
    validate_project(project)?;
    let content = serde_yaml::to_string(project)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &Path) -> ProjectResult<Project> {
    let content = std::fs::read_to_string(path)?;
    let project: Project = serde_json::from_str(&content)?;
    finish_load(project)
}

pub fn save_json(path: &Path, project: &Project) -> ProjectResult<()> {
    validate_project(project)?;
    let content = serde_json::to_string_pretty(project)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load by extension: `.json` as JSON, anything else as YAML.
pub fn load(path: &Path) -> ProjectResult<Project> {
    if is_json(path) {
        load_json(path)
    } else {
        load_yaml(path)
    }
}

pub fn save(path: &Path, project: &Project) -> ProjectResult<()> {
    if is_json(path) {
        save_json(path, project)
    } else {
        save_yaml(path, project)
    }
}

/// Resolve a path from a project file against the file's directory.
/// Absolute paths are returned unchanged.
pub fn resolve_path(project_path: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match project_path.parent() {
        Some(dir) => dir.join(path),
        None => path.to_path_buf(),
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}

fn finish_load(project: Project) -> ProjectResult<Project> {
    let project = migrate_to_latest(project)?;
    validate_project(&project)?;
    Ok(project)
}
