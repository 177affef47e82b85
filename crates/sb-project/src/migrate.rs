//! Schema migration framework.

use crate::ProjectError;
use crate::schema::{DEFAULT_EVAL_QUERIES, Project};

pub const LATEST_VERSION: u32 = 1;

pub fn migrate_to_latest(mut project: Project) -> Result<Project, ProjectError> {
    while project.version < LATEST_VERSION {
        project = migrate_one_version(project)?;
    }
    Ok(project)
}

fn migrate_one_version(project: Project) -> Result<Project, ProjectError> {
    match project.version {
        0 => migrate_v0_to_v1(project),
        v => Err(ProjectError::Migration {
            what: format!("No migration path from version {}", v),
        }),
    }
}

/// Version 0 files had no evaluation section; an empty query list there
/// means "use the standard set".
fn migrate_v0_to_v1(mut project: Project) -> Result<Project, ProjectError> {
    if project.evaluation.queries.is_empty() {
        project.evaluation.queries = DEFAULT_EVAL_QUERIES.iter().map(|q| q.to_string()).collect();
    }
    project.version = 1;
    Ok(project)
}
