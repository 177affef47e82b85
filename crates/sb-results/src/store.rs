//! Report storage API.

use crate::types::{EvalReport, QueryEvaluation, ReportManifest};
use crate::{ResultsError, ResultsResult};
use std::fs;
use std::path::{Path, PathBuf};

const MANIFEST_FILE: &str = "manifest.json";
const QUERIES_FILE: &str = "queries.jsonl";

#[derive(Debug, Clone)]
pub struct ReportStore {
    root_dir: PathBuf,
}

impl ReportStore {
    pub fn new(root_dir: PathBuf) -> ResultsResult<Self> {
        fs::create_dir_all(&root_dir)?;
        Ok(Self { root_dir })
    }

    /// Store next to a project file, under `.smartbuilding/reports`.
    pub fn for_project(project_path: &Path) -> ResultsResult<Self> {
        let project_dir = project_path
            .parent()
            .ok_or_else(|| ResultsError::InvalidPath {
                message: "project path has no parent directory".to_string(),
            })?;
        Self::new(project_dir.join(".smartbuilding").join("reports"))
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    fn report_dir(&self, report_id: &str) -> PathBuf {
        self.root_dir.join(report_id)
    }

    pub fn has_report(&self, report_id: &str) -> bool {
        self.report_dir(report_id).join(MANIFEST_FILE).exists()
    }

    pub fn save_eval(
        &self,
        manifest: &ReportManifest,
        results: &[QueryEvaluation],
    ) -> ResultsResult<()> {
        let report_dir = self.report_dir(&manifest.report_id);
        fs::create_dir_all(&report_dir)?;

        let mut lines = String::new();
        for result in results {
            lines.push_str(&serde_json::to_string(result)?);
            lines.push('\n');
        }
        fs::write(report_dir.join(QUERIES_FILE), lines)?;

        // manifest last: its presence marks a complete report
        let manifest_json = serde_json::to_string_pretty(manifest)?;
        fs::write(report_dir.join(MANIFEST_FILE), manifest_json)?;

        Ok(())
    }

    pub fn load_manifest(&self, report_id: &str) -> ResultsResult<ReportManifest> {
        let manifest_path = self.report_dir(report_id).join(MANIFEST_FILE);

        if !manifest_path.exists() {
            return Err(ResultsError::ReportNotFound {
                report_id: report_id.to_string(),
            });
        }

        let content = fs::read_to_string(manifest_path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn load_eval(&self, report_id: &str) -> ResultsResult<EvalReport> {
        let manifest = self.load_manifest(report_id)?;
        let queries_path = self.report_dir(report_id).join(QUERIES_FILE);

        if !queries_path.exists() {
            return Err(ResultsError::ReportNotFound {
                report_id: report_id.to_string(),
            });
        }

        let content = fs::read_to_string(queries_path)?;
        let mut queries = Vec::new();
        for line in content.lines() {
            if !line.trim().is_empty() {
                queries.push(serde_json::from_str(line)?);
            }
        }

        Ok(EvalReport { manifest, queries })
    }

    /// All complete reports, oldest first.
    pub fn list_reports(&self) -> ResultsResult<Vec<ReportManifest>> {
        let mut reports = Vec::new();

        if !self.root_dir.exists() {
            return Ok(reports);
        }

        for entry in fs::read_dir(&self.root_dir)? {
            let entry = entry?;
            if entry.path().is_dir() {
                let report_id = entry.file_name().to_string_lossy().to_string();
                if let Ok(manifest) = self.load_manifest(&report_id) {
                    reports.push(manifest);
                }
            }
        }

        reports.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.report_id.cmp(&b.report_id))
        });
        Ok(reports)
    }

    pub fn delete_report(&self, report_id: &str) -> ResultsResult<()> {
        let report_dir = self.report_dir(report_id);
        if report_dir.exists() {
            fs::remove_dir_all(report_dir)?;
        }
        Ok(())
    }
}
