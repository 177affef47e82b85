use sb_project::schema::*;
use sb_project::{ProjectError, load, load_json, load_yaml, save_json, save_yaml};
use std::path::PathBuf;

fn temp_path(name: &str) -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    std::env::temp_dir().join(format!("sb_project_{nanos}_{name}"))
}

fn tuned_project() -> Project {
    let mut project = Project::new("Demo Tower");
    project.stream.interval_s = 0.25;
    project.analytics.window = 12;
    project.retrieval.document_dirs = vec![PathBuf::from("docs")];
    project.evaluation.queries = vec!["boiler lockout".to_string()];
    project
}

#[test]
fn roundtrip_yaml() {
    let project = tuned_project();
    let path = temp_path("roundtrip.yaml");

    save_yaml(&path, &project).unwrap();
    let loaded = load_yaml(&path).unwrap();
    assert_eq!(project, loaded);

    let _ = std::fs::remove_file(path);
}

#[test]
fn roundtrip_json_by_extension() {
    let project = tuned_project();
    let path = temp_path("roundtrip.json");

    save_json(&path, &project).unwrap();
    assert_eq!(load(&path).unwrap(), project);
    assert_eq!(load_json(&path).unwrap(), project);

    let _ = std::fs::remove_file(path);
}

#[test]
fn save_refuses_invalid_project() {
    let mut project = tuned_project();
    project.retrieval.top_k = 0;
    let path = temp_path("invalid.yaml");

    assert!(matches!(
        save_yaml(&path, &project),
        Err(ProjectError::Validation(_))
    ));
    assert!(!path.exists());
}

#[test]
fn load_migrates_version_zero() {
    let path = temp_path("legacy.yaml");
    std::fs::write(&path, "version: 0\nname: Legacy\nevaluation:\n  queries: []\n").unwrap();

    let project = load_yaml(&path).unwrap();
    assert_eq!(project.version, 1);
    assert_eq!(project.evaluation.queries, DEFAULT_EVAL_QUERIES);

    let _ = std::fs::remove_file(path);
}

#[test]
fn load_rejects_invalid_file() {
    let path = temp_path("bad_window.yaml");
    std::fs::write(&path, "version: 1\nname: Bad\nanalytics:\n  window: 1\n").unwrap();

    assert!(matches!(load_yaml(&path), Err(ProjectError::Validation(_))));

    let _ = std::fs::remove_file(path);
}
