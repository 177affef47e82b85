use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use sb_retrieval::{
    ChunkOptions, ExtractiveGenerator, Generator, LexicalIndex, RetrievalError, RetrievalResult,
    Retriever, SEED_SOURCE, answer, evaluate, load_documents,
};

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("{prefix}-{nanos}"));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

struct FailingGenerator;

impl Generator for FailingGenerator {
    fn generate(&self, _prompt: &str) -> RetrievalResult<String> {
        Err(RetrievalError::Generation {
            message: "model not loaded".to_string(),
        })
    }
}

#[test]
fn manuals_are_indexed_and_answer_grounded() {
    let root = unique_temp_dir("sb-retrieval-qa");
    let manuals = root.join("manuals");
    let specs = root.join("specs");
    fs::create_dir_all(&manuals).unwrap();
    fs::create_dir_all(&specs).unwrap();
    fs::write(
        manuals.join("chiller.txt"),
        "To reset the chiller pump hold the reset button for five seconds. \
         Confirm the flow alarm clears.",
    )
    .unwrap();
    fs::write(
        specs.join("ahu.txt"),
        "AHU filters are replaced every quarter. Fault code F12 means a stuck damper.",
    )
    .unwrap();

    let chunks = load_documents(&[manuals, specs], ChunkOptions::default()).unwrap();
    let index = LexicalIndex::new(chunks);
    assert_eq!(index.len(), 2);

    let sources = index.list_sources();
    assert!(sources[0].ends_with("chiller.txt"));
    assert!(sources[1].ends_with("ahu.txt"));

    let out = answer(
        &index,
        &ExtractiveGenerator { max_sentences: 1 },
        "how do I reset the chiller pump",
        1,
    )
    .unwrap();
    assert_eq!(out.sources.len(), 1);
    assert!(out.sources[0].source.ends_with("chiller.txt"));
    assert_eq!(
        out.text,
        "To reset the chiller pump hold the reset button for five seconds."
    );

    let summary = evaluate(&index, &["ahu fault code", "chiller reset"], 1).unwrap();
    assert!(summary.queries[0].top_sources[0].ends_with("ahu.txt"));
    assert!(summary.queries[1].top_sources[0].ends_with("chiller.txt"));

    let _ = fs::remove_dir_all(root);
}

#[test]
fn empty_folders_fall_back_to_seed_document() {
    let root = unique_temp_dir("sb-retrieval-seed");
    let chunks = load_documents(&[root.clone()], ChunkOptions::default()).unwrap();
    let index = LexicalIndex::new(chunks);

    let docs = index.retrieve("anything", 4).unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].source, SEED_SOURCE);

    let _ = fs::remove_dir_all(root);
}

#[test]
fn generator_failure_propagates() {
    let index = LexicalIndex::new(Vec::new());
    let err = answer(&index, &FailingGenerator, "q", 4).unwrap_err();
    assert!(matches!(err, RetrievalError::Generation { .. }));
}
