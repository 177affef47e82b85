//! Document indexing and question answering.

use std::path::Path;

use sb_project::schema::Project;
use sb_retrieval::{Answer, Generator, LexicalIndex, Retriever, load_documents};
use serde::Serialize;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::project_service;

/// One indexed document and how many chunks it contributed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentEntry {
    pub source: String,
    pub chunks: usize,
}

/// Ingest the project's document folders into a lexical index.
pub fn build_index(project_path: &Path, project: &Project) -> AppResult<LexicalIndex> {
    let paths = project_service::project_paths(project_path, project);
    let opts = project_service::chunk_options(project)?;
    let chunks = load_documents(&paths.document_dirs, opts)?;
    let index = LexicalIndex::new(chunks);
    info!(chunks = index.len(), sources = index.list_sources().len(), "document index ready");
    Ok(index)
}

/// Indexed documents in index order.
pub fn list_documents(index: &LexicalIndex) -> Vec<DocumentEntry> {
    let mut entries: Vec<DocumentEntry> = Vec::new();
    for chunk in index.chunks() {
        match entries.iter_mut().find(|e| e.source == chunk.source) {
            Some(entry) => entry.chunks += 1,
            None => entries.push(DocumentEntry {
                source: chunk.source.clone(),
                chunks: 1,
            }),
        }
    }
    entries
}

/// Answer `query` from the `k` best passages.
pub fn ask<R, G>(retriever: &R, generator: &G, query: &str, k: usize) -> AppResult<Answer>
where
    R: Retriever + ?Sized,
    G: Generator + ?Sized,
{
    let query = query.trim();
    if query.is_empty() {
        return Err(AppError::InvalidInput("question must not be blank".to_string()));
    }
    Ok(sb_retrieval::answer(retriever, generator, query, k)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sb_retrieval::{Chunk, ExtractiveGenerator};

    fn chunk(id: &str, source: &str, text: &str) -> Chunk {
        Chunk {
            id: id.to_string(),
            text: text.to_string(),
            source: source.to_string(),
        }
    }

    #[test]
    fn documents_count_chunks_per_source() {
        let index = LexicalIndex::new(vec![
            chunk("a-0", "a.txt", "one"),
            chunk("b-0", "b.txt", "two"),
            chunk("a-1", "a.txt", "three"),
        ]);
        assert_eq!(
            list_documents(&index),
            vec![
                DocumentEntry { source: "a.txt".to_string(), chunks: 2 },
                DocumentEntry { source: "b.txt".to_string(), chunks: 1 },
            ]
        );
    }

    #[test]
    fn blank_question_rejected() {
        let index = LexicalIndex::new(vec![chunk("a-0", "a.txt", "text")]);
        let err = ask(&index, &ExtractiveGenerator::default(), "  ", 4).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }
}
