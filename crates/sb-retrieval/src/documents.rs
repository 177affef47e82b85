//! Loading manuals and specs from disk into chunks.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::chunk::{ChunkOptions, chunk_words};
use crate::error::{RetrievalError, RetrievalResult};

pub const SEED_TEXT: &str = "No documents yet. Add PDFs or TXTs to data folders.";
pub const SEED_SOURCE: &str = "seed";

/// One indexed passage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub id: String,
    pub text: String,
    pub source: String,
}

impl Chunk {
    fn seed() -> Self {
        Self {
            id: "seed-0".to_string(),
            text: SEED_TEXT.to_string(),
            source: SEED_SOURCE.to_string(),
        }
    }
}

/// Walk `dirs` recursively and chunk every text document.
///
/// Plain-text files are read lossily as UTF-8. PDFs need an external text
/// extractor and are skipped with a warning. When nothing is found a single
/// seed chunk is returned so the index is never empty.
pub fn load_documents(dirs: &[PathBuf], opts: ChunkOptions) -> RetrievalResult<Vec<Chunk>> {
    opts.validate()?;

    let mut files = Vec::new();
    for dir in dirs {
        collect_files(dir, &mut files)?;
    }

    let mut chunks = Vec::new();
    for path in files {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("txt") => {
                let bytes = fs::read(&path).map_err(|source| RetrievalError::DocumentRead {
                    path: path.clone(),
                    source,
                })?;
                let text = String::from_utf8_lossy(&bytes);
                chunks.extend(chunk_file(&path, &text, opts));
            }
            Some("pdf") => {
                warn!(path = %path.display(), "PDF extraction is not available, skipping");
            }
            _ => {}
        }
    }

    if chunks.is_empty() {
        info!("no documents found, seeding index");
        chunks.push(Chunk::seed());
    }
    Ok(chunks)
}

fn chunk_file(path: &Path, text: &str, opts: ChunkOptions) -> Vec<Chunk> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let source = path.display().to_string();

    let chunks: Vec<Chunk> = chunk_words(text, opts)
        .into_iter()
        .enumerate()
        .map(|(idx, text)| Chunk {
            id: format!("{name}-{idx}"),
            text,
            source: source.clone(),
        })
        .collect();
    debug!(source = %source, chunks = chunks.len(), "chunked document");
    chunks
}

fn collect_files(dir: &Path, out: &mut Vec<PathBuf>) -> RetrievalResult<()> {
    if !dir.is_dir() {
        debug!(dir = %dir.display(), "document folder missing");
        return Ok(());
    }
    let read_err = |source| RetrievalError::DocumentRead {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_err)? {
        entries.push(entry.map_err(read_err)?.path());
    }
    entries.sort();

    for path in entries {
        if path.is_dir() {
            collect_files(&path, out)?;
        } else if path.is_file() {
            out.push(path);
        }
    }
    Ok(())
}
