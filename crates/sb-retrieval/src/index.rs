//! In-process lexical retriever.
//!
//! Stands in for the vector store when no external backend is configured:
//! passages and queries become term-frequency vectors and are ranked by
//! cosine similarity.

use std::collections::HashMap;

use tracing::debug;

use crate::documents::Chunk;
use crate::error::{RetrievalError, RetrievalResult};
use crate::retriever::{RetrievedDoc, Retriever};

#[derive(Debug, Clone, Default)]
struct TermVector {
    weights: HashMap<String, f64>,
    norm: f64,
}

impl TermVector {
    fn from_text(text: &str) -> Self {
        let mut weights: HashMap<String, f64> = HashMap::new();
        for token in tokenize(text) {
            *weights.entry(token).or_insert(0.0) += 1.0;
        }
        let norm = weights.values().map(|w| w * w).sum::<f64>().sqrt();
        Self { weights, norm }
    }

    fn cosine(&self, other: &TermVector) -> f64 {
        if self.norm == 0.0 || other.norm == 0.0 {
            return 0.0;
        }
        let (small, large) = if self.weights.len() <= other.weights.len() {
            (self, other)
        } else {
            (other, self)
        };
        let dot: f64 = small
            .weights
            .iter()
            .filter_map(|(term, w)| large.weights.get(term).map(|v| w * v))
            .sum();
        (dot / (self.norm * other.norm)).clamp(0.0, 1.0)
    }
}

fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
}

/// Term-frequency index over document chunks.
#[derive(Debug, Clone, Default)]
pub struct LexicalIndex {
    chunks: Vec<Chunk>,
    vectors: Vec<TermVector>,
}

impl LexicalIndex {
    pub fn new(chunks: Vec<Chunk>) -> Self {
        let vectors = chunks.iter().map(|c| TermVector::from_text(&c.text)).collect();
        debug!(chunks = chunks.len(), "built lexical index");
        Self { chunks, vectors }
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// Distinct sources in index order.
    pub fn list_sources(&self) -> Vec<String> {
        let mut sources: Vec<String> = Vec::new();
        for chunk in &self.chunks {
            if !sources.contains(&chunk.source) {
                sources.push(chunk.source.clone());
            }
        }
        sources
    }
}

impl Retriever for LexicalIndex {
    fn retrieve(&self, query: &str, k: usize) -> RetrievalResult<Vec<RetrievedDoc>> {
        if k == 0 {
            return Err(RetrievalError::InvalidArg {
                what: "k must be positive",
            });
        }

        let q = TermVector::from_text(query);
        let mut scored: Vec<(usize, f64)> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(idx, v)| (idx, q.cosine(v)))
            .collect();
        // stable: equal scores keep index order
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));

        Ok(scored
            .into_iter()
            .take(k)
            .map(|(idx, score)| {
                let chunk = &self.chunks[idx];
                RetrievedDoc {
                    text: chunk.text.clone(),
                    source: chunk.source.clone(),
                    score: Some(score),
                }
            })
            .collect())
    }
}
