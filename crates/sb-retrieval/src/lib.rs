//! Question answering over equipment manuals and building specs.
//!
//! The vector store, embedding model and text generator are external
//! collaborators reached through the `Retriever` and `Generator` traits.
//! This crate provides:
//! - the retrieval evaluation harness (per-query latency, mean latency)
//! - document ingestion and fixed-size word chunking
//! - `LexicalIndex`, an in-process term-frequency retriever
//! - prompt formatting and an extractive local generator

pub mod chunk;
pub mod documents;
pub mod error;
pub mod eval;
pub mod index;
pub mod prompt;
pub mod retriever;

pub use chunk::{ChunkOptions, chunk_words};
pub use documents::{Chunk, SEED_SOURCE, SEED_TEXT, load_documents};
pub use error::{RetrievalError, RetrievalResult};
pub use eval::{EvalSummary, QueryEvaluation, RetrievalEvalHarness, evaluate};
pub use index::LexicalIndex;
pub use prompt::{Answer, ExtractiveGenerator, Generator, answer, clean_generation, format_prompt};
pub use retriever::{DEFAULT_TOP_K, RetrievedDoc, Retriever};
