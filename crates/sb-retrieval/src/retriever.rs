//! The retrieval collaborator interface.

use serde::{Deserialize, Serialize};

use crate::error::RetrievalResult;

pub const DEFAULT_TOP_K: usize = 4;

/// One retrieved passage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedDoc {
    pub text: String,
    pub source: String,
    /// Similarity in `[0, 1]`, if the backend reports one.
    pub score: Option<f64>,
}

/// Anything that can return the `k` passages most relevant to a query,
/// best first.
pub trait Retriever {
    fn retrieve(&self, query: &str, k: usize) -> RetrievalResult<Vec<RetrievedDoc>>;
}

impl<R: Retriever + ?Sized> Retriever for &R {
    fn retrieve(&self, query: &str, k: usize) -> RetrievalResult<Vec<RetrievedDoc>> {
        (**self).retrieve(query, k)
    }
}

impl<R: Retriever + ?Sized> Retriever for Box<R> {
    fn retrieve(&self, query: &str, k: usize) -> RetrievalResult<Vec<RetrievedDoc>> {
        (**self).retrieve(query, k)
    }
}
