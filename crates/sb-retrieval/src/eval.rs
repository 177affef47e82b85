//! Retrieval evaluation: run a query list, time each call.

use sb_core::{Stopwatch, average_seconds};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::RetrievalResult;
use crate::retriever::{DEFAULT_TOP_K, Retriever};

/// Outcome of one evaluation query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryEvaluation {
    pub query: String,
    pub top_sources: Vec<String>,
    pub top_scores: Vec<Option<f64>>,
    pub latency_s: f64,
}

/// Per-query results in input order plus the mean latency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct EvalSummary {
    pub queries: Vec<QueryEvaluation>,
    pub avg_latency_s: f64,
}

/// Issues each query once against a retriever.
#[derive(Debug, Clone, Copy)]
pub struct RetrievalEvalHarness {
    pub k: usize,
}

impl Default for RetrievalEvalHarness {
    fn default() -> Self {
        Self { k: DEFAULT_TOP_K }
    }
}

impl RetrievalEvalHarness {
    pub fn new(k: usize) -> Self {
        Self { k }
    }

    pub fn run<R, Q>(&self, retriever: &R, queries: &[Q]) -> RetrievalResult<EvalSummary>
    where
        R: Retriever + ?Sized,
        Q: AsRef<str>,
    {
        evaluate(retriever, queries, self.k)
    }
}

/// Evaluate `queries` in order against `retriever`.
///
/// A retriever failure aborts the whole run and is returned unchanged.
/// An empty query list gives an empty summary with zero mean latency.
pub fn evaluate<R, Q>(retriever: &R, queries: &[Q], k: usize) -> RetrievalResult<EvalSummary>
where
    R: Retriever + ?Sized,
    Q: AsRef<str>,
{
    let mut results = Vec::with_capacity(queries.len());
    let mut latencies = Vec::with_capacity(queries.len());

    for query in queries {
        let query = query.as_ref();
        let timer = Stopwatch::start();
        let docs = retriever.retrieve(query, k)?;
        let latency_s = timer.elapsed_s();
        debug!(query, hits = docs.len(), latency_s, "evaluation query");

        latencies.push(latency_s);
        results.push(QueryEvaluation {
            query: query.to_string(),
            top_sources: docs.iter().map(|d| d.source.clone()).collect(),
            top_scores: docs.iter().map(|d| d.score).collect(),
            latency_s,
        });
    }

    let avg_latency_s = average_seconds(&latencies);
    info!(queries = results.len(), avg_latency_s, "retrieval evaluation finished");

    Ok(EvalSummary {
        queries: results,
        avg_latency_s,
    })
}
