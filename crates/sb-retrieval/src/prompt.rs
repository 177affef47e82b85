//! Prompt construction and answer generation.

use serde::{Deserialize, Serialize};

use crate::error::RetrievalResult;
use crate::retriever::{RetrievedDoc, Retriever};

const PREAMBLE: &str =
    "You are a maintenance assistant for smart buildings. Answer briefly based on the context.";
const ANSWER_MARKER: &str = "Answer:";
const SOURCE_MARKER: &str = "[Source: ";
const NO_CONTEXT_ANSWER: &str = "No relevant context was found for this question.";

/// Build the generation prompt for `query` over the retrieved passages.
pub fn format_prompt(query: &str, docs: &[RetrievedDoc]) -> String {
    let sources = docs
        .iter()
        .map(|d| format!("{SOURCE_MARKER}{}]\n{}", d.source, d.text))
        .collect::<Vec<_>>()
        .join("\n\n");
    format!("{PREAMBLE}\n\nQuestion: {query}\n\nContext:\n{sources}\n\n{ANSWER_MARKER}")
}

/// Text after the last `Answer:` marker, trimmed.
///
/// Local models echo the prompt before their completion.
pub fn clean_generation(raw: &str) -> String {
    raw.rsplit(ANSWER_MARKER)
        .next()
        .unwrap_or(raw)
        .trim()
        .to_string()
}

/// The text-generation collaborator.
pub trait Generator {
    fn generate(&self, prompt: &str) -> RetrievalResult<String>;
}

/// Local fallback that answers with the opening sentences of the best
/// passage in the prompt. No model inference is involved.
#[derive(Debug, Clone, Copy)]
pub struct ExtractiveGenerator {
    pub max_sentences: usize,
}

impl Default for ExtractiveGenerator {
    fn default() -> Self {
        Self { max_sentences: 2 }
    }
}

impl ExtractiveGenerator {
    fn first_passage(prompt: &str) -> Option<&str> {
        let start = prompt.find(SOURCE_MARKER)?;
        let block = &prompt[start..];
        let body_start = block.find('\n')? + 1;
        let body = &block[body_start..];
        let end = [
            body.find(&format!("\n\n{SOURCE_MARKER}")),
            body.rfind(&format!("\n\n{ANSWER_MARKER}")),
        ]
        .into_iter()
        .flatten()
        .min()
        .unwrap_or(body.len());
        Some(body[..end].trim())
    }
}

impl Generator for ExtractiveGenerator {
    fn generate(&self, prompt: &str) -> RetrievalResult<String> {
        let Some(passage) = Self::first_passage(prompt).filter(|p| !p.is_empty()) else {
            return Ok(NO_CONTEXT_ANSWER.to_string());
        };

        let mut out = String::new();
        let mut taken = 0;
        for (idx, c) in passage.char_indices() {
            out.push(c);
            let at_boundary = passage[idx + c.len_utf8()..]
                .chars()
                .next()
                .is_none_or(char::is_whitespace);
            if matches!(c, '.' | '!' | '?') && at_boundary {
                taken += 1;
                if taken >= self.max_sentences.max(1) {
                    break;
                }
            }
        }
        Ok(out.trim().to_string())
    }
}

/// A generated answer with the passages it was grounded on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub text: String,
    pub sources: Vec<RetrievedDoc>,
}

/// Retrieve context for `query`, then generate an answer from it.
pub fn answer<R, G>(retriever: &R, generator: &G, query: &str, k: usize) -> RetrievalResult<Answer>
where
    R: Retriever + ?Sized,
    G: Generator + ?Sized,
{
    let sources = retriever.retrieve(query, k)?;
    let prompt = format_prompt(query, &sources);
    let raw = generator.generate(&prompt)?;
    Ok(Answer {
        text: clean_generation(&raw),
        sources,
    })
}
