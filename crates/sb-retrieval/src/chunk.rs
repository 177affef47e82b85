//! Fixed-size word chunking with overlap.

use serde::{Deserialize, Serialize};

use crate::error::{RetrievalError, RetrievalResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkOptions {
    pub max_words: usize,
    pub overlap: usize,
}

impl Default for ChunkOptions {
    fn default() -> Self {
        Self {
            max_words: 500,
            overlap: 50,
        }
    }
}

impl ChunkOptions {
    pub fn new(max_words: usize, overlap: usize) -> RetrievalResult<Self> {
        let opts = Self { max_words, overlap };
        opts.validate()?;
        Ok(opts)
    }

    pub fn validate(&self) -> RetrievalResult<()> {
        if self.max_words == 0 {
            return Err(RetrievalError::InvalidArg {
                what: "max_words must be positive",
            });
        }
        if self.overlap >= self.max_words {
            return Err(RetrievalError::InvalidArg {
                what: "overlap must be smaller than max_words",
            });
        }
        Ok(())
    }

    fn step(&self) -> usize {
        self.max_words.saturating_sub(self.overlap).max(1)
    }
}

/// Split `text` on whitespace into windows of `max_words` words, each
/// starting `max_words - overlap` words after the previous one. The last
/// window always ends at the final word.
pub fn chunk_words(text: &str, opts: ChunkOptions) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    let max_words = opts.max_words.max(1);
    let mut chunks = Vec::new();
    let mut start = 0;

    while start < words.len() {
        let end = (start + max_words).min(words.len());
        chunks.push(words[start..end].join(" "));
        if end == words.len() {
            break;
        }
        start += opts.step();
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(n: usize) -> String {
        (0..n).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn empty_text_has_no_chunks() {
        assert!(chunk_words("", ChunkOptions::default()).is_empty());
        assert!(chunk_words("  \n\t ", ChunkOptions::default()).is_empty());
    }

    #[test]
    fn short_text_is_one_chunk() {
        let chunks = chunk_words("reset the  chiller\npump", ChunkOptions::default());
        assert_eq!(chunks, vec!["reset the chiller pump"]);
    }

    #[test]
    fn windows_overlap() {
        let opts = ChunkOptions::new(4, 1).unwrap();
        let chunks = chunk_words(&numbered(10), opts);
        assert_eq!(
            chunks,
            vec!["w0 w1 w2 w3", "w3 w4 w5 w6", "w6 w7 w8 w9"]
        );
    }

    #[test]
    fn last_window_ends_at_final_word() {
        let opts = ChunkOptions::new(4, 2).unwrap();
        let chunks = chunk_words(&numbered(7), opts);
        assert_eq!(chunks.last().unwrap(), "w4 w5 w6");
    }

    #[test]
    fn invalid_options() {
        assert!(ChunkOptions::new(0, 0).is_err());
        assert!(ChunkOptions::new(10, 10).is_err());
        assert!(ChunkOptions::new(10, 9).is_ok());
    }
}
