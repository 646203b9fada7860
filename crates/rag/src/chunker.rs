//! Recursive character chunking with overlap.
//!
//! Splits normalized text into overlapping, size-bounded segments suitable
//! for embedding. Text is decomposed on a priority list of separators —
//! paragraph breaks, line breaks, sentence breaks, spaces — always seeking
//! the largest unit that fits `chunk_size`, then packed into chunks where
//! each chunk after the first begins `chunk_overlap` characters before the
//! previous chunk's end.

use docqa_core::{RagError, RagResult};

use crate::types::{Chunk, Document};

/// Separator priority: paragraph breaks, then line breaks, then sentence
/// breaks, then spaces. A unit containing none of these is indivisible.
const SEPARATORS: [&str; 4] = ["\n\n", "\n", ". ", " "];

/// Splits documents into overlapping, size-bounded chunks.
///
/// Sizes are measured in characters, not bytes, so multi-byte text never
/// gets cut mid-character. Every chunk is a contiguous span of the source
/// text; consecutive chunks share up to `chunk_overlap` characters.
#[derive(Debug, Clone)]
pub struct TextChunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl TextChunker {
    /// Create a chunker. `chunk_size` must be positive and `chunk_overlap`
    /// strictly smaller than `chunk_size`.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> RagResult<Self> {
        if chunk_size == 0 {
            return Err(RagError::Config("chunk_size must be > 0".to_string()));
        }
        if chunk_overlap >= chunk_size {
            return Err(RagError::Config(format!(
                "chunk_overlap ({}) must be smaller than chunk_size ({})",
                chunk_overlap, chunk_size
            )));
        }
        Ok(Self {
            chunk_size,
            chunk_overlap,
        })
    }

    /// Split a sequence of documents into chunks, copying each document's
    /// metadata unchanged onto every derived chunk.
    pub fn split_documents(&self, documents: &[Document]) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        for document in documents {
            for content in self.split_text(&document.content) {
                chunks.push(Chunk {
                    content,
                    metadata: document.metadata.clone(),
                });
            }
        }

        tracing::debug!(
            documents = documents.len(),
            chunks = chunks.len(),
            "Chunking complete"
        );

        chunks
    }

    /// Split text into overlapping chunks of at most `chunk_size` chars.
    ///
    /// A single indivisible unit (an unbroken token with no separator)
    /// longer than `chunk_size` is emitted whole rather than corrupted.
    /// Empty text yields zero chunks.
    pub fn split_text(&self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }

        let units = self.decompose(text, &SEPARATORS);
        self.pack(units)
    }

    /// Recursively decompose text into units no longer than `chunk_size`,
    /// preferring coarser separators. Concatenating the units reproduces
    /// the input exactly. A unit with no remaining separator stays whole
    /// even when oversized.
    fn decompose(&self, text: &str, separators: &[&str]) -> Vec<String> {
        if char_len(text) <= self.chunk_size {
            return vec![text.to_string()];
        }

        match separators.split_first() {
            Some((separator, finer)) => {
                if text.contains(separator) {
                    text.split_inclusive(separator)
                        .flat_map(|piece| self.decompose(piece, finer))
                        .collect()
                } else {
                    self.decompose(text, finer)
                }
            }
            None => vec![text.to_string()],
        }
    }

    /// Greedily pack units into chunks, carrying up to `chunk_overlap`
    /// trailing characters of each emitted chunk into the next one.
    fn pack(&self, units: Vec<String>) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut current = String::new();
        let mut current_len = 0usize;

        for unit in units {
            let unit_len = char_len(&unit);

            if current_len > 0 && current_len + unit_len > self.chunk_size {
                // The overlap shrinks when the incoming unit leaves no room
                // for it within chunk_size
                let take = self
                    .chunk_overlap
                    .min(self.chunk_size.saturating_sub(unit_len));
                let overlap = tail_chars(&current, take);
                chunks.push(std::mem::replace(&mut current, overlap));
                current_len = char_len(&current);
            }

            current.push_str(&unit);
            current_len += unit_len;
        }

        if !current.is_empty() {
            chunks.push(current);
        }

        chunks
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// The last `n` characters of `s` (the whole string if shorter).
fn tail_chars(s: &str, n: usize) -> String {
    let len = char_len(s);
    if len <= n {
        s.to_string()
    } else {
        s.chars().skip(len - n).collect()
    }
}
