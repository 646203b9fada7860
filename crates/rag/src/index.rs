//! In-memory vector index with cosine-similarity search.
//!
//! The index is immutable after [`InMemoryIndex::build`]; reprocessing a
//! new document builds a fresh index that replaces the prior one entirely.

use docqa_core::{RagError, RagResult};

use crate::types::{Chunk, ScoredChunk};

/// Trait for nearest-neighbor search over indexed chunks.
///
/// The one seam the retriever depends on, so alternative backends (or test
/// doubles) can stand in for the in-memory index.
pub trait VectorIndex: Send + Sync {
    /// Number of indexed chunks.
    fn len(&self) -> usize;

    /// Whether the index holds no chunks.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Embedding dimension of the indexed vectors.
    fn dimensions(&self) -> usize;

    /// Return the `k` chunks most similar to the query vector, ordered by
    /// descending similarity.
    fn search(&self, query: &[f32], k: usize) -> RagResult<Vec<ScoredChunk>>;
}

/// An in-memory index over (chunk, vector) pairs.
///
/// Similarity metric: **cosine similarity**. Ties are broken by insertion
/// order (first-indexed wins), and `k` is clamped to the index size.
#[derive(Debug, Clone, Default)]
pub struct InMemoryIndex {
    entries: Vec<(Chunk, Vec<f32>)>,
    dimensions: usize,
}

impl InMemoryIndex {
    /// Build an index from parallel chunk and vector sequences.
    ///
    /// # Errors
    /// - `RagError::Embedding` when the sequences differ in length
    /// - `RagError::DimensionMismatch` when any vector's length differs
    ///   from the first vector's
    pub fn build(chunks: Vec<Chunk>, vectors: Vec<Vec<f32>>) -> RagResult<Self> {
        if chunks.len() != vectors.len() {
            return Err(RagError::Embedding(format!(
                "Expected {} vectors for {} chunks, got {}",
                chunks.len(),
                chunks.len(),
                vectors.len()
            )));
        }

        let dimensions = vectors.first().map(Vec::len).unwrap_or(0);
        for vector in &vectors {
            if vector.len() != dimensions {
                return Err(RagError::DimensionMismatch {
                    expected: dimensions,
                    actual: vector.len(),
                });
            }
        }

        tracing::debug!(chunks = chunks.len(), dimensions, "Built vector index");

        Ok(Self {
            entries: chunks.into_iter().zip(vectors).collect(),
            dimensions,
        })
    }
}

impl VectorIndex for InMemoryIndex {
    fn len(&self) -> usize {
        self.entries.len()
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn search(&self, query: &[f32], k: usize) -> RagResult<Vec<ScoredChunk>> {
        // An empty index has no fixed dimensionality; any query yields
        // an empty result, never an error
        if self.entries.is_empty() {
            return Ok(Vec::new());
        }

        if query.len() != self.dimensions {
            return Err(RagError::DimensionMismatch {
                expected: self.dimensions,
                actual: query.len(),
            });
        }

        let mut scored: Vec<ScoredChunk> = self
            .entries
            .iter()
            .map(|(chunk, vector)| ScoredChunk {
                chunk: chunk.clone(),
                score: cosine_similarity(vector, query),
            })
            .collect();

        // Stable sort keeps insertion order among equal scores
        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(k);

        Ok(scored)
    }
}

/// Cosine similarity between two vectors of equal length.
///
/// Returns 0.0 if either vector has zero magnitude.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}
