//! Pipeline type definitions.

use serde::{Deserialize, Serialize};

/// Metadata attached to a document and inherited by every derived chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Source identifier (the uploaded file's name)
    pub source: String,
}

/// A source document. Immutable once created; one per uploaded file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Full extracted text content
    pub content: String,

    /// Source metadata
    pub metadata: DocumentMetadata,
}

impl Document {
    /// Create a document from content and a source identifier.
    pub fn new(content: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            metadata: DocumentMetadata {
                source: source.into(),
            },
        }
    }
}

/// A bounded text segment derived from a document; the atomic unit of
/// embedding and retrieval. Ordering within a document follows the
/// document sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// Text content (at most `chunk_size` chars, except indivisible units)
    pub content: String,

    /// Metadata copied unchanged from the parent document
    pub metadata: DocumentMetadata,
}

/// A retrieved chunk paired with its similarity score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredChunk {
    /// The retrieved chunk
    pub chunk: Chunk,

    /// Cosine similarity to the query (higher is more relevant)
    pub score: f32,
}

/// The result of a question: the model's answer plus the raw retrieved
/// context, so the boundary can show it for inspection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    /// The model's text response, unmodified
    pub text: String,

    /// The chunks the answer was grounded in, in retrieval order
    pub context: Vec<ScoredChunk>,
}

/// Statistics from a successful build phase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildStats {
    /// Source identifier of the processed document
    pub source: String,

    /// Number of chunks indexed
    pub chunk_count: usize,

    /// Embedding vector dimension of the index
    pub dimensions: usize,
}
