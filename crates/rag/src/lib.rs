//! Retrieval-augmented question answering over a single document.
//!
//! The pipeline: extract → chunk → embed → index (build phase, once per
//! document), then question → embed → search → prompt → answer (query phase).
//! All state lives in an explicit [`Session`] holding at most one active
//! index, replaced wholesale whenever a new document is processed.

pub mod answer;
pub mod chunker;
pub mod embeddings;
pub mod extract;
pub mod index;
pub mod pipeline;
pub mod retriever;
pub mod session;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use chunker::TextChunker;
pub use embeddings::{create_embedder, Embedder};
pub use extract::{extract, SourceKind};
pub use index::{InMemoryIndex, VectorIndex};
pub use pipeline::Pipeline;
pub use retriever::Retriever;
pub use session::Session;
pub use types::{Answer, BuildStats, Chunk, Document, DocumentMetadata, ScoredChunk};
