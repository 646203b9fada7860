//! Error types for the docqa pipeline.
//!
//! This module defines a unified error enum covering every failure category
//! in the pipeline: extraction, decoding, embedding, indexing, retrieval,
//! generation, and the surrounding configuration and I/O concerns.

use thiserror::Error;

/// Unified error type for the docqa pipeline.
///
/// Every pipeline stage fails fast and surfaces its error to the immediate
/// caller. We never panic — errors must be represented and propagated.
#[derive(Error, Debug)]
pub enum RagError {
    /// Uploaded bytes are not valid for the declared type (e.g., corrupt PDF)
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// Text bytes are not valid UTF-8
    #[error("Decoding error: {0}")]
    Decoding(String),

    /// The embedding service rejected or errored on input
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// Vectors of inconsistent length reached the index
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// A query was attempted before any successful index build
    #[error("No index available; process a file first")]
    NoIndex,

    /// The language-model call failed (transport, auth, rate limit)
    #[error("Generation error: {0}")]
    Generation(String),

    /// An upstream service exceeded its allotted time
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for RagError {
    fn from(err: serde_json::Error) -> Self {
        RagError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for RagError {
    fn from(err: serde_yaml::Error) -> Self {
        RagError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with RagError.
pub type RagResult<T> = Result<T, RagError>;
