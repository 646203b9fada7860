//! Session state: the one active vector index.
//!
//! An explicit context object passed to the retriever instead of ambient
//! global state. The index is replaced wholesale on reprocessing — never
//! mutated in place — and only installed after it is fully built, so a
//! half-built index is never visible to a query.

use crate::index::VectorIndex;

/// Per-session pipeline state holding at most one active vector index.
#[derive(Default)]
pub struct Session {
    index: Option<Box<dyn VectorIndex>>,
}

impl Session {
    /// Create a session with no index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a fully built index, replacing any prior one entirely.
    pub fn install(&mut self, index: impl VectorIndex + 'static) {
        self.index = Some(Box::new(index));
    }

    /// Drop the active index, if any.
    pub fn clear(&mut self) {
        self.index = None;
    }

    /// The active index, if a document has been processed.
    pub fn index(&self) -> Option<&dyn VectorIndex> {
        self.index.as_deref()
    }

    /// Whether a document has been processed in this session.
    pub fn has_index(&self) -> bool {
        self.index.is_some()
    }
}
