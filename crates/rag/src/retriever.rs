//! Top-K retrieval: query embedding plus index search.

use docqa_core::{RagError, RagResult};
use std::sync::Arc;

use crate::embeddings::Embedder;
use crate::session::Session;
use crate::types::ScoredChunk;

/// Orchestrates query embedding and index search.
///
/// Stateless: all retrieval state lives in the session it is given.
pub struct Retriever {
    embedder: Arc<dyn Embedder>,
    top_k: usize,
}

impl Retriever {
    /// Create a retriever with the given embedder and retrieval depth.
    pub fn new(embedder: Arc<dyn Embedder>, top_k: usize) -> Self {
        Self { embedder, top_k }
    }

    /// Retrieve the chunks most relevant to the question from the
    /// session's index.
    ///
    /// # Errors
    /// `RagError::NoIndex` when the session has no built index yet.
    pub async fn retrieve(&self, question: &str, session: &Session) -> RagResult<Vec<ScoredChunk>> {
        let index = session.index().ok_or(RagError::NoIndex)?;

        let query = self.embedder.embed(question).await?;
        let results = index.search(&query, self.top_k)?;

        tracing::debug!(
            question_len = question.len(),
            retrieved = results.len(),
            top_score = results.first().map(|r| r.score),
            "Retrieval complete"
        );

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embeddings::providers::MockEmbedder;
    use crate::index::InMemoryIndex;
    use crate::types::{Chunk, DocumentMetadata};

    fn chunk(content: &str) -> Chunk {
        Chunk {
            content: content.to_string(),
            metadata: DocumentMetadata {
                source: "test.txt".to_string(),
            },
        }
    }

    #[tokio::test]
    async fn test_retrieve_without_index_is_no_index_error() {
        let retriever = Retriever::new(Arc::new(MockEmbedder::new(64)), 4);
        let session = Session::new();

        let result = retriever.retrieve("anything", &session).await;
        assert!(matches!(result, Err(RagError::NoIndex)));
    }

    #[tokio::test]
    async fn test_retrieve_is_clamped_and_ordered() {
        let embedder = Arc::new(MockEmbedder::new(64));
        let contents = ["relational databases", "vector search"];
        let vectors = {
            let texts: Vec<String> = contents.iter().map(|s| s.to_string()).collect();
            embedder.embed_batch(&texts).await.unwrap()
        };
        let index =
            InMemoryIndex::build(contents.iter().map(|c| chunk(c)).collect(), vectors).unwrap();

        let mut session = Session::new();
        session.install(index);

        let retriever = Retriever::new(embedder, 5);
        let results = retriever
            .retrieve("databases and tables", &session)
            .await
            .unwrap();

        // Two chunks indexed, k=5: exactly two results, best first
        assert_eq!(results.len(), 2);
        assert!(results[0].score >= results[1].score);
    }
}
