//! End-to-end pipeline orchestration.
//!
//! Build phase (once per document): extract → chunk → embed → index.
//! Query phase: question → embed → search → prompt → answer.

use docqa_core::RagResult;
use docqa_llm::LlmClient;
use std::sync::Arc;

use crate::answer;
use crate::chunker::TextChunker;
use crate::embeddings::Embedder;
use crate::extract::{extract, SourceKind};
use crate::index::{InMemoryIndex, VectorIndex};
use crate::retriever::Retriever;
use crate::session::Session;
use crate::types::{Answer, BuildStats};

/// The assembled RAG pipeline.
///
/// Holds the chunker and the two service clients; all per-document state
/// lives in the [`Session`] passed to each call.
pub struct Pipeline {
    chunker: TextChunker,
    embedder: Arc<dyn Embedder>,
    retriever: Retriever,
    llm: Arc<dyn LlmClient>,
    model: String,
}

impl Pipeline {
    /// Assemble a pipeline from its collaborators.
    pub fn new(
        chunker: TextChunker,
        embedder: Arc<dyn Embedder>,
        llm: Arc<dyn LlmClient>,
        model: impl Into<String>,
        top_k: usize,
    ) -> Self {
        let retriever = Retriever::new(Arc::clone(&embedder), top_k);
        Self {
            chunker,
            embedder,
            retriever,
            llm,
            model: model.into(),
        }
    }

    /// Run the build phase: extract the document, chunk it, embed the
    /// chunks, build a fresh index, and install it into the session.
    ///
    /// The session is only touched after the new index is fully built, so
    /// a failure at any stage leaves the prior index (if any) intact and
    /// a partially built index is never visible to queries.
    pub async fn process_document(
        &self,
        bytes: &[u8],
        kind: SourceKind,
        source: &str,
        session: &mut Session,
    ) -> RagResult<BuildStats> {
        tracing::info!(source = %source, bytes = bytes.len(), "Processing document");

        let document = extract(bytes, kind, source)?;
        let chunks = self.chunker.split_documents(std::slice::from_ref(&document));

        let vectors = if chunks.is_empty() {
            Vec::new()
        } else {
            let texts: Vec<String> = chunks.iter().map(|c| c.content.clone()).collect();
            self.embedder.embed_batch(&texts).await?
        };

        let index = InMemoryIndex::build(chunks, vectors)?;
        let stats = BuildStats {
            source: document.metadata.source,
            chunk_count: index.len(),
            dimensions: index.dimensions(),
        };

        session.install(index);

        tracing::info!(
            source = %stats.source,
            chunks = stats.chunk_count,
            dimensions = stats.dimensions,
            "Document indexed"
        );

        Ok(stats)
    }

    /// Run the query phase: retrieve relevant chunks and generate a
    /// grounded answer.
    pub async fn ask(&self, question: &str, session: &Session) -> RagResult<Answer> {
        let retrieved = self.retriever.retrieve(question, session).await?;
        let text = answer::generate(question, &retrieved, self.llm.as_ref(), &self.model).await?;

        Ok(Answer {
            text,
            context: retrieved,
        })
    }
}
