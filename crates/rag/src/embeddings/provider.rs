//! Embedding provider trait and factory.

use docqa_core::{RagError, RagResult};
use std::sync::Arc;

/// Trait for embedding providers.
///
/// Implementations must be deterministic: the same input always yields the
/// same output vector for a fixed provider and model. Empty input is
/// rejected with [`RagError::Embedding`] rather than silently embedded.
#[async_trait::async_trait]
pub trait Embedder: Send + Sync + std::fmt::Debug {
    /// Get provider name (e.g., "mock", "ollama")
    fn provider_name(&self) -> &str;

    /// Get model identifier
    fn model_name(&self) -> &str;

    /// Get embedding dimensions
    fn dimensions(&self) -> usize;

    /// Generate embeddings for multiple texts in one batch, preserving
    /// input order.
    async fn embed_batch(&self, texts: &[String]) -> RagResult<Vec<Vec<f32>>>;

    /// Generate embedding for a single text (convenience method).
    async fn embed(&self, text: &str) -> RagResult<Vec<f32>> {
        let mut results = self.embed_batch(&[text.to_string()]).await?;
        results
            .pop()
            .ok_or_else(|| RagError::Embedding("No embedding returned".to_string()))
    }
}

/// Reject empty or whitespace-only inputs before they reach a provider.
pub(crate) fn reject_empty(texts: &[String]) -> RagResult<()> {
    for text in texts {
        if text.trim().is_empty() {
            return Err(RagError::Embedding(
                "Cannot embed empty text".to_string(),
            ));
        }
    }
    Ok(())
}

/// Create an embedding provider by name.
///
/// # Arguments
/// * `provider` - Provider identifier ("mock", "ollama")
/// * `model` - Model identifier for providers that use one
/// * `dimensions` - Expected embedding vector dimension
/// * `endpoint` - Optional custom endpoint URL
pub async fn create_embedder(
    provider: &str,
    model: &str,
    dimensions: usize,
    endpoint: Option<&str>,
) -> RagResult<Arc<dyn Embedder>> {
    match provider.to_lowercase().as_str() {
        "mock" => {
            let embedder = super::providers::mock::MockEmbedder::new(dimensions);
            Ok(Arc::new(embedder))
        }

        "ollama" => {
            let embedder =
                super::providers::ollama::OllamaEmbedder::new(model, dimensions, endpoint).await?;
            Ok(Arc::new(embedder))
        }

        _ => Err(RagError::Config(format!(
            "Unknown embedding provider: '{}'. Supported providers: mock, ollama",
            provider
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_mock_embedder() {
        let embedder = create_embedder("mock", "trigram-v1", 384, None).await.unwrap();
        assert_eq!(embedder.provider_name(), "mock");
        assert_eq!(embedder.dimensions(), 384);
    }

    #[tokio::test]
    async fn test_create_unknown_provider() {
        let result = create_embedder("unknown", "x", 384, None).await;
        assert!(matches!(result, Err(RagError::Config(_))));
    }

    #[tokio::test]
    async fn test_embed_single_delegates_to_batch() {
        let embedder = create_embedder("mock", "trigram-v1", 384, None).await.unwrap();
        let embedding = embedder.embed("test text").await.unwrap();
        assert_eq!(embedding.len(), 384);
    }

    #[test]
    fn test_reject_empty() {
        assert!(reject_empty(&["ok".to_string()]).is_ok());
        assert!(reject_empty(&["".to_string()]).is_err());
        assert!(reject_empty(&["  \n ".to_string()]).is_err());
    }
}
