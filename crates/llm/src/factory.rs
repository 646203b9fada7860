//! LLM provider factory.
//!
//! This module provides a factory for creating LLM clients based on
//! application configuration. It handles provider resolution and
//! credential checks at startup, before any question is asked.

use crate::client::LlmClient;
use crate::providers::{GroqClient, OllamaClient};
use docqa_core::{RagError, RagResult};
use std::sync::Arc;
use std::time::Duration;

/// Create an LLM client based on the provider name.
///
/// # Arguments
/// * `provider` - Provider identifier ("groq", "ollama")
/// * `endpoint` - Optional custom endpoint URL
/// * `api_key` - Optional API key (required for providers that use one)
/// * `timeout` - Request timeout for upstream calls
///
/// # Errors
/// Returns `RagError::Config` if:
/// - The provider is unknown
/// - A required API key is missing (fail fast at startup)
pub fn create_client(
    provider: &str,
    endpoint: Option<&str>,
    api_key: Option<&str>,
    timeout: Duration,
) -> RagResult<Arc<dyn LlmClient>> {
    match provider.to_lowercase().as_str() {
        "groq" => {
            let api_key = api_key.ok_or_else(|| {
                RagError::Config(
                    "GROQ_API_KEY not found. Set it in the environment to use the Groq provider."
                        .to_string(),
                )
            })?;
            let client = match endpoint {
                Some(url) => GroqClient::with_base_url(api_key, url, timeout)?,
                None => GroqClient::new(api_key, timeout)?,
            };
            Ok(Arc::new(client))
        }
        "ollama" => {
            let base_url = endpoint.unwrap_or("http://localhost:11434");
            let client = OllamaClient::with_base_url(base_url, timeout);
            Ok(Arc::new(client))
        }
        _ => Err(RagError::Config(format!(
            "Unknown LLM provider: '{}'. Supported providers: groq, ollama",
            provider
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMEOUT: Duration = Duration::from_secs(30);

    #[test]
    fn test_create_groq_client() {
        let client = create_client("groq", None, Some("test-key"), TIMEOUT);
        assert!(client.is_ok());
        assert_eq!(client.unwrap().provider_name(), "groq");
    }

    #[test]
    fn test_groq_requires_api_key() {
        match create_client("groq", None, None, TIMEOUT) {
            Err(RagError::Config(msg)) => assert!(msg.contains("GROQ_API_KEY")),
            other => panic!("Expected Config error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_create_ollama_client() {
        let client = create_client("ollama", None, None, TIMEOUT);
        assert!(client.is_ok());
    }

    #[test]
    fn test_create_ollama_with_custom_endpoint() {
        let client = create_client("ollama", Some("http://localhost:8080"), None, TIMEOUT);
        assert!(client.is_ok());
    }

    #[test]
    fn test_unknown_provider() {
        match create_client("unknown", None, None, TIMEOUT) {
            Err(RagError::Config(msg)) => assert!(msg.contains("Unknown LLM provider")),
            other => panic!("Expected Config error, got {:?}", other.map(|_| ())),
        }
    }
}
