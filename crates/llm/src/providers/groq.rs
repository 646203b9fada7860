//! Groq LLM provider implementation.
//!
//! Groq exposes an OpenAI-compatible chat-completions API.
//! API reference: https://console.groq.com/docs/api-reference

use crate::client::{LlmClient, LlmRequest, LlmResponse, LlmUsage};
use docqa_core::{RagError, RagResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default base URL for the Groq API.
const DEFAULT_GROQ_URL: &str = "https://api.groq.com/openai/v1";

/// One chat message in the OpenAI-compatible wire format.
#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

/// Groq chat-completions request format.
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

/// Groq chat-completions response format.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    model: String,
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
}

/// Groq LLM client.
pub struct GroqClient {
    /// Base URL for the Groq API
    base_url: String,

    /// API key (bearer auth)
    api_key: String,

    /// HTTP client
    client: reqwest::Client,
}

impl GroqClient {
    /// Create a new Groq client with the default endpoint.
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> RagResult<Self> {
        Self::with_base_url(api_key, DEFAULT_GROQ_URL, timeout)
    }

    /// Create a new Groq client with a custom base URL.
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> RagResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RagError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            client,
        })
    }

    /// Convert LlmRequest to the OpenAI-compatible chat format.
    fn to_chat_request(&self, request: &LlmRequest) -> ChatRequest {
        let mut messages = Vec::new();
        if let Some(system) = &request.system {
            messages.push(ChatMessage {
                role: "system".to_string(),
                content: system.clone(),
            });
        }
        messages.push(ChatMessage {
            role: "user".to_string(),
            content: request.prompt.clone(),
        });

        ChatRequest {
            model: request.model.clone(),
            messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        }
    }

    /// Convert a chat response to LlmResponse.
    fn convert_response(&self, response: ChatResponse) -> RagResult<LlmResponse> {
        let content = response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| RagError::Generation("Groq returned no choices".to_string()))?;

        let usage = response
            .usage
            .map(|u| LlmUsage::new(u.prompt_tokens, u.completion_tokens))
            .unwrap_or_default();

        Ok(LlmResponse {
            content,
            model: response.model,
            usage,
        })
    }
}

#[async_trait::async_trait]
impl LlmClient for GroqClient {
    fn provider_name(&self) -> &str {
        "groq"
    }

    async fn complete(&self, request: &LlmRequest) -> RagResult<LlmResponse> {
        tracing::info!("Sending completion request to Groq");
        tracing::debug!(model = %request.model, prompt_len = request.prompt.len());

        let chat_request = self.to_chat_request(request);
        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&chat_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    RagError::Timeout(format!("Groq request timed out: {}", e))
                } else {
                    RagError::Generation(format!("Failed to send request to Groq: {}", e))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(RagError::Generation(format!(
                "Groq API error ({}): {}",
                status, error_text
            )));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| RagError::Generation(format!("Failed to parse Groq response: {}", e)))?;

        tracing::info!("Received completion from Groq");

        self.convert_response(chat_response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> GroqClient {
        GroqClient::new("test-key", Duration::from_secs(30)).unwrap()
    }

    #[test]
    fn test_groq_client_creation() {
        let client = test_client();
        assert_eq!(client.provider_name(), "groq");
        assert_eq!(client.base_url, DEFAULT_GROQ_URL);
    }

    #[test]
    fn test_chat_request_conversion() {
        let client = test_client();
        let request = LlmRequest::new("What are SQL commands?", "llama-3.3-70b-versatile")
            .with_temperature(0.0)
            .with_max_tokens(1000);

        let chat = client.to_chat_request(&request);
        assert_eq!(chat.model, "llama-3.3-70b-versatile");
        assert_eq!(chat.messages.len(), 1);
        assert_eq!(chat.messages[0].role, "user");
        assert_eq!(chat.messages[0].content, "What are SQL commands?");
        assert_eq!(chat.temperature, Some(0.0));
        assert_eq!(chat.max_tokens, Some(1000));
    }

    #[test]
    fn test_chat_request_with_system_prompt() {
        let client = test_client();
        let request = LlmRequest::new("Hi", "llama-3.3-70b-versatile").with_system("Be terse.");

        let chat = client.to_chat_request(&request);
        assert_eq!(chat.messages.len(), 2);
        assert_eq!(chat.messages[0].role, "system");
        assert_eq!(chat.messages[1].role, "user");
    }

    #[test]
    fn test_response_conversion() {
        let client = test_client();
        let response = ChatResponse {
            model: "llama-3.3-70b-versatile".to_string(),
            choices: vec![ChatChoice {
                message: ChatMessage {
                    role: "assistant".to_string(),
                    content: "SELECT, INSERT, UPDATE, DELETE".to_string(),
                },
            }],
            usage: Some(ChatUsage {
                prompt_tokens: 50,
                completion_tokens: 10,
            }),
        };

        let converted = client.convert_response(response).unwrap();
        assert_eq!(converted.content, "SELECT, INSERT, UPDATE, DELETE");
        assert_eq!(converted.usage.total_tokens, 60);
    }

    #[test]
    fn test_response_without_choices_is_an_error() {
        let client = test_client();
        let response = ChatResponse {
            model: "llama-3.3-70b-versatile".to_string(),
            choices: vec![],
            usage: None,
        };

        let result = client.convert_response(response);
        assert!(matches!(result, Err(RagError::Generation(_))));
    }
}
