//! Language-model integration crate for docqa.
//!
//! This crate provides a provider-agnostic abstraction for invoking
//! Large Language Models. It supports multiple providers through a
//! unified trait-based interface, so the pipeline can swap the real
//! service for a deterministic test double.
//!
//! # Providers
//! - **Groq**: OpenAI-compatible hosted API (default)
//! - **Ollama**: Local LLM runtime
//!
//! # Example
//! ```no_run
//! use docqa_llm::{LlmClient, LlmRequest, providers::OllamaClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OllamaClient::new();
//! let request = LlmRequest::new("Hello, world!", "llama3.2");
//! let response = client.complete(&request).await?;
//! println!("{}", response.content);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod factory;
pub mod providers;

// Re-export main types
pub use client::{LlmClient, LlmRequest, LlmResponse, LlmUsage};
pub use factory::create_client;
pub use providers::{GroqClient, OllamaClient};
