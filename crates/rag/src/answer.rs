//! Grounded answer generation.
//!
//! Assembles retrieved context and the question into a fixed-template
//! prompt instructing the model to answer using ONLY the supplied context,
//! then invokes the language model with greedy decoding.

use docqa_core::RagResult;
use docqa_llm::{LlmClient, LlmRequest};

use crate::types::ScoredChunk;

/// Greedy decoding: minimizes hallucinated variance across runs.
const ANSWER_TEMPERATURE: f32 = 0.0;

/// Join retrieved chunk contents, in retrieval order, into one context
/// block separated by newlines.
pub fn build_context(retrieved: &[ScoredChunk]) -> String {
    retrieved
        .iter()
        .map(|scored| scored.chunk.content.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build the grounded prompt from a context block and the question.
pub fn build_prompt(question: &str, context: &str) -> String {
    format!(
        "You are an assistant. Answer using ONLY the context below.\n\
         \n\
         CONTEXT:\n\
         {context}\n\
         \n\
         QUESTION:\n\
         {question}\n\
         \n\
         Answer clearly."
    )
}

/// Generate an answer grounded in the retrieved chunks.
///
/// A single attempt with `temperature = 0`; the model's raw text response
/// is returned unmodified. When `retrieved` is empty the model is still
/// invoked with an empty context block and reports the absence itself —
/// the prompt already forbids answering from anything but the context.
///
/// # Errors
/// `RagError::Generation` for transport/auth/rate-limit failures from the
/// model service, `RagError::Timeout` when the call exceeds its allotted
/// time.
pub async fn generate(
    question: &str,
    retrieved: &[ScoredChunk],
    client: &dyn LlmClient,
    model: &str,
) -> RagResult<String> {
    let context = build_context(retrieved);
    let prompt = build_prompt(question, &context);

    tracing::debug!(
        context_chunks = retrieved.len(),
        prompt_len = prompt.len(),
        model = %model,
        "Generating answer"
    );

    let request = LlmRequest::new(prompt, model).with_temperature(ANSWER_TEMPERATURE);
    let response = client.complete(&request).await?;

    Ok(response.content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Chunk, DocumentMetadata};

    fn scored(content: &str, score: f32) -> ScoredChunk {
        ScoredChunk {
            chunk: Chunk {
                content: content.to_string(),
                metadata: DocumentMetadata {
                    source: "test.txt".to_string(),
                },
            },
            score,
        }
    }

    #[test]
    fn test_build_context_joins_in_retrieval_order() {
        let retrieved = vec![scored("first chunk", 0.9), scored("second chunk", 0.7)];
        assert_eq!(build_context(&retrieved), "first chunk\nsecond chunk");
    }

    #[test]
    fn test_build_context_empty() {
        assert_eq!(build_context(&[]), "");
    }

    #[test]
    fn test_prompt_contains_context_and_question() {
        let prompt = build_prompt("what are SQL commands", "SQL has commands: SELECT.");

        assert!(prompt.contains("Answer using ONLY the context below."));
        assert!(prompt.contains("CONTEXT:\nSQL has commands: SELECT.\n"));
        assert!(prompt.contains("QUESTION:\nwhat are SQL commands\n"));
        assert!(prompt.ends_with("Answer clearly."));
    }

    #[test]
    fn test_prompt_with_empty_context_is_still_well_formed() {
        let prompt = build_prompt("anything?", "");
        assert!(prompt.contains("CONTEXT:\n\n"));
        assert!(prompt.contains("QUESTION:\nanything?"));
    }
}
