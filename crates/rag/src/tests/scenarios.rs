//! Whole-pipeline scenarios: build a document index with the mock
//! embedder, ask questions through an echoing language-model stub, and
//! check what the model was actually shown.

use docqa_core::{RagError, RagResult};
use docqa_llm::{LlmClient, LlmRequest, LlmResponse, LlmUsage};
use std::sync::{Arc, Mutex};

use crate::chunker::TextChunker;
use crate::embeddings::providers::MockEmbedder;
use crate::extract::SourceKind;
use crate::pipeline::Pipeline;
use crate::session::Session;

/// Language-model stub that echoes its prompt back as the answer and
/// records every request it receives.
#[derive(Debug, Default)]
struct EchoClient {
    requests: Mutex<Vec<LlmRequest>>,
}

impl EchoClient {
    fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn last_request(&self) -> LlmRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request recorded")
    }
}

#[async_trait::async_trait]
impl LlmClient for EchoClient {
    fn provider_name(&self) -> &str {
        "echo"
    }

    async fn complete(&self, request: &LlmRequest) -> RagResult<LlmResponse> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(LlmResponse {
            content: request.prompt.clone(),
            model: request.model.clone(),
            usage: LlmUsage::default(),
        })
    }
}

fn pipeline(llm: Arc<EchoClient>, chunk_size: usize, chunk_overlap: usize) -> Pipeline {
    Pipeline::new(
        TextChunker::new(chunk_size, chunk_overlap).unwrap(),
        Arc::new(MockEmbedder::new(128)),
        llm,
        "test-model",
        4,
    )
}

#[tokio::test]
async fn test_sql_document_is_retrieved_and_shown_to_the_model() {
    let document = "SQL has commands: SELECT, INSERT, UPDATE, DELETE.";
    let llm = EchoClient::new();
    let pipeline = pipeline(Arc::clone(&llm), 500, 50);
    let mut session = Session::new();

    let stats = pipeline
        .process_document(document.as_bytes(), SourceKind::Text, "sql.txt", &mut session)
        .await
        .unwrap();
    assert_eq!(stats.chunk_count, 1);
    assert_eq!(stats.source, "sql.txt");

    let answer = pipeline
        .ask("what are SQL commands", &session)
        .await
        .unwrap();

    // The one chunk is retrieved verbatim
    assert_eq!(answer.context.len(), 1);
    assert_eq!(answer.context[0].chunk.content, document);
    assert_eq!(answer.context[0].chunk.metadata.source, "sql.txt");

    // The stub echoes its prompt, so the original document text must
    // appear inside the CONTEXT section the model received
    let request = llm.last_request();
    assert!(request.prompt.contains(&format!("CONTEXT:\n{}", document)));
    assert!(request.prompt.contains("QUESTION:\nwhat are SQL commands"));
    assert_eq!(request.temperature, Some(0.0));
    assert_eq!(request.model, "test-model");
    assert_eq!(answer.text, request.prompt);
}

#[tokio::test]
async fn test_empty_file_builds_empty_index_and_still_answers() {
    let llm = EchoClient::new();
    let pipeline = pipeline(Arc::clone(&llm), 500, 50);
    let mut session = Session::new();

    let stats = pipeline
        .process_document(b"", SourceKind::Text, "empty.txt", &mut session)
        .await
        .unwrap();
    assert_eq!(stats.chunk_count, 0);

    // Empty retrieval still invokes the model with an empty context block
    let answer = pipeline.ask("is there anything here?", &session).await.unwrap();
    assert!(answer.context.is_empty());

    let request = llm.last_request();
    assert!(request.prompt.contains("CONTEXT:\n\n"));
}

#[tokio::test]
async fn test_reprocessing_replaces_the_index_entirely() {
    let first = "The capital of France is Paris. Paris is known for the Eiffel Tower.";
    let second = "Sourdough bread needs flour, water, salt, and a ripe starter culture.";

    let llm = EchoClient::new();
    let pipeline = pipeline(Arc::clone(&llm), 500, 50);
    let mut session = Session::new();

    pipeline
        .process_document(first.as_bytes(), SourceKind::Text, "france.txt", &mut session)
        .await
        .unwrap();

    let answer = pipeline.ask("what is the capital of France", &session).await.unwrap();
    assert!(answer
        .context
        .iter()
        .any(|scored| scored.chunk.content.contains("Paris")));

    pipeline
        .process_document(second.as_bytes(), SourceKind::Text, "bread.txt", &mut session)
        .await
        .unwrap();

    // The first document must be gone: no retrieved chunk mentions it,
    // and every chunk carries the new source
    let answer = pipeline.ask("what is the capital of France", &session).await.unwrap();
    assert!(!answer.context.is_empty());
    for scored in &answer.context {
        assert!(!scored.chunk.content.contains("Paris"));
        assert_eq!(scored.chunk.metadata.source, "bread.txt");
    }
}

#[tokio::test]
async fn test_retrieval_is_deterministic_across_rebuilds() {
    let document = "Generative AI has a lifecycle. First collect data. \
                    Then train a model. Then evaluate the model. \
                    Then deploy it to users. Then monitor it in production.";
    let question = "explain the generative ai lifecycle";

    let llm = EchoClient::new();
    let pipeline = pipeline(Arc::clone(&llm), 60, 15);

    let mut first_run = Vec::new();
    let mut second_run = Vec::new();
    for run in [&mut first_run, &mut second_run] {
        let mut session = Session::new();
        pipeline
            .process_document(document.as_bytes(), SourceKind::Text, "ai.txt", &mut session)
            .await
            .unwrap();
        let answer = pipeline.ask(question, &session).await.unwrap();
        *run = answer
            .context
            .iter()
            .map(|scored| (scored.chunk.content.clone(), scored.score))
            .collect();
    }

    assert!(!first_run.is_empty());
    assert_eq!(first_run, second_run);
}

#[tokio::test]
async fn test_ask_before_processing_is_no_index_error() {
    let llm = EchoClient::new();
    let pipeline = pipeline(Arc::clone(&llm), 500, 50);
    let session = Session::new();

    let result = pipeline.ask("anything", &session).await;
    assert!(matches!(result, Err(RagError::NoIndex)));

    // The model is never invoked when retrieval fails
    assert!(llm.requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_invalid_utf8_upload_fails_without_touching_the_session() {
    let llm = EchoClient::new();
    let pipeline = pipeline(Arc::clone(&llm), 500, 50);
    let mut session = Session::new();

    pipeline
        .process_document(b"good document", SourceKind::Text, "good.txt", &mut session)
        .await
        .unwrap();

    let result = pipeline
        .process_document(&[0xff, 0xfe], SourceKind::Text, "bad.txt", &mut session)
        .await;
    assert!(matches!(result, Err(RagError::Decoding(_))));

    // The prior index survives a failed rebuild
    assert!(session.has_index());
    let answer = pipeline.ask("good", &session).await.unwrap();
    assert!(answer
        .context
        .iter()
        .all(|scored| scored.chunk.metadata.source == "good.txt"));
}
