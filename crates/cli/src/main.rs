//! docqa CLI
//!
//! Main entry point for the docqa command-line tool.
//! Loads a document, builds an in-memory vector index over it, and answers
//! questions grounded in the retrieved chunks.

mod repl;

use clap::Parser;
use docqa_core::{config::AppConfig, logging, RagResult};
use docqa_llm::create_client;
use docqa_rag::{create_embedder, Pipeline, Session, TextChunker};
use std::path::PathBuf;
use std::time::Duration;

/// docqa - question answering over a single document
#[derive(Parser, Debug)]
#[command(name = "docqa")]
#[command(about = "Ask questions about a PDF or text document", long_about = None)]
#[command(version)]
struct Cli {
    /// Document to load before the first question
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Print the retrieved chunks alongside each answer
    #[arg(long)]
    show_context: bool,

    /// Path to config file
    #[arg(short, long, env = "DOCQA_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR")]
    no_color: bool,

    /// LLM provider (groq, ollama)
    #[arg(short, long, env = "DOCQA_PROVIDER")]
    provider: Option<String>,

    /// Model identifier
    #[arg(short, long, env = "DOCQA_MODEL")]
    model: Option<String>,

    /// Embedding provider (ollama, mock)
    #[arg(long)]
    embedding_provider: Option<String>,

    /// Embedding model identifier
    #[arg(long)]
    embedding_model: Option<String>,

    /// Embedding vector dimension
    #[arg(long)]
    embedding_dimensions: Option<usize>,

    /// Maximum characters per chunk
    #[arg(long)]
    chunk_size: Option<usize>,

    /// Overlap between consecutive chunks in characters
    #[arg(long)]
    chunk_overlap: Option<usize>,

    /// Number of chunks retrieved per question
    #[arg(short = 'k', long)]
    top_k: Option<usize>,
}

#[tokio::main]
async fn main() -> RagResult<()> {
    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    // Load base configuration from file and environment
    let config = AppConfig::load(cli.config)?;

    // Apply CLI overrides
    let mut config = config.with_overrides(
        cli.provider,
        cli.model,
        cli.embedding_provider,
        cli.top_k,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );
    if let Some(model) = cli.embedding_model {
        config.embedding_model = model;
    }
    if let Some(dimensions) = cli.embedding_dimensions {
        config.embedding_dimensions = dimensions;
    }
    if let Some(chunk_size) = cli.chunk_size {
        config.chunk_size = chunk_size;
    }
    if let Some(chunk_overlap) = cli.chunk_overlap {
        config.chunk_overlap = chunk_overlap;
    }
    config.validate()?;

    // Initialize logging with final configuration
    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    tracing::info!("docqa starting");
    tracing::debug!("Provider: {}", config.provider);
    tracing::debug!("Model: {}", config.model);
    tracing::debug!("Embedding provider: {}", config.embedding_provider);

    // Fail fast: provider clients are created before any input is read,
    // so a missing API key or unreachable embedding service is reported
    // at startup rather than on the first question.
    let timeout = Duration::from_secs(config.timeout_secs);
    let llm = create_client(
        &config.provider,
        config.endpoint.as_deref(),
        config.api_key.as_deref(),
        timeout,
    )?;
    let embedder = create_embedder(
        &config.embedding_provider,
        &config.embedding_model,
        config.embedding_dimensions,
        config.embedding_endpoint.as_deref(),
    )
    .await?;
    let chunker = TextChunker::new(config.chunk_size, config.chunk_overlap)?;

    let pipeline = Pipeline::new(chunker, embedder, llm, &config.model, config.top_k);
    let mut session = Session::new();

    // Preload the document given on the command line, if any. Unlike
    // in-loop errors this one is fatal: the user asked for exactly this
    // file.
    if let Some(path) = &cli.file {
        let stats = repl::load_document(&pipeline, &mut session, path).await?;
        println!(
            "Loaded {} ({} chunks, {} dimensions)",
            stats.source, stats.chunk_count, stats.dimensions
        );
    }

    let result = repl::run(&pipeline, &mut session, cli.show_context).await;

    match &result {
        Ok(_) => tracing::info!("Session ended"),
        Err(e) => tracing::error!("Session failed: {}", e),
    }

    result
}
