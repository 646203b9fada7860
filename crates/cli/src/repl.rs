//! Interactive question loop.
//!
//! Reads lines from stdin: `:load <path>` indexes a new document
//! (replacing the current one), `:quit` exits, anything else is asked as a
//! question against the loaded document. Pipeline errors are printed as
//! one-line messages and the loop continues.

use docqa_core::RagResult;
use docqa_rag::{Pipeline, Session, SourceKind};
use docqa_rag::types::BuildStats;
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, BufReader};

/// One line of user input, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    /// Index a new document, replacing the current one
    Load(PathBuf),
    /// Leave the loop
    Quit,
    /// A question for the loaded document
    Question(String),
    /// Blank line, ignored
    Empty,
    /// A `:`-prefixed command we do not recognize
    Unknown(String),
}

fn parse_input(line: &str) -> Input {
    let line = line.trim();
    if line.is_empty() {
        return Input::Empty;
    }
    if let Some(rest) = line.strip_prefix(':') {
        let mut parts = rest.splitn(2, char::is_whitespace);
        let command = parts.next().unwrap_or("");
        let argument = parts.next().map(str::trim).unwrap_or("");
        return match (command, argument) {
            ("quit" | "exit", _) => Input::Quit,
            ("load", "") => Input::Unknown("load requires a path: :load <path>".to_string()),
            ("load", path) => Input::Load(PathBuf::from(path)),
            _ => Input::Unknown(format!("unknown command :{command}")),
        };
    }
    Input::Question(line.to_string())
}

/// Read a document from disk and run the build phase on it.
pub async fn load_document(
    pipeline: &Pipeline,
    session: &mut Session,
    path: &Path,
) -> RagResult<BuildStats> {
    let bytes = tokio::fs::read(path).await?;
    let kind = SourceKind::from_path(path);
    let source = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    pipeline.process_document(&bytes, kind, &source, session).await
}

fn print_prompt() {
    print!("> ");
    std::io::stdout().flush().ok();
}

/// Run the interactive loop until `:quit` or end of input.
///
/// Errors from loading or asking are rendered to stderr and the loop
/// keeps going; only stdin failures abort it.
pub async fn run(pipeline: &Pipeline, session: &mut Session, show_context: bool) -> RagResult<()> {
    println!("Type a question, :load <path> to index a document, :quit to exit.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    print_prompt();

    while let Some(line) = lines.next_line().await? {
        match parse_input(&line) {
            Input::Quit => break,
            Input::Empty => {}
            Input::Unknown(message) => eprintln!("error: {message}"),
            Input::Load(path) => match load_document(pipeline, session, &path).await {
                Ok(stats) => println!(
                    "Loaded {} ({} chunks, {} dimensions)",
                    stats.source, stats.chunk_count, stats.dimensions
                ),
                Err(e) => eprintln!("error: {e}"),
            },
            Input::Question(question) => match pipeline.ask(&question, session).await {
                Ok(answer) => {
                    println!("{}", answer.text);
                    if show_context {
                        print_context(&answer);
                    }
                }
                Err(e) => eprintln!("error: {e}"),
            },
        }
        print_prompt();
    }

    Ok(())
}

fn print_context(answer: &docqa_rag::types::Answer) {
    println!();
    println!("--- context ({} chunks) ---", answer.context.len());
    for (i, scored) in answer.context.iter().enumerate() {
        println!(
            "[{}] {:.4} {}",
            i + 1,
            scored.score,
            scored.chunk.metadata.source
        );
        println!("{}", scored.chunk.content);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_question() {
        assert_eq!(
            parse_input("what are SQL commands?"),
            Input::Question("what are SQL commands?".to_string())
        );
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(
            parse_input("  what is this  "),
            Input::Question("what is this".to_string())
        );
        assert_eq!(parse_input("   "), Input::Empty);
        assert_eq!(parse_input(""), Input::Empty);
    }

    #[test]
    fn test_parse_load() {
        assert_eq!(
            parse_input(":load notes/sql.pdf"),
            Input::Load(PathBuf::from("notes/sql.pdf"))
        );
    }

    #[test]
    fn test_parse_load_without_path() {
        assert!(matches!(parse_input(":load"), Input::Unknown(_)));
        assert!(matches!(parse_input(":load   "), Input::Unknown(_)));
    }

    #[test]
    fn test_parse_quit_aliases() {
        assert_eq!(parse_input(":quit"), Input::Quit);
        assert_eq!(parse_input(":exit"), Input::Quit);
    }

    #[test]
    fn test_parse_unknown_command() {
        assert!(matches!(parse_input(":reload"), Input::Unknown(_)));
    }
}
