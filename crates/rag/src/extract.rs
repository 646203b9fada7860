//! Text extraction from uploaded bytes.
//!
//! Converts raw bytes (PDF or plain text) into a single normalized
//! [`Document`] with source metadata. No side effects beyond the return
//! value.

use docqa_core::{RagError, RagResult};
use std::path::Path;

use crate::types::Document;

/// Declared type of an uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// PDF document
    Pdf,
    /// Plain text, UTF-8 encoded
    Text,
}

impl SourceKind {
    /// Infer the declared type from a file path's extension.
    ///
    /// `.pdf` maps to [`SourceKind::Pdf`]; everything else is treated as
    /// plain text.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("pdf") => SourceKind::Pdf,
            _ => SourceKind::Text,
        }
    }
}

/// Extract a [`Document`] from raw bytes and a declared type.
///
/// For PDF input, per-page text is concatenated in page order; pages that
/// yield no text contribute nothing, and never abort the extraction.
/// Corrupt PDF bytes fail with [`RagError::Extraction`].
///
/// For plain text, the bytes are decoded as strict UTF-8; invalid byte
/// sequences fail with [`RagError::Decoding`] rather than being silently
/// substituted. A zero-byte text file yields a document with empty content.
pub fn extract(bytes: &[u8], kind: SourceKind, source: &str) -> RagResult<Document> {
    let content = match kind {
        SourceKind::Pdf => pdf_extract::extract_text_from_mem(bytes).map_err(|e| {
            RagError::Extraction(format!("Failed to read PDF '{}': {}", source, e))
        })?,
        SourceKind::Text => String::from_utf8(bytes.to_vec()).map_err(|e| {
            RagError::Decoding(format!("'{}' is not valid UTF-8: {}", source, e))
        })?,
    };

    tracing::debug!(
        source = %source,
        kind = ?kind,
        chars = content.chars().count(),
        "Extracted document text"
    );

    Ok(Document::new(content, source))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_roundtrip() {
        let text = "SQL has commands: SELECT, INSERT, UPDATE, DELETE.";
        let doc = extract(text.as_bytes(), SourceKind::Text, "notes.txt").unwrap();
        assert_eq!(doc.content, text);
        assert_eq!(doc.metadata.source, "notes.txt");
    }

    #[test]
    fn test_text_utf8_roundtrip() {
        let text = "Résumé — naïve façade 🎯";
        let doc = extract(text.as_bytes(), SourceKind::Text, "utf8.txt").unwrap();
        assert_eq!(doc.content, text);
    }

    #[test]
    fn test_empty_text_file_yields_empty_document() {
        let doc = extract(b"", SourceKind::Text, "empty.txt").unwrap();
        assert!(doc.content.is_empty());
        assert_eq!(doc.metadata.source, "empty.txt");
    }

    #[test]
    fn test_invalid_utf8_is_a_decoding_error() {
        let bytes = [0xff, 0xfe, 0x41];
        let result = extract(&bytes, SourceKind::Text, "bad.txt");
        assert!(matches!(result, Err(RagError::Decoding(_))));
    }

    #[test]
    fn test_corrupt_pdf_is_an_extraction_error() {
        let result = extract(b"not a pdf at all", SourceKind::Pdf, "bad.pdf");
        assert!(matches!(result, Err(RagError::Extraction(_))));
    }

    #[test]
    fn test_kind_from_path() {
        assert_eq!(SourceKind::from_path(Path::new("a.pdf")), SourceKind::Pdf);
        assert_eq!(SourceKind::from_path(Path::new("a.PDF")), SourceKind::Pdf);
        assert_eq!(SourceKind::from_path(Path::new("a.txt")), SourceKind::Text);
        assert_eq!(SourceKind::from_path(Path::new("README")), SourceKind::Text);
    }
}
