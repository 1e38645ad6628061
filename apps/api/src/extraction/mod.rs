//! Text extraction from uploaded resumes.
//!
//! `extract` never fails: a file that cannot be parsed yields an
//! `ExtractedDocument` with `extraction_succeeded = false` and an empty
//! `raw_text`, so every downstream stage can run unconditionally.

pub mod docx;
pub mod handlers;
pub mod pdf;
pub mod plain;
pub mod skills;

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Format tag for an uploaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceFormat {
    Pdf,
    Docx,
    Plain,
}

impl SourceFormat {
    /// Maps an extension tag (`"pdf"`, `".DOCX"`, ...) to a format.
    /// Anything unrecognized is treated as plain text.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().trim_start_matches('.').to_ascii_lowercase().as_str() {
            "pdf" => SourceFormat::Pdf,
            "docx" => SourceFormat::Docx,
            _ => SourceFormat::Plain,
        }
    }

    pub fn from_filename(name: &str) -> Self {
        Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .map(Self::from_tag)
            .unwrap_or(SourceFormat::Plain)
    }

    pub fn extension(&self) -> &'static str {
        match self {
            SourceFormat::Pdf => "pdf",
            SourceFormat::Docx => "docx",
            SourceFormat::Plain => "txt",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedDocument {
    pub raw_text: String,
    pub source_format: SourceFormat,
    pub extraction_succeeded: bool,
}

impl ExtractedDocument {
    pub fn succeeded(raw_text: String, source_format: SourceFormat) -> Self {
        Self {
            raw_text,
            source_format,
            extraction_succeeded: true,
        }
    }

    pub fn failed(source_format: SourceFormat) -> Self {
        Self {
            raw_text: String::new(),
            source_format,
            extraction_succeeded: false,
        }
    }

    /// Caps `raw_text` at `max_chars` characters (not bytes).
    pub fn truncated(mut self, max_chars: usize) -> Self {
        if let Some((byte_idx, _)) = self.raw_text.char_indices().nth(max_chars) {
            self.raw_text.truncate(byte_idx);
        }
        self
    }
}

/// Extracts plain text from the file at `path` according to `format`.
pub fn extract(path: &Path, format: SourceFormat) -> ExtractedDocument {
    let result = match format {
        SourceFormat::Pdf => pdf::extract_pdf(path),
        SourceFormat::Docx => docx::extract_docx(path),
        SourceFormat::Plain => plain::extract_plain(path),
    };

    match result {
        Ok(text) => {
            info!(
                format = ?format,
                chars = text.chars().count(),
                succeeded = true,
                "Extracted document text"
            );
            ExtractedDocument::succeeded(text, format)
        }
        Err(e) => {
            warn!(format = ?format, succeeded = false, "Text extraction failed: {e}");
            ExtractedDocument::failed(format)
        }
    }
}

/// Internal failure reasons; never leaves this module as an error.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF parse error: {0}")]
    Pdf(String),

    #[error("DOCX parse error: {0}")]
    Docx(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_format_from_tag_is_case_insensitive() {
        assert_eq!(SourceFormat::from_tag("PDF"), SourceFormat::Pdf);
        assert_eq!(SourceFormat::from_tag(".docx"), SourceFormat::Docx);
        assert_eq!(SourceFormat::from_tag("txt"), SourceFormat::Plain);
        assert_eq!(SourceFormat::from_tag("rtf"), SourceFormat::Plain);
    }

    #[test]
    fn test_format_from_filename() {
        assert_eq!(SourceFormat::from_filename("cv.final.PDF"), SourceFormat::Pdf);
        assert_eq!(SourceFormat::from_filename("resume.docx"), SourceFormat::Docx);
        assert_eq!(SourceFormat::from_filename("resume"), SourceFormat::Plain);
    }

    #[test]
    fn test_truncated_counts_chars_not_bytes() {
        let doc = ExtractedDocument::succeeded("héllo wörld".to_string(), SourceFormat::Plain);
        let cut = doc.truncated(4);
        assert_eq!(cut.raw_text, "héll");
    }

    #[test]
    fn test_truncated_shorter_text_is_unchanged() {
        let doc = ExtractedDocument::succeeded("short".to_string(), SourceFormat::Plain);
        assert_eq!(doc.truncated(20_000).raw_text, "short");
    }

    #[test]
    fn test_corrupt_pdf_yields_empty_failed_document() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"%PDF-1.4 this is not really a pdf").unwrap();

        let doc = extract(file.path(), SourceFormat::Pdf);
        assert!(!doc.extraction_succeeded);
        assert_eq!(doc.raw_text, "");
        assert_eq!(doc.source_format, SourceFormat::Pdf);
    }

    #[test]
    fn test_corrupt_docx_yields_empty_failed_document() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"PK\x03\x04 truncated zip").unwrap();

        let doc = extract(file.path(), SourceFormat::Docx);
        assert!(!doc.extraction_succeeded);
        assert_eq!(doc.raw_text, "");
    }

    #[test]
    fn test_missing_file_never_raises() {
        for format in [SourceFormat::Pdf, SourceFormat::Docx, SourceFormat::Plain] {
            let doc = extract(Path::new("/nonexistent/resume.bin"), format);
            assert!(!doc.extraction_succeeded);
            assert!(doc.raw_text.is_empty());
        }
    }
}
