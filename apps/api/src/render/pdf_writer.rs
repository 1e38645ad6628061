//! PDF serialization of laid-out resume pages.
//!
//! Each `Page` becomes one US-letter page in a `pdf_oxide::writer::PdfWriter`,
//! with every `LinePlacement` drawn at its absolute position using the
//! standard Helvetica faces the writer registers.

use pdf_oxide::writer::{PdfWriter, PdfWriterConfig};

use crate::errors::AppError;
use crate::layout::engine::LaidOutDocument;
use crate::layout::geometry::PageGeometry;

const PDF_VERSION: &str = "1.4";

#[derive(Debug, Clone)]
pub struct PdfMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub creator: String,
}

impl Default for PdfMetadata {
    fn default() -> Self {
        Self {
            title: None,
            author: None,
            creator: "jobfit-api".to_string(),
        }
    }
}

impl PdfMetadata {
    fn writer_config(&self) -> PdfWriterConfig {
        let mut config = PdfWriterConfig::default();
        config.version = PDF_VERSION.to_string();
        config.creator = Some(pdf_safe_text(&self.creator));
        if let Some(title) = &self.title {
            config = config.with_title(pdf_safe_text(title));
        }
        if let Some(author) = &self.author {
            config = config.with_author(pdf_safe_text(author));
        }
        config
    }
}

/// Serializes `doc` into PDF bytes. A document without pages is rejected.
pub fn render_pdf(
    doc: &LaidOutDocument,
    geometry: &PageGeometry,
    metadata: &PdfMetadata,
) -> Result<Vec<u8>, AppError> {
    if doc.pages.is_empty() {
        return Err(AppError::Rendering("document has no pages".to_string()));
    }

    let mut writer = PdfWriter::with_config(metadata.writer_config());
    for page in &doc.pages {
        let mut builder = writer.add_page(geometry.width_pt, geometry.height_pt);
        for line in &page.lines {
            builder.add_text(
                &pdf_safe_text(&line.text),
                line.x,
                line.y,
                line.font.face.resource_name(),
                line.font.size_pt,
            );
        }
        builder.finish();
    }

    writer
        .finish()
        .map_err(|e| AppError::Rendering(format!("failed to serialize PDF: {e}")))
}

/// The writer emits string bytes as-is against WinAnsiEncoding, so only
/// printable ASCII survives intact. Other characters become `?`, control
/// characters become spaces.
pub(crate) fn pdf_safe_text(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            c if c.is_control() => ' ',
            c if c.is_ascii() => c,
            _ => '?',
        })
        .collect()
}
