// Resume rendering: layout engine output serialized to PDF.
// Layout and serialization are CPU-bound and run inside spawn_blocking.

pub mod handlers;
pub mod pdf_writer;

use tracing::info;

use crate::errors::AppError;
use crate::layout::engine::{layout_resume, LineKind};
use crate::layout::geometry::PageGeometry;
use crate::models::resume::ResumeDocument;

pub use pdf_writer::{render_pdf, PdfMetadata};

/// Download name for generated resumes.
pub const RESUME_FILENAME: &str = "resume.pdf";

/// Lays out and serializes a resume. Either stage failing yields an error and
/// no bytes; a partial document is never returned.
pub fn build_resume_pdf(doc: &ResumeDocument, geometry: &PageGeometry) -> Result<Vec<u8>, AppError> {
    if doc.name.trim().is_empty() {
        return Err(AppError::Validation("name is required".to_string()));
    }

    let laid_out = layout_resume(doc, geometry)?;
    let metadata = PdfMetadata {
        title: Some(format!("{} - Resume", doc.name.trim())),
        author: Some(doc.name.trim().to_string()),
        ..PdfMetadata::default()
    };
    let bytes = render_pdf(&laid_out, geometry, &metadata)?;

    info!(
        pages = laid_out.pages.len(),
        lines = laid_out.total_lines(),
        body_lines = laid_out.count(LineKind::Body),
        bytes = bytes.len(),
        "Resume PDF built"
    );
    Ok(bytes)
}
