use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use super::ExtractionError;

/// Extracts text page by page. Blank pages contribute nothing; the rest are
/// joined with newlines.
///
/// `pdf-extract` panics on some malformed inputs, so the parse runs under
/// `catch_unwind` and a panic is reported like any other parse failure.
pub fn extract_pdf(path: &Path) -> Result<String, ExtractionError> {
    let bytes = std::fs::read(path)?;

    let pages = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(&bytes)
    }))
    .map_err(|_| ExtractionError::Pdf("parser panicked on malformed document".to_string()))?
    .map_err(|e| ExtractionError::Pdf(e.to_string()))?;

    Ok(join_pages(pages))
}

fn join_pages(pages: Vec<String>) -> String {
    pages
        .into_iter()
        .filter(|page| !page.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
