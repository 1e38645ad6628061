use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::skills::tag_skills;
use crate::extraction::{extract, SourceFormat};
use crate::state::AppState;

/// Multipart field carrying the resume file.
pub const UPLOAD_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub text: String,
    pub skills: Vec<String>,
    pub source_format: SourceFormat,
    pub extraction_succeeded: bool,
}

/// POST /api/v1/resumes/upload
/// Extraction failures are reported in the body, not as an error status.
pub async fn handle_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let upload_id = Uuid::new_v4();
    async move {
        let (file_name, data) = read_upload(multipart).await?;
        let format = SourceFormat::from_filename(&file_name);
        info!(file_name = %file_name, format = ?format, bytes = data.len(), "Resume upload received");

        let max_chars = state.config.max_text_chars;
        let doc = tokio::task::spawn_blocking(move || extract_upload(&data, format))
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in extraction: {e}")))??;

        // Skills come from the full text; only the returned text is capped.
        let skills = tag_skills(&doc.raw_text);
        let doc = doc.truncated(max_chars);
        info!(skills = skills.len(), succeeded = doc.extraction_succeeded, "Resume upload processed");

        Ok::<_, AppError>(Json(UploadResponse {
            text: doc.raw_text,
            skills,
            source_format: doc.source_format,
            extraction_succeeded: doc.extraction_succeeded,
        }))
    }
    .instrument(info_span!("upload", %upload_id))
    .await
}

/// Pulls the `file` field out of the form; other fields are ignored.
async fn read_upload(mut multipart: Multipart) -> Result<(String, Bytes), AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::MalformedInput(e.body_text()))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::MalformedInput(e.body_text()))?;
        return Ok((file_name, data));
    }
    Err(AppError::Validation(format!(
        "multipart field '{UPLOAD_FIELD}' is required"
    )))
}

/// Stages the upload in a per-request scratch directory and runs extraction
/// on it. The directory is removed when this returns.
fn extract_upload(
    data: &[u8],
    format: SourceFormat,
) -> Result<crate::extraction::ExtractedDocument, AppError> {
    let scratch = tempfile::tempdir()
        .map_err(|e| AppError::Internal(anyhow::anyhow!("failed to create scratch dir: {e}")))?;
    let path = scratch.path().join(format!("resume.{}", format.extension()));
    std::fs::write(&path, data)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("failed to stage upload: {e}")))?;
    Ok(extract(&path, format))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_upload_plain_text() {
        let doc = extract_upload(b"Python and SQL", SourceFormat::Plain).unwrap();
        assert!(doc.extraction_succeeded);
        assert_eq!(doc.raw_text, "Python and SQL");
        assert_eq!(tag_skills(&doc.raw_text), vec!["python", "sql"]);
    }

    #[test]
    fn test_extract_upload_garbage_pdf_reports_failure() {
        let doc = extract_upload(b"not a pdf", SourceFormat::Pdf).unwrap();
        assert!(!doc.extraction_succeeded);
        assert!(doc.raw_text.is_empty());
        assert_eq!(doc.source_format, SourceFormat::Pdf);
    }
}
