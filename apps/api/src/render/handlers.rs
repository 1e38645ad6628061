use axum::{
    async_trait,
    extract::{FromRequest, Request, State},
    http::header,
    response::{IntoResponse, Response},
    Form, Json,
};

use crate::errors::AppError;
use crate::models::resume::ResumeDocument;
use crate::render::{build_resume_pdf, RESUME_FILENAME};
use crate::state::AppState;

/// Accepts the resume fields either as a URL-encoded form or as JSON.
pub struct ResumeFields(pub ResumeDocument);

#[async_trait]
impl<S> FromRequest<S> for ResumeFields
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|ct| ct.starts_with("application/json"))
            .unwrap_or(false);

        let doc = if is_json {
            Json::<ResumeDocument>::from_request(req, state)
                .await
                .map_err(|e| AppError::MalformedInput(e.body_text()))?
                .0
        } else {
            Form::<ResumeDocument>::from_request(req, state)
                .await
                .map_err(|e| AppError::MalformedInput(e.body_text()))?
                .0
        };
        Ok(ResumeFields(doc))
    }
}

/// POST /api/v1/resumes/build
pub async fn handle_build_resume(
    State(state): State<AppState>,
    ResumeFields(doc): ResumeFields,
) -> Result<Response, AppError> {
    let geometry = state.page_geometry.clone();
    let bytes = tokio::task::spawn_blocking(move || build_resume_pdf(&doc, &geometry))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in render: {e}")))??;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{RESUME_FILENAME}\""),
            ),
        ],
        bytes,
    )
        .into_response())
}
