use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::classification::interview::{combine_answers, combine_with_skills, INTERVIEW_QUESTIONS};
use crate::classification::pipeline::PredictionResult;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub text: String,
    pub top_k: Option<i64>,
    /// Skills picked from an upload's detected set, appended to `text`.
    #[serde(default)]
    pub skills: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct InterviewPredictRequest {
    pub answers: Vec<String>,
    pub top_k: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct InterviewQuestionsResponse {
    pub questions: Vec<&'static str>,
}

/// POST /api/v1/predict
pub async fn handle_predict(
    State(state): State<AppState>,
    Json(req): Json<PredictRequest>,
) -> Result<Json<PredictionResult>, AppError> {
    let text = combine_with_skills(&req.text, &req.skills);
    predict_text(&state, &text, req.top_k).await
}

/// GET /api/v1/interview/questions
pub async fn handle_interview_questions() -> Json<InterviewQuestionsResponse> {
    Json(InterviewQuestionsResponse {
        questions: INTERVIEW_QUESTIONS.to_vec(),
    })
}

/// POST /api/v1/interview/predict
pub async fn handle_interview_predict(
    State(state): State<AppState>,
    Json(req): Json<InterviewPredictRequest>,
) -> Result<Json<PredictionResult>, AppError> {
    let text = combine_answers(&req.answers);
    predict_text(&state, &text, req.top_k).await
}

async fn predict_text(
    state: &AppState,
    text: &str,
    top_k: Option<i64>,
) -> Result<Json<PredictionResult>, AppError> {
    let outcome = state.job_fit.predict(text, top_k).await?;
    Ok(Json(outcome.into_result()?))
}
