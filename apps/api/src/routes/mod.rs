pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::classification::handlers as classification;
use crate::extraction::handlers as extraction;
use crate::render::handlers as render;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume intake and generation
        .route("/api/v1/resumes/upload", post(extraction::handle_upload))
        .route("/api/v1/resumes/build", post(render::handle_build_resume))
        // Job-fit prediction
        .route("/api/v1/predict", post(classification::handle_predict))
        .route(
            "/api/v1/interview/questions",
            get(classification::handle_interview_questions),
        )
        .route(
            "/api/v1/interview/predict",
            post(classification::handle_interview_predict),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
