mod artifacts;
mod classification;
mod config;
mod errors;
mod extraction;
mod layout;
mod models;
mod render;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::classification::{FastEmbedder, JobFitContext};
use crate::config::Config;
use crate::layout::default_page_geometry;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting JobFit API v{}", env!("CARGO_PKG_VERSION"));

    // Embedding model (downloads into the fastembed cache on first run)
    let model_name =
        artifacts::embedding_model_name(&config.model_dir, config.embedding_model.as_deref())?;
    let embedder = tokio::task::spawn_blocking(move || FastEmbedder::load(&model_name)).await??;
    let embedder = Arc::new(embedder);

    // Classifier is optional; prediction reports it unavailable when absent
    let classifier = artifacts::load_classifier(&config.model_dir, embedder.as_ref())?;
    let job_fit = JobFitContext::new(embedder, classifier);
    info!(
        classifier_loaded = job_fit.classifier_loaded(),
        "Job-fit pipeline ready"
    );

    let page_geometry = default_page_geometry();
    info!(
        "Layout geometry: {}x{}pt, {} body lines per page",
        page_geometry.width_pt,
        page_geometry.height_pt,
        page_geometry.body_lines_per_page()
    );

    let state = AppState {
        config: config.clone(),
        job_fit,
        page_geometry,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
