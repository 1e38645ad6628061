use crate::classification::JobFitContext;
use crate::config::Config;
use crate::layout::PageGeometry;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Embedding model plus the optional classifier, loaded once at startup.
    pub job_fit: JobFitContext,
    /// Page dimensions and typography for generated resumes (US letter, Helvetica).
    pub page_geometry: PageGeometry,
}
