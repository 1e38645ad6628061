//! Persisted model artifacts read once at startup.
//!
//! Both artifacts are optional. A missing classifier puts the service in
//! "no classifier" mode; a missing embedder name falls back to configuration
//! and then to the default model. A present but unreadable artifact is a
//! startup error.

use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tracing::{info, warn};

use crate::classification::{Embedder, JobClassifier, LinearClassifier, DEFAULT_EMBEDDING_MODEL};

pub const CLASSIFIER_FILE: &str = "job_clf.json";
pub const EMBEDDER_NAME_FILE: &str = "embedder_name.txt";

/// Resolves the embedding model id: persisted artifact, then `configured`,
/// then the default.
pub fn embedding_model_name(model_dir: &Path, configured: Option<&str>) -> Result<String> {
    let path = model_dir.join(EMBEDDER_NAME_FILE);
    if path.exists() {
        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let name = raw.trim();
        if name.is_empty() {
            bail!("{} is empty", path.display());
        }
        info!(model = name, "Embedding model name loaded from artifact");
        return Ok(name.to_string());
    }

    let name = configured.unwrap_or(DEFAULT_EMBEDDING_MODEL);
    info!(model = name, "No embedder artifact found; using configured or default model");
    Ok(name.to_string())
}

/// Loads the classifier artifact if present and checks it against the
/// embedder's output dimension.
pub fn load_classifier(
    model_dir: &Path,
    embedder: &dyn Embedder,
) -> Result<Option<Arc<dyn JobClassifier>>> {
    let path = model_dir.join(CLASSIFIER_FILE);
    if !path.exists() {
        warn!(
            path = %path.display(),
            "Classifier artifact not found; predictions will report the classifier as unavailable"
        );
        return Ok(None);
    }

    let classifier = LinearClassifier::load(&path)?;
    if classifier.input_dimension() != embedder.dimension() {
        bail!(
            "classifier expects {}-dimensional input but embedding model '{}' produces {}",
            classifier.input_dimension(),
            embedder.model_name(),
            embedder.dimension()
        );
    }

    info!(
        classes = classifier.classes().len(),
        trained_at = ?classifier.trained_at(),
        "Classifier artifact loaded"
    );
    Ok(Some(Arc::new(classifier)))
}
