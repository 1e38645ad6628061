//! Job-fit pipeline: text → embedding → label, plus ranked probabilities when
//! the classifier supports them.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::classification::classifier::JobClassifier;
use crate::classification::embedder::{embed_blocking, Embedder};
use crate::classification::ranking::{effective_k, top_k, LabelScore};
use crate::errors::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub prediction: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<Vec<LabelScore>>,
}

/// Running without a classifier is a normal mode (before any model is
/// trained), so it is an outcome rather than an error.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionOutcome {
    Predicted(PredictionResult),
    ClassifierUnavailable,
}

impl PredictionOutcome {
    pub fn into_result(self) -> Result<PredictionResult, AppError> {
        match self {
            PredictionOutcome::Predicted(result) => Ok(result),
            PredictionOutcome::ClassifierUnavailable => Err(AppError::ClassifierUnavailable),
        }
    }
}

/// Process-wide models, constructed once at startup and injected into handlers.
#[derive(Clone)]
pub struct JobFitContext {
    embedder: Arc<dyn Embedder>,
    classifier: Option<Arc<dyn JobClassifier>>,
}

impl JobFitContext {
    pub fn new(embedder: Arc<dyn Embedder>, classifier: Option<Arc<dyn JobClassifier>>) -> Self {
        Self {
            embedder,
            classifier,
        }
    }

    pub fn embedder(&self) -> &Arc<dyn Embedder> {
        &self.embedder
    }

    pub fn classifier_loaded(&self) -> bool {
        self.classifier.is_some()
    }

    /// Classifies `text`. The classifier is checked before embedding so an
    /// unavailable model costs nothing.
    pub async fn predict(
        &self,
        text: &str,
        k: Option<i64>,
    ) -> Result<PredictionOutcome, AppError> {
        let Some(classifier) = self.classifier.clone() else {
            return Ok(PredictionOutcome::ClassifierUnavailable);
        };

        let vector = embed_blocking(self.embedder.clone(), text.to_string()).await?;
        let result = classify_vector(classifier.as_ref(), &vector, k)?;

        info!(
            label = %result.prediction,
            k = effective_k(k),
            ranked = result.top_k.is_some(),
            "Job fit prediction"
        );
        Ok(PredictionOutcome::Predicted(result))
    }
}

/// Pure classification step, separated from embedding for testing.
pub fn classify_vector(
    classifier: &dyn JobClassifier,
    vector: &[f32],
    k: Option<i64>,
) -> Result<PredictionResult, AppError> {
    let prediction = classifier.predict(vector)?;
    let top_k = classifier
        .predict_proba(vector)
        .transpose()?
        .map(|scores| top_k(&scores, k));

    Ok(PredictionResult { prediction, top_k })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classification::classifier::{LinearClassifier, LinearClassifierArtifact};
    use crate::classification::embedder::testing::HashingEmbedder;

    fn classifier(dim: usize, probability: bool) -> Arc<dyn JobClassifier> {
        let mut coef = vec![vec![0.0; dim]; 4];
        for (i, row) in coef.iter_mut().enumerate() {
            row[i] = 1.0;
        }
        Arc::new(
            LinearClassifier::from_artifact(LinearClassifierArtifact {
                classes: ["ML", "Web", "Data", "Ops"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
                coef,
                intercept: vec![0.0; 4],
                probability,
                trained_at: None,
            })
            .unwrap(),
        )
    }

    #[tokio::test]
    async fn test_no_classifier_is_unavailable_outcome() {
        let ctx = JobFitContext::new(Arc::new(HashingEmbedder { dimension: 8 }), None);
        let outcome = ctx.predict("python developer", Some(3)).await.unwrap();
        assert_eq!(outcome, PredictionOutcome::ClassifierUnavailable);
        assert!(matches!(
            outcome.into_result(),
            Err(AppError::ClassifierUnavailable)
        ));
    }

    #[tokio::test]
    async fn test_predict_with_probabilities_returns_ranked_top_k() {
        let ctx = JobFitContext::new(
            Arc::new(HashingEmbedder { dimension: 8 }),
            Some(classifier(8, true)),
        );
        let result = ctx
            .predict("backend engineer with rust", Some(2))
            .await
            .unwrap()
            .into_result()
            .unwrap();

        let ranked = result.top_k.expect("probabilities supported");
        assert_eq!(ranked.len(), 2);
        assert!(ranked[0].probability >= ranked[1].probability);
        assert_eq!(ranked[0].label, result.prediction);
    }

    #[tokio::test]
    async fn test_predict_without_probabilities_omits_top_k() {
        let ctx = JobFitContext::new(
            Arc::new(HashingEmbedder { dimension: 8 }),
            Some(classifier(8, false)),
        );
        let result = ctx
            .predict("anything", None)
            .await
            .unwrap()
            .into_result()
            .unwrap();
        assert!(result.top_k.is_none());
    }

    #[test]
    fn test_classify_vector_dimension_mismatch_propagates() {
        let clf = classifier(8, true);
        assert!(matches!(
            classify_vector(clf.as_ref(), &[1.0, 2.0], None),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_serialized_result_skips_missing_top_k() {
        let json = serde_json::to_value(PredictionResult {
            prediction: "Ops".to_string(),
            top_k: None,
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({ "prediction": "Ops" }));
    }
}
