//! Job Classifier: a trained linear model over embedding vectors.
//!
//! The artifact is the JSON export of a fitted logistic-regression model:
//! one coefficient row and intercept per class (multinomial), or a single row
//! for two classes (binary). Loaded once at startup and shared read-only.

use std::path::Path;

use anyhow::{bail, Context};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::classification::ranking::LabelScore;
use crate::errors::AppError;

pub trait JobClassifier: Send + Sync {
    /// Fixed label set, in the order probabilities are reported.
    fn classes(&self) -> &[String];

    /// Expected embedding length.
    fn input_dimension(&self) -> usize;

    fn predict(&self, vector: &[f32]) -> Result<String, AppError>;

    /// `None` when the model has no probability function.
    fn predict_proba(&self, vector: &[f32]) -> Option<Result<Vec<LabelScore>, AppError>>;
}

/// On-disk shape of the classifier artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearClassifierArtifact {
    pub classes: Vec<String>,
    pub coef: Vec<Vec<f32>>,
    pub intercept: Vec<f32>,
    #[serde(default = "default_probability")]
    pub probability: bool,
    #[serde(default)]
    pub trained_at: Option<DateTime<Utc>>,
}

fn default_probability() -> bool {
    true
}

#[derive(Debug, Clone)]
pub struct LinearClassifier {
    artifact: LinearClassifierArtifact,
}

impl LinearClassifier {
    pub fn from_artifact(artifact: LinearClassifierArtifact) -> anyhow::Result<Self> {
        let n_classes = artifact.classes.len();
        let n_rows = artifact.coef.len();

        if n_classes < 2 {
            bail!("classifier needs at least two classes, found {n_classes}");
        }
        let binary = n_classes == 2 && n_rows == 1;
        if !binary && n_rows != n_classes {
            bail!("coef has {n_rows} rows for {n_classes} classes");
        }
        if artifact.intercept.len() != n_rows {
            bail!(
                "intercept has {} entries for {n_rows} coefficient rows",
                artifact.intercept.len()
            );
        }
        let dim = artifact.coef[0].len();
        if dim == 0 || artifact.coef.iter().any(|row| row.len() != dim) {
            bail!("coefficient rows must be non-empty and equally sized");
        }

        Ok(Self { artifact })
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read classifier artifact {}", path.display()))?;
        let artifact: LinearClassifierArtifact = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid classifier artifact {}", path.display()))?;
        Self::from_artifact(artifact)
    }

    pub fn trained_at(&self) -> Option<DateTime<Utc>> {
        self.artifact.trained_at
    }

    fn is_binary(&self) -> bool {
        self.artifact.coef.len() == 1
    }

    /// Raw decision scores, one per coefficient row.
    fn decision_function(&self, vector: &[f32]) -> Result<Vec<f32>, AppError> {
        let dim = self.input_dimension();
        if vector.len() != dim {
            return Err(AppError::Validation(format!(
                "embedding has {} dimensions, classifier expects {dim}",
                vector.len()
            )));
        }
        Ok(self
            .artifact
            .coef
            .iter()
            .zip(&self.artifact.intercept)
            .map(|(row, b)| row.iter().zip(vector).map(|(w, x)| w * x).sum::<f32>() + b)
            .collect())
    }
}

impl JobClassifier for LinearClassifier {
    fn classes(&self) -> &[String] {
        &self.artifact.classes
    }

    fn input_dimension(&self) -> usize {
        self.artifact.coef[0].len()
    }

    fn predict(&self, vector: &[f32]) -> Result<String, AppError> {
        let scores = self.decision_function(vector)?;
        let classes = &self.artifact.classes;

        if self.is_binary() {
            let idx = usize::from(scores[0] > 0.0);
            return Ok(classes[idx].clone());
        }

        // First maximum wins on ties.
        let best = scores
            .iter()
            .enumerate()
            .fold(0, |best, (i, s)| if *s > scores[best] { i } else { best });
        Ok(classes[best].clone())
    }

    fn predict_proba(&self, vector: &[f32]) -> Option<Result<Vec<LabelScore>, AppError>> {
        if !self.artifact.probability {
            return None;
        }
        let scores = match self.decision_function(vector) {
            Ok(s) => s,
            Err(e) => return Some(Err(e)),
        };

        let probs = if self.is_binary() {
            let p = sigmoid(scores[0]);
            vec![1.0 - p, p]
        } else {
            softmax(&scores)
        };

        Some(Ok(self
            .artifact
            .classes
            .iter()
            .zip(probs)
            .map(|(label, probability)| LabelScore {
                label: label.clone(),
                probability,
            })
            .collect()))
    }
}

fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

/// Numerically stable softmax.
fn softmax(scores: &[f32]) -> Vec<f32> {
    let max = scores.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = scores.iter().map(|s| (s - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}
