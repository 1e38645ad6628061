//! Embedding Provider: maps text to fixed-length dense vectors.
//!
//! `AppState` holds an `Arc<dyn Embedder>` built once at startup. The default
//! backend is `FastEmbedder` (fastembed / ONNX Runtime, CPU). Calls are
//! CPU-bound; async callers go through `embed_blocking`.

use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Context};
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use tracing::info;

use crate::errors::AppError;

/// A dense vector produced by the embedding model.
pub type Embedding = Vec<f32>;

/// Used when neither a persisted artifact nor `EMBEDDING_MODEL` names a model.
pub const DEFAULT_EMBEDDING_MODEL: &str = "all-MiniLM-L6-v2";

pub trait Embedder: Send + Sync {
    /// Returns one vector per input text, in input order.
    fn embed(&self, texts: &[String]) -> Result<Vec<Embedding>, AppError>;

    fn dimension(&self) -> usize;

    fn model_name(&self) -> &str;
}

// ────────────────────────────────────────────────────────────────────────────
// fastembed backend
// ────────────────────────────────────────────────────────────────────────────

pub struct FastEmbedder {
    // The ONNX session is not shared across threads without synchronisation.
    model: Mutex<TextEmbedding>,
    model_name: String,
    dimension: usize,
}

impl FastEmbedder {
    /// Loads the named model, downloading it into the fastembed cache if needed.
    /// Any failure here is meant to abort startup.
    pub fn load(model_name: &str) -> anyhow::Result<Self> {
        let (model, dimension) = resolve_model(model_name)?;
        info!(model = model_name, dimension, "Loading embedding model");

        let embedding = TextEmbedding::try_new(
            InitOptions::new(model).with_show_download_progress(false),
        )
        .with_context(|| format!("Failed to initialize embedding model '{model_name}'"))?;

        Ok(Self {
            model: Mutex::new(embedding),
            model_name: model_name.to_string(),
            dimension,
        })
    }
}

impl Embedder for FastEmbedder {
    fn embed(&self, texts: &[String]) -> Result<Vec<Embedding>, AppError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let mut model = self
            .model
            .lock()
            .map_err(|_| AppError::Embedding("embedding model lock poisoned".to_string()))?;
        model
            .embed(texts.to_vec(), None)
            .map_err(|e| AppError::Embedding(e.to_string()))
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

/// Maps a sentence-transformers style identifier to a fastembed model and its
/// output dimension. `sentence-transformers/` and `BAAI/` prefixes are accepted.
pub fn resolve_model(name: &str) -> anyhow::Result<(EmbeddingModel, usize)> {
    let trimmed = name.trim();
    let short = trimmed
        .strip_prefix("sentence-transformers/")
        .or_else(|| trimmed.strip_prefix("BAAI/"))
        .unwrap_or(trimmed);

    match short.to_ascii_lowercase().as_str() {
        "all-minilm-l6-v2" => Ok((EmbeddingModel::AllMiniLML6V2, 384)),
        "all-minilm-l12-v2" => Ok((EmbeddingModel::AllMiniLML12V2, 384)),
        "bge-small-en-v1.5" => Ok((EmbeddingModel::BGESmallENV15, 384)),
        "bge-base-en-v1.5" => Ok((EmbeddingModel::BGEBaseENV15, 768)),
        _ => Err(anyhow!("Unsupported embedding model '{trimmed}'")),
    }
}

/// Runs `embed` for a single text on the blocking pool.
pub async fn embed_blocking(
    embedder: Arc<dyn Embedder>,
    text: String,
) -> Result<Embedding, AppError> {
    tokio::task::spawn_blocking(move || embedder.embed(&[text]))
        .await
        .map_err(|e| AppError::Internal(anyhow!("spawn_blocking failed in embedding: {e}")))??
        .pop()
        .ok_or_else(|| AppError::Embedding("model returned no vectors".to_string()))
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Deterministic bag-of-bytes embedder for tests; no model download.
    pub struct HashingEmbedder {
        pub dimension: usize,
    }

    impl Embedder for HashingEmbedder {
        fn embed(&self, texts: &[String]) -> Result<Vec<Embedding>, AppError> {
            Ok(texts
                .iter()
                .map(|t| {
                    let mut v = vec![0.0_f32; self.dimension];
                    for (i, b) in t.to_lowercase().bytes().enumerate() {
                        v[(b as usize + i) % self.dimension] += 1.0;
                    }
                    let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
                    if norm > 0.0 {
                        v.iter_mut().for_each(|x| *x /= norm);
                    }
                    v
                })
                .collect())
        }

        fn dimension(&self) -> usize {
            self.dimension
        }

        fn model_name(&self) -> &str {
            "hashing-test"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::HashingEmbedder;
    use super::*;

    #[test]
    fn test_resolve_default_model() {
        let (model, dim) = resolve_model(DEFAULT_EMBEDDING_MODEL).unwrap();
        assert!(matches!(model, EmbeddingModel::AllMiniLML6V2));
        assert_eq!(dim, 384);
    }

    #[test]
    fn test_resolve_accepts_hub_prefixes() {
        assert!(matches!(
            resolve_model("sentence-transformers/all-MiniLM-L12-v2").unwrap().0,
            EmbeddingModel::AllMiniLML12V2
        ));
        assert_eq!(resolve_model("BAAI/bge-base-en-v1.5").unwrap().1, 768);
    }

    #[test]
    fn test_resolve_unknown_model_fails() {
        assert!(resolve_model("word2vec-google-news").is_err());
    }

    #[test]
    fn test_embed_preserves_order_and_length() {
        let embedder = HashingEmbedder { dimension: 16 };
        let texts = vec!["python".to_string(), "kubernetes".to_string()];
        let vectors = embedder.embed(&texts).unwrap();
        assert_eq!(vectors.len(), 2);
        assert!(vectors.iter().all(|v| v.len() == 16));
        assert_ne!(vectors[0], vectors[1]);
    }

    #[tokio::test]
    async fn test_embed_blocking_is_deterministic() {
        let embedder: Arc<dyn Embedder> = Arc::new(HashingEmbedder { dimension: 32 });
        let a = embed_blocking(embedder.clone(), "Data engineer".to_string())
            .await
            .unwrap();
        let b = embed_blocking(embedder, "Data engineer".to_string())
            .await
            .unwrap();
        assert_eq!(a, b);
    }
}
