// Job-fit classification: embedding, linear classifier, top-k ranking.
// Embedding and classification are CPU-bound and run on the blocking pool.

pub mod classifier;
pub mod embedder;
pub mod handlers;
pub mod interview;
pub mod pipeline;
pub mod ranking;

pub use classifier::{JobClassifier, LinearClassifier};
pub use embedder::{Embedder, FastEmbedder, DEFAULT_EMBEDDING_MODEL};
pub use pipeline::JobFitContext;
