use std::path::PathBuf;

use anyhow::{Context, Result};

/// Default cap on extracted text returned by the upload endpoint.
pub const DEFAULT_MAX_TEXT_CHARS: usize = 20_000;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed numeric values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Directory holding `job_clf.json` and `embedder_name.txt`.
    pub model_dir: PathBuf,
    /// Used only when no persisted embedder name is found in `model_dir`.
    pub embedding_model: Option<String>,
    pub max_text_chars: usize,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            model_dir: std::env::var("MODEL_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("models")),
            embedding_model: std::env::var("EMBEDDING_MODEL")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            max_text_chars: parse_usize("MAX_TEXT_CHARS", DEFAULT_MAX_TEXT_CHARS)?,
            max_upload_bytes: parse_usize("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            model_dir: PathBuf::from("models"),
            embedding_model: None,
            max_text_chars: DEFAULT_MAX_TEXT_CHARS,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

fn parse_usize(key: &str, default: usize) -> Result<usize> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<usize>()
            .with_context(|| format!("{key} must be a non-negative integer, got '{raw}'")),
        Err(_) => Ok(default),
    }
}
