use async_trait::async_trait;
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::core::error::{AppError, Result};
use crate::features::embedding::{EMBEDDING_DIMENSION, MODEL_NAME};

/// Turns text into a fixed-width vector
#[async_trait]
pub trait Embedder: Send + Sync {
    fn model_name(&self) -> &str;

    fn dimension(&self) -> usize;

    async fn embed(&self, text: &str) -> Result<Vec<f32>>;
}

/// Local all-MiniLM-L6-v2 inference through fastembed (ONNX runtime).
///
/// Inference is CPU-bound, so it runs on the blocking pool. The session needs
/// exclusive access, hence the mutex.
pub struct FastEmbedder {
    model: Arc<Mutex<TextEmbedding>>,
}

impl std::fmt::Debug for FastEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FastEmbedder")
            .field("model", &MODEL_NAME)
            .finish()
    }
}

impl FastEmbedder {
    /// Load the model, downloading the weights into `cache_dir` on first use.
    /// Blocks; call from `spawn_blocking` inside a runtime.
    pub fn try_new(cache_dir: Option<PathBuf>) -> anyhow::Result<Self> {
        let mut options =
            InitOptions::new(EmbeddingModel::AllMiniLML6V2).with_show_download_progress(false);
        if let Some(dir) = cache_dir {
            options = options.with_cache_dir(dir);
        }

        let model = TextEmbedding::try_new(options)?;
        Ok(Self {
            model: Arc::new(Mutex::new(model)),
        })
    }
}

#[async_trait]
impl Embedder for FastEmbedder {
    fn model_name(&self) -> &str {
        MODEL_NAME
    }

    fn dimension(&self) -> usize {
        EMBEDDING_DIMENSION
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let model = Arc::clone(&self.model);
        let text = text.to_string();

        let embeddings = tokio::task::spawn_blocking(move || {
            let mut model = model
                .lock()
                .map_err(|_| AppError::Internal("embedding model lock poisoned".to_string()))?;
            model
                .embed(vec![text], None)
                .map_err(|e| AppError::Internal(format!("embedding failed: {}", e)))
        })
        .await
        .map_err(|e| AppError::Internal(format!("embedding task failed: {}", e)))??;

        embeddings
            .into_iter()
            .next()
            .ok_or_else(|| AppError::Internal("model returned no embedding".to_string()))
    }
}
