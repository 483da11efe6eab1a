use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::embedding::dtos::{EmbedRequestDto, EmbedResponseDto};
use crate::features::embedding::services::Embedder;

pub struct EmbeddingService {
    embedder: Arc<dyn Embedder>,
}

impl std::fmt::Debug for EmbeddingService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbeddingService")
            .field("model", &self.embedder.model_name())
            .finish()
    }
}

impl EmbeddingService {
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self { embedder }
    }

    /// Embed one text. A vector of the wrong width is an internal error: it
    /// could never be stored.
    pub async fn embed(&self, dto: EmbedRequestDto) -> Result<EmbedResponseDto> {
        let embedding = self.embedder.embed(&dto.text).await?;

        let expected = self.embedder.dimension();
        if embedding.len() != expected {
            return Err(AppError::Internal(format!(
                "{} returned {} dimensions, expected {}",
                self.embedder.model_name(),
                embedding.len(),
                expected
            )));
        }

        tracing::debug!(
            chars = dto.text.chars().count(),
            model = self.embedder.model_name(),
            "Text embedded"
        );
        Ok(EmbedResponseDto { embedding })
    }
}
