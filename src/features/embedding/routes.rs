use axum::{routing::post, Router};
use std::sync::Arc;

use crate::features::embedding::handlers::embed_text;
use crate::features::embedding::services::EmbeddingService;

/// Create routes for the embedding service
pub fn routes(embedding_service: Arc<EmbeddingService>) -> Router {
    Router::new()
        .route("/embed", post(embed_text))
        .with_state(embedding_service)
}
