use axum::{routing::post, Router};
use std::sync::Arc;

use crate::features::search::handlers::search_similar;
use crate::features::search::services::SearchService;

/// Create routes for the similarity search feature
pub fn routes(search_service: Arc<SearchService>) -> Router {
    Router::new()
        .route("/search", post(search_similar))
        .with_state(search_service)
}
