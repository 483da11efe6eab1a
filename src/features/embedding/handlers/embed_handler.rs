use axum::{extract::State, Json};
use std::sync::Arc;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::embedding::dtos::{EmbedRequestDto, EmbedResponseDto};
use crate::features::embedding::services::EmbeddingService;
use crate::shared::types::ErrorResponse;

/// Embed a text with all-MiniLM-L6-v2.
///
/// Returns the bare `{embedding}` object so callers can pass the vector
/// straight into `/files/upload` or `/search`.
#[utoipa::path(
    post,
    path = "/embed",
    tag = "embedding",
    request_body = EmbedRequestDto,
    responses(
        (status = 200, description = "384-dimension embedding", body = EmbedResponseDto),
        (status = 400, description = "Empty text or malformed body", body = ErrorResponse),
        (status = 500, description = "Model failure", body = ErrorResponse)
    )
)]
pub async fn embed_text(
    State(service): State<Arc<EmbeddingService>>,
    AppJson(dto): AppJson<EmbedRequestDto>,
) -> Result<Json<EmbedResponseDto>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let response = service.embed(dto).await?;
    Ok(Json(response))
}
