use axum::{extract::State, Json};
use std::sync::Arc;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::search::dtos::{SearchRequestDto, SearchResultDto};
use crate::features::search::services::SearchService;
use crate::shared::types::{ApiResponse, ErrorResponse};

/// Find the files whose embeddings are closest to a query vector
#[utoipa::path(
    post,
    path = "/search",
    tag = "search",
    request_body = SearchRequestDto,
    responses(
        (status = 200, description = "Nearest files by ascending cosine distance", body = ApiResponse<Vec<SearchResultDto>>),
        (status = 400, description = "Malformed body or invalid limit", body = ErrorResponse),
        (status = 500, description = "Storage failure, e.g. dimension mismatch", body = ErrorResponse)
    )
)]
pub async fn search_similar(
    State(service): State<Arc<SearchService>>,
    AppJson(dto): AppJson<SearchRequestDto>,
) -> Result<Json<ApiResponse<Vec<SearchResultDto>>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let results = service.search(dto).await?;
    Ok(Json(ApiResponse::list(results)))
}
