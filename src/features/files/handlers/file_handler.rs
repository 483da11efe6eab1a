use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::core::error::Result;
use crate::core::extractor::{AppJson, FileId};
use crate::features::files::dtos::{
    DateRangeQuery, FileMetadataDto, FileRequestDto, FileResponseDto, FilenameSearchQuery,
};
use crate::features::files::services::FileService;
use crate::shared::types::{ApiResponse, ErrorResponse};
use crate::shared::validation::{parse_date_range, require_query};

/// Upload a file with its precomputed embedding
#[utoipa::path(
    post,
    path = "/files/upload",
    tag = "files",
    request_body = FileRequestDto,
    responses(
        (status = 200, description = "File stored", body = ApiResponse<FileResponseDto>),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 500, description = "Storage failure, e.g. embedding dimension mismatch", body = ErrorResponse)
    )
)]
pub async fn upload_file(
    State(service): State<Arc<FileService>>,
    AppJson(dto): AppJson<FileRequestDto>,
) -> Result<Json<ApiResponse<FileResponseDto>>> {
    let file = service.upload(dto).await?;
    Ok(Json(ApiResponse::success(Some(file), None, None)))
}

/// Get a file by ID (including files in the recycle bin)
#[utoipa::path(
    get,
    path = "/files/{id}",
    tag = "files",
    params(
        ("id" = String, Path, description = "File ID (UUID)")
    ),
    responses(
        (status = 200, description = "File found", body = ApiResponse<FileResponseDto>),
        (status = 400, description = "Malformed ID", body = ErrorResponse),
        (status = 404, description = "File not found", body = ErrorResponse)
    )
)]
pub async fn get_file(
    FileId(id): FileId,
    State(service): State<Arc<FileService>>,
) -> Result<Json<ApiResponse<FileResponseDto>>> {
    let file = service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(Some(file), None, None)))
}

/// List every file outside the recycle bin, newest first
#[utoipa::path(
    get,
    path = "/files/getall",
    tag = "files",
    responses(
        (status = 200, description = "Files retrieved", body = ApiResponse<Vec<FileResponseDto>>),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn list_files(
    State(service): State<Arc<FileService>>,
) -> Result<Json<ApiResponse<Vec<FileResponseDto>>>> {
    let files = service.list_all().await?;
    Ok(Json(ApiResponse::list(files)))
}

/// Search files by case-insensitive filename substring
#[utoipa::path(
    get,
    path = "/files/search",
    tag = "files",
    params(FilenameSearchQuery),
    responses(
        (status = 200, description = "Matching files", body = ApiResponse<Vec<FileResponseDto>>),
        (status = 400, description = "Missing or empty query", body = ErrorResponse)
    )
)]
pub async fn search_files_by_name(
    State(service): State<Arc<FileService>>,
    Query(params): Query<FilenameSearchQuery>,
) -> Result<Json<ApiResponse<Vec<FileResponseDto>>>> {
    let query = require_query(params.query.as_deref(), "query")?;
    let files = service.search_by_filename(query).await?;
    Ok(Json(ApiResponse::list(files)))
}

/// List files created between two calendar dates (both inclusive)
#[utoipa::path(
    get,
    path = "/files/date-range",
    tag = "files",
    params(DateRangeQuery),
    responses(
        (status = 200, description = "Files in range", body = ApiResponse<Vec<FileResponseDto>>),
        (status = 400, description = "Missing or malformed date", body = ErrorResponse)
    )
)]
pub async fn list_files_by_date_range(
    State(service): State<Arc<FileService>>,
    Query(params): Query<DateRangeQuery>,
) -> Result<Json<ApiResponse<Vec<FileResponseDto>>>> {
    let range = parse_date_range(params.start.as_deref(), params.end.as_deref())?;
    let files = service.list_by_date_range(range).await?;
    Ok(Json(ApiResponse::list(files)))
}

/// List file metadata (no content or embedding)
#[utoipa::path(
    get,
    path = "/files/metadata",
    tag = "files",
    responses(
        (status = 200, description = "Metadata retrieved", body = ApiResponse<Vec<FileMetadataDto>>),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn list_file_metadata(
    State(service): State<Arc<FileService>>,
) -> Result<Json<ApiResponse<Vec<FileMetadataDto>>>> {
    let metadata = service.list_metadata().await?;
    Ok(Json(ApiResponse::list(metadata)))
}

/// Replace a file's filename, content and embedding
#[utoipa::path(
    put,
    path = "/files/{id}",
    tag = "files",
    params(
        ("id" = String, Path, description = "File ID (UUID)")
    ),
    request_body = FileRequestDto,
    responses(
        (status = 200, description = "File updated", body = ApiResponse<FileResponseDto>),
        (status = 400, description = "Malformed ID or body", body = ErrorResponse),
        (status = 404, description = "File not found", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn update_file(
    FileId(id): FileId,
    State(service): State<Arc<FileService>>,
    AppJson(dto): AppJson<FileRequestDto>,
) -> Result<Json<ApiResponse<FileResponseDto>>> {
    let file = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(file), None, None)))
}

/// Permanently delete a file
#[utoipa::path(
    delete,
    path = "/files/{id}",
    tag = "files",
    params(
        ("id" = String, Path, description = "File ID (UUID)")
    ),
    responses(
        (status = 204, description = "File deleted"),
        (status = 400, description = "Malformed ID", body = ErrorResponse),
        (status = 404, description = "File not found", body = ErrorResponse)
    )
)]
pub async fn delete_file(
    FileId(id): FileId,
    State(service): State<Arc<FileService>>,
) -> Result<StatusCode> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Move a file to the recycle bin
#[utoipa::path(
    patch,
    path = "/files/{id}/soft-delete",
    tag = "files",
    params(
        ("id" = String, Path, description = "File ID (UUID)")
    ),
    responses(
        (status = 200, description = "File moved to recycle bin"),
        (status = 400, description = "Malformed ID", body = ErrorResponse),
        (status = 404, description = "File not found", body = ErrorResponse)
    )
)]
pub async fn soft_delete_file(
    FileId(id): FileId,
    State(service): State<Arc<FileService>>,
) -> Result<Json<ApiResponse<()>>> {
    service.soft_delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("File moved to recycle bin".to_string()),
        None,
    )))
}

/// Restore a file from the recycle bin
#[utoipa::path(
    patch,
    path = "/files/{id}/restore",
    tag = "files",
    params(
        ("id" = String, Path, description = "File ID (UUID)")
    ),
    responses(
        (status = 200, description = "File restored"),
        (status = 400, description = "Malformed ID", body = ErrorResponse),
        (status = 404, description = "File not found", body = ErrorResponse)
    )
)]
pub async fn restore_file(
    FileId(id): FileId,
    State(service): State<Arc<FileService>>,
) -> Result<Json<ApiResponse<()>>> {
    service.restore(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("File restored".to_string()),
        None,
    )))
}

/// List files in the recycle bin
#[utoipa::path(
    get,
    path = "/files/recycle-bin",
    tag = "files",
    responses(
        (status = 200, description = "Soft-deleted files", body = ApiResponse<Vec<FileResponseDto>>),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn list_recycle_bin(
    State(service): State<Arc<FileService>>,
) -> Result<Json<ApiResponse<Vec<FileResponseDto>>>> {
    let files = service.list_recycle_bin().await?;
    Ok(Json(ApiResponse::list(files)))
}
