use utoipa::{Modify, OpenApi};

use crate::features::embedding::{dtos as embedding_dtos, handlers as embedding_handlers};
use crate::features::files::{dtos as files_dtos, handlers as files_handlers};
use crate::features::search::{dtos as search_dtos, handlers as search_handlers};
use crate::shared::types::{ApiResponse, ErrorKind, ErrorResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Files
        files_handlers::upload_file,
        files_handlers::get_file,
        files_handlers::list_files,
        files_handlers::search_files_by_name,
        files_handlers::list_files_by_date_range,
        files_handlers::list_file_metadata,
        files_handlers::update_file,
        files_handlers::delete_file,
        files_handlers::soft_delete_file,
        files_handlers::restore_file,
        files_handlers::list_recycle_bin,
        // Search
        search_handlers::search_similar,
    ),
    components(
        schemas(
            Meta,
            ErrorKind,
            ErrorResponse,
            // Files
            files_dtos::FileRequestDto,
            files_dtos::FileResponseDto,
            files_dtos::FileMetadataDto,
            ApiResponse<files_dtos::FileResponseDto>,
            ApiResponse<Vec<files_dtos::FileResponseDto>>,
            ApiResponse<Vec<files_dtos::FileMetadataDto>>,
            // Search
            search_dtos::SearchRequestDto,
            search_dtos::SearchResultDto,
            ApiResponse<Vec<search_dtos::SearchResultDto>>,
        )
    ),
    tags(
        (name = "files", description = "File storage, lookup and recycle bin"),
        (name = "search", description = "Vector similarity search over stored embeddings"),
    ),
    info(
        title = "RAG File Service API",
        version = "0.1.0",
        description = "Storage and retrieval of text files with precomputed embeddings",
    )
)]
pub struct ApiDoc;

/// Document for the standalone embedding process
#[derive(OpenApi)]
#[openapi(
    paths(embedding_handlers::embed_text),
    components(
        schemas(
            ErrorKind,
            ErrorResponse,
            embedding_dtos::EmbedRequestDto,
            embedding_dtos::EmbedResponseDto,
        )
    ),
    tags(
        (name = "embedding", description = "Sentence embeddings (all-MiniLM-L6-v2, 384 dimensions)"),
    ),
    info(
        title = "Embedding Service API",
        version = "0.1.0",
        description = "Turns text into vectors accepted by the file API",
    )
)]
pub struct EmbeddingApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
