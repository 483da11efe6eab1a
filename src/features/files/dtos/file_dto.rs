use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::features::files::models::{File, FileInput, FileMetadata};

/// Upload / update request body.
///
/// Every field is optional on the wire and nothing is rejected here; the
/// embedding dimension is checked by the database column type.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct FileRequestDto {
    #[serde(default)]
    #[schema(example = "report_2024.txt")]
    pub filename: String,
    #[serde(default)]
    pub content: String,
    /// Sentence embedding of `content` (384 floats)
    #[serde(default)]
    pub embedding: Option<Vec<f32>>,
}

impl From<FileRequestDto> for FileInput {
    fn from(dto: FileRequestDto) -> Self {
        Self {
            filename: dto.filename,
            content: dto.content,
            embedding: dto.embedding.unwrap_or_default().into(),
        }
    }
}

/// Response DTO for a stored file
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FileResponseDto {
    pub id: Uuid,
    pub filename: String,
    pub content: String,
    pub embedding: Vec<f32>,
    pub created_at: DateTime<Utc>,
    /// True while the file is in the recycle bin
    pub deleted: bool,
}

impl From<File> for FileResponseDto {
    fn from(f: File) -> Self {
        Self {
            id: f.id,
            filename: f.filename,
            content: f.content,
            embedding: f.embedding.to_vec(),
            created_at: f.created_at,
            deleted: f.deleted,
        }
    }
}

/// Lightweight listing entry; never carries content or embedding
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FileMetadataDto {
    pub id: Uuid,
    pub filename: String,
    /// Content length in characters
    pub size: i64,
    pub created_at: DateTime<Utc>,
}

impl From<FileMetadata> for FileMetadataDto {
    fn from(m: FileMetadata) -> Self {
        Self {
            id: m.id,
            filename: m.filename,
            size: m.size,
            created_at: m.created_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct FilenameSearchQuery {
    /// Case-insensitive substring of the filename (required, non-empty)
    pub query: Option<String>,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct DateRangeQuery {
    /// First included day, `YYYY-MM-DD`
    pub start: Option<String>,
    /// Last included day, `YYYY-MM-DD`
    pub end: Option<String>,
}
