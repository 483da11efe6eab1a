use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::features::files::models::FileMatch;

/// Number of neighbours returned when `limit` is omitted
pub const DEFAULT_SEARCH_LIMIT: i64 = 5;

fn default_limit() -> i64 {
    DEFAULT_SEARCH_LIMIT
}

/// A zero vector has no direction, so its cosine distance is undefined.
fn validate_has_direction(embedding: &[f32]) -> Result<(), ValidationError> {
    if !embedding.is_empty() && embedding.iter().all(|v| *v == 0.0) {
        let mut err = ValidationError::new("zero_vector");
        err.message = Some("query_embedding must not be all zeros".into());
        return Err(err);
    }
    Ok(())
}

/// Similarity search request
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SearchRequestDto {
    /// Query vector; must have the same dimension as stored embeddings
    #[validate(
        length(min = 1, message = "query_embedding must not be empty"),
        custom(function = "validate_has_direction")
    )]
    pub query_embedding: Vec<f32>,

    /// Maximum number of results
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100, message = "limit must be between 1 and 100"))]
    #[schema(example = 5, minimum = 1, maximum = 100)]
    pub limit: i64,
}

/// A stored file ranked by closeness to the query vector
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SearchResultDto {
    pub id: Uuid,
    pub filename: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    /// Cosine distance (0 = same direction, 2 = opposite). Always finite:
    /// files whose stored embedding is a zero vector are never returned.
    pub distance: f64,
}

impl From<FileMatch> for SearchResultDto {
    fn from(m: FileMatch) -> Self {
        Self {
            id: m.id,
            filename: m.filename,
            content: m.content,
            created_at: m.created_at,
            distance: m.distance,
        }
    }
}
