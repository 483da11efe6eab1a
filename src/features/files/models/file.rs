use chrono::{DateTime, Utc};
use pgvector::Vector;
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for files
#[derive(Debug, Clone, FromRow)]
pub struct File {
    pub id: Uuid,
    pub filename: String,
    pub content: String,
    pub embedding: Vector,
    pub created_at: DateTime<Utc>,
    /// Set while the file sits in the recycle bin
    pub deleted: bool,
}

/// Listing projection without content or embedding
#[derive(Debug, Clone, FromRow)]
pub struct FileMetadata {
    pub id: Uuid,
    pub filename: String,
    /// Content length in characters
    pub size: i64,
    pub created_at: DateTime<Utc>,
}

/// Row returned by similarity search
#[derive(Debug, Clone, FromRow)]
pub struct FileMatch {
    pub id: Uuid,
    pub filename: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    /// Cosine distance to the query vector
    pub distance: f64,
}

/// Writable columns, used for both insert and full-replace update
#[derive(Debug, Clone)]
pub struct FileInput {
    pub filename: String,
    pub content: String,
    pub embedding: Vector,
}
