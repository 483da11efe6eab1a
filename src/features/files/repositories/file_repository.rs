use async_trait::async_trait;
use pgvector::Vector;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::files::models::{File, FileInput, FileMatch, FileMetadata};
use crate::shared::validation::DateRange;

/// Persistence for file records. Every method is a single statement.
#[async_trait]
pub trait FileRepository: Send + Sync {
    async fn create(&self, id: Uuid, input: FileInput) -> Result<File>;

    /// Fetch regardless of the `deleted` flag
    async fn find_by_id(&self, id: Uuid) -> Result<Option<File>>;

    /// Non-deleted files, newest first
    async fn list_active(&self) -> Result<Vec<File>>;

    /// Non-deleted files whose filename contains `query`, ignoring case
    async fn search_by_filename(&self, query: &str) -> Result<Vec<File>>;

    async fn list_by_date_range(&self, range: DateRange) -> Result<Vec<File>>;

    async fn list_metadata(&self) -> Result<Vec<FileMetadata>>;

    /// Full replace of the writable columns. `None` when no row matched.
    async fn update(&self, id: Uuid, input: FileInput) -> Result<Option<File>>;

    /// Permanently remove the row. `false` when no row matched.
    async fn delete(&self, id: Uuid) -> Result<bool>;

    /// Set the recycle-bin flag unconditionally. `false` when no row matched.
    async fn set_deleted(&self, id: Uuid, deleted: bool) -> Result<bool>;

    async fn list_deleted(&self) -> Result<Vec<File>>;

    /// Nearest non-deleted files by cosine distance, served by the ivfflat
    /// index (approximate).
    ///
    /// With `lists = 100` and the default `ivfflat.probes = 1` only one list
    /// is scanned, so a small or skewed table can yield fewer than `limit`
    /// rows even when more non-deleted files exist.
    async fn search_similar(&self, embedding: Vector, limit: i64) -> Result<Vec<FileMatch>>;
}

const FILE_COLUMNS: &str = "id, filename, content, embedding, created_at, deleted";

/// Build an ILIKE pattern matching `query` literally anywhere in the value.
pub(crate) fn like_pattern(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len() + 2);
    escaped.push('%');
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

pub struct PgFileRepository {
    pool: PgPool,
}

impl std::fmt::Debug for PgFileRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgFileRepository")
            .field("pool", &"<PgPool>")
            .finish()
    }
}

impl PgFileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FileRepository for PgFileRepository {
    async fn create(&self, id: Uuid, input: FileInput) -> Result<File> {
        let query = format!(
            r#"
            INSERT INTO files (id, filename, content, embedding)
            VALUES ($1, $2, $3, $4)
            RETURNING {FILE_COLUMNS}
            "#
        );

        sqlx::query_as::<_, File>(&query)
            .bind(id)
            .bind(input.filename)
            .bind(input.content)
            .bind(input.embedding)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<File>> {
        let query = format!("SELECT {FILE_COLUMNS} FROM files WHERE id = $1");

        sqlx::query_as::<_, File>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_active(&self) -> Result<Vec<File>> {
        let query = format!(
            r#"
            SELECT {FILE_COLUMNS}
            FROM files
            WHERE deleted = false
            ORDER BY created_at DESC, id DESC
            "#
        );

        sqlx::query_as::<_, File>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn search_by_filename(&self, query: &str) -> Result<Vec<File>> {
        let sql = format!(
            r#"
            SELECT {FILE_COLUMNS}
            FROM files
            WHERE deleted = false AND filename ILIKE $1
            ORDER BY created_at DESC, id DESC
            "#
        );

        sqlx::query_as::<_, File>(&sql)
            .bind(like_pattern(query))
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_date_range(&self, range: DateRange) -> Result<Vec<File>> {
        let query = format!(
            r#"
            SELECT {FILE_COLUMNS}
            FROM files
            WHERE deleted = false AND created_at >= $1 AND created_at < $2
            ORDER BY created_at DESC, id DESC
            "#
        );

        sqlx::query_as::<_, File>(&query)
            .bind(range.start)
            .bind(range.end)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_metadata(&self) -> Result<Vec<FileMetadata>> {
        sqlx::query_as::<_, FileMetadata>(
            r#"
            SELECT id, filename, char_length(content)::BIGINT AS size, created_at
            FROM files
            WHERE deleted = false
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn update(&self, id: Uuid, input: FileInput) -> Result<Option<File>> {
        let query = format!(
            r#"
            UPDATE files
            SET filename = $2, content = $3, embedding = $4
            WHERE id = $1
            RETURNING {FILE_COLUMNS}
            "#
        );

        sqlx::query_as::<_, File>(&query)
            .bind(id)
            .bind(input.filename)
            .bind(input.content)
            .bind(input.embedding)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM files WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(result.rows_affected() > 0)
    }

    async fn set_deleted(&self, id: Uuid, deleted: bool) -> Result<bool> {
        let result = sqlx::query("UPDATE files SET deleted = $2 WHERE id = $1")
            .bind(id)
            .bind(deleted)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_deleted(&self) -> Result<Vec<File>> {
        let query = format!(
            r#"
            SELECT {FILE_COLUMNS}
            FROM files
            WHERE deleted = true
            ORDER BY created_at DESC, id DESC
            "#
        );

        sqlx::query_as::<_, File>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn search_similar(&self, embedding: Vector, limit: i64) -> Result<Vec<FileMatch>> {
        sqlx::query_as::<_, FileMatch>(
            r#"
            SELECT id, filename, content, created_at, embedding <=> $1 AS distance
            FROM files
            WHERE deleted = false
            ORDER BY embedding <=> $1
            LIMIT $2
            "#,
        )
        .bind(embedding)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }
}
