use async_trait::async_trait;
use chrono::Utc;
use pgvector::Vector;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::files::models::{File, FileInput, FileMatch, FileMetadata};
use crate::features::files::repositories::FileRepository;
use crate::shared::validation::DateRange;

/// In-memory `FileRepository` used by handler and service tests.
///
/// Emulates the fixed-dimension `vector` column and counts calls so tests can
/// assert that rejected requests never reach storage. Similarity search here
/// is exact.
#[derive(Debug)]
pub struct InMemoryFileRepository {
    files: RwLock<HashMap<Uuid, File>>,
    dimension: usize,
    calls: AtomicUsize,
}

impl InMemoryFileRepository {
    pub fn new(dimension: usize) -> Self {
        Self {
            files: RwLock::new(HashMap::new()),
            dimension,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of repository operations performed so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Seed a row directly, bypassing the call counter
    pub async fn insert(&self, file: File) {
        self.files.write().await.insert(file.id, file);
    }

    fn track(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    fn check_dimension(&self, embedding: &Vector) -> Result<()> {
        let len = embedding.as_slice().len();
        if len != self.dimension {
            return Err(AppError::Database(sqlx::Error::Protocol(format!(
                "expected {} dimensions, not {}",
                self.dimension, len
            ))));
        }
        Ok(())
    }

    async fn collect<F>(&self, keep: F) -> Vec<File>
    where
        F: Fn(&File) -> bool,
    {
        let files = self.files.read().await;
        let mut result: Vec<File> = files.values().filter(|f| keep(f)).cloned().collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        result
    }
}

fn cosine_distance(a: &[f32], b: &[f32]) -> f64 {
    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (x, y) in a.iter().zip(b) {
        let (x, y) = (*x as f64, *y as f64);
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    1.0 - dot / (norm_a.sqrt() * norm_b.sqrt())
}

#[async_trait]
impl FileRepository for InMemoryFileRepository {
    async fn create(&self, id: Uuid, input: FileInput) -> Result<File> {
        self.track();
        self.check_dimension(&input.embedding)?;

        let file = File {
            id,
            filename: input.filename,
            content: input.content,
            embedding: input.embedding,
            created_at: Utc::now(),
            deleted: false,
        };
        self.files.write().await.insert(id, file.clone());
        Ok(file)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<File>> {
        self.track();
        Ok(self.files.read().await.get(&id).cloned())
    }

    async fn list_active(&self) -> Result<Vec<File>> {
        self.track();
        Ok(self.collect(|f| !f.deleted).await)
    }

    async fn search_by_filename(&self, query: &str) -> Result<Vec<File>> {
        self.track();
        let needle = query.to_lowercase();
        Ok(self
            .collect(|f| !f.deleted && f.filename.to_lowercase().contains(&needle))
            .await)
    }

    async fn list_by_date_range(&self, range: DateRange) -> Result<Vec<File>> {
        self.track();
        Ok(self
            .collect(|f| !f.deleted && range.contains(&f.created_at))
            .await)
    }

    async fn list_metadata(&self) -> Result<Vec<FileMetadata>> {
        self.track();
        Ok(self
            .collect(|f| !f.deleted)
            .await
            .into_iter()
            .map(|f| FileMetadata {
                id: f.id,
                size: f.content.chars().count() as i64,
                filename: f.filename,
                created_at: f.created_at,
            })
            .collect())
    }

    async fn update(&self, id: Uuid, input: FileInput) -> Result<Option<File>> {
        self.track();
        let mut files = self.files.write().await;
        let Some(file) = files.get_mut(&id) else {
            return Ok(None);
        };
        self.check_dimension(&input.embedding)?;

        file.filename = input.filename;
        file.content = input.content;
        file.embedding = input.embedding;
        Ok(Some(file.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        self.track();
        Ok(self.files.write().await.remove(&id).is_some())
    }

    async fn set_deleted(&self, id: Uuid, deleted: bool) -> Result<bool> {
        self.track();
        match self.files.write().await.get_mut(&id) {
            Some(file) => {
                file.deleted = deleted;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_deleted(&self) -> Result<Vec<File>> {
        self.track();
        Ok(self.collect(|f| f.deleted).await)
    }

    async fn search_similar(&self, embedding: Vector, limit: i64) -> Result<Vec<FileMatch>> {
        self.track();
        self.check_dimension(&embedding)?;

        let query = embedding.as_slice();
        let mut matches: Vec<FileMatch> = self
            .collect(|f| !f.deleted)
            .await
            .into_iter()
            .map(|f| FileMatch {
                distance: cosine_distance(f.embedding.as_slice(), query),
                id: f.id,
                filename: f.filename,
                content: f.content,
                created_at: f.created_at,
            })
            .collect();

        matches.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        matches.truncate(limit.max(0) as usize);
        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_distance() {
        assert!(cosine_distance(&[1.0, 0.0], &[1.0, 0.0]).abs() < 1e-9);
        assert!((cosine_distance(&[1.0, 0.0], &[0.0, 1.0]) - 1.0).abs() < 1e-9);
        assert!((cosine_distance(&[1.0, 0.0], &[-1.0, 0.0]) - 2.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_dimension_mismatch_is_storage_error() {
        let repo = InMemoryFileRepository::new(3);
        let input = FileInput {
            filename: "a.txt".to_string(),
            content: String::new(),
            embedding: Vector::from(vec![1.0, 2.0]),
        };

        let result = repo.create(Uuid::now_v7(), input).await;
        assert!(matches!(result, Err(AppError::Database(_))));
        assert_eq!(repo.call_count(), 1);
    }
}
