use async_trait::async_trait;
use axum::Router;
use axum_test::TestServer;
use chrono::{DateTime, Utc};
use fake::faker::lorem::en::Sentence;
use fake::Fake;
use pgvector::Vector;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::embedding::{self, Embedder, EmbeddingService, EMBEDDING_DIMENSION};
use crate::features::files::dtos::FileRequestDto;
use crate::features::files::models::File;
use crate::features::files::repositories::InMemoryFileRepository;
use crate::features::files::{self, FileService};
use crate::features::search::{self, SearchService};

/// Embedding width used by the in-memory repository in tests
pub const TEST_DIMENSION: usize = 3;

pub fn sample_request(filename: &str, embedding: Vec<f32>) -> FileRequestDto {
    FileRequestDto {
        filename: filename.to_string(),
        content: Sentence(3..8).fake(),
        embedding: Some(embedding),
    }
}

/// A stored row with an explicit creation time
pub fn file_created_at(filename: &str, created_at: DateTime<Utc>) -> File {
    File {
        id: Uuid::now_v7(),
        filename: filename.to_string(),
        content: Sentence(3..8).fake(),
        embedding: Vector::from(vec![1.0, 0.0, 0.0]),
        created_at,
        deleted: false,
    }
}

/// Files and search routes wired to one shared in-memory repository
pub fn test_app(repo: Arc<InMemoryFileRepository>) -> Router {
    let file_service = Arc::new(FileService::new(repo.clone()));
    let search_service = Arc::new(SearchService::new(repo));

    Router::new()
        .merge(files::routes(file_service))
        .merge(search::routes(search_service))
}

pub fn test_server() -> (TestServer, Arc<InMemoryFileRepository>) {
    let repo = Arc::new(InMemoryFileRepository::new(TEST_DIMENSION));
    let server = TestServer::new(test_app(repo.clone())).unwrap();
    (server, repo)
}

/// Deterministic stand-in for the ONNX model
#[derive(Debug)]
pub struct StubEmbedder {
    dimension: usize,
    width: usize,
    calls: AtomicUsize,
}

impl StubEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self::mismatched(dimension, dimension)
    }

    /// Claims `dimension` but produces `width` values
    pub fn mismatched(dimension: usize, width: usize) -> Self {
        Self {
            dimension,
            width,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Embedder for StubEmbedder {
    fn model_name(&self) -> &str {
        "stub"
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let seed: usize = text.bytes().map(usize::from).sum();
        Ok((0..self.width)
            .map(|i| ((seed + i) % 17) as f32 / 17.0)
            .collect())
    }
}

pub fn embedding_test_server() -> (TestServer, Arc<StubEmbedder>) {
    let embedder = Arc::new(StubEmbedder::new(EMBEDDING_DIMENSION));
    let service = Arc::new(EmbeddingService::new(embedder.clone()));
    let server = TestServer::new(embedding::routes(service)).unwrap();
    (server, embedder)
}
