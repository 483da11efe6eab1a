pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::{Embedder, EmbeddingService, FastEmbedder};

/// Width of every vector produced by the embedding model; matches the
/// `vector(384)` column.
pub const EMBEDDING_DIMENSION: usize = 384;

/// Sentence-transformers model served by the embedding process
pub const MODEL_NAME: &str = "all-MiniLM-L6-v2";
