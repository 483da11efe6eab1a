pub mod embedder;
pub mod embedding_service;

pub use embedder::{Embedder, FastEmbedder};
pub use embedding_service::EmbeddingService;
