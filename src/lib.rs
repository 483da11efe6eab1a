//! File storage with vector-similarity search over PostgreSQL/pgvector, plus
//! the sentence-embedding service that produces the vectors.
//!
//! Two binaries share this library: `rag-file-service` (the file API) and
//! `embedding-service` (`POST /embed`). The file API never calls the
//! embedding service; clients embed text first and send the vector along.

pub mod core;
pub mod features;
pub mod shared;
