pub mod file_repository;
#[cfg(test)]
pub mod in_memory;

pub use file_repository::{FileRepository, PgFileRepository};
#[cfg(test)]
pub use in_memory::InMemoryFileRepository;
