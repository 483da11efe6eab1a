pub mod file;

pub use file::{File, FileInput, FileMatch, FileMetadata};
